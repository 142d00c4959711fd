//! User configuration — frame rate and carousel presets.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/heritage-reel/config.toml` (default
//! `~/.config/heritage-reel/config.toml`).  A missing file means defaults:
//! the two showcase carousels with their built-in cards.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::card::{Card, CardGeometry};
use crate::core::carousel::CarouselSettings;

/// Upper bound on the frame rate; anything above is wasted redraws.
pub const MAX_FPS: u32 = 240;

/// Narrowest card that still has room for a border and some text.
pub const MIN_CARD_WIDTH: u16 = 4;

/// Shortest card: top border, one text row, bottom border.
pub const MIN_CARD_HEIGHT: u16 = 3;

// ───────────────────────────────────────── errors ────────────

/// A config value that parses but cannot be used.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("fps must be between 1 and {max}, got {0}", max = MAX_FPS)]
    Fps(u32),
    #[error(
        "carousel `{carousel}`: card_width must be at least {min} columns, got {width}",
        min = MIN_CARD_WIDTH
    )]
    CardWidth { carousel: String, width: u16 },
    #[error(
        "carousel `{carousel}`: card_height must be at least {min} rows, got {height}",
        min = MIN_CARD_HEIGHT
    )]
    CardHeight { carousel: String, height: u16 },
    #[error("carousel `{carousel}`: speed must be finite and within (0, {unit}), got {speed}")]
    Speed {
        carousel: String,
        speed: f64,
        unit: u16,
    },
    #[error("carousel `{carousel}`: min_duplicate_sets must be at least 1")]
    DuplicateSets { carousel: String },
}

// ───────────────────────────────────────── model ─────────────

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Display frames per second; one carousel tick per frame.
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_carousels")]
    pub carousels: Vec<CarouselConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            carousels: default_carousels(),
        }
    }
}

/// One carousel row on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub title: String,
    /// Card width in terminal columns.
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    /// Gap after each card, in columns.
    #[serde(default = "default_card_margin")]
    pub card_margin: u16,
    /// Card height in rows, borders included.
    #[serde(default = "default_card_height")]
    pub card_height: u16,
    /// Columns per frame.  Fractions scroll smoothly.
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_min_duplicate_sets")]
    pub min_duplicate_sets: usize,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl CarouselConfig {
    pub fn settings(&self) -> CarouselSettings {
        CarouselSettings {
            geometry: CardGeometry::new(self.card_width as f64, self.card_margin as f64),
            speed: self.speed,
            min_duplicate_sets: self.min_duplicate_sets,
        }
    }

    fn unit(&self) -> u16 {
        self.card_width.saturating_add(self.card_margin)
    }
}

fn default_fps() -> u32 {
    60
}
fn default_card_width() -> u16 {
    26
}
fn default_card_margin() -> u16 {
    3
}
fn default_card_height() -> u16 {
    6
}
fn default_speed() -> f64 {
    0.5
}
fn default_min_duplicate_sets() -> usize {
    1
}

fn default_carousels() -> Vec<CarouselConfig> {
    vec![history_figures(), heritage_masters()]
}

fn history_figures() -> CarouselConfig {
    CarouselConfig {
        title: "History Figures".into(),
        card_width: 26,
        card_margin: 3,
        card_height: 6,
        speed: 0.5,
        min_duplicate_sets: 1,
        cards: vec![
            Card::new("Qu Yuan", "屈原 · Warring States", "Poet of the Chu Ci, remembered each Duanwu."),
            Card::new("Sima Qian", "司马迁 · Western Han", "Wrote the Records of the Grand Historian."),
            Card::new("Zhang Heng", "张衡 · Eastern Han", "Astronomer; built the first seismoscope."),
            Card::new("Li Bai", "李白 · Tang", "The immortal poet of wine and moonlight."),
            Card::new("Su Shi", "苏轼 · Northern Song", "Essayist, painter and calligrapher."),
            Card::new("Wen Tianxiang", "文天祥 · Southern Song", "Loyal minister; the Song of Righteousness."),
        ],
    }
}

fn heritage_masters() -> CarouselConfig {
    CarouselConfig {
        title: "Heritage Masters".into(),
        card_width: 30,
        card_margin: 3,
        card_height: 6,
        speed: 0.4,
        min_duplicate_sets: 2,
        cards: vec![
            Card::new("Suzhou Embroidery", "苏绣", "Double-sided silk needlework from Jiangsu."),
            Card::new("Jingdezhen Porcelain", "景德镇瓷", "Blue-and-white ware fired for a thousand years."),
            Card::new("Paper Cutting", "剪纸", "Red window flowers cut for the spring festival."),
            Card::new("Shadow Puppetry", "皮影戏", "Leather figures performed behind a lit screen."),
            Card::new("Kunqu Opera", "昆曲", "The oldest living form of Chinese opera."),
            Card::new("Longquan Celadon", "龙泉青瓷", "Jade-green glazes from Zhejiang kilns."),
        ],
    }
}

// ───────────────────────────────────────── validation ───────

impl AppConfig {
    /// Reject values the engine or renderer cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::Fps(self.fps));
        }
        for c in &self.carousels {
            if c.card_width < MIN_CARD_WIDTH {
                return Err(ConfigError::CardWidth {
                    carousel: c.title.clone(),
                    width: c.card_width,
                });
            }
            if c.card_height < MIN_CARD_HEIGHT {
                return Err(ConfigError::CardHeight {
                    carousel: c.title.clone(),
                    height: c.card_height,
                });
            }
            // A step of a whole unit or more would skip past cards entirely.
            if !c.speed.is_finite() || c.speed <= 0.0 || c.speed >= c.unit() as f64 {
                return Err(ConfigError::Speed {
                    carousel: c.title.clone(),
                    speed: c.speed,
                    unit: c.unit(),
                });
            }
            if c.min_duplicate_sets == 0 {
                return Err(ConfigError::DuplicateSets {
                    carousel: c.title.clone(),
                });
            }
        }
        Ok(())
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields defaults; an explicitly requested file
    /// must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };
        if !path.exists() {
            if explicit {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(contents).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/heritage-reel/config.toml`).
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("heritage-reel")
        .join("config.toml")
}
