//! Card content and the fixed geometry every card on a track shares.

use serde::{Deserialize, Serialize};

/// A single showcase card.  Content never changes after mount; only the
/// card's position on the track moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub blurb: String,
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        blurb: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            blurb: blurb.into(),
        }
    }
}

/// Width and trailing margin shared by all cards on one track, in
/// viewport units (terminal columns).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub width: f64,
    pub margin: f64,
}

impl CardGeometry {
    pub fn new(width: f64, margin: f64) -> Self {
        Self { width, margin }
    }

    /// Repeat period of the pattern: card width plus its trailing margin.
    pub fn unit(&self) -> f64 {
        self.width + self.margin
    }
}
