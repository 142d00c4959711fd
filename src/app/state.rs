//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;
use tracing::debug;

use crate::config::{AppConfig, CarouselConfig};
use crate::core::carousel::Carousel;
use crate::core::scheduler::FrameQueue;
use crate::ui::card_face::CardFace;
use crate::ui::layout::{AppLayout, PANEL_CHROME_ROWS};
use crate::ui::smooth_scroll::SmoothScroll;

/// Ease factor for the displayed offset.
const DISPLAY_EASE: f64 = 0.6;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Showcase,
    Help,
}

/// Where the pointer currently rests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    /// Index into `AppState::panels`.
    pub panel: usize,
    /// Track slot under the pointer, if it is over a card and not a gap.
    pub slot: Option<usize>,
}

/// One on-screen carousel: the engine plus everything needed to draw it.
#[derive(Debug)]
pub struct CarouselPanel {
    pub title: String,
    pub card_height: u16,
    pub carousel: Carousel<FrameQueue>,
    pub ease: SmoothScroll,
    /// One face per original card, same order as the engine's cards.
    pub faces: Vec<CardFace>,
}

impl CarouselPanel {
    pub fn mount(config: &CarouselConfig, viewport_width: u16) -> Self {
        let faces = config
            .cards
            .iter()
            .map(|card| CardFace::build(card, config.card_width, config.card_height))
            .collect();
        Self {
            title: config.title.clone(),
            card_height: config.card_height,
            carousel: Carousel::mount(
                config.cards.clone(),
                config.settings(),
                viewport_width as f64,
                FrameQueue::new(),
            ),
            ease: SmoothScroll::new(DISPLAY_EASE),
            faces,
        }
    }

    /// Total rows the panel occupies, borders included.
    pub fn height(&self) -> u16 {
        self.card_height.saturating_add(PANEL_CHROME_ROWS)
    }

    /// One display frame: engine tick, then the display ease.
    pub fn on_frame(&mut self) {
        self.carousel.on_frame();
        let period = self.carousel.layout().map_or(0.0, |l| l.track_width);
        self.ease.follow(self.carousel.frame(), period);
    }

    /// Track slot under viewport-relative column `x`, using the offset as
    /// currently drawn.
    pub fn slot_at(&self, x: f64) -> Option<usize> {
        let width = self.carousel.settings().geometry.width;
        self.carousel
            .visible_slots(self.ease.offset())
            .into_iter()
            .find(|s| {
                let left = s.x.floor();
                x >= left && x < left + width
            })
            .map(|s| s.slot)
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    pub panels: Vec<CarouselPanel>,
    /// Last known terminal size, used to hit-test mouse events.
    pub terminal_area: Rect,
    pub hover: Option<Hover>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub active_view: ActiveView,
    pub fps: u32,
}

impl AppState {
    pub fn new(config: &AppConfig, terminal_area: Rect) -> Self {
        let heights: Vec<u16> = config
            .carousels
            .iter()
            .map(|c| c.card_height.saturating_add(PANEL_CHROME_ROWS))
            .collect();
        let layout = AppLayout::from_area(terminal_area, &heights);
        let panels = config
            .carousels
            .iter()
            .zip(&layout.panels)
            .map(|(c, rect)| CarouselPanel::mount(c, AppLayout::viewport(*rect).width))
            .collect();

        Self {
            panels,
            terminal_area,
            hover: None,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            fps: config.fps,
        }
    }

    pub fn layout(&self) -> AppLayout {
        let heights: Vec<u16> = self.panels.iter().map(CarouselPanel::height).collect();
        AppLayout::from_area(self.terminal_area, &heights)
    }

    /// Advance every carousel by one display frame.
    pub fn on_frame(&mut self) {
        for panel in &mut self.panels {
            panel.on_frame();
        }
    }

    /// New terminal size: re-plan every track for its new viewport width.
    ///
    /// The pointer position relative to the new layout is unknown until the
    /// next mouse event, so any hover is dropped and its carousel resumes.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        if let Some(hover) = self.hover.take() {
            self.panels[hover.panel].carousel.pointer_leave();
        }
        let layout = self.layout();
        for (panel, rect) in self.panels.iter_mut().zip(&layout.panels) {
            let viewport = AppLayout::viewport(*rect);
            panel.carousel.resize_viewport(viewport.width as f64);
        }
        debug!(width, height, "terminal resized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), Rect::new(0, 0, 100, 30))
    }

    #[test]
    fn mounts_one_running_panel_per_carousel() {
        let s = state();
        assert_eq!(s.panels.len(), 2);
        assert!(s.panels.iter().all(|p| p.carousel.is_running()));
        assert_eq!(s.panels[0].height(), 9);
        assert_eq!(s.panels[0].carousel.viewport_width(), 98.0);
        assert_eq!(s.panels[0].faces.len(), 6);
    }

    #[test]
    fn frames_move_each_panel_at_its_own_speed() {
        let mut s = state();
        for _ in 0..10 {
            s.on_frame();
        }
        assert_eq!(s.panels[0].carousel.state().offset, -5.0);
        assert!((s.panels[1].carousel.state().offset + 4.0).abs() < 1e-9);
    }

    #[test]
    fn resize_replans_viewports() {
        let mut s = state();
        s.resize(400, 30);
        assert_eq!(s.panels[0].carousel.viewport_width(), 398.0);
        // 6 × 29 = 174 columns of track against 398 columns of viewport.
        assert_eq!(s.panels[0].carousel.layout().unwrap().duplicate_sets, 3);
    }

    #[test]
    fn resize_drops_a_stale_hover() {
        let mut s = state();
        s.panels[0].carousel.pointer_enter();
        s.hover = Some(Hover {
            panel: 0,
            slot: Some(2),
        });
        s.resize(60, 12);
        assert_eq!(s.hover, None);
        assert!(s.panels[0].carousel.is_running());
        s.on_frame();
        assert_eq!(s.panels[0].carousel.state().offset, -0.5);
    }

    #[test]
    fn slot_at_finds_cards_and_gaps() {
        let s = state();
        // Cards are 26 wide with a 3-column gap.
        assert_eq!(s.panels[0].slot_at(0.0), Some(0));
        assert_eq!(s.panels[0].slot_at(25.0), Some(0));
        assert_eq!(s.panels[0].slot_at(27.0), None);
        assert_eq!(s.panels[0].slot_at(29.0), Some(1));
    }
}
