//! The carousel engine — a seamless, uniformly scrolling card strip that
//! pauses while the pointer hovers over it.
//!
//! Each [`Carousel`] owns its scroll state and its frame scheduler, so any
//! number of carousels can share a screen without sharing timers.  Every
//! method runs on the render thread; ticks never overlap.
//!
//! The wrap is a two-phase affair: the frame on which the offset jumps back
//! by one track width is reported with transitions disabled ([`WrapPhase::
//! Wrapping`]); the next display frame re-enables them ([`WrapPhase::Settled`])
//! before anything else happens.  Renderers that interpolate between frames
//! must not ease across the jump on a `Wrapping` frame.

use tracing::{debug, trace, warn};

use super::card::{Card, CardGeometry};
use super::scheduler::{FrameHandle, FrameScheduler};
use super::track::{TrackLayout, VisibleSlot};

/// Tunables for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub geometry: CardGeometry,
    /// Leftward displacement per frame.  Sub-unit values are expected.
    pub speed: f64,
    /// Floor on the number of duplicate card sets.
    pub min_duplicate_sets: usize,
}

/// Mutable scroll position.  `offset` is always `<= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub offset: f64,
    pub running: bool,
}

/// Wrap micro state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapPhase {
    /// Normal motion; transitions enabled.
    #[default]
    Settled,
    /// The offset just jumped back; this frame must be applied without a
    /// transition.
    Wrapping,
}

/// What the renderer applies for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackFrame {
    pub offset: f64,
    pub transition_enabled: bool,
}

/// One auto-scrolling carousel.
#[derive(Debug)]
pub struct Carousel<S: FrameScheduler> {
    cards: Vec<Card>,
    settings: CarouselSettings,
    /// `None` when the deck is empty — the carousel is inert.
    layout: Option<TrackLayout>,
    viewport_width: f64,
    state: ScrollState,
    phase: WrapPhase,
    pending: Option<FrameHandle>,
    scheduler: S,
    ticks: u64,
    wraps: u64,
}

impl<S: FrameScheduler> Carousel<S> {
    /// Lay out the track for `viewport_width` and start scrolling.
    ///
    /// An empty deck is not an error: the carousel stays inert and ignores
    /// frames and pointer events.
    pub fn mount(
        cards: Vec<Card>,
        mut settings: CarouselSettings,
        viewport_width: f64,
        scheduler: S,
    ) -> Self {
        if !settings.speed.is_finite() || settings.speed < 0.0 {
            warn!(speed = settings.speed, "invalid carousel speed, holding still");
            settings.speed = 0.0;
        }

        let layout = TrackLayout::plan(
            cards.len(),
            settings.geometry,
            viewport_width,
            settings.min_duplicate_sets,
        );

        let mut carousel = Self {
            cards,
            settings,
            layout,
            viewport_width,
            state: ScrollState::default(),
            phase: WrapPhase::Settled,
            pending: None,
            scheduler,
            ticks: 0,
            wraps: 0,
        };

        match carousel.layout {
            Some(layout) => {
                debug!(
                    cards = layout.original_count,
                    track_width = layout.track_width,
                    duplicate_sets = layout.duplicate_sets,
                    viewport_width,
                    "carousel mounted"
                );
                carousel.state.running = true;
                carousel.pending = Some(carousel.scheduler.schedule());
            }
            None => debug!("no cards to scroll, carousel stays inert"),
        }
        carousel
    }

    // ── frame driving ──────────────────────────────────────────

    /// Advance one display frame: settle a previous wrap, then run the tick
    /// if our scheduled handle fired.
    pub fn on_frame(&mut self) {
        if self.layout.is_none() {
            return;
        }
        if self.phase == WrapPhase::Wrapping {
            self.phase = WrapPhase::Settled;
        }
        for handle in self.scheduler.advance() {
            if self.pending == Some(handle) {
                self.pending = None;
                self.tick();
            } else {
                trace!(handle = handle.id(), "stray frame ignored");
            }
        }
    }

    fn tick(&mut self) {
        let Some(layout) = self.layout else {
            return;
        };
        self.ticks += 1;
        self.state.offset -= self.settings.speed;
        if self.state.offset <= -layout.track_width {
            // Whole track widths passed this tick; `%` is exact, so the
            // result lands in (-track_width, 0] even for huge steps.
            let passed = (-self.state.offset / layout.track_width).floor().max(1.0);
            self.state.offset = self.state.offset % layout.track_width + 0.0;
            self.wraps = self.wraps.saturating_add(passed as u64);
            self.phase = WrapPhase::Wrapping;
            trace!(offset = self.state.offset, wraps = self.wraps, "track wrapped");
        }
        if self.state.running {
            self.pending = Some(self.scheduler.schedule());
        }
    }

    // ── hover ──────────────────────────────────────────────────

    /// Pause: stop running and cancel the pending tick.  No-op when paused.
    pub fn pointer_enter(&mut self) {
        if self.layout.is_none() || !self.state.running {
            return;
        }
        self.state.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        trace!(offset = self.state.offset, "carousel paused");
    }

    /// Resume from the exact offset where we paused.  No-op when running.
    pub fn pointer_leave(&mut self) {
        if self.layout.is_none() || self.state.running {
            return;
        }
        self.state.running = true;
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.schedule());
        }
        trace!(offset = self.state.offset, "carousel resumed");
    }

    // ── layout ─────────────────────────────────────────────────

    /// Re-plan duplicate sets for a new viewport width.  Scroll position,
    /// run state and the pending tick are left alone.
    pub fn resize_viewport(&mut self, viewport_width: f64) {
        if viewport_width == self.viewport_width {
            return;
        }
        self.viewport_width = viewport_width;
        let Some(old) = self.layout else {
            return;
        };
        self.layout = TrackLayout::plan(
            old.original_count,
            self.settings.geometry,
            viewport_width,
            self.settings.min_duplicate_sets,
        );
        if let Some(layout) = self.layout {
            if layout.duplicate_sets != old.duplicate_sets {
                debug!(
                    from = old.duplicate_sets,
                    to = layout.duplicate_sets,
                    viewport_width,
                    "duplicate sets re-planned"
                );
            }
            if !layout.covers(viewport_width) {
                warn!(viewport_width, "track cannot cover viewport, gaps will show");
            }
        }
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn frame(&self) -> TrackFrame {
        TrackFrame {
            offset: self.state.offset,
            transition_enabled: self.phase == WrapPhase::Settled,
        }
    }

    /// Slots visible at `offset` (usually the renderer's eased offset).
    pub fn visible_slots(&self, offset: f64) -> Vec<VisibleSlot> {
        match &self.layout {
            Some(layout) => layout.visible_slots(offset, self.viewport_width),
            None => Vec::new(),
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[cfg(test)]
    pub fn phase(&self) -> WrapPhase {
        self.phase
    }

    pub fn layout(&self) -> Option<&TrackLayout> {
        self.layout.as_ref()
    }

    pub fn is_inert(&self) -> bool {
        self.layout.is_none()
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    #[cfg(test)]
    pub fn has_pending_tick(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    #[cfg(test)]
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
