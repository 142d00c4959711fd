//! Track planning — how many duplicate card sets a viewport needs, and which
//! slots are visible at a given offset.
//!
//! Slot `i` on the track always shows original card `i % N`.  The first `N`
//! slots are the originals; every further block of `N` is one duplicate set.
//! Scrolling runs over `offset ∈ (-track_width, 0]`, so the rightmost visible
//! point is just short of `track_width + viewport_width`.  Content must reach
//! at least that far for the wrap to stay invisible.

use super::card::CardGeometry;

/// Precomputed dimensions of one track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    /// Number of original (non-duplicated) cards.
    pub original_count: usize,
    pub geometry: CardGeometry,
    /// `original_count * unit` — the distance after which the pattern repeats.
    pub track_width: f64,
    /// Duplicate sets appended after the originals (always `>= 1`).
    pub duplicate_sets: usize,
}

/// One card slot intersecting the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleSlot {
    /// Position on the full track (originals + duplicates).
    pub slot: usize,
    /// Index of the original card this slot shows.
    pub card: usize,
    /// Left edge relative to the viewport's left edge (may be negative).
    pub x: f64,
}

impl TrackLayout {
    /// Plan a track for `count` cards.  Returns `None` for an empty deck or
    /// a zero-width card.
    ///
    /// Duplicate sets are `max(min_duplicate_sets, ceil(viewport / track))`,
    /// the smallest number that keeps content ahead of the viewport for the
    /// whole scroll period.
    pub fn plan(
        count: usize,
        geometry: CardGeometry,
        viewport_width: f64,
        min_duplicate_sets: usize,
    ) -> Option<Self> {
        if count == 0 || !(geometry.unit() > 0.0) {
            return None;
        }
        let track_width = count as f64 * geometry.unit();
        let needed = (viewport_width.max(0.0) / track_width).ceil() as usize;
        Some(Self {
            original_count: count,
            geometry,
            track_width,
            duplicate_sets: needed.max(min_duplicate_sets).max(1),
        })
    }

    /// Originals plus every duplicate set.
    pub fn total_slots(&self) -> usize {
        self.original_count * (1 + self.duplicate_sets)
    }

    /// Width of all slots laid end to end (trailing margins included).
    pub fn content_width(&self) -> f64 {
        self.total_slots() as f64 * self.geometry.unit()
    }

    /// True when no offset in `(-track_width, 0]` exposes empty space.
    pub fn covers(&self, viewport_width: f64) -> bool {
        self.content_width() >= self.track_width + viewport_width
    }

    /// Original card shown by `slot`.
    pub fn source_index(&self, slot: usize) -> usize {
        slot % self.original_count
    }

    /// Slots that intersect `[0, viewport_width)` at the given offset, left
    /// to right.
    pub fn visible_slots(&self, offset: f64, viewport_width: f64) -> Vec<VisibleSlot> {
        let unit = self.geometry.unit();
        if unit <= 0.0 || viewport_width <= 0.0 {
            return Vec::new();
        }
        let first = ((-offset) / unit).floor().max(0.0) as usize;
        let mut out = Vec::new();
        for slot in first..self.total_slots() {
            let x = slot as f64 * unit + offset;
            if x >= viewport_width {
                break;
            }
            if x + self.geometry.width > 0.0 {
                out.push(VisibleSlot {
                    slot,
                    card: self.source_index(slot),
                    x,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo() -> CardGeometry {
        CardGeometry::new(250.0, 25.0)
    }

    #[test]
    fn empty_deck_has_no_plan() {
        assert!(TrackLayout::plan(0, geo(), 800.0, 1).is_none());
    }

    #[test]
    fn degenerate_geometry_has_no_plan() {
        assert!(TrackLayout::plan(3, CardGeometry::new(0.0, 0.0), 800.0, 1).is_none());
    }

    #[test]
    fn wide_track_keeps_the_minimum() {
        // 6 cards × 275 = 1650 ≥ 800, one set is enough.
        let plan = TrackLayout::plan(6, geo(), 800.0, 1).unwrap();
        assert_eq!(plan.track_width, 1650.0);
        assert_eq!(plan.duplicate_sets, 1);
        assert_eq!(plan.total_slots(), 12);
        assert!(plan.covers(800.0));

        let plan = TrackLayout::plan(6, geo(), 800.0, 2).unwrap();
        assert_eq!(plan.duplicate_sets, 2);
        assert_eq!(plan.total_slots(), 18);
    }

    #[test]
    fn narrow_track_gets_extra_sets() {
        // 2 cards × 275 = 550 against a 1200-wide viewport.
        let plan = TrackLayout::plan(2, geo(), 1200.0, 1).unwrap();
        assert_eq!(plan.duplicate_sets, 3);
        assert!(plan.total_slots() >= 4);
        assert!(plan.covers(1200.0));
    }

    #[test]
    fn every_plan_covers_its_viewport() {
        for n in 1..8 {
            for vw in [1.0, 100.0, 275.0, 550.0, 999.0, 2000.0, 5000.0] {
                for min in 1..4 {
                    let plan = TrackLayout::plan(n, geo(), vw, min).unwrap();
                    assert!(plan.total_slots() >= 2 * n);
                    assert!(plan.duplicate_sets >= min);
                    assert!(plan.covers(vw), "n={n} vw={vw} min={min}");
                }
            }
        }
    }

    #[test]
    fn zero_minimum_is_raised_to_one() {
        let plan = TrackLayout::plan(10, geo(), 10.0, 0).unwrap();
        assert_eq!(plan.duplicate_sets, 1);
    }

    #[test]
    fn visible_slots_at_rest() {
        let plan = TrackLayout::plan(3, CardGeometry::new(10.0, 2.0), 30.0, 1).unwrap();
        let slots = plan.visible_slots(0.0, 30.0);
        let xs: Vec<f64> = slots.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![0.0, 12.0, 24.0]);
        assert_eq!(slots[2].card, 2);
    }

    #[test]
    fn visible_slots_skip_cards_scrolled_out() {
        let plan = TrackLayout::plan(3, CardGeometry::new(10.0, 2.0), 30.0, 1).unwrap();
        // First card is fully gone once offset passes its width.
        let slots = plan.visible_slots(-10.5, 30.0);
        assert_eq!(slots[0].slot, 1);
        assert_eq!(slots[0].x, 1.5);
        // Near the end of the period the duplicates fill the viewport.
        let slots = plan.visible_slots(-35.5, 30.0);
        let cards: Vec<usize> = slots.iter().map(|s| s.card).collect();
        assert_eq!(cards, vec![0, 1, 2]);
        assert_eq!(slots[0].slot, 3);
        assert_eq!(slots.last().unwrap().slot, plan.total_slots() - 1);
    }

    #[test]
    fn source_index_wraps_over_duplicates() {
        let plan = TrackLayout::plan(4, geo(), 100.0, 2).unwrap();
        assert_eq!(plan.source_index(0), 0);
        assert_eq!(plan.source_index(5), 1);
        assert_eq!(plan.source_index(11), 3);
    }
}
