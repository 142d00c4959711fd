//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Rows a carousel panel needs beyond its cards: the hover-lift row plus
/// the top and bottom border.
pub const PANEL_CHROME_ROWS: u16 = 3;

/// Carousel panels stacked top to bottom, then a status bar.
pub struct AppLayout {
    pub panels: Vec<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area and each panel's
    /// height.
    pub fn from_area(area: Rect, panel_heights: &[u16]) -> Self {
        let mut constraints: Vec<Constraint> = panel_heights
            .iter()
            .map(|h| Constraint::Length(*h))
            .collect();
        constraints.push(Constraint::Min(0)); // filler
        constraints.push(Constraint::Length(1)); // status bar

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let n = panel_heights.len();
        Self {
            panels: chunks[..n].to_vec(),
            status_area: chunks[n + 1],
        }
    }

    /// The clipping window inside a panel's border.
    pub fn viewport(panel: Rect) -> Rect {
        panel.inner(Margin::new(1, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_stack_above_the_status_bar() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24), &[9, 9]);
        assert_eq!(layout.panels, vec![Rect::new(0, 0, 80, 9), Rect::new(0, 9, 80, 9)]);
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn viewport_sits_inside_the_border() {
        assert_eq!(
            AppLayout::viewport(Rect::new(0, 9, 80, 9)),
            Rect::new(1, 10, 78, 7)
        );
    }
}
