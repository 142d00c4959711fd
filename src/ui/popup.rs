//! Popup overlay with key hints and live carousel diagnostics.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::state::CarouselPanel;

// ───────────────────────────────────────── help popup ────────

/// Help overlay: one block of stats per carousel, then the key list.
pub struct HelpPopup<'a> {
    pub panels: &'a [CarouselPanel],
}

impl<'a> HelpPopup<'a> {
    fn panel_lines(panel: &CarouselPanel) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White);
        let c = &panel.carousel;

        let mut lines = vec![Line::from(Span::styled(
            format!("  {}", panel.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))];

        let Some(layout) = c.layout() else {
            lines.push(Line::from(Span::styled("    no cards (inert)", label)));
            return lines;
        };

        let run_state = if c.is_running() { "running" } else { "paused" };
        lines.push(Line::from(vec![
            Span::styled("    cards ", label),
            Span::styled(format!("{}", layout.original_count), value),
            Span::styled("  sets ", label),
            Span::styled(format!("1+{}", layout.duplicate_sets), value),
            Span::styled("  speed ", label),
            Span::styled(format!("{:.2}", c.settings().speed), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled("    offset ", label),
            Span::styled(
                format!("{:.1}/{:.0}", c.state().offset, -layout.track_width),
                value,
            ),
            Span::styled("  ticks ", label),
            Span::styled(format!("{}", c.ticks()), value),
            Span::styled("  wraps ", label),
            Span::styled(format!("{}", c.wraps()), value),
            Span::styled(format!("  {run_state}"), Style::default().fg(Color::Yellow)),
        ]));
        lines
    }
}

impl<'a> Widget for HelpPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::raw("")];
        for panel in self.panels {
            lines.extend(Self::panel_lines(panel));
            lines.push(Line::raw(""));
        }
        let dim = Style::default().fg(Color::DarkGray);
        lines.push(Line::from(Span::styled(
            "  Hover a carousel to pause it",
            dim,
        )));
        lines.push(Line::from(Span::styled(
            "  Click: show card  q/Esc: quit  ?: close",
            dim,
        )));

        let height = lines.len() as u16 + 2;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Carousels ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);
        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// A rectangle of the given size centred in `area`, shrunk to fit.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppState;
    use crate::config::AppConfig;

    #[test]
    fn centered_fixed_shrinks_to_fit() {
        assert_eq!(
            centered_fixed(52, 10, Rect::new(0, 0, 100, 30)),
            Rect::new(24, 10, 52, 10)
        );
        assert_eq!(
            centered_fixed(52, 10, Rect::new(0, 0, 40, 6)),
            Rect::new(0, 0, 40, 6)
        );
    }

    #[test]
    fn lists_every_carousel() {
        let state = AppState::new(&AppConfig::default(), Rect::new(0, 0, 100, 30));
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        HelpPopup {
            panels: &state.panels,
        }
        .render(area, &mut buf);

        let text: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("History Figures"));
        assert!(text.contains("Heritage Masters"));
        assert!(text.contains("1+2"));
        assert!(text.contains("running"));
    }
}
