//! Custom Ratatui widget that draws one carousel panel: a bordered frame
//! with the visible slice of the track inside.
//!
//! Cards are drawn cell by cell so they can be clipped at any column on
//! either edge of the viewport.  A wide glyph whose other half falls outside
//! the viewport is blanked rather than spilling onto the border.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::app::state::CarouselPanel;

use super::card_face::{CardFace, FaceCell, Role};
use super::theme::Theme;

/// The carousel widget — created fresh each frame.
pub struct CarouselWidget<'a> {
    panel: &'a CarouselPanel,
    /// Slot to lift and highlight (the card under the pointer).
    hovered_slot: Option<usize>,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(panel: &'a CarouselPanel) -> Self {
        Self {
            panel,
            hovered_slot: None,
        }
    }

    pub fn hovered_slot(mut self, slot: Option<usize>) -> Self {
        self.hovered_slot = slot;
        self
    }

    fn block(&self) -> Block<'a> {
        let mut title = vec![Span::styled(
            format!(" {} ", self.panel.title),
            Theme::title_style(),
        )];
        if !self.panel.carousel.is_inert() && !self.panel.carousel.is_running() {
            title.push(Span::styled(" paused ", Theme::paused_badge_style()));
        }
        Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Theme::border_style())
    }
}

impl<'a> Widget for CarouselWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let offset = self.panel.ease.offset();
        for slot in self.panel.carousel.visible_slots(offset) {
            let Some(face) = self.panel.faces.get(slot.card) else {
                continue;
            };
            let lifted = self.hovered_slot == Some(slot.slot);
            // Resting cards sit one row down; the hovered card rises into
            // the spare row.
            let top = if lifted { inner.y } else { inner.y + 1 };
            draw_card(face, slot.x.floor() as i32, top, lifted, inner, buf);
        }
    }
}

/// Draw `face` with its left edge at viewport column `left`, clipped to
/// `viewport`.
fn draw_card(face: &CardFace, left: i32, top: u16, lifted: bool, viewport: Rect, buf: &mut Buffer) {
    let border = if lifted {
        Theme::card_hover_border_style()
    } else {
        Theme::card_border_style()
    };
    let w = face.width();
    let h = face.height();
    let last_col = w.saturating_sub(1);
    let last_row = h.saturating_sub(1);
    let visible = |col: i32| col >= 0 && col < viewport.width as i32;

    for lc in 0..w {
        let col = left + lc as i32;
        if !visible(col) {
            continue;
        }
        let x = viewport.x + col as u16;

        for r in 0..h {
            let y = top + r;
            if y >= viewport.y + viewport.height {
                break;
            }
            let (symbol, style): (&str, Style) = if r == 0 || r == last_row {
                let glyph = match (r == 0, lc) {
                    (true, 0) => "╭",
                    (true, c) if c == last_col => "╮",
                    (false, 0) => "╰",
                    (false, c) if c == last_col => "╯",
                    _ => "─",
                };
                (glyph, border)
            } else if lc == 0 || lc == last_col {
                ("│", border)
            } else {
                let row = (r - 1) as usize;
                match face.text_col(lc).map(|tc| (tc, face.cell(row, tc))) {
                    Some((_, FaceCell::Glyph(c, role))) => {
                        let wide = unicode_width::UnicodeWidthChar::width(c) == Some(2);
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            if wide && !visible(col + 1) {
                                cell.set_symbol(" ").set_style(role_style(role));
                            } else {
                                cell.set_char(c).set_style(role_style(role));
                            }
                        }
                        continue;
                    }
                    Some((tc, FaceCell::Continuation)) => {
                        // Covered by the wide glyph to the left unless that
                        // half is clipped away.
                        let style = match tc.checked_sub(1).map(|p| face.cell(row, p)) {
                            Some(FaceCell::Glyph(_, role)) => role_style(role),
                            _ => Style::default(),
                        };
                        if !visible(col - 1) {
                            (" ", style)
                        } else {
                            if let Some(cell) = buf.cell_mut((x, y)) {
                                cell.set_symbol("").set_style(style);
                            }
                            continue;
                        }
                    }
                    _ => (" ", Style::default()),
                }
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}

fn role_style(role: Role) -> Style {
    match role {
        Role::Title => Theme::card_title_style(),
        Role::Subtitle => Theme::card_subtitle_style(),
        Role::Blurb => Theme::card_blurb_style(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;
    use crate::core::card::Card;

    fn panel(cards: Vec<Card>) -> CarouselPanel {
        let config = CarouselConfig {
            title: "Test".into(),
            card_width: 10,
            card_margin: 2,
            card_height: 4,
            speed: 0.5,
            min_duplicate_sets: 1,
            cards,
        };
        CarouselPanel::mount(&config, 20)
    }

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn draws_cards_inside_the_border_one_row_down() {
        let p = panel(vec![Card::new("Alpha", "", ""), Card::new("Beta", "", "")]);
        let area = Rect::new(0, 0, 22, 7);
        let mut buf = Buffer::empty(area);
        CarouselWidget::new(&p).render(area, &mut buf);

        assert_eq!(row_text(&buf, 1, 22), "│                    │");
        assert_eq!(row_text(&buf, 2, 22), "│╭────────╮  ╭───────│");
        assert_eq!(row_text(&buf, 3, 22), "││ Alpha  │  │ Beta  │");
    }

    #[test]
    fn hovered_card_is_lifted() {
        let p = panel(vec![Card::new("Alpha", "", "")]);
        let area = Rect::new(0, 0, 22, 7);
        let mut buf = Buffer::empty(area);
        CarouselWidget::new(&p)
            .hovered_slot(Some(0))
            .render(area, &mut buf);
        // The single card repeats; only slot 0 rises into the spare row.
        assert_eq!(row_text(&buf, 1, 22), "│╭────────╮          │");
        assert_eq!(row_text(&buf, 2, 22), "││ Alpha  │  ╭───────│");
    }

    #[test]
    fn paused_badge_shows_in_the_title() {
        let mut p = panel(vec![Card::new("Alpha", "", "")]);
        p.carousel.pointer_enter();
        let area = Rect::new(0, 0, 22, 7);
        let mut buf = Buffer::empty(area);
        CarouselWidget::new(&p).render(area, &mut buf);
        assert!(row_text(&buf, 0, 22).contains("paused"));
    }

    #[test]
    fn clipped_wide_glyph_is_blanked() {
        let mut p = panel(vec![Card::new("苏绣", "", "")]);
        // Put the first glyph's left half just outside the viewport.
        for _ in 0..6 {
            p.on_frame();
        }
        while p.ease.offset() != p.carousel.frame().offset {
            p.ease.follow(p.carousel.frame(), 12.0);
        }
        assert_eq!(p.ease.offset(), -3.0);
        let area = Rect::new(0, 0, 22, 7);
        let mut buf = Buffer::empty(area);
        CarouselWidget::new(&p).render(area, &mut buf);
        // Card left edge is at viewport column -3: text column 0 ('苏') is at
        // -1 (clipped), its continuation at 0 is blanked.
        assert_eq!(buf[(1, 3)].symbol(), " ");
        assert_eq!(buf[(2, 3)].symbol(), "绣");
    }

    #[test]
    fn inert_panel_draws_only_the_frame() {
        let p = panel(Vec::new());
        let area = Rect::new(0, 0, 22, 7);
        let mut buf = Buffer::empty(area);
        CarouselWidget::new(&p).render(area, &mut buf);
        assert_eq!(row_text(&buf, 3, 22), "│                    │");
        assert!(!row_text(&buf, 0, 22).contains("paused"));
    }
}
