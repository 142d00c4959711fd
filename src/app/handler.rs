//! Input handling — maps key/mouse events to state mutations.
//!
//! Pointer hover is the only signal the carousels consume: moving into a
//! carousel's viewport pauses it, moving out resumes it.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::debug;

use super::state::{ActiveView, AppState, Hover};
use crate::ui::layout::AppLayout;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Showcase => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
            KeyCode::Char('?') => state.active_view = ActiveView::Help,
            _ => {}
        },
        ActiveView::Help => match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                state.active_view = ActiveView::Showcase;
            }
            _ => {}
        },
    }
}

/// Process a mouse event: hover routing plus card clicks.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            update_hover(state, mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            update_hover(state, mouse.column, mouse.row);
            if let Some(Hover {
                panel,
                slot: Some(slot),
            }) = state.hover
            {
                let p = &state.panels[panel];
                if let Some(layout) = p.carousel.layout() {
                    let card = &p.carousel.cards()[layout.source_index(slot)];
                    state.status_message = Some(format!("{} · {}", p.title, card.title));
                }
            }
        }
        _ => {}
    }
}

/// The terminal lost focus: whatever carousel was hovered resumes.
pub fn handle_focus_lost(state: &mut AppState) {
    if let Some(hover) = state.hover.take() {
        state.panels[hover.panel].carousel.pointer_leave();
    }
}

/// Hit-test the pointer against every viewport and send enter/leave
/// signals to the carousels whose hover state changed.
fn update_hover(state: &mut AppState, col: u16, row: u16) {
    let layout = state.layout();
    let target = layout
        .panels
        .iter()
        .map(|rect| AppLayout::viewport(*rect))
        .enumerate()
        .find(|(_, vp)| point_in_rect(*vp, col, row));

    let previous = state.hover.map(|h| h.panel);
    let current = target.map(|(i, _)| i);
    if previous != current {
        if let Some(i) = previous {
            state.panels[i].carousel.pointer_leave();
        }
        if let Some(i) = current {
            state.panels[i].carousel.pointer_enter();
            debug!(panel = %state.panels[i].title, "pointer entered carousel");
        }
    }

    state.hover = target.map(|(panel, vp)| Hover {
        panel,
        slot: state.panels[panel].slot_at(col.saturating_sub(vp.x) as f64),
    });
}

fn point_in_rect(area: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::layout::Rect;

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), Rect::new(0, 0, 100, 30))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn hovering_pauses_only_that_carousel() {
        let mut s = state();
        // First panel viewport: rows 1..8, columns 1..99.
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 10, 3));
        assert!(!s.panels[0].carousel.is_running());
        assert!(s.panels[1].carousel.is_running());
        assert_eq!(s.hover, Some(Hover { panel: 0, slot: Some(0) }));

        for _ in 0..5 {
            s.on_frame();
        }
        assert_eq!(s.panels[0].carousel.state().offset, 0.0);
        assert!(s.panels[1].carousel.state().offset < 0.0);
    }

    #[test]
    fn moving_between_carousels_hands_over_the_pause() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 10, 3));
        // Second panel viewport: rows 10..17.
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 10, 12));
        assert!(s.panels[0].carousel.is_running());
        assert!(!s.panels[1].carousel.is_running());

        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 10, 25));
        assert!(s.panels.iter().all(|p| p.carousel.is_running()));
        assert_eq!(s.hover, None);
    }

    #[test]
    fn border_rows_do_not_count_as_hover() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 10, 0));
        assert_eq!(s.hover, None);
        assert!(s.panels[0].carousel.is_running());
    }

    #[test]
    fn gaps_between_cards_have_no_slot() {
        let mut s = state();
        // Viewport starts at column 1; card 0 covers 1..27, gap 27..30.
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 28, 3));
        assert_eq!(s.hover, Some(Hover { panel: 0, slot: None }));
        assert!(!s.panels[0].carousel.is_running());
    }

    #[test]
    fn focus_lost_resumes_the_hovered_carousel() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 10, 3));
        handle_focus_lost(&mut s);
        assert!(s.panels[0].carousel.is_running());
        assert_eq!(s.hover, None);
    }

    #[test]
    fn clicking_a_card_reports_it() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 31, 3));
        assert_eq!(
            s.status_message.as_deref(),
            Some("History Figures · Sima Qian")
        );
    }

    #[test]
    fn keys_toggle_help_and_quit() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('?')));
        assert_eq!(s.active_view, ActiveView::Help);
        handle_key(&mut s, key(KeyCode::Esc));
        assert_eq!(s.active_view, ActiveView::Showcase);
        assert!(!s.should_quit);
        handle_key(&mut s, key(KeyCode::Char('q')));
        assert!(s.should_quit);

        let mut s = state();
        handle_key(
            &mut s,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(s.should_quit);
    }
}
