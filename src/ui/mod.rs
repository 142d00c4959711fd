//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the engine's frames and turns them into cells on the
//! terminal.  It never mutates scroll state.

pub mod card_face;
pub mod carousel_widget;
pub mod layout;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;
