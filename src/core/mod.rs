//! Core engine — card geometry, track planning, frame scheduling, and the
//! carousel itself.
//!
//! Nothing in this module depends on any TUI or rendering crate, so the
//! whole engine can be driven by a deterministic scheduler in tests.

pub mod card;
pub mod carousel;
pub mod scheduler;
pub mod track;
