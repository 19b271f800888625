//! # Section Entities
//!
//! The per-station cross-section model: one mutable [`Panel`] aggregate that
//! owns its [`Stringer`] stiffeners. Panels are mutated in place by the
//! reduction iteration and consumed read-only by the strength checker.

pub mod panel;
pub mod stringer;

pub use panel::Panel;
pub use stringer::{Stringer, StringerKind};
