#![allow(non_snake_case)]
//! Immediate-mode controls on top of `recall-core`.
//!
//! Every widget is a function taking the [`Ui`] context first. Widgets must
//! be declared in the same order on every event of a frame; that order is
//! their identity.

pub mod context;
pub mod control;
pub mod grid;
pub mod group;
pub mod label;
pub mod scroll;
pub mod scrollbar;
pub mod slider;
pub mod textfield;

pub mod tests;

pub use context::Ui;
pub use control::*;
pub use grid::*;
pub use group::*;
pub use label::*;
pub use scroll::*;
pub use scrollbar::*;
pub use slider::*;
pub use textfield::*;
