//! # Identity, capture and events
//!
//! Recall is an immediate-mode control layer: the host re-runs its UI code
//! once per input event, and controls are plain function calls that both
//! draw themselves and react to the event. Nothing is retained between calls
//! except what lives in a few small stores described here.
//!
//! - [`ControlId`] / [`IdAllocator`]: call-order identity. The Nth `Button`
//!   declared in a cycle always gets the same id, in the layout pass, the
//!   repaint pass and the next frame.
//! - [`CaptureState`]: at most one control holds the mouse, at most one holds
//!   keyboard focus.
//! - [`StateRegistry`]: per-control state that outlives a single cycle, keyed
//!   by id.
//! - [`Event`]: the one event dispatched this cycle. A control that reacts to
//!   it calls `consume()`, and everyone after it sees [`EventKind::Used`].
//!
//! ```rust
//! use recall_core::*;
//!
//! let mut ids = IdAllocator::new();
//! let a = ids.allocate(KindSeed::BUTTON, None);
//! ids.begin_cycle();
//! let b = ids.allocate(KindSeed::BUTTON, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! assert_eq!(a, b);
//!
//! let mut capture = CaptureState::new();
//! assert!(capture.try_acquire_mouse(a));
//! let other = ids.allocate(KindSeed::BUTTON, None);
//! assert!(!capture.try_acquire_mouse(other));
//! ```
//!
//! ## Collaborators
//!
//! Drawing, clipping and time are traits so hosts can plug in their renderer
//! and tests can record what happened:
//!
//! - [`Painter`] with [`NullPainter`] and [`RecordingPainter`]
//! - [`ClipStack`] with [`NullClip`] and [`RecordingClip`]
//! - [`Clock`] with [`SystemClock`] and [`ManualClock`]
//!
//! Misuse that the layer can recover from (a grid with zero columns, a
//! missing texture) is reported through [`Diagnostics`] as a [`UiError`] and
//! logged with `log::warn!`; dispatch carries on.

pub mod capture;
pub mod clip;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod prelude;
pub mod runtime;
pub mod style;

pub use capture::*;
pub use clip::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use runtime::*;
pub use style::*;
