pub use crate::capture::CaptureState;
pub use crate::clip::{ClipStack, NullClip};
pub use crate::clock::{Clock, SystemClock};
pub use crate::config::UiConfig;
pub use crate::error::{Diagnostics, UiError};
pub use crate::geometry::{Rect, RectOffset, Size, Vec2};
pub use crate::input::{Event, EventKind, Key, Modifiers};
pub use crate::runtime::{ControlId, FocusType, KindSeed};
pub use crate::style::{Content, Painter, ScaleMode, Skin, Style, TextureId};
