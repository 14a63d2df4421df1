//! # Styles and the painter collaborator
//!
//! Controls never paint pixels themselves. During repaint cycles they call a
//! [`Painter`] with the style, geometry and interaction state; everything
//! else (skins, fonts, GPU work) lives behind that trait.
//!
//! A [`Style`] carries only the metrics the control layer needs for layout:
//! margins, padding, fixed sizes and a font size used for content
//! estimates.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Rect, RectOffset, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Content {
    pub text: String,
    pub image: Option<TextureId>,
    pub tooltip: Option<String>,
}

impl Content {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn image(image: TextureId) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.image.is_none()
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::text(s)
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::text(s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub name: String,
    pub margin: RectOffset,
    pub padding: RectOffset,
    /// 0 means "size from the rect / content".
    pub fixed_width: f64,
    pub fixed_height: f64,
    pub font_size: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            name: String::new(),
            margin: RectOffset::default(),
            padding: RectOffset::default(),
            fixed_width: 0.0,
            fixed_height: 0.0,
            font_size: 13.0,
        }
    }
}

impl Style {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_margin(mut self, margin: RectOffset) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: RectOffset) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_fixed_size(mut self, width: f64, height: f64) -> Self {
        self.fixed_width = width;
        self.fixed_height = height;
        self
    }

    /// Rough content size without a font service: half an em per character.
    pub fn estimate_size(&self, content: &Content) -> Size {
        let chars = content.text.chars().count() as f64;
        let mut width = chars * self.font_size * 0.5 + self.padding.horizontal();
        let mut height = self.font_size * 1.2 + self.padding.vertical();
        if content.image.is_some() {
            width += self.font_size;
            height = height.max(self.font_size + self.padding.vertical());
        }
        Size {
            width: if self.fixed_width != 0.0 { self.fixed_width } else { width },
            height: if self.fixed_height != 0.0 { self.fixed_height } else { height },
        }
    }
}

/// Interaction state handed to the painter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawState {
    /// Pointer over the control.
    pub hot: bool,
    /// Control holds mouse capture.
    pub captured: bool,
    /// On/selected (toggles, grid selection).
    pub selected: bool,
    pub keyboard_focus: bool,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleMode {
    StretchToFill,
    ScaleAndCrop,
    ScaleToFit,
}

/// Caret and selection of a focused text field, as byte offsets into the
/// displayed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextCursor {
    pub cursor: usize,
    pub select: usize,
}

pub trait Painter {
    fn draw(&mut self, style: &Style, rect: Rect, content: &Content, state: DrawState);

    /// `source` is in normalized texture coordinates.
    fn draw_texture(&mut self, texture: TextureId, screen: Rect, source: Rect) {
        let _ = (texture, screen, source);
    }

    /// Called instead of `draw` for a text field that has keyboard focus.
    fn draw_text_cursor(
        &mut self,
        style: &Style,
        rect: Rect,
        content: &Content,
        state: DrawState,
        cursor: TextCursor,
    ) {
        self.draw(style, rect, content, state);
        let _ = cursor;
    }

    fn measure(&self, style: &Style, content: &Content) -> Size {
        style.estimate_size(content)
    }
}

/// Painter for layout-only hosts and headless runs.
pub struct NullPainter;

impl Painter for NullPainter {
    fn draw(&mut self, _style: &Style, _rect: Rect, _content: &Content, _state: DrawState) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Styled {
        style: String,
        rect: Rect,
        content: Content,
        state: DrawState,
    },
    Texture {
        texture: TextureId,
        screen: Rect,
        source: Rect,
    },
    TextCursor {
        style: String,
        rect: Rect,
        text: String,
        state: DrawState,
        cursor: TextCursor,
    },
}

/// Records every draw request; handy for tests and debugging overlays.
/// Clones share the same log, so a host can keep one handle after giving
/// the other to the dispatcher.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    calls: Rc<RefCell<Vec<DrawCall>>>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }

    /// `(style name, rect, state)` of every styled draw, in call order.
    pub fn styled(&self) -> Vec<(String, Rect, DrawState)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Styled {
                    style, rect, state, ..
                } => Some((style.clone(), *rect, *state)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Painter for RecordingPainter {
    fn draw(&mut self, style: &Style, rect: Rect, content: &Content, state: DrawState) {
        self.calls.borrow_mut().push(DrawCall::Styled {
            style: style.name.clone(),
            rect,
            content: content.clone(),
            state,
        });
    }

    fn draw_texture(&mut self, texture: TextureId, screen: Rect, source: Rect) {
        self.calls.borrow_mut().push(DrawCall::Texture {
            texture,
            screen,
            source,
        });
    }

    fn draw_text_cursor(
        &mut self,
        style: &Style,
        rect: Rect,
        content: &Content,
        state: DrawState,
        cursor: TextCursor,
    ) {
        self.calls.borrow_mut().push(DrawCall::TextCursor {
            style: style.name.clone(),
            rect,
            text: content.text.clone(),
            state,
            cursor,
        });
    }
}

/// The styles a dispatcher draws with.
#[derive(Clone, Debug)]
pub struct Skin {
    pub label: Style,
    pub box_style: Style,
    pub button: Style,
    pub toggle: Style,
    pub text_field: Style,
    pub text_area: Style,
    pub horizontal_slider: Style,
    pub horizontal_slider_thumb: Style,
    pub vertical_slider: Style,
    pub vertical_slider_thumb: Style,
    pub horizontal_scrollbar: Style,
    pub horizontal_scrollbar_thumb: Style,
    pub horizontal_scrollbar_left_button: Style,
    pub horizontal_scrollbar_right_button: Style,
    pub vertical_scrollbar: Style,
    pub vertical_scrollbar_thumb: Style,
    pub vertical_scrollbar_up_button: Style,
    pub vertical_scrollbar_down_button: Style,
    pub scroll_view: Style,
    /// Extra named styles, e.g. "buttonleft" / "buttonmid" / "buttonright".
    pub custom: Vec<Style>,
}

impl Default for Skin {
    fn default() -> Self {
        let button_margin = RectOffset::uniform(4.0);
        let bar = 15.0;
        Self {
            label: Style::named("label").with_padding(RectOffset::new(3.0, 3.0, 3.0, 3.0)),
            box_style: Style::named("box").with_padding(RectOffset::uniform(4.0)),
            button: Style::named("button")
                .with_margin(button_margin)
                .with_padding(RectOffset::new(6.0, 6.0, 3.0, 3.0)),
            toggle: Style::named("toggle").with_margin(button_margin),
            text_field: Style::named("textfield")
                .with_margin(button_margin)
                .with_padding(RectOffset::new(3.0, 3.0, 1.0, 2.0)),
            text_area: Style::named("textarea")
                .with_margin(button_margin)
                .with_padding(RectOffset::new(3.0, 3.0, 1.0, 2.0)),
            horizontal_slider: Style::named("horizontalslider"),
            horizontal_slider_thumb: Style::named("horizontalsliderthumb")
                .with_fixed_size(10.0, 0.0),
            vertical_slider: Style::named("verticalslider"),
            vertical_slider_thumb: Style::named("verticalsliderthumb").with_fixed_size(0.0, 10.0),
            horizontal_scrollbar: Style::named("horizontalscrollbar")
                .with_margin(RectOffset::new(4.0, 4.0, 1.0, 4.0))
                .with_fixed_size(0.0, bar),
            horizontal_scrollbar_thumb: Style::named("horizontalscrollbarthumb"),
            horizontal_scrollbar_left_button: Style::named("horizontalscrollbarleftbutton")
                .with_fixed_size(bar, bar),
            horizontal_scrollbar_right_button: Style::named("horizontalscrollbarrightbutton")
                .with_fixed_size(bar, bar),
            vertical_scrollbar: Style::named("verticalscrollbar")
                .with_margin(RectOffset::new(1.0, 4.0, 4.0, 4.0))
                .with_fixed_size(bar, 0.0),
            vertical_scrollbar_thumb: Style::named("verticalscrollbarthumb"),
            vertical_scrollbar_up_button: Style::named("verticalscrollbarupbutton")
                .with_fixed_size(bar, bar),
            vertical_scrollbar_down_button: Style::named("verticalscrollbardownbutton")
                .with_fixed_size(bar, bar),
            scroll_view: Style::named("scrollview"),
            custom: Vec::new(),
        }
    }
}

impl Skin {
    pub fn find_style(&self, name: &str) -> Option<&Style> {
        self.custom.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn add_style(&mut self, style: Style) {
        self.custom.retain(|s| !s.name.eq_ignore_ascii_case(&style.name));
        self.custom.push(style);
    }
}
