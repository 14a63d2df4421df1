//! Groups and clips.
//!
//! Both open a scope in which coordinates are relative to the scope rect
//! and hits outside it are ignored. A group also allocates an id (so it
//! must be declared on every event) and can draw a background; a clip is
//! geometry only. The returned guard closes the scope when dropped.

use std::ops::{Deref, DerefMut};

use recall_core::*;

use crate::Ui;
use crate::context::ScopeKind;

pub struct GroupScope<'a> {
    ui: &'a mut Ui,
    id: ControlId,
}

impl GroupScope<'_> {
    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn end(self) {}
}

impl Deref for GroupScope<'_> {
    type Target = Ui;
    fn deref(&self) -> &Ui {
        self.ui
    }
}

impl DerefMut for GroupScope<'_> {
    fn deref_mut(&mut self) -> &mut Ui {
        self.ui
    }
}

impl Drop for GroupScope<'_> {
    fn drop(&mut self) {
        self.ui.pop_scope(ScopeKind::Group);
    }
}

/// A group without background.
pub fn BeginGroup(ui: &mut Ui, rect: Rect) -> GroupScope<'_> {
    BeginGroupWith(ui, rect, Content::none(), None, Vec2::ZERO)
}

/// A group drawn with `style` behind its children. `scroll_offset` shifts
/// the children inside the group.
pub fn BeginGroupWith<'a>(
    ui: &'a mut Ui,
    rect: Rect,
    content: Content,
    style: Option<&Style>,
    scroll_offset: Vec2,
) -> GroupScope<'a> {
    let id = ui.control_id(KindSeed::BEGIN_GROUP, FocusType::Passive, Some(rect));
    if style.is_some() || !content.is_empty() {
        if ui.is_repaint() {
            let state = ui.draw_state(id, ui.hit(rect));
            match style {
                Some(style) => ui.draw(style, rect, &content, state),
                None => {
                    let style = ui.skin.box_style.clone();
                    ui.draw(&style, rect, &content, state);
                }
            }
        } else if ui.hit(rect) {
            ui.mark_mouse_used();
        }
    }
    ui.push_scope(ScopeKind::Group, rect, scroll_offset, Vec2::ZERO, false);
    GroupScope { ui, id }
}

pub fn Group(ui: &mut Ui, rect: Rect, content: impl FnOnce(&mut Ui)) {
    let mut group = BeginGroup(ui, rect);
    content(&mut *group);
}

pub struct ClipScope<'a> {
    ui: &'a mut Ui,
}

impl ClipScope<'_> {
    pub fn end(self) {}
}

impl Deref for ClipScope<'_> {
    type Target = Ui;
    fn deref(&self) -> &Ui {
        self.ui
    }
}

impl DerefMut for ClipScope<'_> {
    fn deref_mut(&mut self) -> &mut Ui {
        self.ui
    }
}

impl Drop for ClipScope<'_> {
    fn drop(&mut self) {
        self.ui.pop_scope(ScopeKind::Clip);
    }
}

pub fn BeginClip(ui: &mut Ui, rect: Rect) -> ClipScope<'_> {
    BeginClipWith(ui, rect, Vec2::ZERO, Vec2::ZERO, false)
}

/// `render_offset` is forwarded to the clip collaborator only. With
/// `reset_transform` the clip does not intersect the enclosing ones.
pub fn BeginClipWith(
    ui: &mut Ui,
    rect: Rect,
    scroll_offset: Vec2,
    render_offset: Vec2,
    reset_transform: bool,
) -> ClipScope<'_> {
    ui.push_scope(ScopeKind::Clip, rect, scroll_offset, render_offset, reset_transform);
    ClipScope { ui }
}

pub fn Clip(ui: &mut Ui, rect: Rect, content: impl FnOnce(&mut Ui)) {
    let mut clip = BeginClip(ui, rect);
    content(&mut *clip);
}
