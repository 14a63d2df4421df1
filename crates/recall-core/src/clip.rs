use std::cell::RefCell;
use std::rc::Rc;

use crate::{Rect, Vec2};

/// One entry of the clip/transform stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipEntry {
    pub rect: Rect,
    pub scroll_offset: Vec2,
    pub render_offset: Vec2,
    pub reset_transform: bool,
}

/// The low-level clip/transform collaborator. Pushes and pops are strictly
/// nested; balancing them is the dispatcher's job.
pub trait ClipStack {
    fn push(&mut self, rect: Rect, scroll_offset: Vec2, render_offset: Vec2, reset_transform: bool);
    fn pop(&mut self);
}

pub struct NullClip;

impl ClipStack for NullClip {
    fn push(&mut self, _rect: Rect, _scroll_offset: Vec2, _render_offset: Vec2, _reset: bool) {}
    fn pop(&mut self) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClipOp {
    Push(ClipEntry),
    Pop,
}

/// Keeps the live stack plus a log of every operation. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct RecordingClip {
    inner: Rc<RefCell<RecordingClipInner>>,
}

#[derive(Debug, Default)]
struct RecordingClipInner {
    stack: Vec<ClipEntry>,
    log: Vec<ClipOp>,
}

impl RecordingClip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.inner.borrow().stack.len()
    }

    pub fn top(&self) -> Option<ClipEntry> {
        self.inner.borrow().stack.last().copied()
    }

    pub fn log(&self) -> Vec<ClipOp> {
        self.inner.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.inner.borrow_mut().log.clear();
    }
}

impl ClipStack for RecordingClip {
    fn push(&mut self, rect: Rect, scroll_offset: Vec2, render_offset: Vec2, reset_transform: bool) {
        let entry = ClipEntry {
            rect,
            scroll_offset,
            render_offset,
            reset_transform,
        };
        let mut inner = self.inner.borrow_mut();
        inner.stack.push(entry);
        inner.log.push(ClipOp::Push(entry));
    }

    fn pop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        if inner.stack.pop().is_none() {
            log::warn!("clip stack: pop without matching push");
        }
        inner.log.push(ClipOp::Pop);
    }
}
