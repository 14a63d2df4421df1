//! Button family: one small state machine shared by buttons, toggles and
//! grid cells, plus the press-and-hold repeat button.
//!
//! ```text
//! Idle --down inside, capture free--> Armed --drag--> Armed
//!   ^                                   |
//!   +------------- up (release) --------+   result = pointer inside
//! ```

use recall_core::*;

use crate::Ui;

/// Drive the button state machine for `id` and draw it. Returns the new
/// value: `!on` when the control was activated this cycle, `on` otherwise.
pub fn do_control(
    ui: &mut Ui,
    id: ControlId,
    rect: Rect,
    on: bool,
    content: &Content,
    style: &Style,
) -> bool {
    let inside = ui.hit(rect);
    match ui.event_kind(id) {
        EventKind::PointerDown => {
            if inside && ui.capture_mut().try_acquire_mouse(id) {
                ui.consume_event();
            }
        }
        EventKind::PointerDrag => {
            if ui.capture().has_mouse(id) {
                ui.consume_event();
            }
        }
        EventKind::PointerUp => {
            if ui.capture().has_mouse(id) {
                ui.capture_mut().release_mouse(id);
                ui.consume_event();
                if inside {
                    ui.set_changed();
                    return !on;
                }
            }
        }
        EventKind::KeyDown => {
            let e = ui.event();
            let activates =
                e.key.is_some_and(Key::is_activation) && !e.modifiers.any_command();
            if activates && ui.capture().has_keyboard_focus(id) {
                ui.consume_event();
                ui.set_changed();
                return !on;
            }
        }
        EventKind::Repaint => {
            if inside {
                ui.mark_mouse_used();
            }
            let state = DrawState {
                selected: on,
                ..ui.draw_state(id, inside)
            };
            ui.draw(style, rect, content, state);
        }
        _ => {}
    }
    on
}

/// A push button. True on the cycle it is clicked (released inside).
pub fn Button(ui: &mut Ui, rect: Rect, content: impl Into<Content>) -> bool {
    let style = ui.skin.button.clone();
    ButtonStyled(ui, rect, content, &style)
}

pub fn ButtonStyled(ui: &mut Ui, rect: Rect, content: impl Into<Content>, style: &Style) -> bool {
    let id = ui.control_id(KindSeed::BUTTON, FocusType::Passive, Some(rect));
    do_control(ui, id, rect, false, &content.into(), style)
}

/// An on/off toggle. The caller owns the value and stores what this returns.
pub fn Toggle(ui: &mut Ui, rect: Rect, value: bool, content: impl Into<Content>) -> bool {
    let style = ui.skin.toggle.clone();
    ToggleStyled(ui, rect, value, content, &style)
}

pub fn ToggleStyled(
    ui: &mut Ui,
    rect: Rect,
    value: bool,
    content: impl Into<Content>,
    style: &Style,
) -> bool {
    let id = ui.control_id(KindSeed::TOGGLE, FocusType::Passive, Some(rect));
    do_control(ui, id, rect, value, &content.into(), style)
}

/// A button that reports "held" on every repaint while it is captured and
/// the pointer is over it. Pointer-down itself always returns false.
pub fn RepeatButton(ui: &mut Ui, rect: Rect, content: impl Into<Content>) -> bool {
    let style = ui.skin.button.clone();
    do_repeat_button(ui, rect, &content.into(), &style, FocusType::Passive)
}

pub(crate) fn do_repeat_button(
    ui: &mut Ui,
    rect: Rect,
    content: &Content,
    style: &Style,
    focus: FocusType,
) -> bool {
    let id = ui.control_id(KindSeed::REPEAT_BUTTON, focus, Some(rect));
    let inside = ui.hit(rect);
    match ui.event_kind(id) {
        EventKind::PointerDown => {
            if inside && ui.capture_mut().try_acquire_mouse(id) {
                ui.consume_event();
            }
            false
        }
        EventKind::PointerDrag => {
            if ui.capture().has_mouse(id) {
                ui.consume_event();
            }
            false
        }
        EventKind::PointerUp => {
            if ui.capture().has_mouse(id) {
                ui.capture_mut().release_mouse(id);
                ui.consume_event();
                return inside;
            }
            false
        }
        EventKind::Repaint => {
            let state = ui.draw_state(id, inside);
            ui.draw(style, rect, content, state);
            let held = ui.capture().has_mouse(id) && inside;
            if held {
                ui.request_repaint();
            }
            held
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(10.0, 10.0, 80.0, 20.0);

    fn click(ui: &mut Ui, event: Event) -> bool {
        ui.begin_cycle(event);
        let clicked = Button(ui, RECT, "OK");
        ui.end_cycle().unwrap();
        clicked
    }

    #[test]
    fn button_consumes_down_inside_only() {
        let mut ui = Ui::headless();
        ui.begin_cycle(Event::pointer_down(Vec2::new(0.0, 0.0)));
        Button(&mut ui, RECT, "OK");
        assert!(!ui.event().is_used());
        assert!(ui.capture().is_mouse_free());
        ui.end_cycle().unwrap();

        ui.begin_cycle(Event::pointer_down(Vec2::new(20.0, 20.0)));
        Button(&mut ui, RECT, "OK");
        assert!(ui.event().is_used());
        assert!(!ui.capture().is_mouse_free());
        ui.end_cycle().unwrap();
    }

    #[test]
    fn drag_is_consumed_while_captured() {
        let mut ui = Ui::headless();
        click(&mut ui, Event::pointer_down(Vec2::new(20.0, 20.0)));
        ui.begin_cycle(Event::pointer_drag(Vec2::new(200.0, 200.0), Vec2::new(180.0, 180.0)));
        Button(&mut ui, RECT, "OK");
        assert!(ui.event().is_used());
        ui.end_cycle().unwrap();
    }

    #[test]
    fn toggle_flips_on_click_and_sets_changed() {
        let mut ui = Ui::headless();
        let mut value = false;
        for event in [
            Event::pointer_down(Vec2::new(20.0, 20.0)),
            Event::pointer_up(Vec2::new(20.0, 20.0)),
        ] {
            ui.begin_cycle(event);
            value = Toggle(&mut ui, RECT, value, "Wrap");
            ui.end_cycle().unwrap();
        }
        assert!(value);
        assert!(ui.take_changed());
        assert!(!ui.changed());
    }

    #[test]
    fn keyboard_activation_needs_focus_and_no_modifiers() {
        let mut ui = Ui::headless();
        ui.begin_cycle(Event::layout(Vec2::ZERO));
        let id = ui.control_id(KindSeed::TOGGLE, FocusType::Passive, None);
        ui.end_cycle().unwrap();

        ui.begin_cycle(Event::key_down(Key::Space));
        assert!(!Toggle(&mut ui, RECT, false, "x"));
        ui.end_cycle().unwrap();

        ui.capture_mut().set_keyboard_focus(id);
        ui.begin_cycle(Event::key_down(Key::Enter).with_modifiers(Modifiers::CONTROL));
        assert!(!Toggle(&mut ui, RECT, false, "x"));
        ui.end_cycle().unwrap();

        ui.begin_cycle(Event::key_down(Key::Enter));
        assert!(Toggle(&mut ui, RECT, false, "x"));
        assert!(ui.event().is_used());
        ui.end_cycle().unwrap();
    }

    #[test]
    fn repeat_button_reports_held_on_repaint() {
        let mut ui = Ui::headless();
        let at = Vec2::new(20.0, 20.0);

        ui.begin_cycle(Event::pointer_down(at));
        assert!(!RepeatButton(&mut ui, RECT, "+"));
        ui.end_cycle().unwrap();

        ui.begin_cycle(Event::repaint(at));
        assert!(RepeatButton(&mut ui, RECT, "+"));
        assert!(ui.needs_repaint());
        ui.end_cycle().unwrap();

        // dragged off: still captured but no longer held
        ui.begin_cycle(Event::repaint(Vec2::new(200.0, 200.0)));
        assert!(!RepeatButton(&mut ui, RECT, "+"));
        ui.end_cycle().unwrap();

        ui.begin_cycle(Event::pointer_up(at));
        assert!(RepeatButton(&mut ui, RECT, "+"));
        ui.end_cycle().unwrap();
        assert!(ui.capture().is_mouse_free());
    }

    #[test]
    fn repaint_draws_hover_and_capture() {
        let painter = RecordingPainter::new();
        let mut ui = Ui::new(painter.clone(), NullClip, SystemClock);
        click(&mut ui, Event::pointer_down(Vec2::new(20.0, 20.0)));
        click(&mut ui, Event::repaint(Vec2::new(20.0, 20.0)));

        let drawn = painter.styled();
        assert_eq!(drawn.len(), 1);
        let (style, rect, state) = &drawn[0];
        assert_eq!(style, "button");
        assert_eq!(*rect, RECT);
        assert!(state.hot && state.captured && state.enabled);
    }
}
