//! Sliders and the shared thumb geometry used by scrollbars.
//!
//! A slider maps a value in `[start, end]` (either direction) onto a track.
//! With `size > 0` it is a scrollbar thumb covering `size` units of the range
//! and the largest reachable value is `max(start, end) - size`.

use recall_core::*;

use crate::Ui;

/// Thumb placement for one slider evaluation. Cheap; recomputed per call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderGeometry {
    pub track: Rect,
    pub thumb: Rect,
    pub horizontal: bool,
    pub start: f64,
    pub end: f64,
    pub size: f64,
    pub thumb_len: f64,
}

impl SliderGeometry {
    /// `fixed_thumb` is the thumb style's extent along the track; it is used
    /// for plain sliders (`size == 0`) when non-zero.
    pub fn new(
        track: Rect,
        value: f64,
        size: f64,
        start: f64,
        end: f64,
        horizontal: bool,
        min_thumb: f64,
        fixed_thumb: f64,
    ) -> Self {
        let track_len = if horizontal { track.w } else { track.h };
        let span = (end - start).abs();
        let thumb_len = if size == 0.0 && fixed_thumb > 0.0 {
            fixed_thumb
        } else if span + size > 0.0 {
            (track_len * size / (span + size)).max(min_thumb)
        } else {
            track_len
        }
        .min(track_len)
        .max(0.0);

        let mut geo = Self {
            track,
            thumb: track,
            horizontal,
            start,
            end,
            size,
            thumb_len,
        };
        let value = geo.clamp(value);
        let t = if end != start {
            (value - start) / (end - start)
        } else {
            0.0
        };
        let offset = t * (track_len - thumb_len);
        geo.thumb = if horizontal {
            Rect::new(track.x + offset, track.y, thumb_len, track.h)
        } else {
            Rect::new(track.x, track.y + offset, track.w, thumb_len)
        };
        geo
    }

    pub fn min_value(&self) -> f64 {
        self.start.min(self.end)
    }

    pub fn max_value(&self) -> f64 {
        (self.start.max(self.end) - self.size).max(self.min_value())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min_value();
        }
        value.clamp(self.min_value(), self.max_value())
    }

    /// Coordinate of `p` along the track axis.
    pub fn along(&self, p: Vec2) -> f64 {
        if self.horizontal { p.x } else { p.y }
    }

    pub fn thumb_start(&self) -> f64 {
        if self.horizontal { self.thumb.x } else { self.thumb.y }
    }

    fn track_start(&self) -> f64 {
        if self.horizontal { self.track.x } else { self.track.y }
    }

    fn track_len(&self) -> f64 {
        if self.horizontal { self.track.w } else { self.track.h }
    }

    /// Value whose thumb starts at `pointer - grab`, clamped.
    pub fn value_at(&self, pointer: Vec2, grab: f64) -> f64 {
        let free = self.track_len() - self.thumb_len;
        if free <= 0.0 {
            return self.clamp(self.start);
        }
        let t = (self.along(pointer) - grab - self.track_start()) / free;
        self.clamp(self.start + t * (self.end - self.start))
    }

    /// One page (`size`) toward the pointer; unchanged once the thumb is under it.
    pub fn page_toward(&self, value: f64, pointer: Vec2) -> f64 {
        let p = self.along(pointer);
        let dir = if self.end >= self.start { 1.0 } else { -1.0 };
        let thumb_start = self.thumb_start();
        let delta = if p < thumb_start {
            -self.size * dir
        } else if p >= thumb_start + self.thumb_len {
            self.size * dir
        } else {
            0.0
        };
        self.clamp(value + delta)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum SliderDrag {
    /// Dragging the thumb; `grab` is the pointer's offset from the thumb start.
    Thumb { grab: f64 },
    /// Held in the trough of a scrollbar, paging on the repeat timer.
    Trough,
}

pub(crate) fn do_slider(
    ui: &mut Ui,
    id: ControlId,
    rect: Rect,
    value: f64,
    size: f64,
    start: f64,
    end: f64,
    track_style: &Style,
    thumb_style: &Style,
    horizontal: bool,
) -> f64 {
    let min_thumb = ui.config.min_thumb_length;
    let fixed = if horizontal {
        thumb_style.fixed_width
    } else {
        thumb_style.fixed_height
    };
    let geometry = |v: f64| SliderGeometry::new(rect, v, size, start, end, horizontal, min_thumb, fixed);

    let geo = geometry(value);
    let mut value = geo.clamp(value);
    let inside = ui.hit(rect);
    let p = ui.pointer();

    match ui.event_kind(id) {
        EventKind::PointerDown => {
            if !inside || !ui.capture_mut().try_acquire_mouse(id) {
                return value;
            }
            ui.consume_event();
            let drag = if geo.thumb.contains(p) {
                SliderDrag::Thumb {
                    grab: geo.along(p) - geo.thumb_start(),
                }
            } else if size == 0.0 {
                let grab = geo.thumb_len / 2.0;
                value = geo.value_at(p, grab);
                ui.set_changed();
                SliderDrag::Thumb { grab }
            } else {
                let now = ui.now();
                ui.repeat.active = Some(id);
                ui.repeat.next_step = Some(now + ui.config.first_repeat_wait);
                value = geo.page_toward(value, p);
                ui.set_changed();
                SliderDrag::Trough
            };
            *ui.states_mut().get_or_insert_with(id, || drag) = drag;
        }
        EventKind::PointerDrag => {
            if ui.capture().has_mouse(id) {
                ui.consume_event();
                if let Some(SliderDrag::Thumb { grab }) = ui.states().get::<SliderDrag>(id).copied() {
                    let dragged = geo.value_at(p, grab);
                    if dragged != value {
                        value = dragged;
                        ui.set_changed();
                    }
                }
            }
        }
        EventKind::PointerUp => {
            if ui.capture().has_mouse(id) {
                ui.capture_mut().release_mouse(id);
                ui.consume_event();
                ui.states_mut().remove(id);
                if ui.repeat.active == Some(id) {
                    ui.repeat.active = None;
                }
            }
        }
        EventKind::Repaint => {
            let drag = ui.states().get::<SliderDrag>(id).copied();
            let captured = ui.capture().has_mouse(id);
            if captured && drag == Some(SliderDrag::Trough) {
                let now = ui.now();
                let due = ui.repeat.next_step.is_some_and(|t| now >= t);
                if ui.repeat.active == Some(id) && due {
                    let paged = geo.page_toward(value, p);
                    if paged != value {
                        value = paged;
                        ui.set_changed();
                    }
                    ui.repeat.next_step = Some(now + ui.config.repeat_interval);
                }
                ui.request_repaint();
            }

            let geo = geometry(value);
            let track_state = ui.draw_state(id, inside);
            ui.draw(track_style, rect, &Content::none(), track_state);
            let thumb_state = DrawState {
                hot: ui.hit(geo.thumb),
                captured: captured && matches!(drag, Some(SliderDrag::Thumb { .. })),
                ..track_state
            };
            ui.draw(thumb_style, geo.thumb, &Content::none(), thumb_state);
        }
        _ => {}
    }
    value
}

/// Generic slider: `size == 0` for a value slider, `size > 0` for a
/// scrollbar-style thumb.
pub fn Slider(
    ui: &mut Ui,
    rect: Rect,
    value: f64,
    size: f64,
    start: f64,
    end: f64,
    track_style: &Style,
    thumb_style: &Style,
    horizontal: bool,
) -> f64 {
    let id = ui.control_id(KindSeed::SLIDER, FocusType::Passive, Some(rect));
    do_slider(
        ui,
        id,
        rect,
        value,
        size,
        start,
        end,
        track_style,
        thumb_style,
        horizontal,
    )
}

pub fn HorizontalSlider(ui: &mut Ui, rect: Rect, value: f64, left: f64, right: f64) -> f64 {
    let track = ui.skin.horizontal_slider.clone();
    let thumb = ui.skin.horizontal_slider_thumb.clone();
    Slider(ui, rect, value, 0.0, left, right, &track, &thumb, true)
}

pub fn VerticalSlider(ui: &mut Ui, rect: Rect, value: f64, top: f64, bottom: f64) -> f64 {
    let track = ui.skin.vertical_slider.clone();
    let thumb = ui.skin.vertical_slider_thumb.clone();
    Slider(ui, rect, value, 0.0, top, bottom, &track, &thumb, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn geo(value: f64, size: f64, start: f64, end: f64) -> SliderGeometry {
        SliderGeometry::new(
            Rect::new(0.0, 0.0, 110.0, 10.0),
            value,
            size,
            start,
            end,
            true,
            12.0,
            0.0,
        )
    }

    #[test]
    fn thumb_length_is_proportional_with_minimum() {
        assert_eq!(geo(0.0, 10.0, 0.0, 100.0).thumb_len, 12.0);
        assert_eq!(geo(0.0, 100.0, 0.0, 100.0).thumb_len, 55.0);
        assert_eq!(geo(0.0, 0.0, 0.0, 1.0).thumb_len, 12.0);
    }

    #[test]
    fn clamp_keeps_value_in_reachable_range() {
        for (value, start, end) in [
            (-50.0, 0.0, 100.0),
            (500.0, 0.0, 100.0),
            (95.0, 0.0, 100.0),
            (-5.0, 100.0, 0.0),
            (f64::NAN, 0.0, 100.0),
        ] {
            let g = geo(value, 10.0, start, end);
            let v = g.clamp(value);
            assert!((0.0..=90.0).contains(&v), "{value} -> {v}");
        }
    }

    #[test]
    fn inverted_range_reverses_direction() {
        let forward = geo(0.0, 0.0, 0.0, 100.0);
        let inverted = geo(0.0, 0.0, 100.0, 0.0);
        assert_eq!(forward.thumb.x, 0.0);
        assert_eq!(inverted.thumb.x, 110.0 - 12.0);
    }

    #[test]
    fn value_at_inverts_thumb_position() {
        let g = geo(40.0, 0.0, 0.0, 98.0);
        // track 110, thumb 12 -> 98 free pixels, one unit per pixel
        assert!(approx(g.thumb.x, 40.0));
        assert!(approx(g.value_at(Vec2::new(50.0, 5.0), 10.0), 40.0));
        assert_eq!(g.value_at(Vec2::new(-30.0, 5.0), 0.0), 0.0);
    }

    #[test]
    fn thumb_drag_keeps_grab_offset() {
        let mut ui = Ui::headless();
        let rect = Rect::new(0.0, 0.0, 110.0, 10.0);
        let mut value = 40.0;
        let track = Style::named("track");
        let thumb = Style::named("thumb");
        for event in [
            Event::pointer_down(Vec2::new(45.0, 5.0)),
            Event::pointer_drag(Vec2::new(55.0, 5.0), Vec2::new(10.0, 0.0)),
            Event::pointer_up(Vec2::new(55.0, 5.0)),
        ] {
            ui.begin_cycle(event);
            value = Slider(&mut ui, rect, value, 0.0, 0.0, 98.0, &track, &thumb, true);
            ui.end_cycle().unwrap();
        }
        assert!(approx(value, 50.0), "{value}");
        assert!(ui.take_changed());
        assert!(ui.capture().is_mouse_free());
    }

    #[test]
    fn trough_click_on_slider_jumps_thumb() {
        let mut ui = Ui::headless();
        let rect = Rect::new(0.0, 0.0, 110.0, 10.0);
        let track = Style::named("track");
        let thumb = Style::named("thumb");
        ui.begin_cycle(Event::pointer_down(Vec2::new(86.0, 5.0)));
        let value = Slider(&mut ui, rect, 0.0, 0.0, 0.0, 98.0, &track, &thumb, true);
        ui.end_cycle().unwrap();
        // thumb centred under the pointer: starts at 86 - 6
        assert!(approx(value, 80.0), "{value}");
    }

    #[test]
    fn horizontal_slider_clamps_without_input() {
        let mut ui = Ui::headless();
        ui.begin_cycle(Event::repaint(Vec2::ZERO));
        assert_eq!(HorizontalSlider(&mut ui, Rect::new(0.0, 0.0, 100.0, 10.0), 7.0, 0.0, 5.0), 5.0);
        assert_eq!(VerticalSlider(&mut ui, Rect::new(0.0, 0.0, 10.0, 100.0), -1.0, 5.0, 0.0), 0.0);
        ui.end_cycle().unwrap();
    }
}
