#[cfg(test)]
mod tests {
    use crate::*;
    use recall_core::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn run<T>(ui: &mut Ui, event: Event, frame: impl FnOnce(&mut Ui) -> T) -> T {
        ui.begin_cycle(event);
        let out = frame(ui);
        ui.end_cycle().unwrap();
        out
    }

    #[test]
    fn test_button_click_round_trip() {
        let mut ui = Ui::headless();
        let rect = Rect::new(10.0, 10.0, 80.0, 20.0);
        let inside = Vec2::new(50.0, 20.0);
        let outside = Vec2::new(150.0, 20.0);

        assert!(!run(&mut ui, Event::pointer_down(inside), |ui| Button(ui, rect, "OK")));
        assert!(run(&mut ui, Event::pointer_up(inside), |ui| Button(ui, rect, "OK")));
        assert!(ui.capture().is_mouse_free());

        // released outside: no click, capture still returned
        run(&mut ui, Event::pointer_down(inside), |ui| Button(ui, rect, "OK"));
        assert!(!run(&mut ui, Event::pointer_up(outside), |ui| Button(ui, rect, "OK")));
        assert!(ui.capture().is_mouse_free());

        // pressed outside: never armed
        run(&mut ui, Event::pointer_down(outside), |ui| Button(ui, rect, "OK"));
        assert!(!run(&mut ui, Event::pointer_up(inside), |ui| Button(ui, rect, "OK")));
    }

    #[test]
    fn test_capture_is_exclusive_for_overlapping_controls() {
        let mut ui = Ui::headless();
        let a = Rect::new(0.0, 0.0, 50.0, 20.0);
        let b = Rect::new(25.0, 0.0, 50.0, 20.0);
        let both = |ui: &mut Ui| (Button(ui, a, "a"), Button(ui, b, "b"));

        run(&mut ui, Event::pointer_down(Vec2::new(30.0, 10.0)), both);
        let owner = ui.capture().mouse_owner();
        assert!(owner.is_some());

        // up over b only: b never saw the press, a released off its rect
        assert_eq!(
            run(&mut ui, Event::pointer_up(Vec2::new(60.0, 10.0)), both),
            (false, false)
        );
        assert!(ui.capture().is_mouse_free());

        run(&mut ui, Event::pointer_down(Vec2::new(30.0, 10.0)), both);
        assert_eq!(ui.capture().mouse_owner(), owner);
        assert_eq!(
            run(&mut ui, Event::pointer_up(Vec2::new(30.0, 10.0)), both),
            (true, false)
        );
    }

    #[test]
    fn test_slider_values_stay_in_range() {
        let mut ui = Ui::headless();
        let rect = Rect::new(0.0, 0.0, 110.0, 10.0);
        let v = run(&mut ui, Event::layout(Vec2::ZERO), |ui| {
            (
                HorizontalSlider(ui, rect, 150.0, 0.0, 100.0),
                VerticalSlider(ui, Rect::new(0.0, 20.0, 10.0, 110.0), -5.0, 0.0, 100.0),
            )
        });
        assert_eq!(v, (100.0, 0.0));

        // grab the thumb and drag far past the end
        let mut value = 0.0;
        for event in [
            Event::pointer_down(Vec2::new(5.0, 5.0)),
            Event::pointer_drag(Vec2::new(500.0, 5.0), Vec2::new(495.0, 0.0)),
            Event::pointer_up(Vec2::new(500.0, 5.0)),
        ] {
            value = run(&mut ui, event, move |ui| HorizontalSlider(ui, rect, value, 0.0, 100.0));
        }
        assert_eq!(value, 100.0);
        assert!(ui.take_changed());
    }

    #[test]
    fn test_scrollbar_button_repeats_on_the_clock() {
        let clock = ManualClock::new();
        let mut ui = Ui::new(NullPainter, NullClip, clock.clone());
        let bar = Rect::new(0.0, 0.0, 100.0, 15.0);
        let right = Vec2::new(92.0, 7.0);
        let mut value = 0.0;
        let step = |ui: &mut Ui, event: Event, value: &mut f64| {
            let current = *value;
            *value = run(ui, event, move |ui| {
                HorizontalScrollbar(ui, bar, current, 10.0, 0.0, 100.0)
            });
        };

        step(&mut ui, Event::pointer_down(right), &mut value);
        assert_eq!(value, 0.0);
        step(&mut ui, Event::repaint(right), &mut value);
        assert_eq!(value, 10.0);
        assert!(ui.needs_repaint());

        // nothing until the first wait has passed
        clock.advance_ms(100);
        step(&mut ui, Event::repaint(right), &mut value);
        assert_eq!(value, 10.0);
        clock.advance_ms(150);
        step(&mut ui, Event::repaint(right), &mut value);
        assert_eq!(value, 20.0);
        clock.advance_ms(30);
        step(&mut ui, Event::repaint(right), &mut value);
        assert_eq!(value, 30.0);

        for _ in 0..20 {
            clock.advance_ms(30);
            step(&mut ui, Event::repaint(right), &mut value);
            assert!(value <= 90.0);
        }
        assert_eq!(value, 90.0);

        step(&mut ui, Event::pointer_up(right), &mut value);
        assert!(ui.capture().is_mouse_free());
    }

    #[test]
    fn test_toolbar_selects_on_release_inside() {
        let mut ui = Ui::headless();
        let rect = Rect::new(0.0, 0.0, 300.0, 30.0);
        let items: Vec<Content> = ["File", "Edit", "View"].map(Content::from).to_vec();
        let mut selected = 0;
        let frame = |ui: &mut Ui, event: Event, selected: &mut usize| {
            let current = *selected;
            *selected = run(ui, event, |ui| Toolbar(ui, rect, current, &items));
        };

        frame(&mut ui, Event::pointer_down(Vec2::new(250.0, 15.0)), &mut selected);
        frame(&mut ui, Event::pointer_up(Vec2::new(250.0, 15.0)), &mut selected);
        assert_eq!(selected, 2);
        assert!(ui.take_changed());

        frame(&mut ui, Event::pointer_down(Vec2::new(50.0, 15.0)), &mut selected);
        frame(&mut ui, Event::pointer_up(Vec2::new(150.0, 200.0)), &mut selected);
        assert_eq!(selected, 2);
        assert!(!ui.take_changed());
        assert!(ui.capture().is_mouse_free());
    }

    #[test]
    fn test_selection_grid_draws_every_cell_once() {
        let painter = RecordingPainter::new();
        let mut ui = Ui::new(painter.clone(), NullClip, SystemClock);
        let container = Rect::new(0.0, 0.0, 300.0, 100.0);
        let items: Vec<Content> = (0..7).map(|i| Content::text(i.to_string())).collect();

        run(&mut ui, Event::repaint(Vec2::ZERO), |ui| SelectionGrid(ui, container, 4, &items, 3));

        let drawn = painter.styled();
        assert_eq!(drawn.len(), 7);
        assert!(drawn.iter().all(|(_, r, _)| container.contains_rect(r)));
        assert!(drawn[6].2.selected);
        assert_eq!(drawn[6].1, Rect::new(101.0, 35.0, 97.0, 30.0));
    }

    #[test]
    fn test_ids_match_between_layout_and_repaint() {
        init_logs();
        let mut ui = Ui::headless();
        let mut scroll = Vec2::ZERO;
        let items: Vec<Content> = ["a", "b"].map(Content::from).to_vec();

        let mut frame = |ui: &mut Ui, event: Event| {
            run(ui, event, |ui| {
                let mut ids = Vec::new();
                Button(ui, Rect::new(0.0, 0.0, 50.0, 20.0), "top");
                {
                    let mut group = BeginGroup(ui, Rect::new(0.0, 30.0, 200.0, 200.0));
                    ids.push(group.id());
                    let mut view = BeginScrollView(
                        &mut group,
                        Rect::new(0.0, 0.0, 100.0, 100.0),
                        scroll,
                        Rect::new(0.0, 0.0, 80.0, 400.0),
                    );
                    scroll = view.scroll_position();
                    ids.push(view.id());
                    Toolbar(&mut view, Rect::new(0.0, 0.0, 80.0, 20.0), 0, &items);
                    TextField(&mut view, Rect::new(0.0, 30.0, 80.0, 20.0), "", None);
                }
                ids.push(ui.control_id(KindSeed::BUTTON, FocusType::Passive, None));
                (ids, ui.ids().allocated())
            })
        };

        let layout = frame(&mut ui, Event::layout(Vec2::ZERO));
        let repaint = frame(&mut ui, Event::repaint(Vec2::ZERO));
        assert_eq!(layout, repaint);
        assert_eq!(ui.focus_chain().len(), 1);
    }

    #[test]
    fn test_inertia_decays_to_rest_through_repaints() {
        let clock = ManualClock::new();
        let mut ui = Ui::new(NullPainter, NullClip, clock.clone());
        let view = Rect::new(0.0, 0.0, 100.0, 100.0);
        let content = Rect::new(0.0, 0.0, 80.0, 400.0);
        let mut scroll = Vec2::ZERO;
        let frame = |ui: &mut Ui, event: Event, scroll: &mut Vec2| {
            run(ui, event, |ui| {
                ScrollView(ui, view, scroll, content, |ui| {
                    Label(ui, Rect::new(0.0, 0.0, 80.0, 20.0), "row");
                })
            });
        };

        frame(
            &mut ui,
            Event::touch(EventKind::TouchDown, Vec2::new(50.0, 80.0)).with_modifiers(Modifiers::ALT),
            &mut scroll,
        );
        clock.advance_ms(50);
        frame(&mut ui, Event::touch(EventKind::TouchMove, Vec2::new(50.0, 40.0)), &mut scroll);
        frame(&mut ui, Event::touch(EventKind::TouchUp, Vec2::new(50.0, 40.0)), &mut scroll);
        assert!(ui.needs_repaint());

        let mut previous = 0.0;
        let mut repaints = 0;
        loop {
            clock.advance_ms(16);
            frame(&mut ui, Event::repaint(Vec2::new(50.0, 40.0)), &mut scroll);
            assert!(scroll.y >= previous);
            previous = scroll.y;
            repaints += 1;
            assert!(repaints < 1_000, "inertia never settled");
            if !ui.needs_repaint() {
                break;
            }
        }

        frame(&mut ui, Event::layout(Vec2::ZERO), &mut scroll);
        assert!(scroll.y > 40.0);
        assert!(scroll.y <= 300.0);
        assert!(!ui.needs_repaint());
    }
}
