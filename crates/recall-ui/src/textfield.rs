//! # Text fields
//!
//! The widgets here only dispatch: pointer and key events are routed to a
//! [`TextEditSession`] kept in the state registry under the field's id, and
//! the session's text is handed back to the caller. Glyph measurement and
//! IME belong to the session; the default [`TextEditor`] is a grapheme-aware
//! editor that assumes the same half-em advance as [`Style::estimate_size`].
//!
//! Session lifecycle per call: `set_text` with the caller's string, then
//! `detect_focus_change` with whether the field holds keyboard focus, then
//! the event.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use recall_core::*;

use crate::Ui;

/// How a drag extends the selection after a double or triple click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionSnap {
    #[default]
    Characters,
    Words,
    Paragraphs,
}

/// Editing state behind one text field. Indices are byte offsets into
/// [`text`](TextEditSession::text).
pub trait TextEditSession {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: &str);
    fn set_multiline(&mut self, multiline: bool);

    /// Called once per dispatch, before the event is handled.
    fn detect_focus_change(&mut self, has_focus: bool);
    fn has_focus(&self) -> bool;

    /// Insertion point nearest to `position`, relative to the text origin.
    fn index_at(&self, style: &Style, position: Vec2) -> usize;
    fn move_cursor_to(&mut self, index: usize);
    /// Extend the selection to `index`, honouring the drag snap.
    fn select_to(&mut self, index: usize);
    fn select_all(&mut self);
    fn select_current_word(&mut self);
    fn select_current_paragraph(&mut self);
    fn set_drag_snap(&mut self, snap: SelectionSnap);

    /// Editing and navigation keys. Returns false for keys that should be
    /// treated as text input (or ignored).
    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool;
    fn insert(&mut self, c: char);
    fn replace_selection(&mut self, text: &str);

    fn cursor(&self) -> TextCursor;
}

pub(crate) fn default_session() -> Box<dyn TextEditSession> {
    Box::new(TextEditor::new())
}

#[derive(Clone, Debug, Default)]
pub struct TextEditor {
    pub text: String,
    /// `start` is the anchor, `end` the caret. Not necessarily ordered.
    pub selection: Range<usize>,
    pub multiline: bool,
    has_focus: bool,
    snap: SelectionSnap,
    /// Word or paragraph a snapped drag started from.
    snap_origin: Option<Range<usize>>,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection with `start <= end`.
    pub fn ordered(&self) -> Range<usize> {
        let Range { start, end } = self.selection;
        start.min(end)..start.max(end)
    }

    pub fn has_selection(&self) -> bool {
        self.selection.start != self.selection.end
    }

    pub fn caret_index(&self) -> usize {
        self.selection.end
    }

    pub fn selected_text(&self) -> &str {
        &self.text[self.ordered()]
    }

    pub fn insert_text(&mut self, text: &str) {
        let Range { start, end } = self.ordered();
        let start = start.min(self.text.len());
        let end = end.min(self.text.len());

        self.text.replace_range(start..end, text);
        let new_pos = start + text.len();
        self.selection = new_pos..new_pos;
    }

    pub fn delete_backward(&mut self) {
        if self.has_selection() {
            self.insert_text("");
            return;
        }
        let pos = self.selection.end.min(self.text.len());
        if pos > 0 {
            let prev = prev_grapheme_boundary(&self.text, pos);
            self.text.replace_range(prev..pos, "");
            self.selection = prev..prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.has_selection() {
            self.insert_text("");
            return;
        }
        let pos = self.selection.end.min(self.text.len());
        if pos < self.text.len() {
            let next = next_grapheme_boundary(&self.text, pos);
            self.text.replace_range(pos..next, "");
        }
    }

    pub fn delete_word_backward(&mut self) {
        if !self.has_selection() {
            let pos = self.selection.end;
            self.selection = word_start_before(&self.text, pos)..pos;
        }
        self.insert_text("");
    }

    /// Move the caret by `delta` graphemes.
    pub fn move_cursor(&mut self, delta: isize, extend_selection: bool) {
        let mut pos = self.selection.end.min(self.text.len());
        if delta < 0 {
            for _ in 0..delta.unsigned_abs() {
                pos = prev_grapheme_boundary(&self.text, pos);
            }
        } else if delta > 0 {
            for _ in 0..(delta as usize) {
                pos = next_grapheme_boundary(&self.text, pos);
            }
        }
        self.set_caret(pos, extend_selection);
    }

    fn set_caret(&mut self, pos: usize, extend_selection: bool) {
        if extend_selection {
            self.selection.end = pos;
        } else {
            self.selection = pos..pos;
        }
    }

    /// Same grapheme column on the previous (`dir < 0`) or next line.
    fn move_line(&mut self, dir: isize, extend_selection: bool) {
        let caret = self.selection.end;
        let start = line_start(&self.text, caret);
        let column = self.text[start..caret].graphemes(true).count();
        let target = if dir < 0 {
            if start == 0 {
                0
            } else {
                let prev = line_start(&self.text, start - 1);
                nth_grapheme(&self.text, prev..start - 1, column)
            }
        } else {
            let end = line_end(&self.text, caret);
            if end == self.text.len() {
                end
            } else {
                let next = end + 1;
                nth_grapheme(&self.text, next..line_end(&self.text, next), column)
            }
        };
        self.set_caret(target, extend_selection);
    }

    fn word_at(&self, pos: usize) -> Range<usize> {
        let mut last = None;
        for (i, w) in self.text.split_word_bound_indices() {
            let range = i..i + w.len();
            if range.contains(&pos) {
                return range;
            }
            last = Some(range);
        }
        match last {
            Some(range) if pos == self.text.len() => range,
            _ => pos..pos,
        }
    }

    fn paragraph_at(&self, pos: usize) -> Range<usize> {
        line_start(&self.text, pos)..line_end(&self.text, pos)
    }
}

impl TextEditSession for TextEditor {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_owned();
            let clamp = |i: usize| clamp_to_char_boundary(text, i);
            self.selection = clamp(self.selection.start)..clamp(self.selection.end);
        }
    }

    fn set_multiline(&mut self, multiline: bool) {
        self.multiline = multiline;
    }

    fn detect_focus_change(&mut self, has_focus: bool) {
        if has_focus == self.has_focus {
            return;
        }
        self.has_focus = has_focus;
        if has_focus {
            if self.multiline {
                self.selection = 0..0;
            } else {
                self.select_all();
            }
        } else {
            self.snap = SelectionSnap::Characters;
            self.snap_origin = None;
        }
    }

    fn has_focus(&self) -> bool {
        self.has_focus
    }

    fn index_at(&self, style: &Style, position: Vec2) -> usize {
        let advance = style.font_size * 0.5;
        let line_height = style.font_size * 1.2;
        let mut line = 0..line_end(&self.text, 0);
        if self.multiline && position.y > 0.0 {
            let wanted = (position.y / line_height).floor() as usize;
            for _ in 0..wanted {
                if line.end == self.text.len() {
                    break;
                }
                let next = line.end + 1;
                line = next..line_end(&self.text, next);
            }
        }
        let column = (position.x / advance).round().max(0.0) as usize;
        nth_grapheme(&self.text, line, column)
    }

    fn move_cursor_to(&mut self, index: usize) {
        let pos = clamp_to_char_boundary(&self.text, index);
        self.selection = pos..pos;
    }

    fn select_to(&mut self, index: usize) {
        let pos = clamp_to_char_boundary(&self.text, index);
        let target = match self.snap {
            SelectionSnap::Characters => pos..pos,
            SelectionSnap::Words => self.word_at(pos),
            SelectionSnap::Paragraphs => self.paragraph_at(pos),
        };
        match self.snap_origin.clone() {
            Some(origin) if target.start < origin.start => {
                self.selection = origin.end..target.start;
            }
            Some(origin) => {
                self.selection = origin.start..target.end.max(origin.end);
            }
            None => self.selection.end = pos,
        }
    }

    fn select_all(&mut self) {
        self.selection = 0..self.text.len();
    }

    fn select_current_word(&mut self) {
        self.selection = self.word_at(self.selection.end);
    }

    fn select_current_paragraph(&mut self) {
        self.selection = self.paragraph_at(self.selection.end);
    }

    fn set_drag_snap(&mut self, snap: SelectionSnap) {
        self.snap = snap;
        self.snap_origin = match snap {
            SelectionSnap::Characters => None,
            _ => Some(self.ordered()),
        };
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let extend = modifiers.contains(Modifiers::SHIFT);
        let by_word = modifiers.intersects(Modifiers::CONTROL | Modifiers::ALT);
        let command = modifiers.intersects(Modifiers::CONTROL | Modifiers::COMMAND);
        match key {
            Key::ArrowLeft if by_word => {
                let pos = word_start_before(&self.text, self.selection.end);
                self.set_caret(pos, extend);
            }
            Key::ArrowRight if by_word => {
                let pos = word_end_after(&self.text, self.selection.end);
                self.set_caret(pos, extend);
            }
            Key::ArrowLeft if self.has_selection() && !extend => {
                let start = self.ordered().start;
                self.selection = start..start;
            }
            Key::ArrowRight if self.has_selection() && !extend => {
                let end = self.ordered().end;
                self.selection = end..end;
            }
            Key::ArrowLeft => self.move_cursor(-1, extend),
            Key::ArrowRight => self.move_cursor(1, extend),
            Key::ArrowUp if self.multiline => self.move_line(-1, extend),
            Key::ArrowDown if self.multiline => self.move_line(1, extend),
            Key::ArrowUp => self.set_caret(0, extend),
            Key::ArrowDown => self.set_caret(self.text.len(), extend),
            Key::Home if command => self.set_caret(0, extend),
            Key::End if command => self.set_caret(self.text.len(), extend),
            Key::Home => self.set_caret(line_start(&self.text, self.selection.end), extend),
            Key::End => self.set_caret(line_end(&self.text, self.selection.end), extend),
            Key::Backspace if by_word => self.delete_word_backward(),
            Key::Backspace => self.delete_backward(),
            Key::Delete => self.delete_forward(),
            Key::Character('a' | 'A') if command => self.select_all(),
            _ => return false,
        }
        true
    }

    fn insert(&mut self, c: char) {
        let mut buf = [0; 4];
        self.insert_text(c.encode_utf8(&mut buf));
    }

    fn replace_selection(&mut self, text: &str) {
        self.insert_text(text);
    }

    fn cursor(&self) -> TextCursor {
        TextCursor {
            cursor: self.selection.end,
            select: self.selection.start,
        }
    }
}

/// find prev/next grapheme boundaries around a byte index
fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

fn clamp_to_char_boundary(s: &str, i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    let mut j = i;
    while j > 0 && !s.is_char_boundary(j) {
        j -= 1;
    }
    j
}

/// Byte offset of the `n`th grapheme inside `range`, or its end.
fn nth_grapheme(text: &str, range: Range<usize>, n: usize) -> usize {
    text[range.clone()]
        .grapheme_indices(true)
        .nth(n)
        .map_or(range.end, |(i, _)| range.start + i)
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

fn word_start_before(text: &str, pos: usize) -> usize {
    text.split_word_bound_indices()
        .filter(|(i, w)| *i < pos && is_word(w))
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

fn word_end_after(text: &str, pos: usize) -> usize {
    text.split_word_bound_indices()
        .map(|(i, w)| (i + w.len(), w))
        .find(|(end, w)| *end > pos && is_word(w))
        .map_or(text.len(), |(end, _)| end)
}

/// Cut `text` to at most `max` graphemes.
fn truncate_graphemes(text: &str, max: Option<usize>) -> &str {
    match max.and_then(|max| text.grapheme_indices(true).nth(max)) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

fn session(ui: &mut Ui, id: ControlId) -> &mut dyn TextEditSession {
    let fresh = if ui.states().contains(id) {
        None
    } else {
        Some((ui.new_session)())
    };
    let slot = ui
        .states_mut()
        .get_or_insert_with::<Box<dyn TextEditSession>>(id, || fresh.unwrap_or_else(default_session));
    &mut **slot
}

/// The session of the field that holds keyboard focus, if it has one.
pub fn focused_text_session(ui: &mut Ui) -> Option<&mut dyn TextEditSession> {
    let id = ui.capture().keyboard_owner()?;
    let slot = ui.states_mut().get_mut::<Box<dyn TextEditSession>>(id)?;
    let session: &mut dyn TextEditSession = &mut **slot;
    Some(session)
}

fn mask_text(text: &str, mask: char) -> String {
    text.chars().map(|_| mask).collect()
}

/// Map a byte offset in `text` to the same position in its masked form.
fn mask_index(text: &str, index: usize, mask: char) -> usize {
    text[..index.min(text.len())].chars().count() * mask.len_utf8()
}

fn do_text_field(
    ui: &mut Ui,
    id: ControlId,
    rect: Rect,
    text: &str,
    multiline: bool,
    max_length: Option<usize>,
    style: &Style,
    mask: Option<char>,
) -> String {
    let mut text = truncate_graphemes(text, max_length).to_owned();
    let has_focus = ui.capture().has_keyboard_focus(id);
    {
        let s = session(ui, id);
        s.set_text(&text);
        s.set_multiline(multiline);
        s.detect_focus_change(has_focus);
    }

    let event = ui.event().clone();
    let inside = ui.hit(rect);
    let local = ui.pointer() - style.padding.remove(rect).origin();
    let mut change = false;

    match ui.event_kind(id) {
        EventKind::PointerDown => {
            if inside {
                ui.capture_mut().try_acquire_mouse(id);
                ui.capture_mut().set_keyboard_focus(id);
                let words = ui.config.double_click_selects_word;
                let lines = ui.config.triple_click_selects_line;
                let s = session(ui, id);
                s.detect_focus_change(true);
                let index = s.index_at(style, local);
                if event.shift() {
                    s.select_to(index);
                } else {
                    s.move_cursor_to(index);
                }
                match event.click_count {
                    2 if words => {
                        s.select_current_word();
                        s.set_drag_snap(SelectionSnap::Words);
                    }
                    3 if lines => {
                        s.select_current_paragraph();
                        s.set_drag_snap(SelectionSnap::Paragraphs);
                    }
                    _ => {}
                }
                ui.consume_event();
            }
        }
        EventKind::PointerDrag => {
            if ui.capture().has_mouse(id) {
                let s = session(ui, id);
                let index = s.index_at(style, local);
                s.select_to(index);
                ui.consume_event();
            }
        }
        EventKind::PointerUp => {
            if ui.capture().has_mouse(id) {
                session(ui, id).set_drag_snap(SelectionSnap::Characters);
                ui.capture_mut().release_mouse(id);
                ui.consume_event();
            }
        }
        EventKind::KeyDown if has_focus => {
            let Some(key) = event.key else {
                return text;
            };
            let s = session(ui, id);
            if s.handle_key(key, event.modifiers) {
                change = true;
            } else {
                let c = event.character.or(match key {
                    Key::Enter | Key::KeypadEnter => Some('\n'),
                    Key::Tab => Some('\t'),
                    _ => None,
                });
                match c {
                    // Tab is left to the focus chain
                    Some('\t') => {}
                    Some('\n') if !multiline && !event.alt() => {}
                    _ if event.modifiers.intersects(Modifiers::CONTROL | Modifiers::COMMAND) => {}
                    Some(c) if c == '\n' || !c.is_control() => {
                        s.insert(c);
                        change = true;
                    }
                    // keys without text are swallowed
                    None => ui.consume_event(),
                    Some(_) => {}
                }
            }
        }
        EventKind::Repaint => {
            if inside {
                ui.mark_mouse_used();
            }
            let display = match mask {
                Some(mask) => mask_text(&text, mask),
                None => text.clone(),
            };
            if has_focus {
                let mut cursor = session(ui, id).cursor();
                if let Some(mask) = mask {
                    cursor.cursor = mask_index(&text, cursor.cursor, mask);
                    cursor.select = mask_index(&text, cursor.select, mask);
                }
                let state = ui.draw_state(id, inside);
                ui.draw_text_cursor(style, rect, &Content::text(display), state, cursor);
            } else {
                let state = ui.draw_state(id, inside);
                ui.draw(style, rect, &Content::text(display), state);
            }
        }
        _ => {}
    }

    if change {
        text = truncate_graphemes(session(ui, id).text(), max_length).to_owned();
        ui.set_changed();
        ui.consume_event();
    }
    text
}

/// Single-line text input. `max_length` counts graphemes.
pub fn TextField(ui: &mut Ui, rect: Rect, text: &str, max_length: Option<usize>) -> String {
    let style = ui.skin.text_field.clone();
    TextFieldStyled(ui, rect, text, max_length, &style)
}

pub fn TextFieldStyled(
    ui: &mut Ui,
    rect: Rect,
    text: &str,
    max_length: Option<usize>,
    style: &Style,
) -> String {
    let id = ui.control_id(KindSeed::TEXT_FIELD, FocusType::Keyboard, Some(rect));
    do_text_field(ui, id, rect, text, false, max_length, style, None)
}

/// Multi-line text input; Enter inserts a newline.
pub fn TextArea(ui: &mut Ui, rect: Rect, text: &str, max_length: Option<usize>) -> String {
    let style = ui.skin.text_area.clone();
    TextAreaStyled(ui, rect, text, max_length, &style)
}

pub fn TextAreaStyled(
    ui: &mut Ui,
    rect: Rect,
    text: &str,
    max_length: Option<usize>,
    style: &Style,
) -> String {
    let id = ui.control_id(KindSeed::TEXT_FIELD, FocusType::Keyboard, Some(rect));
    do_text_field(ui, id, rect, text, true, max_length, style, None)
}

/// Single-line input drawn as one `mask` per character. The session edits
/// the real text.
pub fn PasswordField(
    ui: &mut Ui,
    rect: Rect,
    password: &str,
    mask: char,
    max_length: Option<usize>,
) -> String {
    let style = ui.skin.text_field.clone();
    let id = ui.control_id(KindSeed::PASSWORD_FIELD, FocusType::Keyboard, Some(rect));
    do_text_field(ui, id, rect, password, false, max_length, &style, Some(mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Rect = Rect::new(0.0, 0.0, 200.0, 20.0);

    /// Pointer position over the `column`th character of line 0 of
    /// the default text field style.
    fn column(column: f64) -> Vec2 {
        Vec2::new(3.0 + 6.5 * column, 10.0)
    }

    fn field(ui: &mut Ui, event: Event, text: &str) -> String {
        ui.begin_cycle(event);
        let out = TextField(ui, FIELD, text, None);
        let _ = ui.end_cycle();
        out
    }

    fn editor(text: &str) -> TextEditor {
        let mut ed = TextEditor::new();
        ed.insert_text(text);
        ed
    }

    #[test]
    fn test_textfield_insert() {
        let ed = editor("Hello");
        assert_eq!(ed.text, "Hello");
        assert_eq!(ed.selection, 5..5);
    }

    #[test]
    fn test_textfield_selection_replace() {
        let mut ed = editor("Hello World");
        ed.selection = 5..0;
        ed.insert_text("Hi");
        assert_eq!(ed.text, "Hi World");
        assert_eq!(ed.selection, 2..2);
    }

    #[test]
    fn test_grapheme_delete_and_move() {
        // thumbs up + skin tone is one grapheme cluster
        let mut ed = editor("A👍🏽B");
        ed.move_cursor(-1, false);
        assert_eq!(ed.caret_index(), "A👍🏽".len());
        ed.delete_backward();
        assert_eq!(ed.text, "AB");
        assert_eq!(ed.selection, 1..1);
    }

    #[test]
    fn test_word_and_paragraph_selection() {
        let mut ed = editor("one two\nthree");
        ed.move_cursor_to(5);
        ed.select_current_word();
        assert_eq!(ed.selected_text(), "two");
        ed.move_cursor_to(10);
        ed.select_current_paragraph();
        assert_eq!(ed.selected_text(), "three");
    }

    #[test]
    fn test_keys_navigate_and_edit() {
        let mut ed = editor("hello world");
        assert!(ed.handle_key(Key::ArrowLeft, Modifiers::CONTROL | Modifiers::SHIFT));
        assert_eq!(ed.selected_text(), "world");
        assert!(ed.handle_key(Key::Backspace, Modifiers::empty()));
        assert_eq!(ed.text, "hello ");
        assert!(ed.handle_key(Key::Character('a'), Modifiers::CONTROL));
        assert_eq!(ed.ordered(), 0..6);
        assert!(!ed.handle_key(Key::Character('a'), Modifiers::empty()));
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        let mut ed = editor("abcd\nxy\nlonger");
        ed.multiline = true;
        ed.move_cursor_to(3);
        ed.handle_key(Key::ArrowDown, Modifiers::empty());
        // clamped to the end of the short line
        assert_eq!(ed.caret_index(), 7);
        ed.handle_key(Key::ArrowDown, Modifiers::empty());
        assert_eq!(ed.caret_index(), 10);
        ed.handle_key(Key::ArrowUp, Modifiers::empty());
        assert_eq!(ed.caret_index(), 7);
    }

    #[test]
    fn test_focus_gain_selects_single_line() {
        let mut ed = editor("abc");
        ed.detect_focus_change(true);
        assert_eq!(ed.ordered(), 0..3);
        ed.detect_focus_change(true);
        ed.move_cursor_to(1);
        ed.detect_focus_change(true);
        assert_eq!(ed.selection, 1..1);
    }

    #[test]
    fn click_then_type_edits_at_pointer() {
        let mut ui = Ui::headless();
        let mut text = String::from("hello");
        text = field(&mut ui, Event::pointer_down(column(2.0)), &text);
        text = field(&mut ui, Event::pointer_up(column(2.0)), &text);
        assert!(!ui.take_changed());

        text = field(&mut ui, Event::key_down(Key::Character('X')), &text);
        assert_eq!(text, "heXllo");
        assert!(ui.take_changed());

        text = field(&mut ui, Event::key_down(Key::Backspace), &text);
        assert_eq!(text, "hello");
    }

    #[test]
    fn keys_reach_only_the_focused_field() {
        let mut ui = Ui::headless();
        ui.begin_cycle(Event::key_down(Key::Character('x')));
        assert_eq!(TextField(&mut ui, FIELD, "abc", None), "abc");
        assert!(!ui.event().is_used());
        ui.end_cycle().unwrap();
    }

    #[test]
    fn max_length_truncates_input_and_edits() {
        let mut ui = Ui::headless();
        ui.begin_cycle(Event::layout(Vec2::ZERO));
        assert_eq!(TextField(&mut ui, FIELD, "abcdef", Some(3)), "abc");
        ui.end_cycle().unwrap();

        field(&mut ui, Event::pointer_down(column(3.0)), "abc");
        ui.begin_cycle(Event::key_down(Key::Character('d')));
        assert_eq!(TextField(&mut ui, FIELD, "abc", Some(3)), "abc");
        ui.end_cycle().unwrap();
    }

    #[test]
    fn tab_and_enter_are_not_text_in_single_line_fields() {
        let mut ui = Ui::headless();
        field(&mut ui, Event::pointer_down(column(1.0)), "ab");

        for key in [Key::Tab, Key::Enter] {
            ui.begin_cycle(Event::key_down(key));
            assert_eq!(TextField(&mut ui, FIELD, "ab", None), "ab");
            assert!(!ui.event().is_used());
            let _ = ui.end_cycle();
        }
    }

    #[test]
    fn text_area_accepts_newlines() {
        let mut ui = Ui::headless();
        let area = Rect::new(0.0, 0.0, 200.0, 100.0);
        let mut text = String::from("ab");
        for event in [
            Event::pointer_down(column(2.0)),
            Event::pointer_up(column(2.0)),
            Event::key_down(Key::Enter),
        ] {
            ui.begin_cycle(event);
            text = TextArea(&mut ui, area, &text, None);
            ui.end_cycle().unwrap();
        }
        assert_eq!(text, "ab\n");
    }

    #[test]
    fn double_click_selects_word() {
        let painter = RecordingPainter::new();
        let mut ui = Ui::new(painter.clone(), NullClip, SystemClock);
        let text = "hello world";
        field(&mut ui, Event::pointer_down(column(8.0)).with_click_count(2), text);
        field(&mut ui, Event::repaint(column(8.0)), text);

        match painter.calls().last() {
            Some(DrawCall::TextCursor {
                style,
                rect,
                text: drawn,
                state,
                cursor,
            }) => {
                assert_eq!(style, "textfield");
                assert_eq!(*rect, FIELD);
                assert_eq!(drawn, text);
                assert!(state.keyboard_focus && state.enabled);
                assert_eq!(*cursor, TextCursor { cursor: 11, select: 6 });
            }
            other => panic!("unexpected draw {other:?}"),
        }
    }

    #[test]
    fn focused_field_in_disabled_section_draws_disabled() {
        let painter = RecordingPainter::new();
        let mut ui = Ui::new(painter.clone(), NullClip, SystemClock);
        field(&mut ui, Event::pointer_down(column(1.0)), "ab");
        field(&mut ui, Event::pointer_up(column(1.0)), "ab");

        ui.begin_cycle(Event::repaint(column(1.0)));
        ui.enabled = false;
        TextField(&mut ui, FIELD, "ab", None);
        ui.enabled = true;
        ui.end_cycle().unwrap();

        match painter.calls().last() {
            Some(DrawCall::TextCursor { state, .. }) => {
                assert!(state.keyboard_focus);
                assert!(!state.enabled);
            }
            other => panic!("unexpected draw {other:?}"),
        }
    }

    #[test]
    fn password_field_draws_mask() {
        let painter = RecordingPainter::new();
        let mut ui = Ui::new(painter.clone(), NullClip, SystemClock);
        ui.begin_cycle(Event::repaint(Vec2::new(-1.0, -1.0)));
        assert_eq!(PasswordField(&mut ui, FIELD, "pässword", '*', None), "pässword");
        ui.end_cycle().unwrap();

        match &painter.calls()[0] {
            DrawCall::Styled { content, .. } => assert_eq!(content.text, "********"),
            other => panic!("unexpected draw {other:?}"),
        }
    }

    #[test]
    fn custom_sessions_come_from_the_factory() {
        let mut ui = Ui::headless().with_text_sessions(|| {
            let mut ed = TextEditor::new();
            ed.set_drag_snap(SelectionSnap::Words);
            Box::new(ed)
        });
        field(&mut ui, Event::pointer_down(column(0.0)), "a");
        let session = focused_text_session(&mut ui).expect("focused field has a session");
        assert_eq!(session.text(), "a");
        assert!(session.has_focus());
    }
}
