//! Button grids and toolbars.
//!
//! Cells are laid out left to right, top to bottom, wrapping every
//! `items_per_row`. The horizontal gap between two cells is the larger of
//! the facing margins; the row gap is the larger of the style's top and
//! bottom margin. Every cell rect is snapped to device pixels.

use smallvec::SmallVec;

use recall_core::*;

use crate::Ui;

pub type CellRects = SmallVec<[Rect; 8]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolbarButtonSize {
    /// All cells share the row width.
    #[default]
    Fixed,
    /// Each cell is as wide as its content.
    FitToContents,
}

/// Base style plus the variants used for the first, middle and last cell.
#[derive(Clone, Debug)]
pub struct GridStyles {
    pub style: Style,
    pub first: Style,
    pub mid: Style,
    pub last: Style,
}

impl GridStyles {
    /// One style for every cell.
    pub fn uniform(style: &Style) -> Self {
        Self {
            style: style.clone(),
            first: style.clone(),
            mid: style.clone(),
            last: style.clone(),
        }
    }

    fn for_cell(&self, index: usize, count: usize) -> &Style {
        if count == 1 {
            &self.style
        } else if index == 0 {
            &self.first
        } else if index == count - 1 {
            &self.last
        } else {
            &self.mid
        }
    }
}

/// Resolve `<name><first>`, `<name><mid>`, `<name><last>` in the skin. A
/// missing mid falls back to `style`; missing first/last fall back to mid.
pub fn find_styles(skin: &Skin, style: &Style, first: &str, mid: &str, last: &str) -> GridStyles {
    let lookup = |suffix: &str| skin.find_style(&format!("{}{}", style.name, suffix)).cloned();
    let mid = lookup(mid).unwrap_or_else(|| style.clone());
    GridStyles {
        style: style.clone(),
        first: lookup(first).unwrap_or_else(|| mid.clone()),
        last: lookup(last).unwrap_or_else(|| mid.clone()),
        mid,
    }
}

/// Total horizontal spacing taken by the gaps of one row.
pub fn calc_total_horiz_spacing(items_per_row: usize, styles: &GridStyles) -> f64 {
    let (first, mid, last) = (&styles.first.margin, &styles.mid.margin, &styles.last.margin);
    match items_per_row {
        0 | 1 => 0.0,
        2 => first.right.max(last.left),
        n => {
            let internal = mid.left.max(mid.right);
            first.right.max(mid.left) + mid.right.max(last.left) + internal * (n - 3) as f64
        }
    }
}

/// Cell size when the style has no fixed size.
pub fn grid_cell_size(rect: Rect, count: usize, items_per_row: usize, styles: &GridStyles) -> Size {
    let style = &styles.style;
    let rows = count.div_ceil(items_per_row.max(1)).max(1);
    let width = if style.fixed_width != 0.0 {
        style.fixed_width
    } else {
        (rect.w - calc_total_horiz_spacing(items_per_row, styles)) / items_per_row.max(1) as f64
    };
    let height = if style.fixed_height != 0.0 {
        style.fixed_height
    } else {
        let gap = style.margin.top.max(style.margin.bottom);
        (rect.h - gap * (rows - 1) as f64) / rows as f64
    };
    Size { width, height }
}

/// Per-cell rects. `content_width` is only consulted for
/// [`ToolbarButtonSize::FitToContents`].
pub fn calc_grid_rects(
    rect: Rect,
    count: usize,
    items_per_row: usize,
    cell: Size,
    styles: &GridStyles,
    button_size: ToolbarButtonSize,
    pixels_per_point: f64,
    content_width: impl Fn(usize, &Style) -> f64,
) -> CellRects {
    let mut rects = CellRects::with_capacity(count);
    let mut column = 0;
    let mut x = rect.x;
    let mut y = rect.y;
    let mut current = if count > 1 { &styles.first } else { &styles.style };
    let row_gap = styles.style.margin.top.max(styles.style.margin.bottom);

    for i in 0..count {
        let w = match button_size {
            ToolbarButtonSize::Fixed => cell.width,
            ToolbarButtonSize::FitToContents => content_width(i, current),
        };
        let r = Rect::new(x, y, w, cell.height).align_to_device(pixels_per_point);
        rects.push(r);

        let mut next = &styles.mid;
        if i + 2 == count || i + 2 == items_per_row {
            next = &styles.last;
        }
        x = r.x_max() + current.margin.right.max(next.margin.left);

        column += 1;
        if column >= items_per_row {
            column = 0;
            y += cell.height + row_gap;
            x = rect.x;
            next = &styles.first;
        }
        current = next;
    }
    rects
}

/// Uniform spacing variant used by custom grids.
pub fn calc_grid_rects_fixed_margin(
    rect: Rect,
    count: usize,
    items_per_row: usize,
    cell: Size,
    spacing: Vec2,
    pixels_per_point: f64,
) -> CellRects {
    let mut rects = CellRects::with_capacity(count);
    let mut column = 0;
    let mut x = rect.x;
    let mut y = rect.y;
    for _ in 0..count {
        let r = Rect::new(x, y, cell.width, cell.height).align_to_device(pixels_per_point);
        rects.push(r);
        x = r.x_max() + spacing.x;
        column += 1;
        if column >= items_per_row {
            column = 0;
            y += cell.height + spacing.y;
            x = rect.x;
        }
    }
    rects
}

/// Checks shared by every grid. `None` means "return `selected` unchanged".
fn validate(ui: &mut Ui, count: usize, items_per_row: i32, enabled: Option<&[bool]>) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if items_per_row <= 0 {
        ui.report(UiError::InvalidGrid { items_per_row });
        return None;
    }
    if let Some(flags) = enabled
        && flags.len() != count
    {
        ui.report(UiError::EnabledFlagsMismatch {
            expected: count,
            actual: flags.len(),
        });
        return None;
    }
    Some(items_per_row as usize)
}

enum CellEvent {
    Clicked,
    None,
}

/// The per-cell slice of the button state machine. Unlike a plain button
/// the click is reported on release over the captured cell.
fn cell_input(ui: &mut Ui, id: ControlId, cell: Rect) -> CellEvent {
    match ui.event_kind(id) {
        EventKind::PointerDown => {
            if ui.hit(cell) && ui.capture_mut().try_acquire_mouse(id) {
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
                if ui.hit(cell) {
                    ui.set_changed();
                    return CellEvent::Clicked;
                }
            }
        }
        _ => {}
    }
    CellEvent::None
}

/// Hot only while over the cell and either holding capture or nobody does.
fn cell_state(ui: &Ui, id: ControlId, cell: Rect, selected: bool) -> DrawState {
    let captured = ui.capture().has_mouse(id);
    DrawState {
        hot: ui.enabled && ui.hit(cell) && (captured || ui.capture().is_mouse_free()),
        captured: ui.enabled && captured,
        selected,
        keyboard_focus: false,
        enabled: ui.enabled,
    }
}

fn do_button_grid(
    ui: &mut Ui,
    rect: Rect,
    selected: usize,
    contents: &[Content],
    items_per_row: i32,
    styles: &GridStyles,
    button_size: ToolbarButtonSize,
    enabled: Option<&[bool]>,
) -> usize {
    let count = contents.len();
    let Some(per_row) = validate(ui, count, items_per_row, enabled) else {
        return selected;
    };
    let cell = grid_cell_size(rect, count, per_row, styles);
    let rects = calc_grid_rects(
        rect,
        count,
        per_row,
        cell,
        styles,
        button_size,
        ui.config.pixels_per_point,
        |i, style| ui.measure(style, &contents[i]).width,
    );
    let item_enabled = |i: usize| enabled.is_none_or(|flags| flags[i]);

    let mut selected_id = None;
    for (i, cell) in rects.iter().copied().enumerate() {
        let was_enabled = ui.enabled;
        ui.enabled &= item_enabled(i);
        let id = ui.control_id(KindSeed::BUTTON_GRID, FocusType::Passive, Some(cell));
        if i == selected {
            selected_id = Some(id);
        }

        if ui.is_repaint() {
            if i != selected {
                let state = cell_state(ui, id, cell, false);
                ui.draw(styles.for_cell(i, count), cell, &contents[i], state);
            }
            if ui.hit(cell) {
                ui.mark_mouse_used();
            }
        } else if let CellEvent::Clicked = cell_input(ui, id, cell) {
            ui.enabled = was_enabled;
            return i;
        }
        ui.enabled = was_enabled;
    }

    // selected cell last so it overlaps its neighbours
    if let Some(id) = selected_id
        && ui.is_repaint()
    {
        let cell = rects[selected];
        let was_enabled = ui.enabled;
        ui.enabled &= item_enabled(selected);
        let state = cell_state(ui, id, cell, true);
        ui.draw(styles.for_cell(selected, count), cell, &contents[selected], state);
        ui.enabled = was_enabled;
    }
    selected
}

/// A single row of buttons, one of which is selected.
pub fn Toolbar(ui: &mut Ui, rect: Rect, selected: usize, contents: &[Content]) -> usize {
    let style = ui.skin.button.clone();
    ToolbarWith(ui, rect, selected, contents, &style, ToolbarButtonSize::Fixed, None)
}

/// Toolbar with an explicit base style (cell variants are looked up as
/// `<name>left`, `<name>mid`, `<name>right`), sizing mode and optional
/// per-item enabled flags.
pub fn ToolbarWith(
    ui: &mut Ui,
    rect: Rect,
    selected: usize,
    contents: &[Content],
    style: &Style,
    button_size: ToolbarButtonSize,
    enabled: Option<&[bool]>,
) -> usize {
    let styles = find_styles(&ui.skin, style, "left", "mid", "right");
    let per_row = i32::try_from(contents.len()).unwrap_or(i32::MAX);
    do_button_grid(ui, rect, selected, contents, per_row, &styles, button_size, enabled)
}

/// A grid of buttons, `items_per_row` wide.
pub fn SelectionGrid(
    ui: &mut Ui,
    rect: Rect,
    selected: usize,
    contents: &[Content],
    items_per_row: i32,
) -> usize {
    let style = ui.skin.button.clone();
    SelectionGridStyled(ui, rect, selected, contents, items_per_row, &style)
}

pub fn SelectionGridStyled(
    ui: &mut Ui,
    rect: Rect,
    selected: usize,
    contents: &[Content],
    items_per_row: i32,
    style: &Style,
) -> usize {
    let styles = GridStyles::uniform(style);
    do_button_grid(
        ui,
        rect,
        selected,
        contents,
        items_per_row,
        &styles,
        ToolbarButtonSize::Fixed,
        None,
    )
}

/// Grid whose cells are drawn by `item(ui, index, rect, style, id)`. The
/// callback runs for every cell on every event; on repaint the selected
/// cell is drawn last.
pub fn CustomSelectionGrid(
    ui: &mut Ui,
    rect: Rect,
    selected: usize,
    count: usize,
    items_per_row: i32,
    style: &Style,
    mut item: impl FnMut(&mut Ui, usize, Rect, &Style, ControlId),
) -> usize {
    let Some(per_row) = validate(ui, count, items_per_row, None) else {
        return selected;
    };
    let styles = GridStyles::uniform(style);
    let cell = grid_cell_size(rect, count, per_row, &styles);
    let spacing = Vec2::new(
        style.margin.left.max(style.margin.right),
        style.margin.top.max(style.margin.bottom),
    );
    let rects = calc_grid_rects_fixed_margin(rect, count, per_row, cell, spacing, ui.config.pixels_per_point);

    let mut selected_id = None;
    for (i, cell) in rects.iter().copied().enumerate() {
        let id = ui.control_id(KindSeed::BUTTON_GRID, FocusType::Passive, Some(cell));
        if i == selected {
            selected_id = Some(id);
        }
        if let CellEvent::Clicked = cell_input(ui, id, cell) {
            return i;
        }
        if !ui.is_repaint() || i != selected {
            item(ui, i, cell, style, id);
        }
    }
    if let Some(id) = selected_id
        && ui.is_repaint()
    {
        item(ui, selected, rects[selected], style, id);
    }
    selected
}
