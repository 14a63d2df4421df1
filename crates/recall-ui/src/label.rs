//! Draw-only controls.

use recall_core::*;

use crate::Ui;

/// Text or an image. Allocates no id.
pub fn Label(ui: &mut Ui, rect: Rect, content: impl Into<Content>) {
    let style = ui.skin.label.clone();
    LabelStyled(ui, rect, content, &style);
}

pub fn LabelStyled(ui: &mut Ui, rect: Rect, content: impl Into<Content>, style: &Style) {
    if !ui.is_repaint() {
        return;
    }
    let state = DrawState {
        hot: ui.hit(rect),
        enabled: true,
        ..DrawState::default()
    };
    ui.draw(style, rect, &content.into(), state);
}

/// A background box. Unlike [`Label`] it takes an id, so it has to be
/// declared on every event.
pub fn Box(ui: &mut Ui, rect: Rect, content: impl Into<Content>) {
    let id = ui.control_id(KindSeed::BOX, FocusType::Passive, Some(rect));
    if ui.is_repaint() {
        let style = ui.skin.box_style.clone();
        let state = ui.draw_state(id, ui.hit(rect));
        ui.draw(&style, rect, &content.into(), state);
    }
}

/// Where a texture lands on screen and which part of it is sampled.
/// `source` is in normalized texture coordinates.
pub fn calculate_scaled_texture_rects(rect: Rect, mode: ScaleMode, image_aspect: f64) -> (Rect, Rect) {
    let full = Rect::new(0.0, 0.0, 1.0, 1.0);
    let dest_aspect = rect.w / rect.h;
    if !dest_aspect.is_finite() || image_aspect.is_nan() || image_aspect <= 0.0 {
        return (rect, full);
    }
    match mode {
        ScaleMode::StretchToFill => (rect, full),
        ScaleMode::ScaleAndCrop => {
            if dest_aspect > image_aspect {
                let stretch = image_aspect / dest_aspect;
                (rect, Rect::new(0.0, (1.0 - stretch) * 0.5, 1.0, stretch))
            } else {
                let stretch = dest_aspect / image_aspect;
                (rect, Rect::new(0.5 - stretch * 0.5, 0.0, stretch, 1.0))
            }
        }
        ScaleMode::ScaleToFit => {
            if dest_aspect > image_aspect {
                let stretch = image_aspect / dest_aspect;
                let screen = Rect::new(
                    rect.x + rect.w * (1.0 - stretch) * 0.5,
                    rect.y,
                    stretch * rect.w,
                    rect.h,
                );
                (screen, full)
            } else {
                let stretch = dest_aspect / image_aspect;
                let screen = Rect::new(
                    rect.x,
                    rect.y + rect.h * (1.0 - stretch) * 0.5,
                    rect.w,
                    stretch * rect.h,
                );
                (screen, full)
            }
        }
    }
}

/// Draw `texture` into `rect`. `image_aspect` is width / height of the
/// image; 0 stretches. A missing texture is reported and nothing is drawn.
pub fn DrawTexture(
    ui: &mut Ui,
    rect: Rect,
    texture: Option<TextureId>,
    mode: ScaleMode,
    image_aspect: f64,
) {
    if !ui.is_repaint() {
        return;
    }
    let Some(texture) = texture else {
        ui.report(UiError::MissingResource("texture"));
        return;
    };
    let (screen, source) = calculate_scaled_texture_rects(rect, mode, image_aspect);
    ui.painter_mut().draw_texture(texture, screen, source);
}
