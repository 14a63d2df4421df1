use web_time::Duration;

use crate::Modifiers;

/// Tunables of the control layer. `Default` matches desktop conventions.
#[derive(Clone, Debug, PartialEq)]
pub struct UiConfig {
    /// Value change per scrollbar end-button step.
    pub scroll_step: f64,
    /// Hold time before a held repeat button steps a second time.
    pub first_repeat_wait: Duration,
    /// Time between further steps while held.
    pub repeat_interval: Duration,
    /// Pixels scrolled per wheel delta unit.
    pub wheel_multiplier: f64,
    pub min_thumb_length: f64,
    /// Modifier that turns a touch-down into a drag-scroll.
    pub touch_scroll_modifier: Modifiers,
    pub pixels_per_point: f64,
    /// Distance from a scroll view's top/bottom edge that autoscrolls during drag-and-drop.
    pub drag_autoscroll_margin: f64,
    pub drag_autoscroll_step: f64,
    pub double_click_selects_word: bool,
    pub triple_click_selects_line: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scroll_step: 10.0,
            first_repeat_wait: Duration::from_millis(250),
            repeat_interval: Duration::from_millis(30),
            wheel_multiplier: 20.0,
            min_thumb_length: 12.0,
            touch_scroll_modifier: Modifiers::ALT,
            pixels_per_point: 1.0,
            drag_autoscroll_margin: 8.0,
            drag_autoscroll_step: 16.0,
            double_click_selects_word: true,
            triple_click_selects_line: true,
        }
    }
}
