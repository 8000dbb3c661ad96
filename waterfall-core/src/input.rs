//! Keyboard and selector-value mapping onto engine actions.

use crate::engine::Action;
use crate::error::ParseError;
use crate::viewport::ScrollDirection;

/// FFT sizes offered by the selector. Display only.
pub const FFT_SIZES: [u32; 5] = [256, 512, 1024, 2048, 4096];
pub const DEFAULT_FFT_SIZE: u32 = 1024;

pub fn parse_fft_size(value: &str) -> Result<u32, ParseError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| FFT_SIZES.contains(n))
        .ok_or_else(|| ParseError::FftSize(value.to_string()))
}

/// Map a `KeyboardEvent.key` value to an action. Shortcuts are ignored
/// while focus is in a text input or select.
pub fn key_action(key: &str, focus_in_form_field: bool) -> Option<Action> {
    if focus_in_form_field {
        return None;
    }
    match key {
        "ArrowLeft" | "ArrowDown" => Some(Action::Step(-1)),
        "ArrowRight" | "ArrowUp" => Some(Action::Step(1)),
        "PageUp" => Some(Action::Scroll(ScrollDirection::Forward)),
        "PageDown" => Some(Action::Scroll(ScrollDirection::Back)),
        _ => None,
    }
}

/// Whether an element with this tag name swallows keyboard shortcuts.
pub fn is_form_field(tag_name: &str) -> bool {
    matches!(tag_name.to_ascii_uppercase().as_str(), "INPUT" | "SELECT" | "TEXTAREA")
}
