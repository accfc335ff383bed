//! Sizing, color, and styling constants for the picker.

/// Color field width in pixels (maximum selector x)
pub const FIELD_WIDTH: f64 = 310.0;

/// Color field height in pixels (maximum selector y)
pub const FIELD_HEIGHT: f64 = 250.0;

/// Pointer-move events reach the field at most once per this many ms
pub const POINTER_THROTTLE_MS: u64 = 10;

/// Event name the color field subscribes to
pub const POINTER_MOVE_EVENT: &str = "mousemove";

/// 1D slider track height
pub const SLIDER_HEIGHT: f32 = 16.0;

/// Cursor circle radius on the color field
pub const CURSOR_RADIUS: f64 = 8.0;

/// Thumb radius on 1D sliders
pub const THUMB_RADIUS: f64 = 7.0;

/// Border radius for slider tracks and swatches
pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Input field width
pub const INPUT_WIDTH: f32 = 36.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 80.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Preview and palette swatch side length
pub const SWATCH_SIZE: f32 = 32.0;

/// Checkerboard cell size (for alpha backgrounds)
pub const CHECKER_CELL: f64 = 5.0;

/// Initial picker value (`#594ae2`)
pub const DEFAULT_COLOR: (u8, u8, u8) = (0x59, 0x4a, 0xe2);

/// Default palette entries, RGBA
pub const DEFAULT_PALETTE: [(u8, u8, u8, u8); 5] = [
    (0xff, 0x40, 0x81, 0xff),
    (0x21, 0x96, 0xf3, 0xff),
    (0x00, 0xc8, 0x53, 0xff),
    (0xff, 0x98, 0x00, 0xff),
    (0xf4, 0x43, 0x36, 0xff),
];
