//! Mapping between the 2D color field and colors.
//!
//! The field is `FIELD_WIDTH` × `FIELD_HEIGHT` pixels. Horizontally it runs
//! from white (left) to the base color (right); vertically from full
//! brightness (top) to black (bottom). The base color is the fully
//! saturated color of the current hue.

use crate::color::PickerColor;
use crate::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::math;

/// The two channels that carry a hue sector's brightness (primary) and
/// saturation (secondary), in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantPair {
    RedBlue,
    GreenBlue,
    GreenRed,
    BlueRed,
    BlueGreen,
    RedGreen,
}

impl DominantPair {
    /// Pick `(primary, secondary)` from a color.
    pub fn select(self, color: &PickerColor) -> (u8, u8) {
        let (r, g, b) = (color.r(), color.g(), color.b());
        match self {
            DominantPair::RedBlue => (r, b),
            DominantPair::GreenBlue => (g, b),
            DominantPair::GreenRed => (g, r),
            DominantPair::BlueRed => (b, r),
            DominantPair::BlueGreen => (b, g),
            DominantPair::RedGreen => (r, g),
        }
    }
}

/// One 60° arc of the hue wheel.
///
/// Each channel function maps the sector-local intensity (0–255) to that
/// channel's value.
pub struct HueSector {
    pub r: fn(u8) -> u8,
    pub g: fn(u8) -> u8,
    pub b: fn(u8) -> u8,
    pub dominant: DominantPair,
}

impl HueSector {
    pub fn rgb(&self, value: u8) -> (u8, u8, u8) {
        ((self.r)(value), (self.g)(value), (self.b)(value))
    }
}

fn full(_: u8) -> u8 {
    255
}

fn none(_: u8) -> u8 {
    0
}

fn rising(v: u8) -> u8 {
    v
}

fn falling(v: u8) -> u8 {
    255 - v
}

/// Sectors indexed by `hue / 60`.
pub static HUE_SECTORS: [HueSector; 6] = [
    HueSector {
        r: full,
        g: rising,
        b: none,
        dominant: DominantPair::RedBlue,
    },
    HueSector {
        r: falling,
        g: full,
        b: none,
        dominant: DominantPair::GreenBlue,
    },
    HueSector {
        r: none,
        g: full,
        b: rising,
        dominant: DominantPair::GreenRed,
    },
    HueSector {
        r: none,
        g: falling,
        b: full,
        dominant: DominantPair::BlueRed,
    },
    HueSector {
        r: rising,
        g: none,
        b: full,
        dominant: DominantPair::BlueGreen,
    },
    HueSector {
        r: full,
        g: none,
        b: falling,
        dominant: DominantPair::RedGreen,
    },
];

fn sector_index(raw: i64) -> usize {
    raw.clamp(0, HUE_SECTORS.len() as i64 - 1) as usize
}

/// Cursor location on the color field, in field pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectorPosition {
    pub x: f64,
    pub y: f64,
}

impl SelectorPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position rounded to two decimals, as used for drawing the marker.
    pub fn rounded(&self) -> (f64, f64) {
        (math::round_to(self.x, 2), math::round_to(self.y, 2))
    }
}

/// The fully saturated color for `hue` (degrees). Out-of-range hues fall
/// into the first or last sector.
pub fn base_color_for_hue(hue: f64) -> PickerColor {
    let degrees = hue.trunc() as i64;
    let index = sector_index(degrees / 60);
    let offset = degrees - index as i64 * 60;
    let value = math::map(0.0, 60.0, 0.0, 255.0, offset as f64).clamp(0.0, 255.0) as u8;
    let (r, g, b) = HUE_SECTORS[index].rgb(value);
    PickerColor::from_rgba(r, g, b, 255)
}

/// The base color for `color`'s hue.
pub fn base_color(color: &PickerColor) -> PickerColor {
    base_color_for_hue(color.h())
}

/// Where `color` sits on the field for its own hue.
///
/// A color whose primary channel is 0 (black) has no defined horizontal
/// position and is placed on the left edge.
pub fn selector_from_color(color: &PickerColor) -> SelectorPosition {
    let hue_value = math::map(0.0, 360.0, 0.0, 6.0 * 255.0, color.h()) as i64;
    let sector = &HUE_SECTORS[sector_index(hue_value / 255)];
    let (primary, secondary) = sector.dominant.select(color);

    let primary_diff = 255.0 - primary as f64;
    let y = math::map(0.0, 255.0, 0.0, FIELD_HEIGHT, primary_diff);

    let x = if primary == 0 {
        0.0
    } else {
        let primary_delta = primary as f64 / 255.0;
        let secondary_x = secondary as f64 * (1.0 / primary_delta);
        let relation = (255.0 - secondary_x) / 255.0;
        relation * FIELD_WIDTH
    };

    SelectorPosition {
        x: math::ensure_range(x, FIELD_WIDTH),
        y: math::ensure_range(y, FIELD_HEIGHT),
    }
}

/// The color under `position` for `base`, keeping `alpha`.
pub fn color_from_selector(position: SelectorPosition, base: &PickerColor, alpha: u8) -> PickerColor {
    let x = position.x / FIELD_WIDTH;
    let y = 1.0 - position.y / FIELD_HEIGHT;
    let channel = |base_channel: u8| -> u8 {
        let along_x = 255 - ((255 - base_channel) as f64 * x) as i32;
        (along_x as f64 * y) as u8
    };
    PickerColor::from_rgba(channel(base.r()), channel(base.g()), channel(base.b()), alpha)
}

/// Saturate raw pointer offsets into the field.
pub fn clamp_pointer(offset_x: f64, offset_y: f64) -> SelectorPosition {
    SelectorPosition {
        x: math::ensure_range(offset_x, FIELD_WIDTH),
        y: math::ensure_range(offset_y, FIELD_HEIGHT),
    }
}
