//! Picker configuration.

use serde::{Deserialize, Serialize};

use crate::color::PickerColor;
use crate::constants;

/// Which text representation the inputs row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorPickerMode {
    #[default]
    Rgb,
    Hsl,
    Hex,
}

impl ColorPickerMode {
    /// Cycle RGB → HSL → HEX → RGB.
    pub fn next(self) -> Self {
        match self {
            ColorPickerMode::Rgb => ColorPickerMode::Hsl,
            ColorPickerMode::Hsl => ColorPickerMode::Hex,
            ColorPickerMode::Hex => ColorPickerMode::Rgb,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorPickerMode::Rgb => "RGB",
            ColorPickerMode::Hsl => "HSL",
            ColorPickerMode::Hex => "HEX",
        }
    }
}

/// Options controlling what the picker shows and how it reports changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    /// Hide alpha controls and force the value opaque.
    pub disable_alpha: bool,
    pub disable_color_field: bool,
    pub disable_mode_switch: bool,
    /// Hide the inputs row (and with it the mode switch).
    pub disable_inputs: bool,
    /// Hide the hue and alpha sliders.
    pub disable_sliders: bool,
    /// Hide the preview swatch, which also opens the palette.
    pub disable_preview: bool,
    /// Mode the inputs row starts in.
    pub mode: ColorPickerMode,
    /// Notify on every write, even when RGBA did not change.
    pub always_update_binding: bool,
    pub palette: Vec<PickerColor>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            disable_alpha: false,
            disable_color_field: false,
            disable_mode_switch: false,
            disable_inputs: false,
            disable_sliders: false,
            disable_preview: false,
            mode: ColorPickerMode::default(),
            always_update_binding: false,
            palette: constants::DEFAULT_PALETTE
                .iter()
                .map(|&(r, g, b, a)| PickerColor::from_rgba(r, g, b, a))
                .collect(),
        }
    }
}
