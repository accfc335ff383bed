//! Picker state: the current color, the field's base color and selector, and
//! the rules that keep them in sync.
//!
//! Every write names its [`UpdateSource`]. A programmatic write (setters,
//! text input, palette) re-derives the base color and selector from the new
//! color. A pointer write derived the color *from* the selector, so the
//! selector and base color are left alone; re-deriving them from the
//! truncated color would drift the cursor.

use crate::color::{Alpha, ColorOutputFormat, PickerColor};
use crate::field::{self, SelectorPosition};
use crate::options::{ColorPickerMode, PickerOptions};
use crate::pointer::PointerSample;

/// Where a color write came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSource {
    /// Setters, text input, palette selection, external assignment.
    Programmatic,
    /// The color field's selector.
    Pointer,
}

type ChangeListener = Box<dyn Fn(&PickerColor)>;

pub struct ColorPicker {
    value: PickerColor,
    base_color: PickerColor,
    selector: SelectorPosition,
    mode: ColorPickerMode,
    options: PickerOptions,
    collection_open: bool,
    listeners: Vec<ChangeListener>,
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new(PickerColor::default(), PickerOptions::default())
    }
}

impl ColorPicker {
    pub fn new(value: PickerColor, options: PickerOptions) -> Self {
        let value = if options.disable_alpha {
            value.with_alpha(Alpha::Byte(255))
        } else {
            value
        };
        Self {
            value,
            base_color: field::base_color(&value),
            selector: field::selector_from_color(&value),
            mode: options.mode,
            options,
            collection_open: false,
            listeners: Vec::new(),
        }
    }

    pub fn value(&self) -> PickerColor {
        self.value
    }

    pub fn base_color(&self) -> PickerColor {
        self.base_color
    }

    pub fn selector(&self) -> SelectorPosition {
        self.selector
    }

    pub fn mode(&self) -> ColorPickerMode {
        self.mode
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn palette(&self) -> &[PickerColor] {
        &self.options.palette
    }

    pub fn is_collection_open(&self) -> bool {
        self.collection_open
    }

    /// Register a callback fired whenever the value changes.
    pub fn on_change(&mut self, listener: impl Fn(&PickerColor) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Write a new value. Returns true if change listeners were notified.
    pub fn set_value(&mut self, value: PickerColor, source: UpdateSource) -> bool {
        let changed = value != self.value;
        self.value = value;

        if source == UpdateSource::Programmatic {
            self.base_color = field::base_color(&value);
            self.selector = field::selector_from_color(&value);
        }

        if !changed && !self.options.always_update_binding {
            return false;
        }
        for listener in &self.listeners {
            listener(&self.value);
        }
        true
    }

    pub fn set_r(&mut self, r: u8) -> bool {
        self.set_value(self.value.with_r(r), UpdateSource::Programmatic)
    }

    pub fn set_g(&mut self, g: u8) -> bool {
        self.set_value(self.value.with_g(g), UpdateSource::Programmatic)
    }

    pub fn set_b(&mut self, b: u8) -> bool {
        self.set_value(self.value.with_b(b), UpdateSource::Programmatic)
    }

    /// Hue in degrees.
    pub fn set_h(&mut self, h: f64) -> bool {
        self.set_value(self.value.with_h(h), UpdateSource::Programmatic)
    }

    /// Saturation, 0.0–1.0.
    pub fn set_s(&mut self, s: f64) -> bool {
        self.set_value(self.value.with_s(s), UpdateSource::Programmatic)
    }

    /// Lightness, 0.0–1.0.
    pub fn set_l(&mut self, l: f64) -> bool {
        self.set_value(self.value.with_l(l), UpdateSource::Programmatic)
    }

    pub fn set_alpha(&mut self, alpha: Alpha) -> bool {
        self.set_value(self.value.with_alpha(alpha), UpdateSource::Programmatic)
    }

    /// Parse and apply a free-form color string. Unparseable input leaves
    /// the value unchanged.
    pub fn set_input_string(&mut self, input: &str) -> bool {
        match PickerColor::parse(input) {
            Ok(color) => self.set_value(color, UpdateSource::Programmatic),
            Err(err) => {
                log::debug!("ignoring color input {:?}: {}", input, err);
                false
            }
        }
    }

    /// Hue slider write. Ignored when the whole-degree hue is unchanged.
    pub fn set_hue_from_slider(&mut self, hue: i32) -> bool {
        if hue == self.value.h() as i32 {
            return false;
        }
        self.set_h(hue as f64)
    }

    /// Apply a pointer press on the field.
    pub fn pointer_down(&mut self, sample: PointerSample) -> bool {
        self.apply_pointer(sample)
    }

    /// Apply pointer motion on the field; only a primary-button drag moves
    /// the selector.
    pub fn pointer_move(&mut self, sample: PointerSample) -> bool {
        if !sample.is_primary_drag() {
            return false;
        }
        self.apply_pointer(sample)
    }

    fn apply_pointer(&mut self, sample: PointerSample) -> bool {
        self.selector = field::clamp_pointer(sample.offset_x, sample.offset_y);
        let color = field::color_from_selector(self.selector, &self.base_color, self.value.a());
        log::trace!("selector {:?} -> {}", self.selector, color);
        self.set_value(color, UpdateSource::Pointer)
    }

    pub fn change_mode(&mut self) -> ColorPickerMode {
        self.mode = self.mode.next();
        self.mode
    }

    pub fn toggle_collection(&mut self) -> bool {
        self.collection_open = !self.collection_open;
        self.collection_open
    }

    /// Take a palette color and close the palette.
    pub fn select_palette_color(&mut self, color: PickerColor) -> bool {
        self.collection_open = false;
        self.set_value(color, UpdateSource::Programmatic)
    }

    /// Disabling alpha forces the value opaque.
    pub fn set_disable_alpha(&mut self, disable: bool) -> bool {
        if disable == self.options.disable_alpha {
            return false;
        }
        self.options.disable_alpha = disable;
        if disable {
            return self.set_alpha(Alpha::Byte(255));
        }
        false
    }

    pub fn set_always_update_binding(&mut self, always: bool) {
        self.options.always_update_binding = always;
    }

    /// The bound text value: hex with alpha, or plain hex when alpha is
    /// disabled.
    pub fn text_value(&self) -> String {
        let format = if self.options.disable_alpha {
            ColorOutputFormat::Hex
        } else {
            ColorOutputFormat::HexA
        };
        self.value.to_string_as(format)
    }

    /// The value as shown for the current mode.
    pub fn display_text(&self) -> String {
        let with_alpha = !self.options.disable_alpha;
        let format = match (self.mode, with_alpha) {
            (ColorPickerMode::Rgb, true) => ColorOutputFormat::Rgba,
            (ColorPickerMode::Rgb, false) => ColorOutputFormat::Rgb,
            (ColorPickerMode::Hsl, true) => ColorOutputFormat::Hsla,
            (ColorPickerMode::Hsl, false) => ColorOutputFormat::Hsl,
            (ColorPickerMode::Hex, true) => ColorOutputFormat::HexA,
            (ColorPickerMode::Hex, false) => ColorOutputFormat::Hex,
        };
        self.value.to_string_as(format)
    }
}
