//! # floem-field-picker
//!
//! A saturation/lightness field color picker widget for
//! [Floem](https://github.com/lapce/floem).
//!
//! The picker shows a 310x250 color field for the current hue, a hue slider,
//! an optional alpha slider, RGB/HSL/hex inputs and a palette of preset
//! swatches. The mapping between field coordinates and colors
//! ([`selector_from_color`], [`color_from_selector`], [`base_color`]) is
//! usable without any UI.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_field_picker::{field_picker, PickerColor};
//!
//! let color = RwSignal::new(PickerColor::parse("#3b82f6").unwrap());
//! // Use `field_picker(color)` in your Floem view tree.
//! ```

mod alpha_slider;
mod checkerboard;
mod color;
mod color_editor;
mod color_field;
mod constants;
mod field;
mod hue_slider;
mod inputs;
mod math;
mod options;
mod picker;
mod pointer;
mod slider;

pub use color::{Alpha, ColorOutputFormat, ParseColorError, PickerColor};
pub use constants::{FIELD_HEIGHT, FIELD_WIDTH, POINTER_MOVE_EVENT, POINTER_THROTTLE_MS};
pub use field::{
    base_color, base_color_for_hue, clamp_pointer, color_from_selector, selector_from_color,
    DominantPair, HueSector, SelectorPosition, HUE_SECTORS,
};
pub use options::{ColorPickerMode, PickerOptions};
pub use picker::{ColorPicker, UpdateSource};
pub use pointer::{
    PointerCallback, PointerEventSource, PointerSample, PointerSubscription, SubscriptionId,
    ThrottledPointerEvents, PRIMARY_BUTTON,
};

use std::sync::Once;

use floem::prelude::*;
use floem::reactive::RwSignal;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the color picker view with default options.
///
/// The picker reads from and writes to `color`. External changes to the
/// signal are reflected in the UI, and user edits update the signal.
pub fn field_picker(color: RwSignal<PickerColor>) -> impl IntoView {
    field_picker_with(color, PickerOptions::default())
}

/// Creates the color picker view with the given options.
pub fn field_picker_with(color: RwSignal<PickerColor>, options: PickerOptions) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    log::debug!("creating field picker, mode {:?}", options.mode);
    color_editor::color_editor(color, options)
}
