//! Color editor: the color field, hue and alpha sliders, preview swatch with
//! its palette, and the inputs row for the current display mode.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::alpha_slider::alpha_slider;
use crate::color::{Alpha, PickerColor};
use crate::color_field::color_field;
use crate::constants;
use crate::field::SelectorPosition;
use crate::hue_slider::hue_slider;
use crate::inputs::{color_text_input, copy_button, icon_button, number_input};
use crate::options::{ColorPickerMode, PickerOptions};
use crate::picker::{ColorPicker, UpdateSource};

/// Shared access to the picker plus the signals views render from.
///
/// All writes go through [`update`](Self::update), which releases the
/// picker borrow before publishing to signals so effects can read it back.
///
/// `color` mirrors the picker value for the views, HSL included. `binding`
/// is the caller's signal and is written only when the picker notifies a
/// change, so `always_update_binding` reaches it on every write.
#[derive(Clone)]
pub(crate) struct PickerHandle {
    picker: Rc<RefCell<ColorPicker>>,
    notified: Rc<Cell<Option<PickerColor>>>,
    pub binding: RwSignal<PickerColor>,
    pub color: RwSignal<PickerColor>,
    pub base: RwSignal<PickerColor>,
    pub selector: RwSignal<SelectorPosition>,
    pub mode: RwSignal<ColorPickerMode>,
    pub collection_open: RwSignal<bool>,
}

/// RGBA equality misses hue-only changes on grays.
fn same_color(a: &PickerColor, b: &PickerColor) -> bool {
    a == b && a.h() == b.h() && a.s() == b.s() && a.l() == b.l()
}

impl PickerHandle {
    fn new(binding: RwSignal<PickerColor>, options: PickerOptions) -> Self {
        let mut picker = ColorPicker::new(binding.get_untracked(), options);
        let notified = Rc::new(Cell::new(None));
        let pending = notified.clone();
        picker.on_change(move |value| pending.set(Some(*value)));

        let value = picker.value();
        // Alpha may have been forced opaque.
        if !same_color(&binding.get_untracked(), &value) {
            binding.set(value);
        }
        Self {
            notified,
            binding,
            color: RwSignal::new(value),
            base: RwSignal::new(picker.base_color()),
            selector: RwSignal::new(picker.selector()),
            mode: RwSignal::new(picker.mode()),
            collection_open: RwSignal::new(picker.is_collection_open()),
            picker: Rc::new(RefCell::new(picker)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&ColorPicker) -> R) -> R {
        f(&self.picker.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut ColorPicker) -> R) -> R {
        let result = f(&mut self.picker.borrow_mut());
        self.publish();
        result
    }

    fn publish(&self) {
        let (value, base, selector, mode, open) = self.read(|p| {
            (
                p.value(),
                p.base_color(),
                p.selector(),
                p.mode(),
                p.is_collection_open(),
            )
        });
        if !same_color(&self.color.get_untracked(), &value) {
            self.color.set(value);
        }
        if self.base.get_untracked() != base {
            self.base.set(base);
        }
        if self.selector.get_untracked() != selector {
            self.selector.set(selector);
        }
        if self.mode.get_untracked() != mode {
            self.mode.set(mode);
        }
        if self.collection_open.get_untracked() != open {
            self.collection_open.set(open);
        }
        if let Some(notified) = self.notified.take() {
            self.binding.set(notified);
        }
    }
}

fn swatch_style(s: floem::style::Style, c: PickerColor) -> floem::style::Style {
    s.width(constants::SWATCH_SIZE)
        .height(constants::SWATCH_SIZE)
        .border_radius(constants::RADIUS)
        .border(1.0)
        .border_color(Color::rgb8(180, 180, 180))
        .background(Color::rgba8(c.r(), c.g(), c.b(), c.a()))
        .cursor(floem::style::CursorStyle::Pointer)
}

fn palette_row(handle: PickerHandle, palette: Vec<PickerColor>) -> impl IntoView {
    let open = handle.collection_open;
    h_stack_from_iter(palette.into_iter().map(move |c| {
        let pick = handle.clone();
        empty()
            .style(move |s| swatch_style(s, c))
            .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
                pick.update(|picker| picker.select_palette_color(c));
            })
    }))
    .style(move |s| {
        s.gap(constants::GAP / 2.0)
            .justify_center()
            .apply_if(!open.get(), |s| s.hide())
    })
}

fn hide_unless(mode: RwSignal<ColorPickerMode>, shown: ColorPickerMode) -> impl Fn(floem::style::Style) -> floem::style::Style {
    move |s| {
        s.gap(constants::GAP / 2.0)
            .items_center()
            .apply_if(mode.get() != shown, |s| s.hide())
    }
}

fn rgb_inputs(handle: &PickerHandle) -> impl IntoView {
    let color = handle.color;
    let (r, g, b) = (handle.clone(), handle.clone(), handle.clone());
    h_stack((
        number_input("R", move || color.get().r() as f64, 255.0, move |v| {
            r.update(|p| p.set_r(v.round() as u8));
        }),
        number_input("G", move || color.get().g() as f64, 255.0, move |v| {
            g.update(|p| p.set_g(v.round() as u8));
        }),
        number_input("B", move || color.get().b() as f64, 255.0, move |v| {
            b.update(|p| p.set_b(v.round() as u8));
        }),
    ))
    .style(hide_unless(handle.mode, ColorPickerMode::Rgb))
}

fn hsl_inputs(handle: &PickerHandle) -> impl IntoView {
    let color = handle.color;
    let (h, s, l) = (handle.clone(), handle.clone(), handle.clone());
    h_stack((
        number_input("H", move || color.get().h(), 359.0, move |v| {
            h.update(|p| p.set_h(v));
        }),
        number_input("S", move || color.get().s() * 100.0, 100.0, move |v| {
            s.update(|p| p.set_s(v / 100.0));
        }),
        number_input("L", move || color.get().l() * 100.0, 100.0, move |v| {
            l.update(|p| p.set_l(v / 100.0));
        }),
    ))
    .style(hide_unless(handle.mode, ColorPickerMode::Hsl))
}

fn hex_input(handle: &PickerHandle) -> impl IntoView {
    container(color_text_input(handle.clone())).style(hide_unless(handle.mode, ColorPickerMode::Hex))
}

fn inputs_row(handle: &PickerHandle, disable_alpha: bool, disable_mode_switch: bool) -> impl IntoView {
    let color = handle.color;
    let mode = handle.mode;
    let alpha = handle.clone();
    let switch = handle.clone();
    let copy = handle.clone();
    h_stack((
        rgb_inputs(handle),
        hsl_inputs(handle),
        hex_input(handle),
        container(number_input(
            "A%",
            move || color.get().alpha() * 100.0,
            100.0,
            move |v| {
                alpha.update(|p| p.set_alpha(Alpha::Percent(v.round() as i32)));
            },
        ))
        .style(move |s| s.apply_if(disable_alpha || mode.get() == ColorPickerMode::Hex, |s| s.hide())),
        h_stack((
            icon_button(lucide_icons::Icon::RefreshCw, move || {
                switch.update(|p| p.change_mode());
            }),
            label(move || mode.get().label()).style(|s| {
                s.font_size(constants::LABEL_FONT)
                    .color(Color::rgb8(120, 120, 120))
            }),
        ))
        .style(move |s| {
            s.items_center()
                .gap(2.0)
                .apply_if(disable_mode_switch, |s| s.hide())
        }),
        copy_button(move || copy.read(|p| p.display_text())),
    ))
    .style(|s| s.gap(constants::GAP).items_center().justify_center())
}

/// Creates the full picker bound to `binding`.
pub(crate) fn color_editor(binding: RwSignal<PickerColor>, options: PickerOptions) -> impl IntoView {
    let disable_alpha = options.disable_alpha;
    let disable_color_field = options.disable_color_field;
    let disable_mode_switch = options.disable_mode_switch;
    let disable_inputs = options.disable_inputs;
    let disable_sliders = options.disable_sliders;
    let disable_preview = options.disable_preview;
    let palette = options.palette.clone();

    let handle = PickerHandle::new(binding, options);
    let color = handle.color;

    // Caller -> picker. Writes that originate in the picker arrive here
    // already equal to its value and are skipped.
    let sync = handle.clone();
    create_effect(move |_| {
        let c = binding.get();
        let current = sync.read(|p| p.value());
        if !same_color(&c, &current) {
            sync.update(|p| p.set_value(c, UpdateSource::Programmatic));
        }
    });

    let toggle = handle.clone();

    v_stack((
        color_field(handle.clone()).style(move |s| {
            s.border_radius(constants::RADIUS)
                .apply_if(disable_color_field, |s| s.hide())
        }),
        h_stack((
            empty()
                .style(move |s| {
                    swatch_style(s, color.get()).apply_if(disable_preview, |s| s.hide())
                })
                .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
                    toggle.update(|p| p.toggle_collection());
                }),
            v_stack((
                hue_slider(handle.clone()),
                alpha_slider(handle.clone()).style(move |s| s.apply_if(disable_alpha, |s| s.hide())),
            ))
            .style(move |s| {
                s.flex_grow(1.0)
                    .gap(constants::GAP)
                    .apply_if(disable_sliders, |s| s.hide())
            }),
        ))
        .style(|s| s.gap(constants::GAP).items_center()),
        palette_row(handle.clone(), palette),
        container(inputs_row(&handle, disable_alpha, disable_mode_switch))
            .style(move |s| s.apply_if(disable_inputs, |s| s.hide())),
    ))
    .style(|st| {
        st.gap(constants::GAP)
            .padding(constants::PADDING)
            .width(constants::FIELD_WIDTH as f32 + 2.0 * constants::PADDING)
            .background(Color::rgb8(242, 242, 242))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts how often an effect on `signal` runs, including the first run.
    fn effect_runs(signal: RwSignal<PickerColor>) -> Rc<Cell<usize>> {
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        create_effect(move |_| {
            let _ = signal.get();
            r.set(r.get() + 1);
        });
        runs
    }

    #[test]
    fn test_always_update_binding_writes_bound_signal_every_time() {
        let bound = RwSignal::new(PickerColor::default());
        let options = PickerOptions {
            always_update_binding: true,
            ..Default::default()
        };
        let handle = PickerHandle::new(bound, options);
        let runs = effect_runs(bound);
        assert_eq!(runs.get(), 1);

        // Green is already 74: the value does not change.
        assert!(handle.update(|p| p.set_g(74)));
        assert!(handle.update(|p| p.set_g(74)));
        assert_eq!(runs.get(), 3);
        assert_eq!(bound.get_untracked(), PickerColor::default());
    }

    #[test]
    fn test_bound_signal_only_sees_notified_changes() {
        let bound = RwSignal::new(PickerColor::default());
        let handle = PickerHandle::new(bound, PickerOptions::default());
        let runs = effect_runs(bound);

        assert!(!handle.update(|p| p.set_g(74)));
        assert_eq!(runs.get(), 1);

        assert!(handle.update(|p| p.set_g(75)));
        assert_eq!(runs.get(), 2);
        assert_eq!(bound.get_untracked().g(), 75);
    }

    #[test]
    fn test_hue_change_on_gray_reaches_views_but_not_binding() {
        let gray = PickerColor::from_rgb(128, 128, 128);
        let bound = RwSignal::new(gray);
        let handle = PickerHandle::new(bound, PickerOptions::default());
        let runs = effect_runs(bound);

        assert!(!handle.update(|p| p.set_h(120.0)));
        assert_eq!(runs.get(), 1);
        assert_eq!(handle.color.get_untracked().h(), 120.0);
        assert_eq!(handle.base.get_untracked(), PickerColor::from_rgb(0, 255, 0));
    }

    #[test]
    fn test_disabled_alpha_is_pushed_to_binding() {
        let bound = RwSignal::new(PickerColor::from_rgba(89, 74, 226, 128));
        let options = PickerOptions {
            disable_alpha: true,
            ..Default::default()
        };
        let handle = PickerHandle::new(bound, options);
        assert_eq!(bound.get_untracked().a(), 255);
        assert_eq!(handle.color.get_untracked().a(), 255);
    }
}
