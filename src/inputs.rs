//! Text inputs and small buttons for the picker's inputs row.

use floem::event::{Event, EventListener, EventPropagation};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color_editor::PickerHandle;
use crate::constants;

fn is_enter(event: &Event) -> bool {
    if let Event::KeyDown(ke) = event {
        return ke.key.logical_key == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter);
    }
    false
}

fn input_style(s: floem::style::Style, width: f32) -> floem::style::Style {
    s.width(width)
        .padding(2.0)
        .font_size(constants::INPUT_FONT)
        .font_family("monospace".to_string())
        .background(Color::WHITE)
        .border(1.0)
        .border_color(Color::rgb8(200, 200, 200))
        .border_radius(3.0)
}

/// A labelled numeric input over `0..=max`.
///
/// `value` is read reactively to refresh the text; `on_commit` receives the
/// clamped number on Enter or focus loss. Unparseable text snaps back to the
/// current value.
pub(crate) fn number_input(
    lbl: &'static str,
    value: impl Fn() -> f64 + 'static,
    max: f64,
    on_commit: impl Fn(f64) + 'static,
) -> impl IntoView {
    let value = std::rc::Rc::new(value);
    let text = RwSignal::new(String::new());

    let read = value.clone();
    create_effect(move |_| {
        let display = format!("{}", read().round() as i64);
        if text.get_untracked() != display {
            text.set(display);
        }
    });

    let commit = move || {
        let raw = text.get_untracked();
        if let Ok(num) = raw.trim().parse::<f64>() {
            on_commit(num.clamp(0.0, max));
        }
        let display = format!("{}", value().round() as i64);
        if text.get_untracked() != display {
            text.set(display);
        }
    };
    let commit = std::rc::Rc::new(commit);
    let on_blur = commit.clone();

    v_stack((
        text_input(text)
            .style(|s| input_style(s, constants::INPUT_WIDTH))
            .on_event_stop(EventListener::FocusLost, move |_| on_blur())
            .on_event(EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    commit();
                    return EventPropagation::Stop;
                }
                EventPropagation::Continue
            }),
        label(move || lbl).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .justify_content(Some(floem::taffy::AlignContent::Center))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// Free-form color input. Shows the value in the picker's current display
/// format and accepts any parseable color string; anything else is
/// discarded on commit.
pub(crate) fn color_text_input(handle: PickerHandle) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let color = handle.color;
    let mode = handle.mode;

    let display = handle.clone();
    create_effect(move |_| {
        let _ = (color.get(), mode.get());
        let current = display.read(|picker| picker.display_text());
        if text.get_untracked() != current {
            text.set(current);
        }
    });

    let commit = move || {
        let raw = text.get_untracked();
        handle.update(|picker| picker.set_input_string(&raw));
        let current = handle.read(|picker| picker.display_text());
        if text.get_untracked() != current {
            text.set(current);
        }
    };
    let commit = std::rc::Rc::new(commit);
    let on_blur = commit.clone();

    text_input(text)
        .style(|s| input_style(s, constants::HEX_INPUT_WIDTH))
        .on_event_stop(EventListener::FocusLost, move |_| on_blur())
        .on_event(EventListener::KeyDown, move |e| {
            if is_enter(e) {
                commit();
                return EventPropagation::Stop;
            }
            EventPropagation::Continue
        })
}

/// A small icon button that runs `on_press` on release.
pub(crate) fn icon_button(
    icon: lucide_icons::Icon,
    on_press: impl Fn() + 'static,
) -> impl IntoView {
    let pressed = RwSignal::new(false);
    let glyph = icon.unicode().to_string();
    container(
        label(move || glyph.clone()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(EventListener::PointerUp, move |_| {
        pressed.set(false);
        on_press();
    })
}

/// Copies the result of `get_text` to the clipboard.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    icon_button(lucide_icons::Icon::Copy, move || copy_to_clipboard(&get_text()))
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(err) = clipboard.set_text(text) {
                log::warn!("failed to copy {:?} to clipboard: {}", text, err);
            }
        }
        Err(err) => log::warn!("clipboard unavailable: {}", err),
    }
}
