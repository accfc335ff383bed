//! Standalone demo: opens a window with the color picker and logs every
//! color it produces.

use floem::prelude::*;
use floem::reactive::create_effect;
use floem::window::WindowConfig;
use floem_field_picker::{field_picker_with, ColorOutputFormat, PickerColor, PickerOptions};

fn main() {
    env_logger::init();

    let color = RwSignal::new(PickerColor::default());
    create_effect(move |_| {
        log::info!("color: {}", color.get().to_string_as(ColorOutputFormat::HexA));
    });

    let options = PickerOptions::default();

    floem::Application::new()
        .window(
            move |_| {
                field_picker_with(color, options.clone()).on_event_stop(
                    floem::event::EventListener::WindowClosed,
                    |_| floem::quit_app(),
                )
            },
            Some(
                WindowConfig::default()
                    .size((340.0, 520.0))
                    .title("floem-field-picker"),
            ),
        )
        .run();
}
