//! End-to-end checks of the picker state driven through the public API:
//! pointer events through a throttled subscription, programmatic writes and
//! options loaded from JSON.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use floem_field_picker::{
    base_color_for_hue, selector_from_color, ColorPicker, ColorPickerMode, PickerColor,
    PickerOptions, PointerCallback, PointerEventSource, PointerSample, PointerSubscription,
    SelectorPosition, SubscriptionId, ThrottledPointerEvents, UpdateSource, POINTER_MOVE_EVENT,
    POINTER_THROTTLE_MS, PRIMARY_BUTTON,
};

fn rgb(c: PickerColor) -> (u8, u8, u8) {
    (c.r(), c.g(), c.b())
}

fn red_picker() -> Rc<RefCell<ColorPicker>> {
    let mut picker = ColorPicker::default();
    picker.set_value(PickerColor::from_rgb(255, 0, 0), UpdateSource::Programmatic);
    Rc::new(RefCell::new(picker))
}

fn subscribe_drag(
    events: &Rc<ThrottledPointerEvents>,
    picker: &Rc<RefCell<ColorPicker>>,
) -> PointerSubscription {
    let target = picker.clone();
    PointerSubscription::acquire(
        events.clone(),
        POINTER_MOVE_EVENT,
        POINTER_THROTTLE_MS,
        Rc::new(move |sample| {
            target.borrow_mut().pointer_move(sample);
        }),
    )
}

#[test]
fn drag_through_throttled_subscription() {
    let picker = red_picker();
    let events = Rc::new(ThrottledPointerEvents::new());
    let _subscription = subscribe_drag(&events, &picker);

    let t0 = Instant::now();
    let drag = |x, y| PointerSample::new(x, y, PRIMARY_BUTTON);

    assert_eq!(events.dispatch_at(POINTER_MOVE_EVENT, drag(62.0, 50.0), t0), 1);
    assert_eq!(rgb(picker.borrow().value()), (204, 163, 163));
    assert_eq!(picker.borrow().selector(), SelectorPosition::new(62.0, 50.0));

    // Inside the throttle window: dropped.
    let t1 = t0 + Duration::from_millis(POINTER_THROTTLE_MS / 2);
    assert_eq!(events.dispatch_at(POINTER_MOVE_EVENT, drag(155.0, 125.0), t1), 0);
    assert_eq!(rgb(picker.borrow().value()), (204, 163, 163));

    let t2 = t0 + Duration::from_millis(POINTER_THROTTLE_MS);
    assert_eq!(events.dispatch_at(POINTER_MOVE_EVENT, drag(155.0, 125.0), t2), 1);
    assert_eq!(rgb(picker.borrow().value()), (127, 64, 64));
    assert_eq!(rgb(picker.borrow().base_color()), (255, 0, 0));
}

#[test]
fn hover_without_button_is_ignored() {
    let picker = red_picker();
    let events = Rc::new(ThrottledPointerEvents::new());
    let _subscription = subscribe_drag(&events, &picker);

    events.dispatch(POINTER_MOVE_EVENT, PointerSample::new(155.0, 125.0, 0));
    assert_eq!(rgb(picker.borrow().value()), (255, 0, 0));
    assert_eq!(picker.borrow().selector(), SelectorPosition::new(310.0, 0.0));
}

#[test]
fn dropping_the_subscription_stops_delivery() {
    let picker = red_picker();
    let events = Rc::new(ThrottledPointerEvents::new());
    let mut subscription = subscribe_drag(&events, &picker);
    assert_eq!(events.listener_count(), 1);

    subscription.release();
    subscription.release();
    assert!(!subscription.is_active());
    assert_eq!(events.listener_count(), 0);
    assert_eq!(
        events.dispatch(POINTER_MOVE_EVENT, PointerSample::new(0.0, 250.0, PRIMARY_BUTTON)),
        0
    );

    let again = subscribe_drag(&events, &picker);
    assert_eq!(events.listener_count(), 1);
    drop(again);
    assert_eq!(events.listener_count(), 0);
}

#[test]
fn other_sources_can_stand_in_for_the_event_service() {
    #[derive(Default)]
    struct Recording {
        inner: ThrottledPointerEvents,
        subscribed: Cell<usize>,
        unsubscribed: Cell<usize>,
    }

    impl PointerEventSource for Recording {
        fn subscribe(
            &self,
            event: &str,
            throttle_ms: u64,
            callback: PointerCallback,
        ) -> SubscriptionId {
            self.subscribed.set(self.subscribed.get() + 1);
            self.inner.subscribe(event, throttle_ms, callback)
        }

        fn unsubscribe(&self, id: SubscriptionId) -> bool {
            self.unsubscribed.set(self.unsubscribed.get() + 1);
            self.inner.unsubscribe(id)
        }
    }

    let source = Rc::new(Recording::default());
    let subscription = PointerSubscription::acquire(
        source.clone(),
        POINTER_MOVE_EVENT,
        POINTER_THROTTLE_MS,
        Rc::new(|_| {}),
    );
    assert!(subscription.id().is_some());
    drop(subscription);
    assert_eq!(source.subscribed.get(), 1);
    assert_eq!(source.unsubscribed.get(), 1);
    assert_eq!(source.inner.listener_count(), 0);
}

#[test]
fn dragging_to_the_bottom_edge_keeps_hue_context() {
    let picker = red_picker();
    let mut picker = picker.borrow_mut();

    picker.pointer_down(PointerSample::new(200.0, 400.0, PRIMARY_BUTTON));
    assert_eq!(rgb(picker.value()), (0, 0, 0));
    assert_eq!(picker.selector(), SelectorPosition::new(200.0, 250.0));
    assert_eq!(rgb(picker.base_color()), (255, 0, 0));

    // Black again: nothing to report.
    let notified = Rc::new(Cell::new(0));
    let n = notified.clone();
    picker.on_change(move |_| n.set(n.get() + 1));
    assert!(!picker.set_r(0));
    assert_eq!(notified.get(), 0);
    assert_eq!(picker.selector(), SelectorPosition::new(0.0, 250.0));
}

#[test]
fn typed_color_moves_selector_to_its_own_hue() {
    let mut picker = ColorPicker::default();
    assert!(picker.set_input_string("#00ff00"));
    assert_eq!(rgb(picker.base_color()), (0, 255, 0));
    assert_eq!(picker.selector(), SelectorPosition::new(310.0, 0.0));

    assert!(!picker.set_input_string("not a color"));
    assert_eq!(rgb(picker.value()), (0, 255, 0));
}

#[test]
fn selector_matches_free_function() {
    let color = PickerColor::from_rgb(89, 74, 226);
    let picker = ColorPicker::new(color, PickerOptions::default());
    assert_eq!(picker.selector(), selector_from_color(&color));
    assert_eq!(picker.base_color(), base_color_for_hue(color.h()));
}

#[test]
fn options_from_json() {
    let options: PickerOptions = serde_json::from_str(
        r##"{ "disable_alpha": true, "mode": "Hex", "palette": ["#ff0000", "#00ff0080"] }"##,
    )
    .unwrap();
    assert!(options.disable_alpha);
    assert!(!options.disable_sliders);
    assert_eq!(options.mode, ColorPickerMode::Hex);
    assert_eq!(options.palette.len(), 2);
    assert_eq!(options.palette[1].a(), 0x80);

    let translucent = PickerColor::parse("#594ae280").unwrap();
    let mut picker = ColorPicker::new(translucent, options);
    assert_eq!(picker.value().a(), 255);
    assert_eq!(picker.display_text(), "#594ae2");
    assert_eq!(picker.text_value(), "#594ae2");

    let palette_color = picker.palette()[0];
    picker.toggle_collection();
    assert!(picker.select_palette_color(palette_color));
    assert!(!picker.is_collection_open());
    assert_eq!(picker.display_text(), "#ff0000");
}

#[test]
fn always_update_binding_reports_repeated_writes() {
    let mut picker = ColorPicker::default();
    let notified = Rc::new(Cell::new(0));
    let n = notified.clone();
    picker.on_change(move |_| n.set(n.get() + 1));

    let value = picker.value();
    assert!(!picker.set_value(value, UpdateSource::Programmatic));
    picker.set_always_update_binding(true);
    assert!(picker.set_value(value, UpdateSource::Programmatic));
    assert_eq!(notified.get(), 1);
}
