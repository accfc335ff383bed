//! Saturation/brightness color field.
//!
//! Renders the field for the current base color: white on the left, the
//! base color on the right, fading to black toward the bottom. The field is
//! rasterized once per base color at its native pixel size and scaled by the
//! renderer.
//!
//! Pointer presses go straight to the picker. Pointer motion is routed
//! through a throttled subscription held for as long as the view lives.

use std::rc::Rc;
use std::sync::Arc;

use floem::kurbo::{Circle, Point, Rect};
use floem::peniko::{self, Blob, Color};

use floem::reactive::{create_effect, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::PickerColor;
use crate::color_editor::PickerHandle;
use crate::constants::{self, FIELD_HEIGHT, FIELD_WIDTH};
use crate::field::{self, SelectorPosition};
use crate::pointer::{PointerSample, PointerSubscription, ThrottledPointerEvents, PRIMARY_BUTTON};

/// Rasterize the field for `base` to an RGBA8 buffer.
///
/// Each pixel samples the field at its center, so the buffer can be any size.
fn rasterize_field(width: u32, height: u32, base: &PickerColor) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for py in 0..height {
        let y = (py as f64 + 0.5) / height as f64 * FIELD_HEIGHT;
        let row_offset = (py * width * 4) as usize;
        for px in 0..width {
            let x = (px as f64 + 0.5) / width as f64 * FIELD_WIDTH;
            let c = field::color_from_selector(SelectorPosition::new(x, y), base, 255);
            let offset = row_offset + (px * 4) as usize;
            buf[offset..offset + 4].copy_from_slice(&[c.r(), c.g(), c.b(), 255]);
        }
    }
    buf
}

enum FieldUpdate {
    Base(PickerColor),
    Selector(SelectorPosition),
}

pub(crate) struct ColorField {
    id: ViewId,
    held: bool,
    base: PickerColor,
    selector: SelectorPosition,
    size: floem::taffy::prelude::Size<f32>,
    on_press: Box<dyn Fn(PointerSample)>,
    events: Rc<ThrottledPointerEvents>,
    /// Released when the view is dropped.
    _subscription: PointerSubscription,
    field_img: Option<peniko::Image>,
    field_hash: Vec<u8>,
    cached_base: Option<(u8, u8, u8)>,
}

/// Creates the color field bound to `handle`'s base color and selector.
pub(crate) fn color_field(handle: PickerHandle) -> ColorField {
    let id = ViewId::new();
    let base = handle.base;
    let selector = handle.selector;

    create_effect(move |_| {
        id.update_state(FieldUpdate::Base(base.get()));
    });

    create_effect(move |_| {
        id.update_state(FieldUpdate::Selector(selector.get()));
    });

    let events = Rc::new(ThrottledPointerEvents::new());
    let drag = handle.clone();
    let subscription = PointerSubscription::acquire(
        events.clone(),
        constants::POINTER_MOVE_EVENT,
        constants::POINTER_THROTTLE_MS,
        Rc::new(move |sample| {
            drag.update(|picker| picker.pointer_move(sample));
        }),
    );

    ColorField {
        id,
        held: false,
        base: base.get_untracked(),
        selector: selector.get_untracked(),
        size: Default::default(),
        on_press: Box::new(move |sample| {
            handle.update(|picker| picker.pointer_down(sample));
        }),
        events,
        _subscription: subscription,
        field_img: None,
        field_hash: Vec::new(),
        cached_base: None,
    }
    .style(|s| {
        s.width(FIELD_WIDTH as f32)
            .height(FIELD_HEIGHT as f32)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl ColorField {
    fn ensure_field_image(&mut self) {
        let key = (self.base.r(), self.base.g(), self.base.b());
        if self.cached_base == Some(key) {
            return;
        }

        let (w, h) = (FIELD_WIDTH as u32, FIELD_HEIGHT as u32);
        let pixels = rasterize_field(w, h, &self.base);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, w, h);

        self.field_hash = blob.id().to_le_bytes().to_vec();
        self.field_img = Some(img);
        self.cached_base = Some(key);
    }

    fn sample(&self, pos: Point) -> PointerSample {
        let buttons = if self.held { PRIMARY_BUTTON } else { 0 };
        PointerSample::new(pos.x, pos.y, buttons)
    }
}

impl View for ColorField {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<FieldUpdate>() {
            match *update {
                FieldUpdate::Base(base) => self.base = base,
                FieldUpdate::Selector(selector) => self.selector = selector,
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                (self.on_press)(self.sample(e.pos));
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                self.events
                    .dispatch(constants::POINTER_MOVE_EVENT, self.sample(e.pos));
                if self.held {
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.held = false;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        self.ensure_field_image();
        if let Some(ref img) = self.field_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.field_hash,
                },
                rect,
            );
        }
        cx.restore();

        // Cursor, scaled from field pixels in case the view is resized
        let (sx, sy) = self.selector.rounded();
        let cur_pt = Point::new(sx / FIELD_WIDTH * w, sy / FIELD_HEIGHT * h);
        let outer = Circle::new(cur_pt, constants::CURSOR_RADIUS + 1.0);
        cx.stroke(
            &outer,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let cursor = Circle::new(cur_pt, constants::CURSOR_RADIUS);
        cx.stroke(&cursor, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
    }
}
