//! Alpha slider: the current color fading in from transparent (left) to
//! opaque (right) over a checkerboard.

use floem::kurbo::{Rect, Shape};
use floem::peniko::{Color, Gradient};

use floem::reactive::{create_effect, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::checkerboard;
use crate::color::{Alpha, PickerColor};
use crate::color_editor::PickerHandle;
use crate::constants;
use crate::slider::{self, Track};

pub(crate) struct AlphaSlider {
    id: ViewId,
    dragging: bool,
    color: PickerColor,
    track: Track,
    handle: PickerHandle,
}

pub(crate) fn alpha_slider(handle: PickerHandle) -> AlphaSlider {
    let id = ViewId::new();
    let color = handle.color;
    create_effect(move |_| id.update_state(color.get()));

    AlphaSlider {
        id,
        dragging: false,
        color: color.get_untracked(),
        track: Track::default(),
        handle,
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl AlphaSlider {
    fn drag_to(&self, x: f64) {
        if let Some(alpha) = self.track.fraction_at(x) {
            self.handle
                .update(|picker| picker.set_alpha(Alpha::Fraction(alpha)));
        }
    }
}

impl View for AlphaSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(color) = state.downcast::<PickerColor>() {
            self.color = *color;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.dragging = true;
                self.drag_to(e.pos.x);
                EventPropagation::Stop
            }
            Event::PointerMove(e) if self.dragging => {
                self.drag_to(e.pos.x);
                EventPropagation::Stop
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.dragging = false;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        self.track = Track::new(self.id.get_layout().unwrap_or_default().size);
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        if self.track.is_empty() {
            return;
        }
        let rect = self.track.rect();
        let mid = self.track.height / 2.0;
        let c = self.color;

        cx.save();
        cx.clip(&self.track.rounded());
        checkerboard::paint_checkerboard(cx, rect, constants::CHECKER_CELL);
        let fade = Gradient::new_linear((0.0, mid), (self.track.width, mid)).with_stops([
            Color::rgba8(c.r(), c.g(), c.b(), 0),
            Color::rgba8(c.r(), c.g(), c.b(), 255),
        ]);
        // Vello's Rect fast path only takes solid brushes.
        cx.fill(&rect.to_path(0.1), &fade, 0.0);
        cx.restore();

        slider::paint_outline_and_thumb(cx, &self.track, c.alpha());
    }
}
