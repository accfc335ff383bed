//! Hue slider (0–359 degrees).
//!
//! Renders the six hue sectors as a horizontal rasterized strip, red on both
//! ends.

use std::sync::Arc;

use floem::kurbo::Rect;
use floem::peniko::{self, Blob};

use floem::reactive::{create_effect, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color_editor::PickerHandle;
use crate::constants;
use crate::field;
use crate::slider::{self, Track};

const MAX_HUE: f64 = 359.0;

/// One row of hue colors, 0° at the left edge and 359° at the right.
fn hue_row(width: u32) -> Vec<[u8; 4]> {
    let last = (width.max(2) - 1) as f64;
    (0..width)
        .map(|px| {
            let c = field::base_color_for_hue(px as f64 / last * MAX_HUE);
            [c.r(), c.g(), c.b(), 255]
        })
        .collect()
}

fn rasterize_hue_strip(width: u32, height: u32) -> Vec<u8> {
    let row: Vec<u8> = hue_row(width).concat();
    row.repeat(height as usize)
}

struct StripImage {
    img: peniko::Image,
    hash: Vec<u8>,
    dims: (u32, u32),
}

pub(crate) struct HueSlider {
    id: ViewId,
    dragging: bool,
    hue: f64,
    track: Track,
    handle: PickerHandle,
    strip: Option<StripImage>,
}

/// Creates a horizontal hue slider that drives the picker's hue.
pub(crate) fn hue_slider(handle: PickerHandle) -> HueSlider {
    let id = ViewId::new();
    let color = handle.color;
    create_effect(move |_| id.update_state(color.get().h()));

    HueSlider {
        id,
        dragging: false,
        hue: color.get_untracked().h(),
        track: Track::default(),
        handle,
        strip: None,
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl HueSlider {
    fn drag_to(&mut self, x: f64) {
        let Some(fraction) = self.track.fraction_at(x) else {
            return;
        };
        let hue = (fraction * MAX_HUE).round() as i32;
        // Show the thumb where the pointer is even when the picker ignores
        // a same-degree write.
        self.hue = hue as f64;
        self.handle.update(|picker| picker.set_hue_from_slider(hue));
        self.id.request_layout();
    }

    fn strip_for(&mut self, scale: f64) -> Option<&StripImage> {
        let s = scale.max(1.0);
        let dims = (
            (self.track.width * s).round() as u32,
            (self.track.height * s).round() as u32,
        );
        if dims.0 == 0 || dims.1 == 0 {
            return None;
        }
        let stale = self.strip.as_ref().map_or(true, |strip| strip.dims != dims);
        if stale {
            let blob = Blob::new(Arc::new(rasterize_hue_strip(dims.0, dims.1)));
            self.strip = Some(StripImage {
                hash: blob.id().to_le_bytes().to_vec(),
                img: peniko::Image::new(blob, peniko::Format::Rgba8, dims.0, dims.1),
                dims,
            });
        }
        self.strip.as_ref()
    }
}

impl View for HueSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(hue) = state.downcast::<f64>() {
            self.hue = *hue;
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
        let track = self.track;
        let scale = cx.scale();

        cx.save();
        cx.clip(&track.rounded());
        if let Some(strip) = self.strip_for(scale) {
            cx.draw_img(
                floem_renderer::Img {
                    img: strip.img.clone(),
                    hash: &strip.hash,
                },
                track.rect(),
            );
        }
        cx.restore();

        slider::paint_outline_and_thumb(cx, &track, self.hue / MAX_HUE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_row_ends_are_red() {
        let row = hue_row(360);
        assert_eq!(row[0], [255, 0, 0, 255]);
        assert_eq!(row[359], [255, 0, 5, 255]);
    }

    #[test]
    fn test_strip_rows_repeat() {
        let strip = rasterize_hue_strip(8, 3);
        assert_eq!(strip.len(), 8 * 3 * 4);
        assert_eq!(strip[..32], strip[64..96]);
    }
}
