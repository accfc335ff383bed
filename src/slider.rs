//! Track geometry and thumb painting shared by the horizontal sliders.

use floem::kurbo::{Circle, Rect, RoundedRect, Stroke};
use floem::peniko::Color;
use floem::context::PaintCx;
use floem_renderer::Renderer;

use crate::constants::THUMB_RADIUS;

/// A horizontal track of `width` pixels whose thumb stays fully inside it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Track {
    pub width: f64,
    pub height: f64,
}

impl Track {
    pub fn new(size: floem::taffy::prelude::Size<f32>) -> Self {
        Self {
            width: size.width as f64,
            height: size.height as f64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    fn usable(&self) -> f64 {
        self.width - 2.0 * THUMB_RADIUS
    }

    /// Pointer x to a 0..=1 position along the track, or `None` when the
    /// track is too narrow to hold the thumb.
    pub fn fraction_at(&self, x: f64) -> Option<f64> {
        let usable = self.usable();
        if usable <= 0.0 {
            return None;
        }
        Some(((x - THUMB_RADIUS) / usable).clamp(0.0, 1.0))
    }

    pub fn thumb_x(&self, fraction: f64) -> f64 {
        THUMB_RADIUS + fraction.clamp(0.0, 1.0) * self.usable().max(0.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn rounded(&self) -> RoundedRect {
        self.rect().to_rounded_rect(THUMB_RADIUS)
    }
}

/// Outline the track and draw the ring thumb at `fraction`.
pub(crate) fn paint_outline_and_thumb(cx: &mut PaintCx, track: &Track, fraction: f64) {
    cx.stroke(&track.rounded(), Color::rgba8(0, 0, 0, 40), &Stroke::new(1.0));

    let center = (track.thumb_x(fraction), track.height / 2.0);
    cx.stroke(
        &Circle::new(center, THUMB_RADIUS),
        Color::rgba8(0, 0, 0, 80),
        &Stroke::new(1.0),
    );
    cx.stroke(
        &Circle::new(center, THUMB_RADIUS - 1.5),
        Color::WHITE,
        &Stroke::new(2.0),
    );
}
