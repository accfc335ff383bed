//! Checkerboard backdrop that shows through translucent colors.

use floem::context::PaintCx;
use floem::kurbo::Rect;
use floem::peniko::Color;
use floem_renderer::Renderer;

const LIGHT: Color = Color::rgb8(255, 255, 255);
const DARK: Color = Color::rgb8(204, 204, 204);

/// Paint `rect` with alternating `cell`-sized squares, light in the top-left.
pub(crate) fn paint_checkerboard(cx: &mut PaintCx, rect: Rect, cell: f64) {
    cx.fill(&rect, LIGHT, 0.0);
    let mut y = rect.y0;
    let mut row = 0usize;
    while y < rect.y1 {
        let y1 = (y + cell).min(rect.y1);
        let mut x = rect.x0 + if row % 2 == 0 { cell } else { 0.0 };
        while x < rect.x1 {
            cx.fill(&Rect::new(x, y, (x + cell).min(rect.x1), y1), DARK, 0.0);
            x += 2.0 * cell;
        }
        y = y1;
        row += 1;
    }
}
