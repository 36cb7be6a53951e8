//! Backdrop for opacity controls, so transparent pixels read as such.
//!
//! The grid is laid out in surface pixels, two cells across the control's
//! short side, so a vertical strip and a horizontal bar get the same pattern
//! turned with them. It is scaled to the widget when painted.

use floem::context::PaintCx;
use floem::kurbo::Rect;
use floem::peniko::Color;
use floem_renderer::Renderer;

use crate::geometry::Size;

const BASE: Color = Color::rgb8(238, 238, 238);
const TILE: Color = Color::rgb8(191, 191, 191);

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Checkerboard {
    surface: Size,
    cell: f64,
}

impl Checkerboard {
    pub(crate) fn for_surface(surface: Size) -> Self {
        let cell = (surface.width.min(surface.height) / 2.0).max(1.0);
        Self { surface, cell }
    }

    /// `(columns, rows)` along the surface axes.
    fn grid(&self) -> (usize, usize) {
        (
            (self.surface.width / self.cell).ceil() as usize,
            (self.surface.height / self.cell).ceil() as usize,
        )
    }

    /// Darker tiles in surface pixels, cropped to the surface.
    fn tiles(&self) -> impl Iterator<Item = Rect> + '_ {
        let (cols, rows) = self.grid();
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .filter(|(row, col)| (row + col) % 2 == 1)
            .map(move |(row, col)| {
                let x = col as f64 * self.cell;
                let y = row as f64 * self.cell;
                Rect::new(
                    x,
                    y,
                    (x + self.cell).min(self.surface.width),
                    (y + self.cell).min(self.surface.height),
                )
            })
    }

    pub(crate) fn paint(&self, cx: &mut PaintCx, rect: Rect) {
        let sx = rect.width() / self.surface.width;
        let sy = rect.height() / self.surface.height;
        cx.fill(&rect, BASE, 0.0);
        for tile in self.tiles() {
            let scaled = Rect::new(
                rect.x0 + tile.x0 * sx,
                rect.y0 + tile.y0 * sy,
                rect.x0 + tile.x1 * sx,
                rect.y0 + tile.y1 * sy,
            );
            cx.fill(&scaled, TILE, 0.0);
        }
    }
}
