//! Raster surfaces the pickers paint gradients into and sample from.
//!
//! [`PixelSurface`] is a plain RGBA8 buffer with canvas-like semantics:
//! clearing makes every pixel transparent black, gradient fills are
//! composited source-over, and pixel reads return straight (non
//! premultiplied) channels.

use crate::gradient::{GradientSpec, StopColor};

/// A linear gradient between two points in surface pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub spec: GradientSpec,
}

impl LinearGradient {
    pub fn new(from: (f64, f64), to: (f64, f64), spec: GradientSpec) -> Self {
        Self { from, to, spec }
    }

    /// Left edge to right edge of a surface `width` pixels wide.
    pub fn horizontal(width: u32, spec: GradientSpec) -> Self {
        Self::new((0.0, 0.0), (width as f64, 0.0), spec)
    }

    /// Top edge to bottom edge of a surface `height` pixels tall.
    pub fn vertical(height: u32, spec: GradientSpec) -> Self {
        Self::new((0.0, 0.0), (0.0, height as f64), spec)
    }

    /// Color at the center of pixel `(x, y)`.
    fn color_at_pixel(&self, x: u32, y: u32) -> StopColor {
        let (dx, dy) = (self.to.0 - self.from.0, self.to.1 - self.from.1);
        let len_sq = dx * dx + dy * dy;
        if len_sq <= f64::EPSILON {
            return self.spec.color_at(0.0);
        }
        let px = x as f64 + 0.5 - self.from.0;
        let py = y as f64 + 0.5 - self.from.1;
        self.spec.color_at((px * dx + py * dy) / len_sq)
    }
}

/// The raster contract the picking engine relies on.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reset every pixel to transparent black.
    fn clear(&mut self);

    /// Composite a linear gradient over the whole surface.
    fn fill_linear_gradient(&mut self, gradient: &LinearGradient);

    /// Straight RGBA at integer coordinates, `None` outside the surface.
    fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]>;
}

/// Software RGBA8 surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// A transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Raw row-major RGBA8 bytes.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_linear_gradient(&mut self, gradient: &LinearGradient) {
        for y in 0..self.height {
            for x in 0..self.width {
                let src = gradient.color_at_pixel(x, y);
                let i = self.index(x, y);
                let dst = &mut self.pixels[i..i + 4];
                composite_over(dst, src);
            }
        }
    }

    fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }
}

/// Source-over `src` onto the straight-alpha pixel `dst`.
fn composite_over(dst: &mut [u8], src: StopColor) {
    let sa = src.a.clamp(0.0, 1.0);
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        dst.fill(0);
        return;
    }
    let blend = |s: f64, d: u8| {
        let v = (s * sa + d as f64 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    dst[0] = blend(src.r, dst[0]);
    dst[1] = blend(src.g, dst[1]);
    dst[2] = blend(src.b, dst[2]);
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
