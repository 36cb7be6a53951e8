//! One-dimensional color gradients.
//!
//! A [`GradientSpec`] is an ordered list of color stops. It drives both the
//! rasterization of picker surfaces and the hue restore lookup table.

use crate::color::ColorValue;
use crate::error::{PickerError, Result};

/// RGBA color of a stop: channels in 0–255 (as f64), alpha in 0–1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl StopColor {
    pub const TRANSPARENT: StopColor = StopColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    pub const WHITE: StopColor = StopColor {
        r: 255.0,
        g: 255.0,
        b: 255.0,
        a: 1.0,
    };
    pub const BLACK: StopColor = StopColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a,
        }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Stop color from a parsed value, keeping its opacity.
    pub fn from_color(color: &ColorValue) -> Self {
        let c = color.source().rgba;
        Self::rgba(c.r, c.g, c.b, c.a)
    }

    /// Parse a CSS color string into a stop color.
    pub fn parse(raw: &str) -> Result<Self> {
        let color = ColorValue::process(raw);
        if !color.is_valid() {
            return Err(PickerError::InvalidColor(raw.to_string()));
        }
        Ok(Self::from_color(&color))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: StopColor,
}

impl ColorStop {
    pub const fn new(offset: f64, color: StopColor) -> Self {
        Self { offset, color }
    }
}

/// Ordered color stops with non-decreasing offsets in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    stops: Vec<ColorStop>,
}

impl GradientSpec {
    /// Validate and wrap a stop list. At least two stops are required.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(PickerError::InvalidGradient(format!(
                "need at least two stops, got {}",
                stops.len()
            )));
        }
        let mut previous = 0.0;
        for stop in &stops {
            if !(0.0..=1.0).contains(&stop.offset) {
                return Err(PickerError::InvalidGradient(format!(
                    "stop offset {} outside [0, 1]",
                    stop.offset
                )));
            }
            if stop.offset < previous {
                return Err(PickerError::InvalidGradient(format!(
                    "stop offset {} precedes {}",
                    stop.offset, previous
                )));
            }
            previous = stop.offset;
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Interpolated color at `t` (clamped to `[0, 1]`).
    ///
    /// Interpolation happens on premultiplied channels, so a fade to
    /// transparent keeps its hue. Stops sharing an offset form a hard edge:
    /// at exactly that offset the later stop wins.
    pub fn color_at(&self, t: f64) -> StopColor {
        let t = t.clamp(0.0, 1.0);
        let next = self.stops.iter().position(|s| s.offset > t);
        let (from, to) = match next {
            Some(0) => return self.stops[0].color,
            None => return self.stops[self.stops.len() - 1].color,
            Some(i) => (self.stops[i - 1], self.stops[i]),
        };

        let f = (t - from.offset) / (to.offset - from.offset);
        let (c0, c1) = (from.color, to.color);
        let a = c0.a + (c1.a - c0.a) * f;
        if a <= 0.0 {
            return StopColor::TRANSPARENT;
        }
        let mix = |x0: f64, x1: f64| (x0 * c0.a + (x1 * c1.a - x0 * c0.a) * f) / a;
        StopColor {
            r: mix(c0.r, c1.r),
            g: mix(c0.g, c1.g),
            b: mix(c0.b, c1.b),
            a,
        }
    }
}
