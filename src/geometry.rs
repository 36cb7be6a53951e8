//! Surface-local geometry and cursor clamping.
//!
//! Offsets are the top-left position of a cursor relative to its surface, in
//! surface pixels. A cursor may hang half its size past either edge so that
//! its center can reach every pixel of the surface.

use serde::{Deserialize, Serialize};

use crate::error::{PickerError, Result};

/// Width and height of a surface or cursor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject zero, negative or non-finite dimensions.
    pub fn checked(self, what: &'static str) -> Result<Self> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(PickerError::DegenerateGeometry {
                what,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// A cursor offset in surface-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceCoordinate {
    pub x: f64,
    pub y: f64,
}

impl SurfaceCoordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which axes of pointer movement a control applies.
///
/// An axis that is not honored is pinned to the surface center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HonorAxes {
    pub x: bool,
    pub y: bool,
}

impl HonorAxes {
    pub const BOTH: HonorAxes = HonorAxes { x: true, y: true };
    pub const X_ONLY: HonorAxes = HonorAxes { x: true, y: false };
    pub const Y_ONLY: HonorAxes = HonorAxes { x: false, y: true };
}

/// Clamp one axis of a proposed cursor offset.
///
/// The lower bound check is deliberately two-step (`proposed + half < 0` and
/// then `proposed <= -half`); keep it that way, cursors snap at the
/// left/top edge based on it.
pub fn clamp_axis(cursor: f64, surface: f64, proposed: f64, honor: bool) -> f64 {
    if !honor {
        return (surface / 2.0).ceil() - (cursor / 2.0).ceil();
    }

    let half = cursor / 2.0;
    let mut offset = proposed;
    if offset + half < 0.0 && offset <= -half {
        offset = -half;
    }
    if offset > surface - half {
        offset = surface - half;
    }
    offset
}

/// Clamp a proposed offset on both axes.
pub fn clamp_offset(
    cursor: Size,
    surface: Size,
    proposed: SurfaceCoordinate,
    honor: HonorAxes,
) -> SurfaceCoordinate {
    SurfaceCoordinate {
        x: clamp_axis(cursor.width, surface.width, proposed.x, honor.x),
        y: clamp_axis(cursor.height, surface.height, proposed.y, honor.y),
    }
}
