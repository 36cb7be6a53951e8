//! Reading colors back out of a painted surface.

use crate::color::ColorValue;
use crate::error::{PickerError, Result};
use crate::geometry::{Size, SurfaceCoordinate};
use crate::surface::Surface;

/// Integer pixel read for a cursor at `offset`.
///
/// The cursor center is read, pinned into the surface. An offset of exactly
/// zero reads the first row/column regardless of cursor size.
pub fn read_point(cursor: Size, surface_width: u32, surface_height: u32, offset: SurfaceCoordinate) -> (u32, u32) {
    let axis = |cursor: f64, len: u32, offset: f64| -> u32 {
        if offset == 0.0 || len == 0 {
            return 0;
        }
        let read = ((cursor / 2.0).ceil() + offset).floor();
        if read <= 0.0 {
            0
        } else if read >= len as f64 {
            len - 1
        } else {
            read as u32
        }
    };
    (
        axis(cursor.width, surface_width, offset.x),
        axis(cursor.height, surface_height, offset.y),
    )
}

/// Sample the surface under a cursor and combine it with `opacity`.
///
/// `offset` should already be clamped. The surface alpha is ignored; the
/// returned value carries `opacity` verbatim.
pub fn sample_color<S: Surface + ?Sized>(
    surface: &S,
    cursor: Size,
    offset: SurfaceCoordinate,
    opacity: f64,
) -> Result<ColorValue> {
    let (width, height) = (surface.width(), surface.height());
    if width == 0 || height == 0 {
        return Err(PickerError::DegenerateGeometry {
            what: "surface",
            width: width as f64,
            height: height as f64,
        });
    }
    let (x, y) = read_point(cursor, width, height, offset);
    let [r, g, b, _] = surface.pixel(x, y).ok_or(PickerError::DegenerateGeometry {
        what: "surface",
        width: width as f64,
        height: height as f64,
    })?;
    log::trace!("sampled ({x}, {y}) -> rgb({r}, {g}, {b})");
    Ok(ColorValue::from_rgba(r, g, b, opacity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{ColorStop, GradientSpec, StopColor};
    use crate::surface::{LinearGradient, PixelSurface};

    fn ramp(width: u32) -> PixelSurface {
        let mut s = PixelSurface::new(width, 4);
        let spec = GradientSpec::new(vec![
            ColorStop::new(0.0, StopColor::BLACK),
            ColorStop::new(1.0, StopColor::rgb(255, 0, 0)),
        ])
        .unwrap();
        s.fill_linear_gradient(&LinearGradient::horizontal(width, spec));
        s
    }

    #[test]
    fn zero_offset_pins_to_edge() {
        let cursor = Size::new(14.0, 14.0);
        assert_eq!(read_point(cursor, 100, 100, SurfaceCoordinate::new(0.0, 0.0)), (0, 0));
        assert_eq!(read_point(cursor, 100, 100, SurfaceCoordinate::new(1.0, 0.0)), (8, 0));
    }

    #[test]
    fn read_point_stays_inside() {
        let cursor = Size::new(14.0, 14.0);
        assert_eq!(read_point(cursor, 100, 50, SurfaceCoordinate::new(-7.0, 93.0)), (0, 49));
        assert_eq!(read_point(cursor, 100, 50, SurfaceCoordinate::new(-3.0, -2.0)), (4, 5));
        assert_eq!(read_point(cursor, 100, 50, SurfaceCoordinate::new(2.5, 3.9)), (9, 10));
    }

    #[test]
    fn sample_uses_given_opacity() {
        let s = ramp(256);
        let c = sample_color(&s, Size::new(14.0, 14.0), SurfaceCoordinate::new(0.0, 0.0), 0.4).unwrap();
        assert_eq!(c.source().rgba.rgb(), [0, 0, 0]);
        assert_eq!(c.opacity(), 0.4);

        let far = sample_color(&s, Size::new(14.0, 14.0), SurfaceCoordinate::new(300.0, 0.0), 1.0).unwrap();
        assert!(far.source().rgba.r > 250);
    }

    #[test]
    fn empty_surface_is_an_error() {
        let s = PixelSurface::new(0, 10);
        assert!(sample_color(&s, Size::new(4.0, 4.0), SurfaceCoordinate::default(), 1.0).is_err());
    }
}
