//! Sizing, color, and styling constants for the pickers.

use crate::geometry::Size;

/// Spectrum picker: saturation/value area
pub const SPECTRUM_SIZE: Size = Size::new(180.0, 180.0);

/// Spectrum picker: round cursor on the area
pub const SPECTRUM_CURSOR: Size = Size::new(14.0, 14.0);

/// Vertical strip (hue, opacity) next to the area
pub const STRIP_SIZE: Size = Size::new(16.0, 180.0);

/// Bar cursor on a vertical strip
pub const STRIP_CURSOR: Size = Size::new(20.0, 8.0);

/// Multi-spectral picker: the rainbow area
pub const MULTI_SPECTRUM_SIZE: Size = Size::new(240.0, 150.0);

/// Horizontal opacity bar under the rainbow
pub const BAR_SIZE: Size = Size::new(240.0, 16.0);

/// Bar cursor on a horizontal bar
pub const BAR_CURSOR: Size = Size::new(8.0, 20.0);

/// Material picker: shade track
pub const SHADE_TRACK_SIZE: Size = Size::new(240.0, 12.0);

/// Material picker: shade cursor
pub const SHADE_CURSOR: Size = Size::new(12.0, 12.0);

/// Border radius for strips and bars
pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Channel input width
pub const INPUT_WIDTH: f32 = 32.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 64.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// History and material swatch edge
pub const SWATCH_SIZE: f64 = 18.0;

/// Material swatches per grid row
pub const SWATCHES_PER_ROW: usize = 10;

