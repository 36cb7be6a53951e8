//! # floem-spectrum
//!
//! Canvas-style color pickers for [Floem](https://github.com/lapce/floem).
//!
//! Three picker variants share one engine: a spectrum picker (saturation and
//! value area with hue and opacity strips), a multi-spectral picker (one
//! rainbow area with an opacity bar) and a material picker (palette swatches
//! with a shade track). Each engine paints its gradients into in-memory
//! surfaces, turns cursor drags into colors by sampling those surfaces, and
//! moves its cursors back by nearest-color search when a color is set.
//!
//! The engines have no UI dependency. The `views` feature (on by default)
//! adds Floem views on top.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_spectrum::{Picker, PickerOptions, SpectrumPicker};
//!
//! let mut picker = SpectrumPicker::new(PickerOptions::default().with_color("#3b82f6")).unwrap();
//! picker.set_color("rgba(255, 0, 0, 0.5)").unwrap();
//! assert_eq!(picker.color().to_string(), "rgba(255, 0, 0, 0.5)");
//! ```

mod color;
mod constants;
mod drag;
mod error;
mod events;
mod geometry;
mod gradient;
mod history;
pub mod material;
mod math;
mod nearest;
mod options;
pub mod picker;
mod sampler;
mod surface;

#[cfg(feature = "views")]
pub mod view;

pub use color::{ColorFormat, ColorSource, ColorValue, FormattedColor, Hsla, Hsva, Rgba};
pub use drag::{DragSession, DragTracker, PointerButton};
pub use error::{PickerError, Result};
pub use events::{ColorChange, EventKind, Handler, ListenerId, Listeners, PickerEvent};
pub use geometry::{clamp_axis, clamp_offset, HonorAxes, Size, SurfaceCoordinate};
pub use gradient::{ColorStop, GradientSpec, StopColor};
pub use history::History;
pub use material::Shade;
pub use nearest::{closest_position, nearest_color};
pub use options::{default_hue_stops, HistoryOptions, HueStop, PickerOptions};
pub use picker::{
    Control, HistoryPicker, MaterialControl, MaterialPicker, MultiSpectralControl, MultiSpectralPicker, Picker,
    PickerCore, SpectrumControl, SpectrumPicker,
};
pub use sampler::{read_point, sample_color};
pub use surface::{LinearGradient, PixelSurface, Surface};

#[cfg(feature = "views")]
pub use view::{material_picker, multi_spectral_picker, spectrum_picker, PickerHandle};
