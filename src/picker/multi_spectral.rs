//! Multi-spectral picker: one rainbow area (hue across, white to black
//! down) and a horizontal opacity bar.
//!
//! A single [`ColorValue`] is both the spectrum color and the output; its
//! alpha is the opacity carried into every spectrum sample.

use crate::color::{ColorFormat, ColorValue};
use crate::constants::{BAR_CURSOR, BAR_SIZE, MULTI_SPECTRUM_SIZE, SPECTRUM_CURSOR};
use crate::drag::DragTracker;
use crate::error::{PickerError, Result};
use crate::geometry::{HonorAxes, Size, SurfaceCoordinate};
use crate::gradient::{ColorStop, GradientSpec, StopColor};
use crate::history::History;
use crate::nearest::nearest_color;
use crate::options::PickerOptions;
use crate::surface::{LinearGradient, Surface};

use super::{
    initial_color, opacity_at, opacity_position, Control, ControlSpec, HistoryPicker, Picker, PickerCore,
};

pub const DEFAULT_COLOR: &str = "#f00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSpectralControl {
    Spectrum,
    Opacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSpectralStep {
    /// Resample the area, keeping the current opacity.
    SampleSpectrum,
    PaintOpacity,
    PlaceOpacity,
    TakeOpacity,
    SampleOpacity,
    Notify,
}

static SPECTRUM_SPEC: ControlSpec<MultiSpectralStep> = ControlSpec {
    honor: HonorAxes::BOTH,
    cascade: &[
        MultiSpectralStep::SampleSpectrum,
        MultiSpectralStep::PaintOpacity,
        MultiSpectralStep::PlaceOpacity,
        MultiSpectralStep::Notify,
    ],
};

static OPACITY_SPEC: ControlSpec<MultiSpectralStep> = ControlSpec {
    honor: HonorAxes::X_ONLY,
    cascade: &[
        MultiSpectralStep::TakeOpacity,
        MultiSpectralStep::SampleOpacity,
        MultiSpectralStep::Notify,
    ],
};

impl MultiSpectralControl {
    pub fn spec(self) -> &'static ControlSpec<MultiSpectralStep> {
        match self {
            Self::Spectrum => &SPECTRUM_SPEC,
            Self::Opacity => &OPACITY_SPEC,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiSpectralLayout {
    pub spectrum: Size,
    pub spectrum_cursor: Size,
    pub opacity: Size,
    pub opacity_cursor: Size,
}

impl Default for MultiSpectralLayout {
    fn default() -> Self {
        Self {
            spectrum: MULTI_SPECTRUM_SIZE,
            spectrum_cursor: SPECTRUM_CURSOR,
            opacity: BAR_SIZE,
            opacity_cursor: BAR_CURSOR,
        }
    }
}

#[derive(Debug)]
pub struct MultiSpectralPicker {
    core: PickerCore,
    spectrum: Control,
    opacity_bar: Control,
    color: ColorValue,
    history: History,
    drag: DragTracker<MultiSpectralControl>,
}

impl MultiSpectralPicker {
    pub fn new(options: PickerOptions) -> Result<Self> {
        Self::with_layout(options, MultiSpectralLayout::default())
    }

    pub fn with_layout(options: PickerOptions, layout: MultiSpectralLayout) -> Result<Self> {
        let history = History::new(
            options.history.colors.as_slice(),
            options.placeholders(false),
            options.history.hidden,
        );
        let initial = initial_color(&options, DEFAULT_COLOR);
        let mut picker = Self {
            core: PickerCore::new(options, ColorFormat::Rgba, false),
            spectrum: Control::new(layout.spectrum, layout.spectrum_cursor, SPECTRUM_SPEC.honor)?,
            opacity_bar: Control::new(layout.opacity, layout.opacity_cursor, OPACITY_SPEC.honor)?,
            color: initial.clone(),
            history,
            drag: DragTracker::new(),
        };
        picker.paint_spectrum()?;
        picker.restore(&initial)?;
        Ok(picker)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn add_to_history(&mut self) -> Option<usize> {
        self.history.add(&self.color)
    }

    pub fn select_history(&mut self, index: usize) -> Result<()> {
        let color = ColorValue::process(self.history.get(index)?);
        self.restore(&color)?;
        let value = self.color.clone();
        self.core.notify(&value, true);
        Ok(())
    }

    /// Rainbow across, then a white-to-clear-to-black overlay starting one
    /// row down.
    fn paint_spectrum(&mut self) -> Result<()> {
        let across = GradientSpec::new(vec![
            ColorStop::new(0.0, StopColor::rgb(255, 0, 0)),
            ColorStop::new(0.15, StopColor::rgb(255, 0, 255)),
            ColorStop::new(0.33, StopColor::rgb(0, 0, 255)),
            ColorStop::new(0.49, StopColor::rgb(0, 255, 255)),
            ColorStop::new(0.67, StopColor::rgb(0, 255, 0)),
            ColorStop::new(0.84, StopColor::rgb(255, 255, 0)),
            ColorStop::new(1.0, StopColor::rgb(255, 0, 0)),
        ])?;
        let down = GradientSpec::new(vec![
            ColorStop::new(0.0, StopColor::WHITE),
            ColorStop::new(0.5, StopColor::rgba(255, 255, 255, 0.0)),
            ColorStop::new(0.5, StopColor::TRANSPARENT),
            ColorStop::new(0.99, StopColor::BLACK),
            ColorStop::new(1.0, StopColor::BLACK),
        ])?;
        let (width, height) = (self.spectrum.surface().width(), self.spectrum.surface().height());
        let layers = [
            LinearGradient::horizontal(width, across),
            LinearGradient::new((0.0, 1.0), (0.0, height as f64), down),
        ];
        self.spectrum.paint(&layers);
        Ok(())
    }

    fn paint_opacity(&mut self) -> Result<()> {
        let [r, g, b] = self.color.source().rgba.rgb();
        let spec = GradientSpec::new(vec![
            ColorStop::new(0.0, StopColor::TRANSPARENT),
            ColorStop::new(1.0, StopColor::rgb(r, g, b)),
        ])?;
        let width = self.opacity_bar.surface().width();
        self.opacity_bar.paint(&[LinearGradient::horizontal(width, spec)]);
        Ok(())
    }

    fn place_opacity(&mut self) -> Result<()> {
        let opacity = self.color.opacity();
        let width = self.opacity_bar.surface_size().width;
        let at = self
            .opacity_bar
            .centered_on(opacity_position(opacity, width), 0.0);
        self.opacity_bar.place(at);
        self.opacity_bar.sample(opacity)?;
        Ok(())
    }

    /// Put the spectrum cursor on the first pixel closest to `color`.
    fn restore(&mut self, color: &ColorValue) -> Result<()> {
        self.color = color.clone();
        let surface = self.spectrum.surface();
        let (width, height) = (surface.width(), surface.height());
        let pixels = (0..height).flat_map(|y| (0..width).map(move |x| (x, y)));
        let (x, y) = nearest_color(
            color.source().rgba.rgb(),
            pixels.filter_map(|(x, y)| surface.pixel(x, y).map(|[r, g, b, _]| ((x, y), [r, g, b]))),
        )?;
        let at = self.spectrum.centered_on(x as f64, y as f64);
        self.spectrum.place(at);
        self.spectrum.sample(color.opacity())?;

        self.paint_opacity()?;
        self.place_opacity()?;
        log::debug!("restored cursors for {} at ({x}, {y})", color);
        Ok(())
    }

    fn run_step(&mut self, step: MultiSpectralStep, proposed: SurfaceCoordinate) -> Result<()> {
        match step {
            MultiSpectralStep::SampleSpectrum => {
                let opacity = self.color.opacity();
                self.color = self.spectrum.sample(opacity)?;
            }
            MultiSpectralStep::PaintOpacity => self.paint_opacity()?,
            MultiSpectralStep::PlaceOpacity => self.place_opacity()?,
            MultiSpectralStep::TakeOpacity => {
                let width = self.opacity_bar.surface_size().width;
                self.color.set_opacity(opacity_at(proposed.x, width));
            }
            MultiSpectralStep::SampleOpacity => {
                self.opacity_bar.sample(self.color.opacity())?;
            }
            MultiSpectralStep::Notify => {
                let value = self.color.clone();
                self.core.notify(&value, false);
            }
        }
        Ok(())
    }
}

impl Picker for MultiSpectralPicker {
    type ControlId = MultiSpectralControl;

    fn core(&self) -> &PickerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PickerCore {
        &mut self.core
    }

    fn control(&self, id: MultiSpectralControl) -> &Control {
        match id {
            MultiSpectralControl::Spectrum => &self.spectrum,
            MultiSpectralControl::Opacity => &self.opacity_bar,
        }
    }

    fn control_mut(&mut self, id: MultiSpectralControl) -> &mut Control {
        match id {
            MultiSpectralControl::Spectrum => &mut self.spectrum,
            MultiSpectralControl::Opacity => &mut self.opacity_bar,
        }
    }

    fn drag_mut(&mut self) -> &mut DragTracker<MultiSpectralControl> {
        &mut self.drag
    }

    fn cascade(&mut self, id: MultiSpectralControl, proposed: SurfaceCoordinate) -> Result<()> {
        for step in id.spec().cascade {
            self.run_step(*step, proposed)?;
        }
        Ok(())
    }

    fn set_color(&mut self, raw: &str) -> Result<()> {
        let color = ColorValue::process(raw);
        if !color.is_valid() {
            return Err(PickerError::InvalidColor(raw.to_string()));
        }
        self.restore(&color)?;
        let value = self.color.clone();
        self.core.notify(&value, false);
        Ok(())
    }

    fn color_value(&self) -> ColorValue {
        self.color.clone()
    }

    fn refresh(&mut self) -> Result<()> {
        let current = self.color.clone();
        self.restore(&current)
    }
}

impl HistoryPicker for MultiSpectralPicker {
    fn history(&self) -> &History {
        MultiSpectralPicker::history(self)
    }

    fn add_to_history(&mut self) -> Option<usize> {
        MultiSpectralPicker::add_to_history(self)
    }

    fn select_history(&mut self, index: usize) -> Result<()> {
        MultiSpectralPicker::select_history(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::PointerButton;

    fn picker(color: &str) -> MultiSpectralPicker {
        MultiSpectralPicker::new(PickerOptions::default().with_color(color)).unwrap()
    }

    #[test]
    fn white_restores_to_the_top_left() {
        let p = picker("#ffffff");
        assert_eq!(p.control(MultiSpectralControl::Spectrum).offset(), SurfaceCoordinate::new(-7.0, -7.0));
        assert_eq!(p.color().to_string(), "rgba(255, 255, 255, 1)");
    }

    #[test]
    fn set_color_keeps_the_exact_value() {
        let mut p = picker("#fff");
        p.set_color("hsla(120, 100%, 25%, 0.4)").unwrap();
        assert_eq!(p.color_value().hex(), "#008000");
        assert_eq!(p.color_value().opacity(), 0.4);
        let cursor = p.control(MultiSpectralControl::Spectrum).cursor_color().source().rgba;
        assert!(cursor.g > 100 && cursor.r < 40 && cursor.b < 40, "{cursor:?}");
        assert_eq!(cursor.a, 0.4);
    }

    #[test]
    fn opacity_is_threaded_through_spectrum_drags() {
        let mut p = picker("#f00");
        assert!(p.pointer_down(MultiSpectralControl::Opacity, PointerButton::Primary, SurfaceCoordinate::new(120.0, 3.0)));
        p.pointer_up();
        assert_eq!(p.color_value().opacity(), 0.48);
        assert_eq!(p.color_value().rgb(), "rgb(255, 0, 0)");
        assert_eq!(p.control(MultiSpectralControl::Opacity).offset().y, -2.0);

        p.pointer_down(MultiSpectralControl::Spectrum, PointerButton::Primary, SurfaceCoordinate::new(60.0, 0.0));
        p.pointer_move(SurfaceCoordinate::new(60.0, 149.0));
        p.pointer_up();
        assert_eq!(p.color_value().opacity(), 0.48);
        assert_eq!(p.color_value().hex(), "#000000");
    }

    #[test]
    fn dragging_the_bar_past_either_end_saturates() {
        let mut p = picker("#0f0");
        p.pointer_down(MultiSpectralControl::Opacity, PointerButton::Primary, SurfaceCoordinate::new(10.0, 8.0));
        p.pointer_move(SurfaceCoordinate::new(-300.0, 8.0));
        assert_eq!(p.color_value().opacity(), 0.0);
        p.pointer_move(SurfaceCoordinate::new(900.0, 8.0));
        assert_eq!(p.color_value().opacity(), 1.0);
        assert_eq!(p.control(MultiSpectralControl::Opacity).offset().x, 236.0);
    }

    #[test]
    fn invalid_color_is_rejected() {
        let mut p = picker("#00f");
        assert!(p.set_color("definitely not a color").is_err());
        assert_eq!(p.color_value().hex(), "#0000ff");
    }
}
