//! Spectrum picker: a saturation/value area, a hue strip and an opacity
//! strip, plus hex and channel inputs.
//!
//! The hue strip paints the area, the area paints the opacity strip. Opacity
//! is tracked next to the color rather than inside it, and merged into the
//! value only when the color is read.

use crate::color::{ColorFormat, ColorValue};
use crate::constants::{SPECTRUM_CURSOR, SPECTRUM_SIZE, STRIP_CURSOR, STRIP_SIZE};
use crate::drag::DragTracker;
use crate::error::{PickerError, Result};
use crate::geometry::{HonorAxes, Size, SurfaceCoordinate};
use crate::gradient::{ColorStop, GradientSpec, StopColor};
use crate::history::History;
use crate::math;
use crate::nearest::nearest_color;
use crate::options::{hue_gradient, PickerOptions};
use crate::surface::{LinearGradient, Surface};

use super::{
    initial_color, opacity_at, opacity_position, Control, ControlSpec, HistoryPicker, Picker, PickerCore,
};

/// Color used when the options name none.
pub const DEFAULT_COLOR: &str = "#f00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumControl {
    Spectrum,
    Hue,
    Opacity,
}

/// Cascade steps of the spectrum picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumStep {
    SampleSpectrum,
    SampleHue,
    PaintSpectrum,
    PaintOpacity,
    PlaceOpacity,
    /// Opacity from the proposed (unclamped) strip offset.
    TakeOpacity,
    SampleOpacity,
    SyncInputs,
    Notify,
}

static SPECTRUM_SPEC: ControlSpec<SpectrumStep> = ControlSpec {
    honor: HonorAxes::BOTH,
    cascade: &[
        SpectrumStep::SampleSpectrum,
        SpectrumStep::PaintOpacity,
        SpectrumStep::PlaceOpacity,
        SpectrumStep::SyncInputs,
        SpectrumStep::Notify,
    ],
};

static HUE_SPEC: ControlSpec<SpectrumStep> = ControlSpec {
    honor: HonorAxes::Y_ONLY,
    cascade: &[
        SpectrumStep::SampleHue,
        SpectrumStep::PaintSpectrum,
        SpectrumStep::SampleSpectrum,
        SpectrumStep::PaintOpacity,
        SpectrumStep::PlaceOpacity,
        SpectrumStep::SyncInputs,
        SpectrumStep::Notify,
    ],
};

static OPACITY_SPEC: ControlSpec<SpectrumStep> = ControlSpec {
    honor: HonorAxes::Y_ONLY,
    cascade: &[
        SpectrumStep::TakeOpacity,
        SpectrumStep::SampleOpacity,
        SpectrumStep::SyncInputs,
        SpectrumStep::Notify,
    ],
};

impl SpectrumControl {
    pub fn spec(self) -> &'static ControlSpec<SpectrumStep> {
        match self {
            Self::Spectrum => &SPECTRUM_SPEC,
            Self::Hue => &HUE_SPEC,
            Self::Opacity => &OPACITY_SPEC,
        }
    }
}

/// Surface and cursor sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumLayout {
    pub spectrum: Size,
    pub spectrum_cursor: Size,
    pub hue: Size,
    pub hue_cursor: Size,
    pub opacity: Size,
    pub opacity_cursor: Size,
}

impl Default for SpectrumLayout {
    fn default() -> Self {
        Self {
            spectrum: SPECTRUM_SIZE,
            spectrum_cursor: SPECTRUM_CURSOR,
            hue: STRIP_SIZE,
            hue_cursor: STRIP_CURSOR,
            opacity: STRIP_SIZE,
            opacity_cursor: STRIP_CURSOR,
        }
    }
}

/// Text shown in the hex and channel inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelInputs {
    pub hex: String,
    pub r: String,
    pub g: String,
    pub b: String,
    pub a: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "r",
            Self::Green => "g",
            Self::Blue => "b",
        }
    }
}

#[derive(Debug)]
pub struct SpectrumPicker {
    core: PickerCore,
    spectrum: Control,
    hue: Control,
    opacity_strip: Control,
    hue_gradient: GradientSpec,
    hue_color: ColorValue,
    /// Color under the spectrum cursor, always opaque.
    spectrum_color: ColorValue,
    opacity: f64,
    inputs: ChannelInputs,
    history: History,
    drag: DragTracker<SpectrumControl>,
}

impl SpectrumPicker {
    pub fn new(options: PickerOptions) -> Result<Self> {
        Self::with_layout(options, SpectrumLayout::default())
    }

    pub fn with_layout(options: PickerOptions, layout: SpectrumLayout) -> Result<Self> {
        let hue_gradient = hue_gradient(&options.hue_stops())?;
        let history = History::new(
            options.history.colors.as_slice(),
            options.placeholders(true),
            options.history.hidden,
        );
        let hex_only = options.hex_only;
        let initial = initial_color(&options, DEFAULT_COLOR);

        let mut core = PickerCore::new(options, ColorFormat::Rgba, false);
        if hex_only {
            core.force_format(ColorFormat::Hex);
        }

        let mut picker = Self {
            core,
            spectrum: Control::new(layout.spectrum, layout.spectrum_cursor, SPECTRUM_SPEC.honor)?,
            hue: Control::new(layout.hue, layout.hue_cursor, HUE_SPEC.honor)?,
            opacity_strip: Control::new(layout.opacity, layout.opacity_cursor, OPACITY_SPEC.honor)?,
            hue_gradient,
            hue_color: initial.clone(),
            spectrum_color: initial.clone(),
            opacity: initial.opacity(),
            inputs: ChannelInputs::default(),
            history,
            drag: DragTracker::new(),
        };
        picker.paint_hue();
        picker.restore(&initial)?;
        Ok(picker)
    }

    pub fn inputs(&self) -> &ChannelInputs {
        &self.inputs
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn hue_color(&self) -> &ColorValue {
        &self.hue_color
    }

    /// The opaque color under the spectrum cursor.
    pub fn spectrum_color(&self) -> &ColorValue {
        &self.spectrum_color
    }

    pub fn hex_only(&self) -> bool {
        self.core.options().hex_only
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Remember the current color. `None` if it is already in the history.
    pub fn add_to_history(&mut self) -> Option<usize> {
        let value = self.color_value();
        self.history.add(&value)
    }

    /// Apply a remembered color and notify with auto-hide allowed.
    pub fn select_history(&mut self, index: usize) -> Result<()> {
        let color = ColorValue::process(self.history.get(index)?);
        self.restore(&color)?;
        let value = self.color_value();
        self.core.notify(&value, true);
        Ok(())
    }

    /// Hex input. Accepts `#rgb` and `#rrggbb`; opacity is kept.
    pub fn set_hex_input(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if !is_hex_input(text) {
            return Err(PickerError::InvalidInput {
                field: "hex",
                value: text.to_string(),
            });
        }
        let [r, g, b] = ColorValue::process(text).source().rgba.rgb();
        self.restore(&ColorValue::from_rgba(r, g, b, self.opacity))?;
        let value = self.color_value();
        self.core.notify(&value, false);
        Ok(())
    }

    /// One of the r/g/b inputs. Accepts integers in `0..=255`.
    pub fn set_channel_input(&mut self, channel: Channel, text: &str) -> Result<()> {
        let v: u8 = text.trim().parse().map_err(|_| PickerError::InvalidInput {
            field: channel.name(),
            value: text.to_string(),
        })?;
        let mut rgb = self.spectrum_color.source().rgba.rgb();
        rgb[channel as usize] = v;
        let [r, g, b] = rgb;
        self.restore(&ColorValue::from_rgba(r, g, b, self.opacity))?;
        let value = self.color_value();
        self.core.notify(&value, false);
        Ok(())
    }

    /// Opacity input. Accepts plain decimals in `[0, 1]`.
    pub fn set_opacity_input(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        let opacity = if is_decimal(text) {
            text.parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a))
        } else {
            None
        };
        let Some(opacity) = opacity else {
            return Err(PickerError::InvalidInput {
                field: "a",
                value: text.to_string(),
            });
        };
        self.opacity = opacity;
        self.place_opacity()?;
        self.sync_inputs();
        let value = self.color_value();
        self.core.notify(&value, false);
        Ok(())
    }

    /// Move every cursor to `color` without notifying.
    fn restore(&mut self, color: &ColorValue) -> Result<()> {
        let [r, g, b] = color.source().rgba.rgb();
        self.spectrum_color = ColorValue::from_rgba(r, g, b, 1.0);
        self.opacity = color.opacity();

        self.restore_hue([r, g, b])?;
        self.paint_spectrum()?;

        let hsv = self.spectrum_color.source().hsv;
        let size = self.spectrum.surface_size();
        let x = (size.width / 100.0 * hsv.s as f64).floor();
        let y = size.height - (size.height / 100.0 * hsv.v as f64).floor();
        let at = self.spectrum.centered_on(x, y);
        self.spectrum.place(at);
        self.spectrum.sample(1.0)?;

        self.paint_opacity()?;
        self.place_opacity()?;
        self.sync_inputs();
        log::debug!("restored cursors for {}", color);
        Ok(())
    }

    /// Put the hue cursor on the strip row closest to `rgb`.
    ///
    /// Candidates are every scanline of the painted strip, then every
    /// configured hue stop at `ceil(height * offset)`.
    fn restore_hue(&mut self, rgb: [u8; 3]) -> Result<()> {
        let surface = self.hue.surface();
        let height = surface.height();
        let mut palette: Vec<(f64, [u8; 3])> = (0..height)
            .filter_map(|y| surface.pixel(0, y).map(|[r, g, b, _]| (y as f64, [r, g, b])))
            .collect();
        palette.extend(self.hue_gradient.stops().iter().map(|stop| {
            let c = stop.color;
            (
                (height as f64 * stop.offset).ceil(),
                [c.r.round() as u8, c.g.round() as u8, c.b.round() as u8],
            )
        }));

        let (row, [r, g, b]) = nearest_color(rgb, palette.into_iter().map(|(y, c)| ((y, c), c)))?;
        self.hue_color = ColorValue::from_rgba(r, g, b, 1.0);
        self.hue.place(SurfaceCoordinate::new(0.0, row));
        self.hue.sample(1.0)?;
        Ok(())
    }

    fn paint_hue(&mut self) {
        let height = self.hue.surface().height();
        let layer = LinearGradient::vertical(height, self.hue_gradient.clone());
        self.hue.paint(&[layer]);
    }

    /// White to hue across, transparent to black down.
    fn paint_spectrum(&mut self) -> Result<()> {
        let [r, g, b] = self.hue_color.source().rgba.rgb();
        let hue = StopColor::rgb(r, g, b);
        let across = GradientSpec::new(vec![
            ColorStop::new(0.0, StopColor::WHITE),
            ColorStop::new(0.01, StopColor::WHITE),
            ColorStop::new(0.99, hue),
            ColorStop::new(1.0, hue),
        ])?;
        let down = GradientSpec::new(vec![
            ColorStop::new(0.01, StopColor::TRANSPARENT),
            ColorStop::new(0.99, StopColor::BLACK),
            ColorStop::new(1.0, StopColor::BLACK),
        ])?;
        let surface = self.spectrum.surface();
        let layers = [
            LinearGradient::horizontal(surface.width(), across),
            LinearGradient::vertical(surface.height(), down),
        ];
        self.spectrum.paint(&layers);
        Ok(())
    }

    /// Transparent at the top, the spectrum color at the bottom.
    fn paint_opacity(&mut self) -> Result<()> {
        let spec = GradientSpec::new(vec![
            ColorStop::new(0.0, StopColor::TRANSPARENT),
            ColorStop::new(1.0, StopColor::from_color(&self.spectrum_color)),
        ])?;
        let height = self.opacity_strip.surface().height();
        self.opacity_strip.paint(&[LinearGradient::vertical(height, spec)]);
        Ok(())
    }

    fn place_opacity(&mut self) -> Result<()> {
        let height = self.opacity_strip.surface_size().height;
        let at = self
            .opacity_strip
            .centered_on(0.0, opacity_position(self.opacity, height));
        self.opacity_strip.place(at);
        self.opacity_strip.sample(self.opacity)?;
        Ok(())
    }

    fn sync_inputs(&mut self) {
        let rgba = self.spectrum_color.source().rgba;
        self.inputs = ChannelInputs {
            hex: self.spectrum_color.hex().to_string(),
            r: rgba.r.to_string(),
            g: rgba.g.to_string(),
            b: rgba.b.to_string(),
            a: math::alpha_token(self.opacity),
        };
    }

    fn run_step(&mut self, step: SpectrumStep, proposed: SurfaceCoordinate) -> Result<()> {
        match step {
            SpectrumStep::SampleSpectrum => self.spectrum_color = self.spectrum.sample(1.0)?,
            SpectrumStep::SampleHue => self.hue_color = self.hue.sample(1.0)?,
            SpectrumStep::PaintSpectrum => self.paint_spectrum()?,
            SpectrumStep::PaintOpacity => self.paint_opacity()?,
            SpectrumStep::PlaceOpacity => self.place_opacity()?,
            SpectrumStep::TakeOpacity => {
                let height = self.opacity_strip.surface_size().height;
                self.opacity = opacity_at(proposed.y, height);
            }
            SpectrumStep::SampleOpacity => {
                self.opacity_strip.sample(self.opacity)?;
            }
            SpectrumStep::SyncInputs => self.sync_inputs(),
            SpectrumStep::Notify => {
                let value = self.color_value();
                self.core.notify(&value, false);
            }
        }
        Ok(())
    }
}

impl Picker for SpectrumPicker {
    type ControlId = SpectrumControl;

    fn core(&self) -> &PickerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PickerCore {
        &mut self.core
    }

    fn control(&self, id: SpectrumControl) -> &Control {
        match id {
            SpectrumControl::Spectrum => &self.spectrum,
            SpectrumControl::Hue => &self.hue,
            SpectrumControl::Opacity => &self.opacity_strip,
        }
    }

    fn control_mut(&mut self, id: SpectrumControl) -> &mut Control {
        match id {
            SpectrumControl::Spectrum => &mut self.spectrum,
            SpectrumControl::Hue => &mut self.hue,
            SpectrumControl::Opacity => &mut self.opacity_strip,
        }
    }

    fn drag_mut(&mut self) -> &mut DragTracker<SpectrumControl> {
        &mut self.drag
    }

    fn cascade(&mut self, id: SpectrumControl, proposed: SurfaceCoordinate) -> Result<()> {
        log::trace!("{id:?} cascade from {proposed:?}");
        for step in id.spec().cascade {
            self.run_step(*step, proposed)?;
        }
        Ok(())
    }

    fn set_color(&mut self, raw: &str) -> Result<()> {
        let color = ColorValue::process(raw);
        if !color.is_valid() {
            log::debug!("ignoring invalid color {raw:?}");
            return Err(PickerError::InvalidColor(raw.to_string()));
        }
        self.restore(&color)?;
        let value = self.color_value();
        self.core.notify(&value, false);
        Ok(())
    }

    fn color_value(&self) -> ColorValue {
        let [r, g, b] = self.spectrum_color.source().rgba.rgb();
        ColorValue::from_rgba(r, g, b, self.opacity)
    }

    fn refresh(&mut self) -> Result<()> {
        let current = self.color_value();
        self.paint_hue();
        self.restore(&current)
    }
}

fn is_hex_input(text: &str) -> bool {
    text.strip_prefix('#').is_some_and(|digits| {
        (digits.len() == 3 || digits.len() == 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
    })
}

/// Digits with an optional fractional part (`.5`, `1`, `0.25`).
fn is_decimal(text: &str) -> bool {
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text, None),
    };
    !text.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.map_or(true, |f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}

impl HistoryPicker for SpectrumPicker {
    fn history(&self) -> &History {
        SpectrumPicker::history(self)
    }

    fn add_to_history(&mut self) -> Option<usize> {
        SpectrumPicker::add_to_history(self)
    }

    fn select_history(&mut self, index: usize) -> Result<()> {
        SpectrumPicker::select_history(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::FormattedColor;
    use crate::drag::PointerButton;
    use crate::events::{EventKind, PickerEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn picker(color: &str) -> SpectrumPicker {
        SpectrumPicker::new(PickerOptions::default().with_color(color)).unwrap()
    }

    fn record(p: &mut SpectrumPicker) -> Rc<RefCell<Vec<(String, bool)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        p.on(
            EventKind::ColorChange,
            Box::new(move |e| {
                if let PickerEvent::ColorChange(c) = e {
                    s.borrow_mut().push((c.color.to_string(), c.enable_hide));
                }
            }),
        );
        seen
    }

    #[test]
    fn starts_at_the_default_color() {
        let p = SpectrumPicker::new(PickerOptions::default()).unwrap();
        assert_eq!(p.color(), FormattedColor::Text("rgba(255, 0, 0, 1)".into()));
        assert_eq!(p.inputs().hex, "#ff0000");
        assert_eq!(p.inputs().a, "1");
        assert_eq!(p.hue_color().hex(), "#ff0000");
    }

    #[test]
    fn set_color_places_spectrum_cursor_from_hsv() {
        let mut p = picker("#f00");
        let seen = record(&mut p);
        p.set_color("#3b82f6").unwrap();
        assert_eq!(p.color_value().hex(), "#3b82f6");
        assert_eq!(p.control(SpectrumControl::Spectrum).offset(), SurfaceCoordinate::new(129.0, 1.0));
        assert_eq!(seen.borrow().len(), 1);
        assert!(!seen.borrow()[0].1);
    }

    #[test]
    fn invalid_color_changes_nothing() {
        let mut p = picker("#123456");
        let seen = record(&mut p);
        let before = p.color_value();
        assert!(matches!(p.set_color("nope"), Err(PickerError::InvalidColor(_))));
        assert_eq!(p.color_value(), before);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn hue_cursor_restores_to_configured_stop() {
        let mut p = picker("#f00");
        p.set_color("#00ff00").unwrap();
        assert_eq!(p.hue_color().hex(), "#00ff00");
        // ceil(180 * 0.67)
        assert_eq!(p.control(SpectrumControl::Hue).offset().y, 121.0);
    }

    #[test]
    fn spectrum_corners() {
        let mut p = picker("#f00");
        assert!(p.pointer_down(SpectrumControl::Spectrum, PointerButton::Primary, SurfaceCoordinate::new(0.0, 0.0)));
        assert_eq!(p.color_value().hex(), "#ffffff");
        p.pointer_move(SurfaceCoordinate::new(180.0, 180.0));
        assert_eq!(p.color_value().hex(), "#000000");
        assert!(p.pointer_up());
    }

    #[test]
    fn hue_drag_repaints_the_spectrum() {
        let mut p = picker("#f00");
        p.pointer_down(SpectrumControl::Hue, PointerButton::Primary, SurfaceCoordinate::new(8.0, 60.0));
        p.pointer_up();
        let rgba = p.color_value().source().rgba;
        assert_eq!((rgba.r, rgba.b), (0, 255));
        assert_eq!(p.color_value().source().rgba.rgb(), p.hue_color().source().rgba.rgb());
    }

    #[test]
    fn opacity_drag_follows_the_unclamped_offset() {
        let mut p = picker("#f00");
        p.pointer_down(SpectrumControl::Opacity, PointerButton::Primary, SurfaceCoordinate::new(8.0, 90.0));
        assert_eq!(p.opacity(), 0.48);
        assert_eq!(p.inputs().a, "0.48");
        p.pointer_move(SurfaceCoordinate::new(8.0, 400.0));
        assert_eq!(p.opacity(), 1.0);
        p.pointer_move(SurfaceCoordinate::new(8.0, -100.0));
        assert_eq!(p.opacity(), 0.0);
        assert_eq!(p.color_value().rgb(), "rgb(255, 0, 0)");
    }

    #[test]
    fn text_inputs_validate_at_the_boundary() {
        let mut p = picker("#f00");
        assert!(p.set_hex_input("#0000f").is_err());
        assert!(p.set_hex_input("00f").is_err());
        p.set_hex_input("#00f").unwrap();
        assert_eq!(p.color_value().hex(), "#0000ff");

        assert!(p.set_channel_input(Channel::Red, "256").is_err());
        assert!(p.set_channel_input(Channel::Red, "-1").is_err());
        p.set_channel_input(Channel::Red, "255").unwrap();
        assert_eq!(p.color_value().hex(), "#ff00ff");
        assert_eq!(p.inputs().r, "255");

        for bad in ["1.5", "abc", "", "1.", "-0.2"] {
            assert!(p.set_opacity_input(bad).is_err(), "{bad:?}");
        }
        assert_eq!(p.opacity(), 1.0);
        p.set_opacity_input(".5").unwrap();
        assert_eq!(p.color_value().rgba(), "rgba(255, 0, 255, 0.5)");
    }

    #[test]
    fn hex_input_keeps_opacity() {
        let mut p = picker("rgba(0, 0, 0, 0.3)");
        p.set_hex_input("#abcdef").unwrap();
        assert_eq!(p.color_value().rgba(), "rgba(171, 205, 239, 0.3)");
    }

    #[test]
    fn history_round_trip() {
        let mut p = picker("#f00");
        let seen = record(&mut p);
        assert_eq!(p.add_to_history(), Some(0));
        assert_eq!(p.add_to_history(), None);
        p.set_color("#00f").unwrap();
        p.select_history(0).unwrap();
        assert_eq!(p.color_value().hex(), "#ff0000");
        assert!(seen.borrow().last().unwrap().1);
        assert!(p.select_history(5).is_err());
    }

    #[test]
    fn hex_only_mode() {
        let mut options = PickerOptions::default().with_format(ColorFormat::Rgba);
        options.hex_only = true;
        let p = SpectrumPicker::new(options).unwrap();
        assert_eq!(p.color().to_string(), "#ff0000");
        assert_eq!(p.history().slots().len(), 9);
    }

    #[test]
    fn validators() {
        assert!(is_hex_input("#AbC"));
        assert!(is_hex_input("#a1b2c3"));
        assert!(!is_hex_input("#a1b2c"));
        assert!(!is_hex_input("#ggg"));
        assert!(is_decimal("0"));
        assert!(is_decimal("0.75"));
        assert!(!is_decimal("."));
        assert!(!is_decimal("1e2"));
    }
}
