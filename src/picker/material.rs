//! Material picker: a grid of palette swatches for the current shade and a
//! track that steps through the shade scale.

use crate::color::{ColorFormat, ColorValue};
use crate::constants::{SHADE_CURSOR, SHADE_TRACK_SIZE};
use crate::drag::DragTracker;
use crate::error::{PickerError, Result};
use crate::geometry::{HonorAxes, Size, SurfaceCoordinate};
use crate::gradient::{ColorStop, GradientSpec, StopColor};
use crate::material::{self, MaterialHue, Shade, PALETTE};
use crate::nearest::closest_position;
use crate::options::PickerOptions;
use crate::surface::{LinearGradient, Surface};

use super::{initial_color, Control, ControlSpec, Picker, PickerCore};

pub const DEFAULT_COLOR: &str = "#f44336";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialControl {
    ShadeTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialStep {
    /// Snap the cursor to the closest shade. Ends the cascade when the shade
    /// did not change.
    SnapShade,
    ResolveSwatch,
    Notify,
}

static SHADE_TRACK_SPEC: ControlSpec<MaterialStep> = ControlSpec {
    honor: HonorAxes::X_ONLY,
    cascade: &[MaterialStep::SnapShade, MaterialStep::ResolveSwatch, MaterialStep::Notify],
};

impl MaterialControl {
    pub fn spec(self) -> &'static ControlSpec<MaterialStep> {
        match self {
            Self::ShadeTrack => &SHADE_TRACK_SPEC,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialLayout {
    pub track: Size,
    pub cursor: Size,
}

impl Default for MaterialLayout {
    fn default() -> Self {
        Self {
            track: SHADE_TRACK_SIZE,
            cursor: SHADE_CURSOR,
        }
    }
}

/// Track positions of every shade, in [`Shade::ALL`] order.
pub fn shade_positions(width: f64) -> [f64; 14] {
    let step = (width / Shade::ALL.len() as f64).ceil();
    std::array::from_fn(|i| i as f64 * step)
}

#[derive(Debug)]
pub struct MaterialPicker {
    core: PickerCore,
    track: Control,
    positions: [f64; 14],
    shade: Shade,
    hue: &'static MaterialHue,
    /// Whether `color` is `hue` at `shade`, so shade changes follow it.
    matched: bool,
    color: ColorValue,
    drag: DragTracker<MaterialControl>,
}

impl MaterialPicker {
    pub fn new(options: PickerOptions) -> Result<Self> {
        Self::with_layout(options, MaterialLayout::default())
    }

    pub fn with_layout(options: PickerOptions, layout: MaterialLayout) -> Result<Self> {
        let shade = options.shade.unwrap_or_default();
        let initial = initial_color(&options, DEFAULT_COLOR);
        let track = Control::new(layout.track, layout.cursor, SHADE_TRACK_SPEC.honor)?;
        let positions = shade_positions(track.surface_size().width);
        let mut picker = Self {
            core: PickerCore::new(options, ColorFormat::Hex, true),
            track,
            positions,
            shade,
            hue: &PALETTE[0],
            matched: false,
            color: initial.clone(),
            drag: DragTracker::new(),
        };
        picker.restore(&initial)?;
        Ok(picker)
    }

    pub fn shade(&self) -> Shade {
        self.shade
    }

    /// Alias of the swatch the current color came from, if any.
    pub fn selected_swatch(&self) -> Option<&'static str> {
        self.matched.then_some(self.hue.alias)
    }

    /// `(alias, hex)` of every swatch at the current shade.
    pub fn swatches(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        material::swatches(self.shade)
    }

    /// Apply the swatch `alias` at the current shade.
    pub fn select_swatch(&mut self, alias: &str) -> Result<()> {
        let hue = material::hue(alias).ok_or_else(|| PickerError::UnknownSwatch(alias.to_string()))?;
        let hex = hue
            .color(self.shade)
            .ok_or_else(|| PickerError::UnknownSwatch(format!("{alias} {}", self.shade)))?;
        self.hue = hue;
        self.matched = true;
        self.color = ColorValue::process(hex);
        self.paint_track()?;
        self.track.sample(1.0)?;
        let value = self.color.clone();
        self.core.notify(&value, true);
        Ok(())
    }

    /// Move to `shade` as if the track had been dragged there.
    pub fn set_shade(&mut self, shade: Shade) -> Result<()> {
        if !self.move_to_shade(shade)? {
            return Ok(());
        }
        self.resolve_swatch();
        let value = self.color.clone();
        self.core.notify(&value, false);
        Ok(())
    }

    fn paint_track(&mut self) -> Result<()> {
        let width = self.track.surface_size().width;
        let stops = Shade::ALL
            .iter()
            .zip(self.positions)
            .filter_map(|(shade, at)| {
                let hex = self.hue.color(*shade)?;
                Some(StopColor::parse(hex).map(|c| ColorStop::new((at / width).min(1.0), c)))
            })
            .collect::<Result<Vec<_>>>()?;
        let spec = GradientSpec::new(stops)?;
        let surface_width = self.track.surface().width();
        self.track.paint(&[LinearGradient::horizontal(surface_width, spec)]);
        Ok(())
    }

    /// Put the cursor's left edge on `shade`. Returns whether the shade
    /// changed.
    fn move_to_shade(&mut self, shade: Shade) -> Result<bool> {
        let changed = shade != self.shade;
        self.shade = shade;
        self.track
            .place(SurfaceCoordinate::new(self.positions[shade.index()], 0.0));
        self.track.sample(1.0)?;
        Ok(changed)
    }

    /// Follow the selected hue to the current shade. Neutral hues have no
    /// accents, so the color stays put there.
    fn resolve_swatch(&mut self) {
        if !self.matched {
            return;
        }
        if let Some(hex) = self.hue.color(self.shade) {
            self.color = ColorValue::process(hex);
        }
    }

    /// Find the swatch matching `color`, preferring the current shade.
    fn find_swatch(&self, color: &ColorValue) -> Option<(&'static MaterialHue, Shade)> {
        let target = color.source().rgba.rgb();
        let is_target = |hex: &str| ColorValue::process(hex).source().rgba.rgb() == target;
        let at = |shade: Shade| {
            PALETTE
                .iter()
                .find(|h| h.color(shade).is_some_and(is_target))
                .map(|h| (h, shade))
        };
        at(self.shade).or_else(|| Shade::ALL.into_iter().find_map(at))
    }

    fn restore(&mut self, color: &ColorValue) -> Result<()> {
        self.color = color.clone();
        match self.find_swatch(color) {
            Some((hue, shade)) => {
                self.hue = hue;
                self.matched = true;
                self.shade = shade;
            }
            None => self.matched = false,
        }
        self.paint_track()?;
        self.move_to_shade(self.shade)?;
        log::debug!(
            "restored {} to {:?} at {}",
            color,
            self.selected_swatch(),
            self.shade
        );
        Ok(())
    }

    fn run_step(&mut self, step: MaterialStep, _proposed: SurfaceCoordinate) -> Result<bool> {
        match step {
            MaterialStep::SnapShade => {
                let offset = self.track.offset().x;
                let index = closest_position(offset, &self.positions)?;
                return self.move_to_shade(Shade::ALL[index]);
            }
            MaterialStep::ResolveSwatch => self.resolve_swatch(),
            MaterialStep::Notify => {
                let value = self.color.clone();
                self.core.notify(&value, false);
            }
        }
        Ok(true)
    }
}

impl Picker for MaterialPicker {
    type ControlId = MaterialControl;

    fn core(&self) -> &PickerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PickerCore {
        &mut self.core
    }

    fn control(&self, id: MaterialControl) -> &Control {
        match id {
            MaterialControl::ShadeTrack => &self.track,
        }
    }

    fn control_mut(&mut self, id: MaterialControl) -> &mut Control {
        match id {
            MaterialControl::ShadeTrack => &mut self.track,
        }
    }

    fn drag_mut(&mut self) -> &mut DragTracker<MaterialControl> {
        &mut self.drag
    }

    fn cascade(&mut self, id: MaterialControl, proposed: SurfaceCoordinate) -> Result<()> {
        for step in id.spec().cascade {
            if !self.run_step(*step, proposed)? {
                log::trace!("{step:?} ended the {id:?} cascade");
                break;
            }
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
        self.paint_track()?;
        self.move_to_shade(self.shade)?;
        Ok(())
    }
}
