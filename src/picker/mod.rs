//! Picker engines.
//!
//! Every variant is a set of [`Control`]s (a painted surface plus a draggable
//! cursor) glued together by cascades: when one control moves, the steps in
//! its [`ControlSpec`] run in order, repainting and resampling the controls
//! that depend on it. Pointer handling is shared through the default methods
//! of [`Picker`]; variants only say what a move on each control means.

pub mod material;
pub mod multi_spectral;
pub mod spectrum;

use std::fmt;

use crate::color::{ColorFormat, ColorValue, FormattedColor};
use crate::drag::{DragTracker, PointerButton};
use crate::error::Result;
use crate::events::{ColorChange, EventKind, Handler, ListenerId, Listeners, PickerEvent};
use crate::geometry::{clamp_offset, HonorAxes, Size, SurfaceCoordinate};
use crate::history::History;
use crate::options::PickerOptions;
use crate::sampler::sample_color;
use crate::surface::{LinearGradient, PixelSurface, Surface};

pub use material::{MaterialControl, MaterialPicker};
pub use multi_spectral::{MultiSpectralControl, MultiSpectralPicker};
pub use spectrum::{Channel, ChannelInputs, SpectrumControl, SpectrumPicker};

/// What a control honors and what runs after it moves.
#[derive(Debug)]
pub struct ControlSpec<S: 'static> {
    pub honor: HonorAxes,
    pub cascade: &'static [S],
}

/// A surface with a cursor on it.
#[derive(Debug, Clone)]
pub struct Control {
    surface: PixelSurface,
    cursor: Size,
    honor: HonorAxes,
    offset: SurfaceCoordinate,
    cursor_color: ColorValue,
}

impl Control {
    pub fn new(surface: Size, cursor: Size, honor: HonorAxes) -> Result<Self> {
        let surface = surface.checked("surface")?;
        let cursor = cursor.checked("cursor")?;
        Ok(Self {
            surface: PixelSurface::new(surface.width.ceil() as u32, surface.height.ceil() as u32),
            cursor,
            honor,
            offset: SurfaceCoordinate::default(),
            cursor_color: ColorValue::from_rgba(0, 0, 0, 1.0),
        })
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn surface_size(&self) -> Size {
        Size::new(self.surface.width() as f64, self.surface.height() as f64)
    }

    pub fn cursor(&self) -> Size {
        self.cursor
    }

    pub fn honor(&self) -> HonorAxes {
        self.honor
    }

    /// Clamped top-left offset of the cursor.
    pub fn offset(&self) -> SurfaceCoordinate {
        self.offset
    }

    /// The color last sampled under the cursor.
    pub fn cursor_color(&self) -> &ColorValue {
        &self.cursor_color
    }

    /// Clamp `proposed` and move the cursor there.
    pub fn place(&mut self, proposed: SurfaceCoordinate) -> SurfaceCoordinate {
        self.offset = clamp_offset(self.cursor, self.surface_size(), proposed, self.honor);
        self.offset
    }

    /// Read the color under the cursor, carrying `opacity`.
    pub fn sample(&mut self, opacity: f64) -> Result<ColorValue> {
        let color = sample_color(&self.surface, self.cursor, self.offset, opacity)?;
        self.cursor_color = color.clone();
        Ok(color)
    }

    /// Clear and composite `layers` in order.
    pub fn paint(&mut self, layers: &[LinearGradient]) {
        self.surface.clear();
        for layer in layers {
            self.surface.fill_linear_gradient(layer);
        }
    }

    /// Offset that centers the cursor on the unhonored axes, for a surface
    /// point `(x, y)` on the honored ones.
    pub fn centered_on(&self, x: f64, y: f64) -> SurfaceCoordinate {
        SurfaceCoordinate::new(x - self.cursor.width / 2.0, y - self.cursor.height / 2.0)
    }
}

/// State every picker shares: options, visibility and listeners.
pub struct PickerCore {
    options: PickerOptions,
    format: ColorFormat,
    hide_after_change: bool,
    visible: bool,
    listeners: Listeners,
}

impl PickerCore {
    /// `default_format` and `hide_default` apply when the options leave them
    /// unset.
    pub fn new(options: PickerOptions, default_format: ColorFormat, hide_default: bool) -> Self {
        let format = options.format.unwrap_or(default_format);
        let hide_after_change = options.hide_after_color_change.unwrap_or(hide_default);
        let visible = options.inline;
        Self {
            options,
            format,
            hide_after_change,
            visible,
            listeners: Listeners::new(),
        }
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub(crate) fn force_format(&mut self, format: ColorFormat) {
        self.format = format;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.listeners.emit(&PickerEvent::Shown);
    }

    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.listeners.emit(&PickerEvent::Hidden);
    }

    pub fn on(&mut self, kind: EventKind, handler: Handler) -> ListenerId {
        self.listeners.add(kind, handler)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Announce `value` and hide if the change allows it.
    pub fn notify(&mut self, value: &ColorValue, enable_hide: bool) {
        let change = ColorChange {
            color: value.format(self.format),
            value: value.clone(),
            enable_hide,
        };
        log::debug!("color-change {} (hide: {})", change.color, enable_hide);
        self.listeners.emit(&PickerEvent::ColorChange(change));
        if enable_hide && self.hide_after_change && !self.options.inline {
            self.hide();
        }
    }

    /// Hide, then drop every listener.
    pub fn destroy(&mut self) {
        self.hide();
        self.listeners.clear();
    }
}

impl fmt::Debug for PickerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerCore")
            .field("format", &self.format)
            .field("visible", &self.visible)
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// The contract every picker variant exposes to its host.
pub trait Picker {
    /// Names the controls a drag can start on.
    type ControlId: Copy + PartialEq + fmt::Debug;

    fn core(&self) -> &PickerCore;
    fn core_mut(&mut self) -> &mut PickerCore;

    fn control(&self, id: Self::ControlId) -> &Control;
    fn control_mut(&mut self, id: Self::ControlId) -> &mut Control;
    fn drag_mut(&mut self) -> &mut DragTracker<Self::ControlId>;

    /// Run the cascade for a control whose cursor was just placed.
    /// `proposed` is the unclamped offset the placement came from.
    fn cascade(&mut self, id: Self::ControlId, proposed: SurfaceCoordinate) -> Result<()>;

    /// Parse `raw`, move every cursor to match it and notify. Invalid colors
    /// are rejected and leave the picker untouched.
    fn set_color(&mut self, raw: &str) -> Result<()>;

    /// The current color, opacity included.
    fn color_value(&self) -> ColorValue;

    /// Repaint and re-place cursors for the current color.
    fn refresh(&mut self) -> Result<()>;

    /// The current color in the configured output format.
    fn color(&self) -> FormattedColor {
        self.color_value().format(self.core().format())
    }

    fn show(&mut self) {
        self.core_mut().show();
    }

    fn hide(&mut self) {
        self.core_mut().hide();
    }

    fn is_visible(&self) -> bool {
        self.core().is_visible()
    }

    fn on(&mut self, kind: EventKind, handler: Handler) -> ListenerId {
        self.core_mut().on(kind, handler)
    }

    fn off(&mut self, id: ListenerId) -> bool {
        self.core_mut().off(id)
    }

    /// Cancel any drag, hide and drop listeners.
    fn destroy(&mut self) {
        self.drag_mut().release();
        self.core_mut().destroy();
    }

    /// Press on `id` at surface-local `point`. Returns whether a drag
    /// started.
    fn pointer_down(&mut self, id: Self::ControlId, button: PointerButton, point: SurfaceCoordinate) -> bool {
        let (cursor, honor) = {
            let control = self.control(id);
            (control.cursor(), control.honor())
        };
        let proposed = match self.drag_mut().press(id, button, point, cursor, honor) {
            Some(session) => session.base_offset,
            None => return false,
        };
        self.drag_to(id, proposed)
    }

    /// Pointer moved to `point`, in the pressed control's coordinates.
    /// A no-op without a live drag.
    fn pointer_move(&mut self, point: SurfaceCoordinate) -> bool {
        match self.drag_mut().moved(point) {
            Some((id, proposed)) => self.drag_to(id, proposed),
            None => false,
        }
    }

    /// Returns whether a drag was live.
    fn pointer_up(&mut self) -> bool {
        self.drag_mut().release()
    }

    #[doc(hidden)]
    fn drag_to(&mut self, id: Self::ControlId, proposed: SurfaceCoordinate) -> bool {
        self.control_mut(id).place(proposed);
        match self.cascade(id, proposed) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{id:?} cascade failed: {err}");
                false
            }
        }
    }
}

/// Pickers that keep a color history.
pub trait HistoryPicker: Picker {
    fn history(&self) -> &History;

    /// Remember the current color. `None` if it is already there.
    fn add_to_history(&mut self) -> Option<usize>;

    /// Apply slot `index` and notify with auto-hide allowed.
    fn select_history(&mut self, index: usize) -> Result<()>;
}

/// The configured starting color, or `fallback` when it does not parse.
pub(crate) fn initial_color(options: &PickerOptions, fallback: &str) -> ColorValue {
    let raw = options.initial_color(fallback);
    let color = ColorValue::process(raw);
    if color.is_valid() {
        return color;
    }
    log::warn!("initial color {raw:?} is invalid, using {fallback}");
    ColorValue::process(fallback)
}

/// Opacity from a position along a strip of length `len`, two decimals,
/// clamped to `[0, 1]`.
pub(crate) fn opacity_at(position: f64, len: f64) -> f64 {
    crate::math::round2(position / len).clamp(0.0, 1.0)
}

/// Surface point for `opacity` along a strip of length `len`.
pub(crate) fn opacity_position(opacity: f64, len: f64) -> f64 {
    (len * opacity).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{ColorStop, GradientSpec, StopColor};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn control_rejects_degenerate_sizes() {
        assert!(Control::new(Size::new(0.0, 10.0), Size::new(4.0, 4.0), HonorAxes::BOTH).is_err());
        assert!(Control::new(Size::new(10.0, 10.0), Size::new(4.0, 0.0), HonorAxes::BOTH).is_err());
    }

    #[test]
    fn control_places_then_samples() {
        let mut c = Control::new(Size::new(100.0, 10.0), Size::new(14.0, 14.0), HonorAxes::X_ONLY).unwrap();
        let spec = GradientSpec::new(vec![
            ColorStop::new(0.0, StopColor::BLACK),
            ColorStop::new(1.0, StopColor::WHITE),
        ])
        .unwrap();
        c.paint(&[LinearGradient::horizontal(100, spec)]);

        let at = c.place(SurfaceCoordinate::new(-40.0, 77.0));
        assert_eq!(at, SurfaceCoordinate::new(-7.0, -2.0));
        let color = c.sample(0.3).unwrap();
        assert!(color.source().rgba.r < 5);
        assert_eq!(color.opacity(), 0.3);
        assert_eq!(c.cursor_color(), &color);
    }

    #[test]
    fn core_hides_only_when_allowed() {
        let hidden = Rc::new(RefCell::new(0));
        let mut core = PickerCore::new(PickerOptions::default(), ColorFormat::Hex, true);
        let h = hidden.clone();
        core.on(EventKind::Hidden, Box::new(move |_| *h.borrow_mut() += 1));
        core.show();
        let red = ColorValue::process("red");

        core.notify(&red, false);
        assert!(core.is_visible());
        core.notify(&red, true);
        assert!(!core.is_visible());
        assert_eq!(*hidden.borrow(), 1);

        let mut inline = PickerCore::new(PickerOptions::default().inline(true), ColorFormat::Hex, true);
        assert!(inline.is_visible());
        inline.notify(&red, true);
        assert!(inline.is_visible());
    }

    #[test]
    fn notifications_use_the_output_format() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut core = PickerCore::new(PickerOptions::default(), ColorFormat::Rgb, false);
        let s = seen.clone();
        core.on(
            EventKind::ColorChange,
            Box::new(move |e| {
                if let PickerEvent::ColorChange(change) = e {
                    s.borrow_mut().push(change.color.to_string());
                }
            }),
        );
        core.notify(&ColorValue::process("#0000ff"), true);
        assert_eq!(*seen.borrow(), vec!["rgb(0, 0, 255)".to_string()]);
    }

    #[test]
    fn opacity_helpers() {
        assert_eq!(opacity_at(-12.0, 180.0), 0.0);
        assert_eq!(opacity_at(90.0, 180.0), 0.5);
        assert_eq!(opacity_at(181.0, 180.0), 1.0);
        assert_eq!(opacity_at(100.0, 180.0), 0.56);
        assert_eq!(opacity_position(0.5, 180.0), 90.0);
    }
}
