//! Floem views over the picker engines.
//!
//! An engine lives in a [`PickerHandle`]: an `Rc<RefCell<_>>` shared by every
//! view of one picker, plus a revision signal bumped after each mutation so
//! surfaces and inputs know to redraw.

mod checkerboard;
mod inputs;
mod surface_view;
mod swatches;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};
use floem::text::FONT_SYSTEM;

use crate::constants;
use crate::events::{EventKind, PickerEvent};
use crate::picker::{
    Channel, MaterialControl, MaterialPicker, MultiSpectralControl, MultiSpectralPicker, Picker,
    SpectrumControl, SpectrumPicker,
};

pub use surface_view::{surface_view, SurfaceView};

static LOAD_LUCIDE_FONT: Once = Once::new();

fn load_lucide_font() {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
}

/// A picker engine shared between views.
pub struct PickerHandle<P> {
    engine: Rc<RefCell<P>>,
    revision: RwSignal<u64>,
    color: RwSignal<String>,
    pending: Rc<RefCell<Option<String>>>,
}

impl<P> Clone for PickerHandle<P> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            revision: self.revision,
            color: self.color,
            pending: self.pending.clone(),
        }
    }
}

impl<P: Picker + 'static> PickerHandle<P> {
    pub fn new(mut picker: P) -> Self {
        let color = RwSignal::new(picker.color().to_string());
        let pending = Rc::new(RefCell::new(None));
        let sink = pending.clone();
        picker.on(
            EventKind::ColorChange,
            Box::new(move |event| {
                if let PickerEvent::ColorChange(change) = event {
                    *sink.borrow_mut() = Some(change.color.to_string());
                }
            }),
        );
        Self {
            engine: Rc::new(RefCell::new(picker)),
            revision: RwSignal::new(0),
            color,
            pending,
        }
    }

    /// Bumped after every [`update`](Self::update).
    pub fn revision(&self) -> RwSignal<u64> {
        self.revision
    }

    /// The last announced color, in the picker's output format.
    pub fn color(&self) -> RwSignal<String> {
        self.color
    }

    pub fn with<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.engine.borrow())
    }

    /// Mutate the engine, then wake the views. Color changes are published
    /// once the engine borrow is released.
    pub fn update<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        let out = f(&mut self.engine.borrow_mut());
        self.revision.update(|r| *r += 1);
        let announced = self.pending.borrow_mut().take();
        if let Some(color) = announced {
            self.color.set(color);
        }
        out
    }

    /// Tracks the revision and reports the engine's visibility.
    fn visible(&self) -> bool {
        let _ = self.revision.get();
        self.with(|p| p.is_visible())
    }
}

/// Hue strip and opacity strip beside the saturation/value area, channel
/// inputs and history below.
pub fn spectrum_picker(handle: &PickerHandle<SpectrumPicker>) -> impl IntoView {
    load_lucide_font();
    let (hex_only, hide_info) = handle.with(|p| (p.hex_only(), p.core().options().hide_info));
    let shown = handle.clone();

    v_stack((
        h_stack((
            surface_view(handle, SpectrumControl::Spectrum).round_cursor(),
            surface_view(handle, SpectrumControl::Hue),
            surface_view(handle, SpectrumControl::Opacity).checkered(),
        ))
        .style(|s| s.gap(constants::GAP)),
        h_stack((
            inputs::hex_input(handle),
            h_stack((
                inputs::channel_input(handle, Channel::Red),
                inputs::channel_input(handle, Channel::Green),
                inputs::channel_input(handle, Channel::Blue),
                inputs::opacity_input(handle),
            ))
            .style(move |s| s.gap(constants::GAP / 2.0).apply_if(hex_only, |s| s.hide())),
            inputs::copy_button(handle),
        ))
        .style(move |s| {
            s.gap(constants::GAP / 2.0)
                .items_center()
                .apply_if(hide_info, |s| s.hide())
        }),
        swatches::history_strip(handle),
    ))
    .style(move |s| panel(s).apply_if(!shown.visible(), |s| s.hide()))
}

/// Rainbow area with a horizontal opacity bar and history.
pub fn multi_spectral_picker(handle: &PickerHandle<MultiSpectralPicker>) -> impl IntoView {
    load_lucide_font();
    let shown = handle.clone();
    let color = handle.color();

    v_stack((
        surface_view(handle, MultiSpectralControl::Spectrum).round_cursor(),
        surface_view(handle, MultiSpectralControl::Opacity).checkered(),
        h_stack((
            label(move || color.get()).style(|s| {
                s.font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .flex_grow(1.0)
            }),
            inputs::copy_button(handle),
        ))
        .style(|s| s.items_center()),
        swatches::history_strip(handle),
    ))
    .style(move |s| panel(s).apply_if(!shown.visible(), |s| s.hide()))
}

/// Swatch grid for the current shade over the shade track.
pub fn material_picker(handle: &PickerHandle<MaterialPicker>) -> impl IntoView {
    load_lucide_font();
    let shown = handle.clone();
    let color = handle.color();

    v_stack((
        swatches::material_grid(handle),
        surface_view(handle, MaterialControl::ShadeTrack).round_cursor(),
        h_stack((
            label(move || color.get()).style(|s| {
                s.font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .flex_grow(1.0)
            }),
            inputs::copy_button(handle),
        ))
        .style(|s| s.items_center()),
    ))
    .style(move |s| panel(s).apply_if(!shown.visible(), |s| s.hide()))
}

fn panel(s: floem::style::Style) -> floem::style::Style {
    s.gap(constants::GAP)
        .padding(constants::PADDING)
        .border_radius(constants::RADIUS)
        .background(Color::rgb8(242, 242, 242))
}
