//! Standalone demo: opens a window with all three pickers side by side.
//!
//! `RUST_LOG=floem_spectrum=debug` shows the cascades as they run.

use floem::prelude::*;
use floem::reactive::{create_effect, SignalGet};
use floem::window::WindowConfig;
use floem_spectrum::{
    material_picker, multi_spectral_picker, spectrum_picker, MaterialPicker, MultiSpectralPicker, PickerHandle,
    PickerOptions, SpectrumPicker,
};

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

fn main() -> floem_spectrum::Result<()> {
    init_logging();

    let options = PickerOptions::default().inline(true);
    let spectrum = PickerHandle::new(SpectrumPicker::new(options.clone().with_color("#3b82f6"))?);
    let multi = PickerHandle::new(MultiSpectralPicker::new(options.clone().with_color("#22c55e"))?);
    let material = PickerHandle::new(MaterialPicker::new(options)?);

    for (name, color) in [
        ("spectrum", spectrum.color()),
        ("multi-spectral", multi.color()),
        ("material", material.color()),
    ] {
        create_effect(move |_| log::info!("{name}: {}", color.get()));
    }

    floem::Application::new()
        .window(
            move |_| {
                h_stack((
                    spectrum_picker(&spectrum),
                    multi_spectral_picker(&multi),
                    material_picker(&material),
                ))
                .style(|s| s.gap(16.0).padding(16.0).items_start())
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| floem::quit_app())
            },
            Some(
                WindowConfig::default()
                    .size((860.0, 360.0))
                    .title("floem-spectrum"),
            ),
        )
        .run();
    Ok(())
}
