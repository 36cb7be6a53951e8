//! Text inputs for the spectrum picker, and the copy button.
//!
//! Inputs commit on Enter or focus-lost. A rejected value snaps the field
//! back to what the engine holds.

use std::rc::Rc;

use floem::event::{Event, EventListener, EventPropagation};
use floem::keyboard::{Key, NamedKey};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::constants;
use crate::error::Result;
use crate::picker::{Channel, ChannelInputs, Picker, SpectrumPicker};

use super::PickerHandle;

/// An engine-backed text field. `read` picks the field's text out of the
/// engine inputs, `commit` applies what the user typed.
fn engine_field(
    handle: &PickerHandle<SpectrumPicker>,
    width: f32,
    read: impl Fn(&ChannelInputs) -> String + 'static,
    commit: impl Fn(&mut SpectrumPicker, &str) -> Result<()> + 'static,
) -> impl IntoView {
    let read = Rc::new(read);
    let text = RwSignal::new(handle.with(|p| read(p.inputs())));

    // Engine -> text
    let revision = handle.revision();
    let synced = handle.clone();
    let read_synced = read.clone();
    create_effect(move |_| {
        let _ = revision.get();
        let value = synced.with(|p| read_synced(p.inputs()));
        if text.get_untracked() != value {
            text.set(value);
        }
    });

    let committing = handle.clone();
    let on_commit = Rc::new(move || {
        let raw = text.get_untracked();
        if let Err(err) = committing.update(|p| commit(p, &raw)) {
            log::debug!("input rejected: {err}");
            let value = committing.with(|p| read(p.inputs()));
            text.set(value);
        }
    });
    let on_enter = on_commit.clone();

    text_input(text)
        .style(move |s| {
            s.width(width)
                .padding(2.0)
                .font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .background(Color::WHITE)
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .border_radius(3.0)
        })
        .on_event_stop(EventListener::FocusLost, move |_| {
            on_commit();
        })
        .on_event(EventListener::KeyDown, move |e| {
            if let Event::KeyDown(ke) = e {
                if ke.key.logical_key == Key::Named(NamedKey::Enter) {
                    on_enter();
                    return EventPropagation::Stop;
                }
            }
            EventPropagation::Continue
        })
}

fn labeled(lbl: &'static str, field: impl IntoView + 'static) -> impl IntoView {
    v_stack((
        field,
        label(move || lbl).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .justify_content(Some(floem::taffy::AlignContent::Center))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

pub(crate) fn hex_input(handle: &PickerHandle<SpectrumPicker>) -> impl IntoView {
    labeled(
        "hex",
        engine_field(
            handle,
            constants::HEX_INPUT_WIDTH,
            |inputs| inputs.hex.clone(),
            |p, text| p.set_hex_input(text),
        ),
    )
}

pub(crate) fn channel_input(handle: &PickerHandle<SpectrumPicker>, channel: Channel) -> impl IntoView {
    labeled(
        channel.name(),
        engine_field(
            handle,
            constants::INPUT_WIDTH,
            move |inputs| match channel {
                Channel::Red => inputs.r.clone(),
                Channel::Green => inputs.g.clone(),
                Channel::Blue => inputs.b.clone(),
            },
            move |p, text| p.set_channel_input(channel, text),
        ),
    )
}

pub(crate) fn opacity_input(handle: &PickerHandle<SpectrumPicker>) -> impl IntoView {
    labeled(
        "a",
        engine_field(
            handle,
            constants::INPUT_WIDTH,
            |inputs| inputs.a.clone(),
            |p, text| p.set_opacity_input(text),
        ),
    )
}

/// Copies the picker's color, in its configured output format. The icon
/// turns into a check after a successful copy until the color moves on.
pub(crate) fn copy_button<P: Picker + 'static>(handle: &PickerHandle<P>) -> impl IntoView {
    let pressed = RwSignal::new(false);
    let done = RwSignal::new(false);

    let revision = handle.revision();
    create_effect(move |_| {
        let _ = revision.get();
        done.set(false);
    });

    let source = handle.clone();
    container(
        label(move || {
            let icon = if done.get() {
                lucide_icons::Icon::Check
            } else {
                lucide_icons::Icon::Copy
            };
            icon.unicode().to_string()
        })
        .style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(EventListener::PointerUp, move |_| {
        pressed.set(false);
        let text = source.with(|p| p.color().to_string());
        done.set(copy_to_clipboard(&text));
    })
}

fn copy_to_clipboard(text: &str) -> bool {
    let copied = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match copied {
        Ok(()) => {
            log::debug!("copied {text}");
            true
        }
        Err(err) => {
            log::warn!("copy failed: {err}");
            false
        }
    }
}
