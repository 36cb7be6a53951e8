//! Clickable swatch rows: the color history and the material grid.

use floem::prelude::*;
use floem::reactive::SignalGet;
use floem::taffy::FlexWrap;

use crate::color::ColorValue;
use crate::constants;
use crate::picker::{HistoryPicker, MaterialPicker};

use super::PickerHandle;

/// `selected` is read inside the style, so it may track signals.
fn swatch(
    color: Option<&str>,
    selected: impl Fn() -> bool + 'static,
    on_pick: impl Fn() + 'static,
) -> impl IntoView {
    let fill = color.map(|c| {
        let rgba = ColorValue::process(c).source().rgba;
        Color::rgba8(rgba.r, rgba.g, rgba.b, (rgba.a * 255.0).round() as u8)
    });
    empty()
        .style(move |s| {
            s.size(constants::SWATCH_SIZE, constants::SWATCH_SIZE)
                .border_radius(3.0)
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .apply_opt(fill, |s, c| s.background(c).cursor(floem::style::CursorStyle::Pointer))
                .apply_if(selected(), |s| s.border(2.0).border_color(Color::rgb8(40, 40, 40)))
        })
        .on_click_stop(move |_| on_pick())
}

/// History slots, with a button that stores the current color.
pub(crate) fn history_strip<P: HistoryPicker + 'static>(handle: &PickerHandle<P>) -> impl IntoView {
    let hidden = handle.with(|p| p.history().is_hidden());
    let revision = handle.revision();
    let slots = handle.clone();
    let picking = handle.clone();
    let adding = handle.clone();

    h_stack((
        dyn_stack(
            move || {
                let _ = revision.get();
                slots
                    .with(|p| p.history().slots().to_vec())
                    .into_iter()
                    .enumerate()
                    .collect::<Vec<_>>()
            },
            |(i, slot)| (*i, slot.clone()),
            move |(i, slot)| {
                let handle = picking.clone();
                let filled = slot.is_some();
                swatch(slot.as_deref(), || false, move || {
                    if !filled {
                        return;
                    }
                    if let Err(err) = handle.update(|p| p.select_history(i)) {
                        log::warn!("history slot {i}: {err}");
                    }
                })
            },
        )
        .style(|s| s.flex_row().flex_wrap(FlexWrap::Wrap).gap(4.0).flex_grow(1.0)),
        label(|| "+")
            .style(|s| {
                s.size(constants::SWATCH_SIZE, constants::SWATCH_SIZE)
                    .items_center()
                    .justify_center()
                    .font_size(constants::INPUT_FONT)
                    .color(Color::rgb8(120, 120, 120))
                    .cursor(floem::style::CursorStyle::Pointer)
            })
            .on_click_stop(move |_| {
                adding.update(|p| p.add_to_history());
            }),
    ))
    .style(move |s| s.gap(4.0).apply_if(hidden, |s| s.hide()))
}

/// Every swatch at the material picker's current shade.
pub(crate) fn material_grid(handle: &PickerHandle<MaterialPicker>) -> impl IntoView {
    let revision = handle.revision();
    let listed = handle.clone();
    let picking = handle.clone();
    let selected = handle.clone();
    let row = constants::SWATCHES_PER_ROW as f64 * (constants::SWATCH_SIZE + 4.0);

    dyn_stack(
        move || {
            let _ = revision.get();
            listed.with(|p| p.swatches().collect::<Vec<_>>())
        },
        |item| *item,
        move |(alias, hex)| {
            let handle = picking.clone();
            let selected = selected.clone();
            let is_selected = move || {
                let _ = revision.get();
                selected.with(|p| p.selected_swatch()) == Some(alias)
            };
            swatch(Some(hex), is_selected, move || {
                if let Err(err) = handle.update(|p| p.select_swatch(alias)) {
                    log::warn!("swatch {alias}: {err}");
                }
            })
        },
    )
    .style(move |s| s.flex_row().flex_wrap(FlexWrap::Wrap).gap(4.0).width(row))
}
