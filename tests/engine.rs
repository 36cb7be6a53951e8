use std::cell::RefCell;
use std::rc::Rc;

use floem_spectrum::{
    nearest_color, ColorFormat, EventKind, HistoryPicker, MaterialControl, MaterialPicker, MultiSpectralControl,
    MultiSpectralPicker, Picker, PickerError, PickerEvent, PickerOptions, PointerButton, Shade, SpectrumControl,
    SpectrumPicker, SurfaceCoordinate,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at(x: f64, y: f64) -> SurfaceCoordinate {
    SurfaceCoordinate::new(x, y)
}

fn record<P: Picker>(picker: &mut P, kind: EventKind) -> Rc<RefCell<Vec<PickerEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    picker.on(kind, Box::new(move |e| sink.borrow_mut().push(e.clone())));
    seen
}

// ---------------------------------------------------------------------------
// Color output
// ---------------------------------------------------------------------------

#[test]
fn opacity_input_is_reflected_in_rgba_output() {
    let mut p = SpectrumPicker::new(PickerOptions::default()).unwrap();
    p.set_color("#ff0000").unwrap();
    p.set_opacity_input("0.5").unwrap();
    assert_eq!(p.color().to_string(), "rgba(255, 0, 0, 0.5)");
    assert_eq!(p.color_value().hex(), "#ff0000");
}

#[test]
fn configured_format_drives_every_output() {
    let options = PickerOptions::default()
        .with_color("#00ff00")
        .with_format(ColorFormat::Hsl);
    let mut p = MultiSpectralPicker::new(options).unwrap();
    let seen = record(&mut p, EventKind::ColorChange);

    assert_eq!(p.color().to_string(), "hsl(120, 100%, 50%)");
    p.set_color("#0000ff").unwrap();
    match &seen.borrow()[0] {
        PickerEvent::ColorChange(change) => {
            assert_eq!(change.color.to_string(), "hsl(240, 100%, 50%)");
            assert!(!change.enable_hide);
        }
        other => panic!("unexpected {other:?}"),
    };
}

#[test]
fn rejected_colors_keep_the_last_valid_one() {
    let mut p = SpectrumPicker::new(PickerOptions::default().with_color("#123456")).unwrap();
    assert!(matches!(p.set_color("not-a-color"), Err(PickerError::InvalidColor(_))));
    assert!(matches!(p.set_hex_input("#12"), Err(PickerError::InvalidInput { field: "hex", .. })));
    assert_eq!(p.color_value().hex(), "#123456");
}

// ---------------------------------------------------------------------------
// Drags
// ---------------------------------------------------------------------------

#[test]
fn press_past_the_left_edge_samples_column_zero() {
    let mut outside = MultiSpectralPicker::new(PickerOptions::default()).unwrap();
    let mut edge = MultiSpectralPicker::new(PickerOptions::default()).unwrap();

    outside.pointer_down(MultiSpectralControl::Spectrum, PointerButton::Primary, at(-50.0, 75.0));
    edge.pointer_down(MultiSpectralControl::Spectrum, PointerButton::Primary, at(0.0, 75.0));

    assert_eq!(outside.control(MultiSpectralControl::Spectrum).offset().x, -7.0);
    assert_eq!(outside.color_value().rgba(), edge.color_value().rgba());
}

#[test]
fn moves_without_a_live_drag_do_nothing() {
    let mut p = SpectrumPicker::new(PickerOptions::default().with_color("#3b82f6")).unwrap();
    let seen = record(&mut p, EventKind::ColorChange);
    let before = p.color_value();

    assert!(!p.pointer_move(at(10.0, 10.0)));
    assert!(!p.pointer_up());

    assert!(p.pointer_down(SpectrumControl::Spectrum, PointerButton::Primary, at(20.0, 20.0)));
    assert!(p.pointer_up());
    let after_release = p.color_value();
    assert!(!p.pointer_move(at(150.0, 150.0)));

    assert_eq!(p.color_value(), after_release);
    assert_ne!(before, after_release);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn secondary_button_does_not_start_a_drag() {
    let mut p = SpectrumPicker::new(PickerOptions::default()).unwrap();
    let before = p.color_value();
    assert!(!p.pointer_down(SpectrumControl::Hue, PointerButton::Secondary, at(8.0, 90.0)));
    assert!(!p.pointer_move(at(8.0, 10.0)));
    assert_eq!(p.color_value(), before);
}

#[test]
fn hue_drag_follows_the_pressed_control_only() {
    let mut p = SpectrumPicker::new(PickerOptions::default().with_color("#ff0000")).unwrap();
    let spectrum_before = p.control(SpectrumControl::Spectrum).offset();

    p.pointer_down(SpectrumControl::Hue, PointerButton::Primary, at(8.0, 60.0));
    p.pointer_move(at(500.0, 90.0));
    p.pointer_up();

    let hue = p.control(SpectrumControl::Hue);
    assert_eq!(hue.offset().y, 86.0);
    assert_eq!(hue.offset().x, -2.0);
    assert_eq!(p.control(SpectrumControl::Spectrum).offset(), spectrum_before);
}

// ---------------------------------------------------------------------------
// Nearest color
// ---------------------------------------------------------------------------

#[test]
fn equally_close_candidates_resolve_to_the_first() {
    let palette = [("first", [10, 0, 0]), ("second", [0, 10, 0]), ("third", [0, 0, 10])];
    assert_eq!(nearest_color([0, 0, 0], palette).unwrap(), "first");
    assert!(matches!(
        nearest_color([0, 0, 0], Vec::<(&str, [u8; 3])>::new()),
        Err(PickerError::NoCandidates)
    ));
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

#[test]
fn material_track_snaps_and_swatches_hide() {
    let mut p = MaterialPicker::new(PickerOptions::default()).unwrap();
    let hidden = record(&mut p, EventKind::Hidden);
    p.show();

    p.pointer_down(MaterialControl::ShadeTrack, PointerButton::Primary, at(163.0, 6.0));
    p.pointer_up();
    assert_eq!(p.shade(), Shade::S900);
    assert_eq!(p.color().to_string(), "#b71c1c");
    assert!(p.is_visible());

    p.select_swatch("teal").unwrap();
    assert_eq!(p.color().to_string(), "#004d40");
    assert!(!p.is_visible());
    assert_eq!(hidden.borrow().len(), 1);
}

#[test]
fn selected_swatch_follows_the_shade_track() {
    let mut p = MaterialPicker::new(PickerOptions::default().inline(true)).unwrap();
    p.select_swatch("teal").unwrap();

    p.pointer_down(MaterialControl::ShadeTrack, PointerButton::Primary, at(24.0, 6.0));
    p.pointer_up();
    assert_eq!(p.shade(), Shade::S100);

    let marked: Vec<_> = p
        .swatches()
        .filter(|(alias, _)| p.selected_swatch() == Some(*alias))
        .collect();
    assert_eq!(marked, [("teal", "#b2dfdb")]);

    p.set_color("#010203").unwrap();
    assert!(p.swatches().all(|(alias, _)| p.selected_swatch() != Some(alias)));
}

#[test]
fn inline_pickers_never_hide_themselves() {
    let mut p = MaterialPicker::new(PickerOptions::default().inline(true)).unwrap();
    assert!(p.is_visible());
    p.select_swatch("amber").unwrap();
    assert!(p.is_visible());
}

// ---------------------------------------------------------------------------
// History and lifecycle
// ---------------------------------------------------------------------------

#[test]
fn history_round_trip_through_a_picker() {
    let options = PickerOptions::from_json(
        r##"{"color": "#00f", "history": {"colors": ["#f00", "nope"], "placeholdersAmount": 3}}"##,
    )
    .unwrap();
    let mut p = MultiSpectralPicker::new(options).unwrap();
    assert_eq!(HistoryPicker::history(&p).slots().len(), 3);

    assert_eq!(HistoryPicker::add_to_history(&mut p), Some(1));
    assert_eq!(HistoryPicker::add_to_history(&mut p), None);

    HistoryPicker::select_history(&mut p, 0).unwrap();
    assert_eq!(p.color_value().hex(), "#ff0000");
    assert!(matches!(
        HistoryPicker::select_history(&mut p, 2),
        Err(PickerError::EmptyHistorySlot(2))
    ));
}

#[test]
fn destroy_hides_and_drops_listeners() {
    let mut p = SpectrumPicker::new(PickerOptions::default()).unwrap();
    let shown = record(&mut p, EventKind::Shown);
    let hidden = record(&mut p, EventKind::Hidden);

    p.show();
    p.show();
    p.pointer_down(SpectrumControl::Spectrum, PointerButton::Primary, at(5.0, 5.0));
    p.destroy();
    assert!(!p.is_visible());
    assert!(!p.pointer_move(at(90.0, 90.0)));

    p.show();
    assert_eq!(shown.borrow().len(), 1);
    assert_eq!(hidden.borrow().len(), 1);
}
