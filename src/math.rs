//! Color math: direct conversions without external dependencies.
//! All functions use normalized f64 in 0.0–1.0 unless stated otherwise.

/// RGB → HSB/HSV. All values 0.0–1.0.
pub(crate) fn rgb_to_hsb(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    (hue(r, g, b, max, delta), s, v)
}

/// RGB → HSL. All values 0.0–1.0.
pub(crate) fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    (hue(r, g, b, max, delta), s, l)
}

fn hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    }
}

/// Normalized hue → whole degrees in `[0, 360)`, floored.
pub(crate) fn hue_degrees_floor(h: f64) -> u16 {
    let deg = (h * 360.0).floor();
    if !(0.0..360.0).contains(&deg) {
        0
    } else {
        deg as u16
    }
}

/// Normalized hue → whole degrees in `[0, 360)`, rounded.
pub(crate) fn hue_degrees_round(h: f64) -> u16 {
    let deg = (h * 360.0).round();
    if !(0.0..360.0).contains(&deg) {
        0
    } else {
        deg as u16
    }
}

/// 0.0–1.0 → floored integer percentage.
pub(crate) fn percent_floor(v: f64) -> u8 {
    (v * 100.0).floor().clamp(0.0, 100.0) as u8
}

/// 0.0–1.0 → rounded integer percentage.
pub(crate) fn percent_round(v: f64) -> u8 {
    (v * 100.0).round().clamp(0.0, 100.0) as u8
}

/// 0.0–1.0 → 0–255 channel, rounded.
pub(crate) fn channel_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Alpha token used inside `rgba(...)`/`hsla(...)` strings.
///
/// Shortest decimal that round-trips, so `1.0` prints as `1` and `0.5` as
/// `0.5`. Negative zero prints as `0`.
pub(crate) fn alpha_token(a: f64) -> String {
    if a == 0.0 {
        "0".to_string()
    } else {
        format!("{}", a)
    }
}

/// Round to two decimals, the precision opacity sliders report.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
