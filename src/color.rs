//! The normalized color value every picker reads and emits.
//!
//! A value is built from a raw color string in any CSS notation and carries
//! the exact integer channels (`source`) plus precomputed string forms. The
//! opacity channel is tracked separately from the color channels: changing it
//! through [`ColorValue::set_opacity`] never touches r/g/b/h/s/l/v.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math;

/// Integer RGB channels plus a full-precision alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// The color channels without alpha.
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Floored hue (degrees) and saturation/lightness (percent).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Hsla {
    pub h: u16,
    pub s: u8,
    pub l: u8,
    pub a: f64,
}

/// Floored hue (degrees) and saturation/value (percent).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Hsva {
    pub h: u16,
    pub s: u8,
    pub v: u8,
    pub a: f64,
}

/// The raw numeric channels of a [`ColorValue`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ColorSource {
    pub rgba: Rgba,
    pub hsla: Hsla,
    pub hsv: Hsva,
}

/// Output representation requested from [`ColorValue::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Hsv,
    /// The numeric channel struct instead of a string.
    Source,
}

impl ColorFormat {
    /// Look up a format by name. Unknown names fall back to hex.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "rgb" => Self::Rgb,
            "rgba" => Self::Rgba,
            "hsl" => Self::Hsl,
            "hsla" => Self::Hsla,
            "hsv" => Self::Hsv,
            "source" => Self::Source,
            _ => Self::Hex,
        }
    }
}

/// A color rendered in some [`ColorFormat`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormattedColor {
    Text(String),
    Source(ColorSource),
}

impl FormattedColor {
    /// The string form, if this is not a `Source` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Source(_) => None,
        }
    }
}

impl fmt::Display for FormattedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Source(src) => {
                let Rgba { r, g, b, a } = src.rgba;
                write!(f, "rgba({}, {}, {}, {})", r, g, b, math::alpha_token(a))
            }
        }
    }
}

/// A parsed, normalized color.
///
/// Read-only after construction except for [`set_opacity`](Self::set_opacity).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorValue {
    raw: String,
    valid: bool,
    source: ColorSource,
    rgb: String,
    rgba: String,
    hex: String,
    hsl: String,
    hsla: String,
    hsv: String,
}

impl ColorValue {
    /// Parse `raw` in hex, rgb(a), hsl(a) or named-color notation.
    ///
    /// Never fails: an unparseable string produces a value whose
    /// [`is_valid`](Self::is_valid) is `false` and whose channels are opaque
    /// black. Callers check validity before using the value.
    pub fn process(raw: &str) -> Self {
        match csscolorparser::parse(raw.trim()) {
            Ok(parsed) => Self::from_unit_channels(
                raw,
                true,
                parsed.r as f64,
                parsed.g as f64,
                parsed.b as f64,
                parsed.a as f64,
            ),
            Err(_) => {
                log::trace!("unparseable color string {:?}", raw);
                Self::from_unit_channels(raw, false, 0.0, 0.0, 0.0, 1.0)
            }
        }
    }

    /// Build a value straight from integer channels, e.g. a sampled pixel.
    ///
    /// `a` is taken verbatim.
    pub fn from_rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        let raw = format!("rgba({}, {}, {}, {})", r, g, b, math::alpha_token(a));
        Self::from_unit_channels(
            &raw,
            true,
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a,
        )
    }

    fn from_unit_channels(raw: &str, valid: bool, r: f64, g: f64, b: f64, a: f64) -> Self {
        let (hl, sl, l) = math::rgb_to_hsl(r, g, b);
        let (hv, sv, v) = math::rgb_to_hsb(r, g, b);

        let rgba = Rgba {
            r: math::channel_u8(r),
            g: math::channel_u8(g),
            b: math::channel_u8(b),
            a,
        };
        let hsla = Hsla {
            h: math::hue_degrees_floor(hl),
            s: math::percent_floor(sl),
            l: math::percent_floor(l),
            a,
        };
        let hsv = Hsva {
            h: math::hue_degrees_floor(hv),
            s: math::percent_floor(sv),
            v: math::percent_floor(v),
            a,
        };

        Self {
            raw: raw.to_string(),
            valid,
            rgb: format!("rgb({}, {}, {})", rgba.r, rgba.g, rgba.b),
            rgba: rgba_string(&rgba),
            hex: format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
            hsl: format!(
                "hsl({}, {}%, {}%)",
                math::hue_degrees_round(hl),
                math::percent_round(sl),
                math::percent_round(l)
            ),
            hsla: hsla_string(&hsla),
            hsv: format!(
                "hsv({}, {}%, {}%)",
                math::hue_degrees_round(hv),
                math::percent_round(sv),
                math::percent_round(v)
            ),
            source: ColorSource { rgba, hsla, hsv },
        }
    }

    /// Whether the raw string parsed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The string this value was built from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn source(&self) -> &ColorSource {
        &self.source
    }

    /// Current opacity (the alpha of `source.rgba`).
    pub fn opacity(&self) -> f64 {
        self.source.rgba.a
    }

    /// `#rrggbb`, independent of opacity.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// `rgb(r, g, b)`, independent of opacity.
    pub fn rgb(&self) -> &str {
        &self.rgb
    }

    pub fn rgba(&self) -> &str {
        &self.rgba
    }

    pub fn hsl(&self) -> &str {
        &self.hsl
    }

    pub fn hsla(&self) -> &str {
        &self.hsla
    }

    pub fn hsv(&self) -> &str {
        &self.hsv
    }

    /// Render in the requested representation.
    pub fn format(&self, format: ColorFormat) -> FormattedColor {
        match format {
            ColorFormat::Hex => FormattedColor::Text(self.hex.clone()),
            ColorFormat::Rgb => FormattedColor::Text(self.rgb.clone()),
            ColorFormat::Rgba => FormattedColor::Text(self.rgba.clone()),
            ColorFormat::Hsl => FormattedColor::Text(self.hsl.clone()),
            ColorFormat::Hsla => FormattedColor::Text(self.hsla.clone()),
            ColorFormat::Hsv => FormattedColor::Text(self.hsv.clone()),
            ColorFormat::Source => FormattedColor::Source(self.source),
        }
    }

    /// Replace the opacity channel.
    ///
    /// Only `source.rgba.a`, `source.hsla.a` and the `rgba`/`hsla` strings
    /// change. `a` is not range checked; callers validate `0 <= a <= 1`.
    pub fn set_opacity(&mut self, a: f64) {
        self.source.rgba.a = a;
        self.source.hsla.a = a;
        self.rgba = rgba_string(&self.source.rgba);
        self.hsla = hsla_string(&self.source.hsla);
    }

    /// Same color for history purposes: identical `rgba` strings.
    pub fn same_color(&self, other: &ColorValue) -> bool {
        self.rgba == other.rgba
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rgba)
    }
}

fn rgba_string(c: &Rgba) -> String {
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, math::alpha_token(c.a))
}

fn hsla_string(c: &Hsla) -> String {
    format!(
        "hsla({}, {}%, {}%, {})",
        c.h,
        c.s,
        c.l,
        math::alpha_token(c.a)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_notation() {
        for raw in [
            "#f00",
            "#ff0000",
            "rgb(255, 0, 0)",
            "rgba(255, 0, 0, 1)",
            "hsl(0, 100%, 50%)",
            "hsla(0, 100%, 50%, 1)",
            "red",
        ] {
            let c = ColorValue::process(raw);
            assert!(c.is_valid(), "{raw} should parse");
            assert_eq!(c.hex(), "#ff0000", "{raw}");
            assert_eq!(c.rgba(), "rgba(255, 0, 0, 1)", "{raw}");
        }
    }

    #[test]
    fn invalid_string_reports_instead_of_failing() {
        let c = ColorValue::process("not a color");
        assert!(!c.is_valid());
        assert_eq!(c.raw(), "not a color");
        assert_eq!(c.source().rgba.rgb(), [0, 0, 0]);
    }

    #[test]
    fn hex_is_seven_chars_regardless_of_alpha() {
        for raw in ["rgba(10, 20, 30, 0.3)", "#0a141e", "hsla(210, 50%, 8%, 0)"] {
            let c = ColorValue::process(raw);
            assert_eq!(c.hex().len(), 7);
            assert!(c.hex().starts_with('#'));
        }
        assert_eq!(ColorValue::process("rgba(10, 20, 30, 0.3)").hex(), "#0a141e");
    }

    #[test]
    fn set_opacity_touches_only_alpha() {
        let mut c = ColorValue::process("#3b82f6");
        let before = *c.source();
        let (hex, rgb, hsl, hsv) = (
            c.hex().to_string(),
            c.rgb().to_string(),
            c.hsl().to_string(),
            c.hsv().to_string(),
        );

        c.set_opacity(0.25);

        let after = *c.source();
        assert_eq!(after.rgba.rgb(), before.rgba.rgb());
        assert_eq!((after.hsla.h, after.hsla.s, after.hsla.l), (before.hsla.h, before.hsla.s, before.hsla.l));
        assert_eq!(after.hsv, before.hsv);
        assert_eq!(after.rgba.a, 0.25);
        assert_eq!(after.hsla.a, 0.25);
        assert_eq!(c.hex(), hex);
        assert_eq!(c.rgb(), rgb);
        assert_eq!(c.hsl(), hsl);
        assert_eq!(c.hsv(), hsv);
    }

    #[test]
    fn opacity_is_not_range_checked() {
        let mut c = ColorValue::process("#000");
        c.set_opacity(1.5);
        assert_eq!(c.rgba(), "rgba(0, 0, 0, 1.5)");
        assert_eq!(c.hsla(), "hsla(0, 0%, 0%, 1.5)");
    }

    #[test]
    fn red_at_half_opacity() {
        let mut c = ColorValue::process("#ff0000");
        assert_eq!(c.opacity(), 1.0);
        c.set_opacity(0.5);
        assert_eq!(
            c.format(ColorFormat::Rgba),
            FormattedColor::Text("rgba(255, 0, 0, 0.5)".to_string())
        );
    }

    #[test]
    fn channels_are_floored() {
        // hsl(200.6, 33.3%, 66.6%) style values must floor, not round.
        let c = ColorValue::process("rgb(100, 200, 150)");
        let hsla = c.source().hsla;
        assert_eq!((hsla.h, hsla.s, hsla.l), (150, 47, 58));
        assert_eq!(c.hsla(), "hsla(150, 47%, 58%, 1)");
        assert_eq!(c.hsl(), "hsl(150, 48%, 59%)");
        let hsv = c.source().hsv;
        assert_eq!((hsv.h, hsv.s, hsv.v), (150, 50, 78));
    }

    #[test]
    fn alpha_keeps_full_precision() {
        let c = ColorValue::process("rgba(1, 2, 3, 0.123456)");
        assert_eq!(c.opacity(), 0.123456);
        assert_eq!(c.rgba(), "rgba(1, 2, 3, 0.123456)");
    }

    #[test]
    fn unknown_format_names_fall_back_to_hex() {
        assert_eq!(ColorFormat::from_name("cmyk"), ColorFormat::Hex);
        assert_eq!(ColorFormat::from_name("RGBA"), ColorFormat::Rgba);
        let c = ColorValue::process("#00ff00");
        assert_eq!(c.format(ColorFormat::from_name("lab")).to_string(), "#00ff00");
    }

    #[test]
    fn source_format_returns_channels() {
        let c = ColorValue::process("rgba(1, 2, 3, 0.5)");
        match c.format(ColorFormat::Source) {
            FormattedColor::Source(src) => {
                assert_eq!(src.rgba, Rgba { r: 1, g: 2, b: 3, a: 0.5 });
            }
            other => panic!("expected source, got {other:?}"),
        }
    }

    #[test]
    fn sameness_uses_rgba_string() {
        let a = ColorValue::process("#ff0000");
        let b = ColorValue::process("rgb(255, 0, 0)");
        let mut c = ColorValue::process("red");
        assert!(a.same_color(&b));
        c.set_opacity(0.5);
        assert!(!a.same_color(&c));
    }
}
