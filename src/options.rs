//! Picker configuration.
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid
//! configuration. Fields left as `None` are filled in per picker variant.

use serde::{Deserialize, Serialize};

use crate::color::ColorFormat;
use crate::error::{PickerError, Result};
use crate::gradient::{ColorStop, GradientSpec, StopColor};
use crate::material::Shade;

/// Default history slot count.
pub const HISTORY_PLACEHOLDERS: usize = 10;

/// History slot count in hex-only mode.
pub const HEX_ONLY_HISTORY_PLACEHOLDERS: usize = 9;

/// A hue strip stop as configured: offset plus a color string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HueStop {
    pub offset: f64,
    pub color: String,
}

impl HueStop {
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

/// The stock hue strip, top to bottom.
pub fn default_hue_stops() -> Vec<HueStop> {
    vec![
        HueStop::new(0.0, "#ff0000"),
        HueStop::new(0.17, "#ff00ff"),
        HueStop::new(0.33, "#0000ff"),
        HueStop::new(0.5, "#00ffff"),
        HueStop::new(0.67, "#00ff00"),
        HueStop::new(0.83, "#ffff00"),
        HueStop::new(1.0, "#ff0000"),
    ]
}

/// Build a gradient from configured hue stops.
pub fn hue_gradient(stops: &[HueStop]) -> Result<GradientSpec> {
    let stops = stops
        .iter()
        .map(|s| StopColor::parse(&s.color).map(|c| ColorStop::new(s.offset, c)))
        .collect::<Result<Vec<_>>>()?;
    GradientSpec::new(stops)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryOptions {
    pub hidden: bool,
    /// Seed colors, in any notation.
    pub colors: Vec<String>,
    pub placeholders_amount: Option<usize>,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            hidden: false,
            colors: Vec::new(),
            placeholders_amount: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerOptions {
    /// Initial color. Empty or missing falls back to `default_color`.
    pub color: Option<String>,
    pub default_color: Option<String>,
    /// Output format of `color()` and change notifications.
    pub format: Option<ColorFormat>,
    /// Inline pickers are always visible and never auto-hide.
    pub inline: bool,
    pub hex_only: bool,
    pub hide_after_color_change: Option<bool>,
    /// Hide the text inputs.
    pub hide_info: bool,
    pub hue_colors: Option<Vec<HueStop>>,
    pub history: HistoryOptions,
    pub shade: Option<Shade>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            color: None,
            default_color: None,
            format: None,
            inline: false,
            hex_only: false,
            hide_after_color_change: None,
            hide_info: false,
            hue_colors: None,
            history: HistoryOptions::default(),
            shade: None,
        }
    }
}

impl PickerOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(PickerError::from)
    }

    /// The starting color string: `color` unless blank, else `default_color`,
    /// else `fallback`.
    pub fn initial_color<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or(self.default_color.as_deref())
            .unwrap_or(fallback)
    }

    pub fn hue_stops(&self) -> Vec<HueStop> {
        self.hue_colors.clone().unwrap_or_else(default_hue_stops)
    }

    /// History slot count, honoring hex-only mode when `hex_only_applies`.
    pub fn placeholders(&self, hex_only_applies: bool) -> usize {
        if hex_only_applies && self.hex_only {
            return HEX_ONLY_HISTORY_PLACEHOLDERS;
        }
        self.history
            .placeholders_amount
            .unwrap_or(HISTORY_PLACEHOLDERS)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_format(mut self, format: ColorFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let o = PickerOptions::from_json("{}").unwrap();
        assert_eq!(o, PickerOptions::default());
        assert_eq!(o.placeholders(true), HISTORY_PLACEHOLDERS);
        assert_eq!(o.hue_stops().len(), 7);
    }

    #[test]
    fn camel_case_fields() {
        let o = PickerOptions::from_json(
            r##"{
                "color": "#123456",
                "format": "hsla",
                "hexOnly": true,
                "hideAfterColorChange": true,
                "hueColors": [{"offset": 0, "color": "red"}, {"offset": 1, "color": "blue"}],
                "history": {"colors": ["#fff"], "placeholdersAmount": 4},
                "shade": "a200"
            }"##,
        )
        .unwrap();
        assert_eq!(o.format, Some(ColorFormat::Hsla));
        assert!(o.hex_only);
        assert_eq!(o.hide_after_color_change, Some(true));
        assert_eq!(o.hue_stops().len(), 2);
        assert_eq!(o.history.colors, vec!["#fff".to_string()]);
        assert_eq!(o.placeholders(false), 4);
        assert_eq!(o.placeholders(true), HEX_ONLY_HISTORY_PLACEHOLDERS);
        assert_eq!(o.shade, Some(Shade::A200));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            PickerOptions::from_json("{\"inline\": 3}"),
            Err(PickerError::Config(_))
        ));
    }

    #[test]
    fn blank_color_falls_back() {
        let o = PickerOptions::default().with_color("  ");
        assert_eq!(o.initial_color("#f00"), "#f00");
        let mut o = o;
        o.default_color = Some("#0f0".into());
        assert_eq!(o.initial_color("#f00"), "#0f0");
        assert_eq!(o.with_color("blue").initial_color("#f00"), "blue");
    }

    #[test]
    fn hue_gradient_rejects_bad_colors() {
        assert!(hue_gradient(&default_hue_stops()).is_ok());
        assert!(hue_gradient(&[HueStop::new(0.0, "red"), HueStop::new(1.0, "nope")]).is_err());
    }
}
