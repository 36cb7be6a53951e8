//! The material design palette and its shade scale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PickerError;

/// One step of the material shade scale, in track order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ShadeRepr", into = "String")]
pub enum Shade {
    S50,
    S100,
    S200,
    S300,
    S400,
    #[default]
    S500,
    S600,
    S700,
    S800,
    S900,
    A700,
    A400,
    A200,
    A100,
}

impl Shade {
    /// Every shade in slider order.
    pub const ALL: [Shade; 14] = [
        Shade::S50,
        Shade::S100,
        Shade::S200,
        Shade::S300,
        Shade::S400,
        Shade::S500,
        Shade::S600,
        Shade::S700,
        Shade::S800,
        Shade::S900,
        Shade::A700,
        Shade::A400,
        Shade::A200,
        Shade::A100,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Shade::S50 => "50",
            Shade::S100 => "100",
            Shade::S200 => "200",
            Shade::S300 => "300",
            Shade::S400 => "400",
            Shade::S500 => "500",
            Shade::S600 => "600",
            Shade::S700 => "700",
            Shade::S800 => "800",
            Shade::S900 => "900",
            Shade::A700 => "a700",
            Shade::A400 => "a400",
            Shade::A200 => "a200",
            Shade::A100 => "a100",
        }
    }

    pub fn is_accent(self) -> bool {
        self.index() >= 10
    }

    /// Parse `"500"`, `"a700"` or `"A700"`.
    pub fn parse(name: &str) -> Result<Self, PickerError> {
        let lower = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.name() == lower)
            .ok_or_else(|| PickerError::UnknownShade(name.to_string()))
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Shade> for String {
    fn from(shade: Shade) -> Self {
        shade.name().to_string()
    }
}

/// Shades are configured either as numbers (`500`) or names (`"a400"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum ShadeRepr {
    Number(u32),
    Name(String),
}

impl TryFrom<ShadeRepr> for Shade {
    type Error = PickerError;

    fn try_from(repr: ShadeRepr) -> Result<Self, Self::Error> {
        match repr {
            ShadeRepr::Number(n) => Shade::parse(&n.to_string()),
            ShadeRepr::Name(s) => Shade::parse(&s),
        }
    }
}

/// A named hue with its tone scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialHue {
    pub alias: &'static str,
    /// `50` through `900`.
    pub tones: [&'static str; 10],
    /// `a700`, `a400`, `a200`, `a100`. Neutral hues have none.
    pub accents: Option<[&'static str; 4]>,
}

impl MaterialHue {
    /// Hex color of this hue at `shade`, if the hue has that shade.
    pub fn color(&self, shade: Shade) -> Option<&'static str> {
        let i = shade.index();
        if i < 10 {
            Some(self.tones[i])
        } else {
            self.accents.map(|a| a[i - 10])
        }
    }
}

macro_rules! hue {
    ($alias:literal, [$($t:literal),*], [$($a:literal),*]) => {
        MaterialHue { alias: $alias, tones: [$($t),*], accents: Some([$($a),*]) }
    };
    ($alias:literal, [$($t:literal),*]) => {
        MaterialHue { alias: $alias, tones: [$($t),*], accents: None }
    };
}

pub static PALETTE: [MaterialHue; 19] = [
    hue!("red", ["#ffebee", "#ffcdd2", "#ef9a9a", "#e57373", "#ef5350", "#f44336", "#e53935", "#d32f2f", "#c62828", "#b71c1c"], ["#d50000", "#ff1744", "#ff5252", "#ff8a80"]),
    hue!("pink", ["#fce4ec", "#f8bbd0", "#f48fb1", "#f06292", "#ec407a", "#e91e63", "#d81b60", "#c2185b", "#ad1457", "#880e4f"], ["#c51162", "#f50057", "#ff4081", "#ff80ab"]),
    hue!("purple", ["#f3e5f5", "#e1bee7", "#ce93d8", "#ba68c8", "#ab47bc", "#9c27b0", "#8e24aa", "#7b1fa2", "#6a1b9a", "#4a148c"], ["#aa00ff", "#d500f9", "#e040fb", "#ea80fc"]),
    hue!("deep-purple", ["#ede7f6", "#d1c4e9", "#b39ddb", "#9575cd", "#7e57c2", "#673ab7", "#5e35b1", "#512da8", "#4527a0", "#311b92"], ["#6200ea", "#651fff", "#7c4dff", "#b388ff"]),
    hue!("indigo", ["#e8eaf6", "#c5cae9", "#9fa8da", "#7986cb", "#5c6bc0", "#3f51b5", "#3949ab", "#303f9f", "#283593", "#1a237e"], ["#304ffe", "#3d5afe", "#536dfe", "#8c9eff"]),
    hue!("blue", ["#e3f2fd", "#bbdefb", "#90caf9", "#64b5f6", "#42a5f5", "#2196f3", "#1e88e5", "#1976d2", "#1565c0", "#0d47a1"], ["#2962ff", "#2979ff", "#448aff", "#82b1ff"]),
    hue!("light-blue", ["#e1f5fe", "#b3e5fc", "#81d4fa", "#4fc3f7", "#29b6f6", "#03a9f4", "#039be5", "#0288d1", "#0277bd", "#01579b"], ["#0091ea", "#00b0ff", "#40c4ff", "#80d8ff"]),
    hue!("cyan", ["#e0f7fa", "#b2ebf2", "#80deea", "#4dd0e1", "#26c6da", "#00bcd4", "#00acc1", "#0097a7", "#00838f", "#006064"], ["#00b8d4", "#00e5ff", "#18ffff", "#84ffff"]),
    hue!("teal", ["#e0f2f1", "#b2dfdb", "#80cbc4", "#4db6ac", "#26a69a", "#009688", "#00897b", "#00796b", "#00695c", "#004d40"], ["#00bfa5", "#1de9b6", "#64ffda", "#a7ffeb"]),
    hue!("green", ["#e8f5e9", "#c8e6c9", "#a5d6a7", "#81c784", "#66bb6a", "#4caf50", "#43a047", "#388e3c", "#2e7d32", "#1b5e20"], ["#00c853", "#00e676", "#69f0ae", "#b9f6ca"]),
    hue!("light-green", ["#f1f8e9", "#dcedc8", "#c5e1a5", "#aed581", "#9ccc65", "#8bc34a", "#7cb342", "#689f38", "#558b2f", "#33691e"], ["#64dd17", "#76ff03", "#b2ff59", "#ccff90"]),
    hue!("lime", ["#f9fbe7", "#f0f4c3", "#e6ee9c", "#dce775", "#d4e157", "#cddc39", "#c0ca33", "#afb42b", "#9e9d24", "#827717"], ["#aeea00", "#c6ff00", "#eeff41", "#f4ff81"]),
    hue!("yellow", ["#fffde7", "#fff9c4", "#fff59d", "#fff176", "#ffee58", "#ffeb3b", "#fdd835", "#fbc02d", "#f9a825", "#f57f17"], ["#ffd600", "#ffea00", "#ffff00", "#ffff8d"]),
    hue!("amber", ["#fff8e1", "#ffecb3", "#ffe082", "#ffd54f", "#ffca28", "#ffc107", "#ffb300", "#ffa000", "#ff8f00", "#ff6f00"], ["#ffab00", "#ffc400", "#ffd740", "#ffe57f"]),
    hue!("orange", ["#fff3e0", "#ffe0b2", "#ffcc80", "#ffb74d", "#ffa726", "#ff9800", "#fb8c00", "#f57c00", "#ef6c00", "#e65100"], ["#ff6d00", "#ff9100", "#ffab40", "#ffd180"]),
    hue!("deep-orange", ["#fbe9e7", "#ffccbc", "#ffab91", "#ff8a65", "#ff7043", "#ff5722", "#f4511e", "#e64a19", "#d84315", "#bf360c"], ["#dd2c00", "#ff3d00", "#ff6e40", "#ff9e80"]),
    hue!("brown", ["#efebe9", "#d7ccc8", "#bcaaa4", "#a1887f", "#8d6e63", "#795548", "#6d4c41", "#5d4037", "#4e342e", "#3e2723"]),
    hue!("grey", ["#fafafa", "#f5f5f5", "#eeeeee", "#e0e0e0", "#bdbdbd", "#9e9e9e", "#757575", "#616161", "#424242", "#212121"]),
    hue!("blue-grey", ["#eceff1", "#cfd8dc", "#b0bec5", "#90a4ae", "#78909c", "#607d8b", "#546e7a", "#455a64", "#37474f", "#263238"]),
];

/// Look up a hue by alias.
pub fn hue(alias: &str) -> Option<&'static MaterialHue> {
    PALETTE.iter().find(|h| h.alias == alias)
}

/// Hues that have a swatch at `shade`, with their color.
pub fn swatches(shade: Shade) -> impl Iterator<Item = (&'static str, &'static str)> {
    PALETTE
        .iter()
        .filter_map(move |h| h.color(shade).map(|c| (h.alias, c)))
}
