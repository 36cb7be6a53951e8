//! Error type shared by the color model, the picking primitives and the
//! picker engines.

/// Everything that can go wrong inside the picking engine.
///
/// None of these are fatal to a picker: an engine that hits one keeps its
/// last valid state.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// The string could not be parsed as a color.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// A surface or cursor with a zero, negative or non-finite dimension.
    #[error("degenerate {what} geometry: {width}x{height}")]
    DegenerateGeometry {
        what: &'static str,
        width: f64,
        height: f64,
    },

    /// Nearest-candidate lookup over an empty set.
    #[error("no candidates to resolve against")]
    NoCandidates,

    /// A text input value that failed validation.
    #[error("rejected {field} input: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    #[error("unknown material shade: {0:?}")]
    UnknownShade(String),

    /// The named swatch does not exist for the current shade.
    #[error("no swatch {0:?} for the current shade")]
    UnknownSwatch(String),

    #[error("history slot {0} holds no color")]
    EmptyHistorySlot(usize),

    #[error("invalid picker configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PickerError>;
