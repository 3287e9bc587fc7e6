//! Structured error types for argon2-viz.
//!
//! Every fallible operation in the crate reports one of these variants.
//! Out-of-range pass navigation is deliberately absent: it is a no-op.

/// All errors that can occur while configuring or exploring a run.
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    /// Configuration cannot produce a well-formed grid (zero parameter or `memory < parallelism`).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A parameter value failed to parse for its field.
    #[error("Invalid value {value:?} for parameter {name}")]
    InvalidParameter { name: String, value: String },

    /// The parameter name is not one of memory, iterations, parallelism, variant.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Navigation or a cell query was attempted before `start`.
    #[error("No run has been started")]
    NotStarted,

    /// Cell address outside the `lanes x columns` grid.
    #[error("Cell B[{lane}][{column}] is outside the {lanes}x{columns} grid")]
    CellOutOfRange {
        lane: u32,
        column: u32,
        lanes: u32,
        columns: u32,
    },

    /// JSON serialization error.
    #[error("JSON serialization: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VizError>;

#[cfg(target_arch = "wasm32")]
impl From<VizError> for wasm_bindgen::JsValue {
    fn from(e: VizError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
