//! matops: affine transform and vector algebra for CAD pose matrices.
//!
//! The `linalg` module holds the value types (vectors, 3x3 matrices and
//! 4x4 pose matrices). The `driver` module wires them to a field-based
//! form the way a CAD plugin dialog does.

pub mod precision;
pub mod linalg;
pub mod driver;
pub mod config;

// Re-exports for convenience
pub use linalg::{CoordinateSystem, Matrix3, Matrix4, Vector3};
pub use driver::{evaluate, DataShape, FieldGroup, Form, MemoryForm, Mode, ModeLayout, SessionState, Value, MAX_DECIMALS};
pub use config::{Job, Settings};

/// Result type for matops operations
pub type Result<T> = std::result::Result<T, MatopsError>;

#[derive(Debug, thiserror::Error)]
pub enum MatopsError {
    #[error("Degenerate input to {operation}: magnitude {magnitude:e} is below tolerance")]
    DegenerateInput {
        operation: &'static str,
        magnitude: f64,
    },

    #[error("Invalid field {group} slot {slot}: {text:?}")]
    InvalidField {
        group: FieldGroup,
        slot: usize,
        text: String,
    },

    #[error("Shape mismatch: {shape} takes {expected} values, found {found}")]
    ShapeMismatch {
        shape: DataShape,
        expected: usize,
        found: usize,
    },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MatopsError {
    /// Message shown to the user by a dialog front end.
    pub fn user_message(&self) -> &'static str {
        match self {
            MatopsError::DegenerateInput { .. } | MatopsError::InvalidField { .. } => "Invalid input.",
            _ => "Matrix operation failed.",
        }
    }
}
