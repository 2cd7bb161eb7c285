use thiserror::Error;

/// Custom error type for the Composa dataset layer.
///
/// Every variant is reported synchronously by the call that triggers it, and the
/// dataset involved is left exactly as it was before that call.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum ComposaError {
    /// An index fell outside `[0, len)` of a dataset, view or sample vector.
    #[error("Index out of range: index {index} for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A vector's length disagrees with the dimensionality already established
    /// for the slot it was meant to fill.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The input and target halves of a supervised dataset hold different numbers
    /// of samples.
    #[error("Size mismatch: {inputs} inputs but {targets} targets")]
    SizeMismatch { inputs: usize, targets: usize },

    /// A split, shuffle or loader parameter violates its documented constraints.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A view was handed to a dataset other than the one it was built over.
    #[error("View was not built over this dataset (operation {operation})")]
    SourceMismatch { operation: String },
}

impl ComposaError {
    /// Shorthand used by bounds checks throughout the workspace.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        ComposaError::OutOfRange { index, len }
    }
}
