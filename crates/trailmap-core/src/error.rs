use crate::charset::Marker;
use thiserror::Error;

/// Result type used throughout the core
pub type Result<T> = std::result::Result<T, MapError>;

/// Hard failures of the core.
///
/// Structural problems of a map are not errors; they are reported as
/// [`Defect`](crate::Defect)s by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The walker was started on a map without the given marker
    #[error("No {marker} position found in the map")]
    MissingMarker { marker: Marker },

    /// A host handed in a cell that is not exactly one character
    #[error("cell [{row}, {col}] holds {cell:?}, expected a single character")]
    MultiCharCell { row: usize, col: usize, cell: String },
}
