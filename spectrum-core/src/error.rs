//! Error types for the transform engine.

use thiserror::Error;

use crate::transform::TransformKind;

/// Errors that can occur while building rasters or combining spectra.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectrumError {
    /// Point-wise operations need spectra of identical shape.
    #[error("spectrum shape mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Spectra produced by different transform conventions cannot be combined.
    #[error("transform kind mismatch: {left:?} vs {right:?}")]
    KindMismatch {
        left: TransformKind,
        right: TransformKind,
    },

    /// Raw pixel buffer does not match the requested geometry.
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Rasters must have at least one pixel.
    #[error("raster has zero width or height")]
    EmptyRaster,
}
