//! # 1D Transform Abstraction
//!
//! Both one-dimensional transforms implement [`Transform1d`], so the 2D
//! orchestrator can run either of them over rows and columns. The scratch
//! buffer API mirrors RustFFT's `process_with_scratch`: each worker owns its
//! scratch space and nothing mutable is shared between workers.

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::dft::Dft1d;
use crate::fft::Fft1d;

/// Sign of the exponent in the transform kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

/// Which 1D algorithm a 2D transform uses.
///
/// * `Exact` keeps the source geometry and uses the unitary `1/sqrt(M)`
///   normalization in both directions.
/// * `Fast` zero-pads each axis to the next power of two; the forward pass is
///   unnormalized and the inverse scales by `1/M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Exact,
    #[default]
    Fast,
}

impl TransformKind {
    /// Spectrum length used for an image axis of `len` pixels.
    pub fn padded_len(self, len: usize) -> usize {
        match self {
            TransformKind::Exact => len,
            TransformKind::Fast => len.next_power_of_two(),
        }
    }

    /// Factor `g` such that `inverse(forward(x) * forward(y))` equals
    /// `g * (x ⊛ y)` for a spectrum of `len` coefficients.
    ///
    /// Filter kernels are divided by this gain so blurring keeps the mean
    /// intensity.
    pub fn convolution_gain(self, len: usize) -> f64 {
        match self {
            TransformKind::Exact => 1.0 / (len as f64).sqrt(),
            TransformKind::Fast => 1.0,
        }
    }
}

/// A one-dimensional transform of a fixed length.
pub trait Transform1d: Send + Sync {
    /// Number of samples this transform accepts.
    fn len(&self) -> usize;

    /// Length of the scratch slice required by [`process_with_scratch`].
    ///
    /// [`process_with_scratch`]: Transform1d::process_with_scratch
    fn scratch_len(&self) -> usize;

    /// Transforms `buffer` in place.
    ///
    /// # Panics
    /// If `buffer.len() != self.len()` or `scratch` is shorter than
    /// [`scratch_len`](Transform1d::scratch_len).
    fn process_with_scratch(
        &self,
        buffer: &mut [Complex],
        scratch: &mut [Complex],
        direction: Direction,
    );

    /// Convenience wrapper allocating its own scratch space.
    fn process(&self, buffer: &mut [Complex], direction: Direction) {
        let mut scratch = vec![crate::complex::ZERO; self.scratch_len()];
        self.process_with_scratch(buffer, &mut scratch, direction);
    }
}

/// Builds the 1D transform for `len` samples.
///
/// The fast kind requires `len` to be a power of two; the 2D orchestrator
/// pads before calling this.
pub fn plan(kind: TransformKind, len: usize) -> Box<dyn Transform1d> {
    match kind {
        TransformKind::Exact => Box::new(Dft1d::new(len)),
        TransformKind::Fast => Box::new(Fft1d::new(len)),
    }
}
