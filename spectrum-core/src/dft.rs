//! # Exact Discrete Fourier Transform
//!
//! O(M²) transform of arbitrary length. Used when an axis is not a power of
//! two, and as a reference for the fast transform.
//!
//! Both directions are scaled by `1/sqrt(M)`, so the transform is unitary and
//! preserves energy.

use rayon::prelude::*;
use std::f64::consts::PI;

use crate::complex::Complex;
use crate::transform::{Direction, Transform1d};

/// Slow 1D DFT with precomputed trigonometric tables.
#[derive(Debug, Clone)]
pub struct Dft1d {
    cos_table: Vec<f64>,
    sin_table: Vec<f64>,
    scale: f64,
}

impl Dft1d {
    /// Tabulates `cos(2πi/M)` and `sin(2πi/M)` for `i` in `0..M`.
    pub fn new(len: usize) -> Self {
        let step = 2.0 * PI / len as f64;
        let (cos_table, sin_table) = (0..len)
            .map(|i| {
                let (sin, cos) = (step * i as f64).sin_cos();
                (cos, sin)
            })
            .unzip();

        Self {
            cos_table,
            sin_table,
            scale: 1.0 / (len as f64).sqrt(),
        }
    }

    /// Computes output coefficient `m`.
    ///
    /// The kernel index `(m·u) mod M` is advanced incrementally so no
    /// trigonometric function is evaluated here.
    #[inline]
    fn coefficient(&self, input: &[Complex], m: usize, direction: Direction) -> Complex {
        let len = input.len();
        let sign = match direction {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        };

        let mut sum_re = 0.0;
        let mut sum_im = 0.0;
        let mut k = 0;
        for g in input {
            let cos_w = self.cos_table[k];
            let sin_w = sign * self.sin_table[k];
            sum_re += g.re * cos_w - g.im * sin_w;
            sum_im += g.re * sin_w + g.im * cos_w;

            k += m;
            if k >= len {
                k -= len;
            }
        }
        Complex::new(self.scale * sum_re, self.scale * sum_im)
    }

    /// Out-of-place transform computing every output index in parallel.
    pub fn transform(&self, input: &[Complex], direction: Direction) -> Vec<Complex> {
        assert_eq!(input.len(), self.len(), "DFT length mismatch");
        (0..input.len())
            .into_par_iter()
            .map(|m| self.coefficient(input, m, direction))
            .collect()
    }
}

impl Transform1d for Dft1d {
    fn len(&self) -> usize {
        self.cos_table.len()
    }

    fn scratch_len(&self) -> usize {
        self.len()
    }

    fn process_with_scratch(
        &self,
        buffer: &mut [Complex],
        scratch: &mut [Complex],
        direction: Direction,
    ) {
        assert_eq!(buffer.len(), self.len(), "DFT length mismatch");
        let scratch = &mut scratch[..buffer.len()];
        for (m, out) in scratch.iter_mut().enumerate() {
            *out = self.coefficient(buffer, m, direction);
        }
        buffer.copy_from_slice(scratch);
    }
}
