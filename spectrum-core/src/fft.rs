//! # Fast Fourier Transform (FFT) Module
//!
//! Radix-2 Cooley-Tukey transform for power-of-two lengths, computed in
//! place over a single buffer:
//! 1. Bit-reversal permutation (the even/odd split of every recursion level)
//! 2. Butterfly stages of doubling span, `y[k] = e[k] + w_k·o[k]` and
//!    `y[k + M/2] = e[k] - w_k·o[k]`
//!
//! The forward pass is unnormalized. The inverse conjugates the input, runs
//! the forward pass, conjugates again and scales by `1/M`.

use std::f64::consts::PI;

use crate::complex::{self, Complex};
use crate::transform::{Direction, Transform1d};

/// Fast 1D transform for a fixed power-of-two length.
#[derive(Debug, Clone)]
pub struct Fft1d {
    len: usize,
    /// `e^{-2πik/M}` for `k` in `0..M/2`.
    twiddles: Vec<Complex>,
}

impl Fft1d {
    /// # Panics
    /// If `len` is not a power of two. Callers pad or fall back to the exact
    /// transform before getting here.
    pub fn new(len: usize) -> Self {
        assert!(
            len.is_power_of_two(),
            "FFT length {len} is not a power of two"
        );
        let twiddles = (0..len / 2)
            .map(|k| Complex::from_polar(1.0, -2.0 * PI * k as f64 / len as f64))
            .collect();
        Self { len, twiddles }
    }

    fn forward_in_place(&self, data: &mut [Complex]) {
        let n = data.len();
        if n <= 1 {
            return;
        }

        // Bit-reversal permutation
        let mut j = 0usize;
        for i in 1..n {
            let mut bit = n >> 1;
            while j & bit != 0 {
                j ^= bit;
                bit >>= 1;
            }
            j ^= bit;
            if i < j {
                data.swap(i, j);
            }
        }

        // Butterfly stages
        let mut span = 2;
        while span <= n {
            let half = span / 2;
            let stride = n / span;
            for start in (0..n).step_by(span) {
                for k in 0..half {
                    let w = self.twiddles[k * stride];
                    let even = data[start + k];
                    let odd = w * data[start + k + half];
                    data[start + k] = even + odd;
                    data[start + k + half] = even - odd;
                }
            }
            span <<= 1;
        }
    }
}

impl Transform1d for Fft1d {
    fn len(&self) -> usize {
        self.len
    }

    fn scratch_len(&self) -> usize {
        0
    }

    fn process_with_scratch(
        &self,
        buffer: &mut [Complex],
        _scratch: &mut [Complex],
        direction: Direction,
    ) {
        assert_eq!(buffer.len(), self.len, "FFT length mismatch");
        match direction {
            Direction::Forward => self.forward_in_place(buffer),
            Direction::Inverse => {
                complex::conjugate_all(buffer);
                self.forward_in_place(buffer);
                complex::conjugate_all(buffer);
                complex::scale_all(buffer, 1.0 / self.len as f64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::ZERO;
    use approx::assert_abs_diff_eq;
    use rustfft::FftPlanner;

    fn signal(len: usize) -> Vec<Complex> {
        (0..len)
            .map(|i| Complex::new((i as f64 * 0.7).sin() * 10.0, (i % 5) as f64 - 2.0))
            .collect()
    }

    #[test]
    fn matches_rustfft() {
        for len in [1, 2, 4, 8, 32, 256] {
            let input = signal(len);

            let mut ours = input.clone();
            Fft1d::new(len).process(&mut ours, Direction::Forward);

            let mut reference = input.clone();
            FftPlanner::<f64>::new()
                .plan_fft_forward(len)
                .process(&mut reference);

            for (a, b) in ours.iter().zip(&reference) {
                assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-9);
                assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn inverse_restores_input() {
        let input = signal(64);
        let fft = Fft1d::new(64);
        let mut buffer = input.clone();
        fft.process(&mut buffer, Direction::Forward);
        fft.process(&mut buffer, Direction::Inverse);
        for (a, b) in buffer.iter().zip(&input) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-9);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn constant_concentrates_in_dc() {
        let mut buffer = vec![Complex::new(3.0, 0.0); 8];
        Fft1d::new(8).process(&mut buffer, Direction::Forward);
        assert_abs_diff_eq!(buffer[0].re, 24.0, epsilon = 1e-12);
        for c in &buffer[1..] {
            assert_abs_diff_eq!(c.norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn length_one_is_identity() {
        let mut buffer = vec![Complex::new(5.0, 1.0)];
        Fft1d::new(1).process(&mut buffer, Direction::Inverse);
        assert_eq!(buffer, vec![Complex::new(5.0, 1.0)]);
    }

    #[test]
    #[should_panic(expected = "not a power of two")]
    fn rejects_non_power_of_two() {
        Fft1d::new(6);
    }

    #[test]
    #[should_panic(expected = "FFT length mismatch")]
    fn rejects_wrong_buffer() {
        Fft1d::new(4).process(&mut vec![ZERO; 8], Direction::Forward);
    }
}
