//! # Complex Arithmetic
//!
//! The engine works on `f64` complex values. The type itself is the
//! `num_complex` one re-exported by RustFFT, which already provides
//! addition, subtraction, multiplication, division, `conj()`, `norm()`,
//! `norm_sqr()` and `arg()`.
//!
//! Division by a zero-magnitude value is not guarded: the result carries
//! `NaN` or infinite parts, and callers decide what to do with them.

pub use rustfft::num_complex::Complex64 as Complex;

/// The additive identity.
pub const ZERO: Complex = Complex::new(0.0, 0.0);

/// Lifts an 8-bit intensity (optionally divided by `norm`) onto the real axis.
#[inline]
pub fn from_intensity(value: u8, norm: f64) -> Complex {
    Complex::new(value as f64 / norm, 0.0)
}

/// Conjugates every value in place.
pub fn conjugate_all(values: &mut [Complex]) {
    for value in values.iter_mut() {
        *value = value.conj();
    }
}

/// Multiplies every value by a real factor in place.
pub fn scale_all(values: &mut [Complex], factor: f64) {
    for value in values.iter_mut() {
        *value *= factor;
    }
}

/// Returns `true` when both parts are finite.
#[inline]
pub fn is_finite(value: &Complex) -> bool {
    value.re.is_finite() && value.im.is_finite()
}
