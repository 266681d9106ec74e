//! # Spectrum Container
//!
//! A [`Spectrum`] is the complex result of a forward 2D transform together with
//! the geometry and pixel format of the raster it came from, so an inverse
//! transform can rebuild a raster of the same kind.
//!
//! Coefficients are stored row-major in one buffer of
//! `spectrum_width * spectrum_height` values, which keeps the array
//! rectangular by construction.

use once_cell::sync::OnceCell;
use rayon::prelude::*;
use tracing::trace;

use crate::complex::Complex;
use crate::raster::PixelFormat;
use crate::transform::TransformKind;
use crate::views;

/// Widest log-magnitude range shown by the power view, roughly `e^50`.
pub const MAX_LOG_RANGE: f64 = 50.0;

/// Normalization of the power view, computed once per spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerScale {
    /// Multiplier mapping the clamped log range onto `[0, 253.999]`.
    pub scale: f64,
    /// Lower end of the clamped log-magnitude range.
    pub log_min: f64,
}

impl PowerScale {
    /// Scans `coefficients` once for the extreme squared magnitudes.
    pub fn from_coefficients(coefficients: &[Complex]) -> Self {
        let (min, max) = coefficients
            .par_iter()
            .map(|c| {
                let power = c.norm_sqr();
                (power, power)
            })
            .reduce(
                || (f64::INFINITY, f64::NEG_INFINITY),
                |a, b| (a.0.min(b.0), a.1.max(b.1)),
            );

        let log_max = max.ln() / 2.0;
        let mut log_min = min.ln() / 2.0;
        if !log_min.is_finite() || log_max - log_min > MAX_LOG_RANGE {
            log_min = log_max - MAX_LOG_RANGE;
        }
        let scale = 253.999 / (log_max - log_min);

        trace!(log_min, log_max, scale, "computed power scale");
        Self { scale, log_min }
    }
}

/// Frequency-domain representation of a grayscale raster.
#[derive(Debug, Clone)]
pub struct Spectrum {
    width: usize,
    height: usize,
    format: PixelFormat,
    kind: TransformKind,
    spectrum_width: usize,
    spectrum_height: usize,
    coefficients: Vec<Complex>,
    power_scale: OnceCell<PowerScale>,
}

impl Spectrum {
    /// Wraps transformed coefficients.
    ///
    /// `width`/`height` describe the source raster, the spectrum dimensions
    /// may be larger when the fast path padded the input.
    pub fn new(
        width: usize,
        height: usize,
        format: PixelFormat,
        kind: TransformKind,
        spectrum_width: usize,
        spectrum_height: usize,
        coefficients: Vec<Complex>,
    ) -> Self {
        assert_eq!(
            coefficients.len(),
            spectrum_width * spectrum_height,
            "coefficient buffer does not match spectrum shape"
        );
        Self {
            width,
            height,
            format,
            kind,
            spectrum_width,
            spectrum_height,
            coefficients,
            power_scale: OnceCell::new(),
        }
    }

    /// Source raster width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Source raster height.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> &PixelFormat {
        &self.format
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn spectrum_width(&self) -> usize {
        self.spectrum_width
    }

    pub fn spectrum_height(&self) -> usize {
        self.spectrum_height
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.spectrum_width, self.spectrum_height)
    }

    pub fn coefficients(&self) -> &[Complex] {
        &self.coefficients
    }

    /// Mutable access to the coefficients. Drops the memoised power scale,
    /// since it no longer describes the data.
    pub fn coefficients_mut(&mut self) -> &mut [Complex] {
        self.power_scale.take();
        &mut self.coefficients
    }

    pub(crate) fn into_parts(self) -> (usize, usize, PixelFormat, Vec<Complex>) {
        (self.width, self.height, self.format, self.coefficients)
    }

    /// Coefficient at frequency column `u`, row `v`.
    pub fn get(&self, u: usize, v: usize) -> Complex {
        self.coefficients[v * self.spectrum_width + u]
    }

    pub fn row(&self, v: usize) -> &[Complex] {
        let start = v * self.spectrum_width;
        &self.coefficients[start..start + self.spectrum_width]
    }

    pub fn amplitude(&self, u: usize, v: usize) -> f64 {
        self.get(u, v).norm()
    }

    pub fn phase(&self, u: usize, v: usize) -> f64 {
        self.get(u, v).arg()
    }

    /// Replaces a coefficient by its polar form.
    pub fn set_polar(&mut self, u: usize, v: usize, amplitude: f64, phase: f64) {
        let width = self.spectrum_width;
        self.coefficients_mut()[v * width + u] = Complex::from_polar(amplitude, phase);
    }

    /// Moves the zero-frequency coefficient from the top-left corner to the
    /// centre, using the same split as [`views::swap_quadrants`].
    pub fn swap_quadrants(&mut self) {
        let (width, height) = self.shape();
        views::swap_quadrants_in(&mut self.coefficients, width, height);
    }

    /// Returns the power-view normalization, computing it on first use.
    ///
    /// Concurrent first calls are serialized by the cell, so the scan runs
    /// exactly once per spectrum.
    pub fn power_scale(&self) -> &PowerScale {
        self.power_scale
            .get_or_init(|| PowerScale::from_coefficients(&self.coefficients))
    }

    /// The memoised scale, if any power view has been requested.
    pub fn cached_power_scale(&self) -> Option<&PowerScale> {
        self.power_scale.get()
    }
}
