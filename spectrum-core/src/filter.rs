//! # Frequency-Domain Filtering
//!
//! Point-wise products and quotients of spectra, and the box-blur /
//! inverse-filtering pair built on them through the convolution theorem.
//!
//! Division is not regularized. Coefficients of the divisor close to zero
//! produce huge or non-finite values, which the inverse transform clamps.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::complex;
use crate::error::SpectrumError;
use crate::fourier2d;
use crate::raster::{GrayImage, GrayRaster};
use crate::spectrum::Spectrum;
use crate::transform::TransformKind;

/// Default ratio between the shorter image side and the blur box side.
pub const DEFAULT_BOX_RATIO: f64 = 3.8;

fn check_compatible(left: &Spectrum, right: &Spectrum) -> Result<(), SpectrumError> {
    if left.shape() != right.shape() {
        return Err(SpectrumError::DimensionMismatch {
            left: left.shape(),
            right: right.shape(),
        });
    }
    if left.kind() != right.kind() {
        return Err(SpectrumError::KindMismatch {
            left: left.kind(),
            right: right.kind(),
        });
    }
    Ok(())
}

/// `target[i] *= filter[i]` for every coefficient.
///
/// On error `target` is left untouched.
pub fn multiply(target: &mut Spectrum, filter: &Spectrum) -> Result<(), SpectrumError> {
    check_compatible(target, filter)?;
    target
        .coefficients_mut()
        .par_iter_mut()
        .zip(filter.coefficients().par_iter())
        .for_each(|(a, b)| *a *= *b);
    Ok(())
}

/// `target[i] /= filter[i]` for every coefficient.
///
/// On error `target` is left untouched.
pub fn divide(target: &mut Spectrum, filter: &Spectrum) -> Result<(), SpectrumError> {
    check_compatible(target, filter)?;
    target
        .coefficients_mut()
        .par_iter_mut()
        .zip(filter.coefficients().par_iter())
        .for_each(|(a, b)| *a /= *b);

    let non_finite = target
        .coefficients()
        .par_iter()
        .filter(|c| !complex::is_finite(c))
        .count();
    if non_finite > 0 {
        warn!(non_finite, "spectral division produced non-finite coefficients");
    }
    Ok(())
}

/// Side length of the blur box for a `width` × `height` image.
pub fn box_size(width: usize, height: usize, ratio: f64) -> usize {
    (width.min(height) as f64 / ratio) as usize
}

/// A `width` × `height` raster holding a `size` × `size` box of ones wrapped
/// around the origin.
///
/// The box covers offsets `-size/2 .. size - size/2` on each axis, taken
/// modulo the raster side, so convolving with it does not move content.
pub fn box_filter(width: usize, height: usize, size: usize) -> GrayImage {
    let half = size / 2;
    let inside = |pos: usize, side: usize| (pos + half) % side < size;
    GrayImage::from_fn(width, height, |x, y| (inside(x, width) && inside(y, height)) as u8)
}

/// Transforms `raster` and a matching unit-gain box filter, and multiplies
/// the filter into the image spectrum.
///
/// The filter is built on the spectrum geometry, so on the fast kind the
/// convolution runs over the zero-padded period.
///
/// Returns `None` when the box would be empty.
fn blurred_spectrum<R>(
    raster: &R,
    kind: TransformKind,
    ratio: f64,
) -> Result<Option<(Spectrum, Spectrum)>, SpectrumError>
where
    R: GrayRaster + Sync + ?Sized,
{
    let (width, height) = (raster.width(), raster.height());
    let size = box_size(width, height, ratio);
    if size == 0 {
        return Ok(None);
    }
    let (spectrum_width, spectrum_height) = (kind.padded_len(width), kind.padded_len(height));
    debug!(width, height, spectrum_width, spectrum_height, size, ?kind, "building box filter");

    let norm = (size * size) as f64 * kind.convolution_gain(spectrum_width * spectrum_height);

    let mut image = fourier2d::forward(raster, kind);
    let kernel = box_filter(spectrum_width, spectrum_height, size);
    let filter = fourier2d::forward_scaled(&kernel, kind, norm);
    multiply(&mut image, &filter)?;
    Ok(Some((image, filter)))
}

/// Box-blurs `raster` through the frequency domain.
///
/// The box side is `min(width, height) / ratio`. Pixels near the border mix
/// with the opposite border on the exact kind and with zero padding on the
/// fast kind.
///
/// # Arguments
/// * `raster` - Image to blur
/// * `kind` - Transform used for both the image and the filter
/// * `ratio` - Shorter image side divided by the box side
///
/// # Returns
/// * `Ok(GrayImage)` - Blurred image with the source geometry, or a copy of
///   the source when the box would be smaller than one pixel
/// * `Err(SpectrumError)` - If the image and filter spectra disagree
pub fn blur<R>(raster: &R, kind: TransformKind, ratio: f64) -> Result<GrayImage, SpectrumError>
where
    R: GrayRaster + Sync + ?Sized,
{
    let Some((blurred, _)) = blurred_spectrum(raster, kind, ratio)? else {
        return Ok(GrayImage::from_raster(raster));
    };
    Ok(fourier2d::inverse(blurred))
}

/// Blurs `raster` in the frequency domain, then divides the same filter out
/// again before the inverse transform (naive deconvolution).
///
/// # Arguments
/// * `raster` - Image to blur and restore
/// * `kind` - Transform used for both the image and the filter
/// * `ratio` - Shorter image side divided by the box side
///
/// # Returns
/// * `Ok(GrayImage)` - Reconstructed image. Filter coefficients near zero
///   blow up and clamp to 0 or 255.
/// * `Err(SpectrumError)` - If the image and filter spectra disagree
pub fn inverse_filter<R>(
    raster: &R,
    kind: TransformKind,
    ratio: f64,
) -> Result<GrayImage, SpectrumError>
where
    R: GrayRaster + Sync + ?Sized,
{
    let Some((mut blurred, filter)) = blurred_spectrum(raster, kind, ratio)? else {
        return Ok(GrayImage::from_raster(raster));
    };
    divide(&mut blurred, &filter)?;
    Ok(fourier2d::inverse(blurred))
}
