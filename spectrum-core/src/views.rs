//! # Spectrum Views
//!
//! Rasterizes a [`Spectrum`] into 8-bit images for display:
//! - Power spectrum: `log(|c|²)/2` over a range clamped to [`MAX_LOG_RANGE`],
//!   encoded in `[1, 254]` with 0 reserved
//! - Phase spectrum: `arg(c)` mapped through `(φ + π/2)·255/π`
//! - Quadrant swap: moves the zero frequency from the corner to the centre
//!
//! [`MAX_LOG_RANGE`]: crate::spectrum::MAX_LOG_RANGE

use rayon::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::raster::{GrayImage, GrayRaster};
use crate::spectrum::Spectrum;

/// Log-magnitude image of `spectrum`, one pixel per coefficient.
///
/// The normalization is computed on the first call and reused afterwards,
/// so repeated calls produce identical images.
///
/// # Arguments
/// * `spectrum` - Coefficients to render
///
/// # Returns
/// * `GrayImage` - `spectrum_width` × `spectrum_height` image in the source
///   pixel format, zero frequency in the top-left corner
pub fn power_spectrum(spectrum: &Spectrum) -> GrayImage {
    let (width, height) = spectrum.shape();
    let power = *spectrum.power_scale();
    let mut image = GrayImage::new(width, height, spectrum.format().clone());

    image
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(v, out)| {
            for (pixel, c) in out.iter_mut().zip(spectrum.row(v)) {
                let mut level = (c.norm_sqr().ln() / 2.0 - power.log_min) * power.scale;
                if level.is_nan() || level < 0.0 {
                    level = 0.0;
                }
                // 1 is the darkest value
                *pixel = (level + 1.0) as u8;
            }
        });
    image
}

/// Phase-angle image of `spectrum`.
///
/// Values are truncated to an integer and reduced to their low byte, so the
/// angle range wraps around the 8-bit scale.
pub fn phase_spectrum(spectrum: &Spectrum) -> GrayImage {
    let (width, height) = spectrum.shape();
    let scale = 255.0 / PI;
    let mut image = GrayImage::new(width, height, spectrum.format().clone());

    image
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(v, out)| {
            for (pixel, c) in out.iter_mut().zip(spectrum.row(v)) {
                *pixel = ((c.arg() + FRAC_PI_2) * scale) as i32 as u8;
            }
        });
    image
}

/// Swaps quadrants B↔D and A↔C of `image` in place.
///
/// ```text
///   B A
///   C D
/// ```
///
/// The split is at `w1 = width - width/2`, `h1 = height - height/2`, so the
/// left and top blocks are the larger ones for odd sizes. Swapping twice
/// restores an even-sized image; odd sizes end up shifted by one pixel.
pub fn swap_quadrants(image: &mut GrayImage) {
    let (width, height) = (image.width(), image.height());
    swap_quadrants_in(image.pixels_mut(), width, height);
}

/// Quadrant swap over any row-major buffer.
pub fn swap_quadrants_in<T>(data: &mut [T], width: usize, height: usize) {
    assert_eq!(data.len(), width * height, "buffer does not match geometry");
    let (w2, h2) = (width / 2, height / 2);

    data.rotate_right(h2 * width);
    if width > 0 {
        for row in data.chunks_exact_mut(width) {
            row.rotate_right(w2);
        }
    }
}
