//! # 2D Transform Module
//!
//! Separable 2D transforms built from a 1D [`Transform1d`]:
//! 1. Every row is transformed independently (parallel over rows)
//! 2. Every column of the row result is transformed (parallel over columns)
//!
//! The column pass only starts once the row pass has returned, so no worker
//! ever reads a partially transformed row. Inside a pass each worker writes
//! to its own row or column and reads shared data immutably.
//!
//! The fast kind zero-pads each axis to the next power of two; the exact kind
//! keeps the source geometry.

use rayon::prelude::*;
use tracing::debug;

use crate::complex::{self, Complex, ZERO};
use crate::raster::{clamp8, GrayImage, GrayRaster};
use crate::spectrum::Spectrum;
use crate::transform::{self, Direction, Transform1d, TransformKind};

/// Forward 2D transform of `raster`.
pub fn forward<R>(raster: &R, kind: TransformKind) -> Spectrum
where
    R: GrayRaster + Sync + ?Sized,
{
    forward_scaled(raster, kind, 1.0)
}

/// Forward 2D transform of `raster` with every intensity divided by `norm`.
///
/// Used to build normalized filter kernels, e.g. a box of ones divided by its
/// area.
///
/// # Arguments
/// * `raster` - Source image, read row-major
/// * `kind` - Exact keeps the geometry, fast pads each side to a power of two
/// * `norm` - Divisor applied to every intensity before transforming
///
/// # Returns
/// * `Spectrum` - Coefficients plus the source geometry and pixel format
///
/// # Panics
/// * If the raster has zero width or height
pub fn forward_scaled<R>(raster: &R, kind: TransformKind, norm: f64) -> Spectrum
where
    R: GrayRaster + Sync + ?Sized,
{
    let (width, height) = (raster.width(), raster.height());
    assert!(width > 0 && height > 0, "cannot transform an empty raster");
    let spectrum_width = kind.padded_len(width);
    let spectrum_height = kind.padded_len(height);
    debug!(
        width,
        height,
        spectrum_width,
        spectrum_height,
        ?kind,
        "forward 2D transform"
    );

    let mut coefficients = vec![ZERO; spectrum_width * spectrum_height];

    // Row pass. Padding rows stay zero, and the transform of zero is zero.
    let rows = transform::plan(kind, spectrum_width);
    coefficients
        .par_chunks_mut(spectrum_width)
        .take(height)
        .enumerate()
        .for_each_init(
            || vec![ZERO; rows.scratch_len()],
            |scratch, (v, row)| {
                for (u, value) in row.iter_mut().take(width).enumerate() {
                    *value = complex::from_intensity(raster.intensity(u, v), norm);
                }
                rows.process_with_scratch(row, scratch, Direction::Forward);
            },
        );

    // Column pass
    let columns = transform::plan(kind, spectrum_height);
    let transformed = transform_columns(
        &coefficients,
        spectrum_width,
        spectrum_width,
        columns.as_ref(),
        Direction::Forward,
    );
    scatter_columns(&transformed, &mut coefficients, spectrum_width, spectrum_height);

    debug!(spectrum_width, spectrum_height, "forward 2D transform done");
    Spectrum::new(
        width,
        height,
        raster.format().clone(),
        kind,
        spectrum_width,
        spectrum_height,
        coefficients,
    )
}

/// Inverse 2D transform, consuming the spectrum.
///
/// Uses the transform kind the spectrum was built with.
///
/// # Arguments
/// * `spectrum` - Coefficients to transform back
///
/// # Returns
/// * `GrayImage` - Image with the geometry and pixel format of the original
///   raster. Real parts are rounded and clamped to `[0, 255]`; non-finite
///   values become 0.
pub fn inverse(spectrum: Spectrum) -> GrayImage {
    let kind = spectrum.kind();
    let (spectrum_width, spectrum_height) = spectrum.shape();
    let (width, height, format, mut coefficients) = spectrum.into_parts();
    debug!(
        width,
        height,
        spectrum_width,
        spectrum_height,
        ?kind,
        "inverse 2D transform"
    );

    // Row pass
    let rows = transform::plan(kind, spectrum_width);
    coefficients.par_chunks_mut(spectrum_width).for_each_init(
        || vec![ZERO; rows.scratch_len()],
        |scratch, row| rows.process_with_scratch(row, scratch, Direction::Inverse),
    );

    // Column pass, restricted to the columns inside the source image
    let columns = transform::plan(kind, spectrum_height);
    let transformed = transform_columns(
        &coefficients,
        spectrum_width,
        width,
        columns.as_ref(),
        Direction::Inverse,
    );

    let mut image = GrayImage::new(width, height, format);
    image
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(v, out)| {
            for (u, pixel) in out.iter_mut().enumerate() {
                *pixel = clamp8(transformed[u * spectrum_height + v].re);
            }
        });

    debug!(width, height, "inverse 2D transform done");
    image
}

/// Gathers the first `count` columns of a row-major buffer and transforms each
/// of them. Returns the results column-major.
fn transform_columns(
    data: &[Complex],
    width: usize,
    count: usize,
    transform: &dyn Transform1d,
    direction: Direction,
) -> Vec<Complex> {
    let height = transform.len();
    let mut columns = vec![ZERO; count * height];

    columns.par_chunks_mut(height).enumerate().for_each_init(
        || vec![ZERO; transform.scratch_len()],
        |scratch, (u, column)| {
            for (v, value) in column.iter_mut().enumerate() {
                *value = data[v * width + u];
            }
            transform.process_with_scratch(column, scratch, direction);
        },
    );
    columns
}

/// Writes column-major `columns` back into the row-major `data`.
fn scatter_columns(columns: &[Complex], data: &mut [Complex], width: usize, height: usize) {
    let count = columns.len() / height;
    data.par_chunks_mut(width).enumerate().for_each(|(v, row)| {
        for (u, value) in row.iter_mut().take(count).enumerate() {
            *value = columns[u * height + v];
        }
    });
}
