//! # Grayscale Raster Module
//!
//! The engine consumes any type implementing [`GrayRaster`] and produces
//! [`GrayImage`] values. Decoding, display and generic image utilities live
//! outside this crate; only what the transforms need is defined here.

use std::sync::Arc;

use crate::error::SpectrumError;

/// Color table attached to indexed images. Echoed back unchanged on
/// reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub colors: Vec<[u8; 3]>,
}

impl Palette {
    /// The 256-entry identity gray ramp.
    pub fn grayscale() -> Self {
        Self {
            colors: (0..=255u8).map(|i| [i, i, i]).collect(),
        }
    }
}

/// Bit depth and palette of a source raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    pub depth: u8,
    pub palette: Arc<Palette>,
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self {
            depth: 8,
            palette: Arc::new(Palette::grayscale()),
        }
    }
}

/// A single-channel 8-bit raster.
pub trait GrayRaster {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Intensity at column `x`, row `y`.
    fn intensity(&self, x: usize, y: usize) -> u8;
    fn format(&self) -> &PixelFormat;
}

/// Row-major owned grayscale image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// A black image of the given geometry.
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            pixels: vec![0; width * height],
        }
    }

    /// Wraps an existing row-major buffer.
    pub fn from_raw(
        width: usize,
        height: usize,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, SpectrumError> {
        if width == 0 || height == 0 {
            return Err(SpectrumError::EmptyRaster);
        }
        if pixels.len() != width * height {
            return Err(SpectrumError::BufferSize {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Builds an 8-bit image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> Self {
        let mut image = Self::new(width, height, PixelFormat::default());
        for y in 0..height {
            for x in 0..width {
                image.pixels[y * width + x] = f(x, y);
            }
        }
        image
    }

    /// Copies any raster into an owned image.
    pub fn from_raster<R: GrayRaster + ?Sized>(raster: &R) -> Self {
        let mut image = Self::new(raster.width(), raster.height(), raster.format().clone());
        for y in 0..image.height {
            for x in 0..image.width {
                image.pixels[y * image.width + x] = raster.intensity(x, y);
            }
        }
        image
    }

    pub fn set_intensity(&mut self, x: usize, y: usize, value: u8) {
        self.pixels[y * self.width + x] = value;
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

impl GrayRaster for GrayImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn intensity(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    fn format(&self) -> &PixelFormat {
        &self.format
    }
}

/// Maps a reconstructed real value onto `[0, 255]`.
///
/// Negative and non-finite values map to 0, values above 255 to 255, the rest
/// round to nearest.
#[inline]
pub fn clamp8(value: f64) -> u8 {
    if !(value >= 0.0) {
        0
    } else if value > 255.0 {
        255
    } else {
        value.round() as u8
    }
}
