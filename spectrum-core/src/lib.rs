// spectrum-core/src/lib.rs

//! Frequency-domain engine for grayscale images.
//! This crate turns rasters into complex spectra and back, renders power and
//! phase views of a spectrum, and filters images through point-wise spectral
//! products. It contains no file I/O and no GUI code.

pub mod complex;
pub mod config;
pub mod dft;
pub mod engine;
pub mod error;
pub mod fft;
pub mod filter;
pub mod fourier2d;
pub mod raster;
pub mod spectrum;
pub mod transform;
pub mod views;

pub use complex::Complex;
pub use config::EngineConfig;
pub use engine::FourierEngine;
pub use error::SpectrumError;
pub use raster::{GrayImage, GrayRaster, Palette, PixelFormat};
pub use spectrum::{PowerScale, Spectrum};
pub use transform::{Direction, Transform1d, TransformKind};
