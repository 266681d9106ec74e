//! # Fourier Engine
//!
//! Facade bundling an [`EngineConfig`] with the worker pool every parallel
//! pass runs on. All operations are synchronous: they block until the work
//! is finished and cannot be cancelled.

use anyhow::{Context, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::SpectrumError;
use crate::filter;
use crate::fourier2d;
use crate::raster::{GrayImage, GrayRaster};
use crate::spectrum::Spectrum;
use crate::views;

#[derive(Debug)]
pub struct FourierEngine {
    config: EngineConfig,
    pool: Option<ThreadPool>,
}

impl Default for FourierEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            pool: None,
        }
    }
}

impl FourierEngine {
    /// Creates an engine, building a dedicated pool when `config.threads` is set.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let pool = match config.threads {
            Some(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("spectrum-worker-{i}"))
                    .build()
                    .context("failed to build worker pool")?,
            ),
            None => None,
        };
        debug!(?config, "fourier engine ready");
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs `op` inside the engine's pool, or on the global pool.
    fn run<T, F>(&self, op: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    pub fn forward<R>(&self, raster: &R) -> Spectrum
    where
        R: GrayRaster + Sync + ?Sized,
    {
        self.run(|| fourier2d::forward(raster, self.config.transform))
    }

    pub fn forward_scaled<R>(&self, raster: &R, norm: f64) -> Spectrum
    where
        R: GrayRaster + Sync + ?Sized,
    {
        self.run(|| fourier2d::forward_scaled(raster, self.config.transform, norm))
    }

    /// Inverse transform. Uses the convention the spectrum was built with,
    /// whatever this engine is configured for.
    pub fn inverse(&self, spectrum: Spectrum) -> GrayImage {
        self.run(|| fourier2d::inverse(spectrum))
    }

    pub fn power_spectrum(&self, spectrum: &Spectrum) -> GrayImage {
        self.run(|| views::power_spectrum(spectrum))
    }

    pub fn phase_spectrum(&self, spectrum: &Spectrum) -> GrayImage {
        self.run(|| views::phase_spectrum(spectrum))
    }

    /// Power view with the zero frequency moved to the centre.
    pub fn centered_power_spectrum(&self, spectrum: &Spectrum) -> GrayImage {
        let mut image = self.power_spectrum(spectrum);
        views::swap_quadrants(&mut image);
        image
    }

    /// Phase view with the zero frequency moved to the centre.
    pub fn centered_phase_spectrum(&self, spectrum: &Spectrum) -> GrayImage {
        let mut image = self.phase_spectrum(spectrum);
        views::swap_quadrants(&mut image);
        image
    }

    pub fn multiply(&self, target: &mut Spectrum, kernel: &Spectrum) -> Result<(), SpectrumError> {
        self.run(|| filter::multiply(target, kernel))
    }

    pub fn divide(&self, target: &mut Spectrum, kernel: &Spectrum) -> Result<(), SpectrumError> {
        self.run(|| filter::divide(target, kernel))
    }

    /// Frequency-domain box blur with the configured box ratio.
    pub fn blur<R>(&self, raster: &R) -> Result<GrayImage, SpectrumError>
    where
        R: GrayRaster + Sync + ?Sized,
    {
        self.run(|| filter::blur(raster, self.config.transform, self.config.box_filter_ratio))
    }

    /// Blur followed by division by the same filter spectrum.
    pub fn inverse_filter<R>(&self, raster: &R) -> Result<GrayImage, SpectrumError>
    where
        R: GrayRaster + Sync + ?Sized,
    {
        self.run(|| {
            filter::inverse_filter(raster, self.config.transform, self.config.box_filter_ratio)
        })
    }
}
