//! # Engine Configuration
//!
//! Settings for [`FourierEngine`](crate::engine::FourierEngine), stored as
//! JSON. Missing fields take their defaults, so `{}` is a valid config.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::filter::DEFAULT_BOX_RATIO;
use crate::transform::TransformKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 1D algorithm used by every 2D transform.
    pub transform: TransformKind,
    /// Size of a dedicated worker pool. `None` runs on rayon's global pool.
    pub threads: Option<usize>,
    /// Blur box side is `min(width, height) / box_filter_ratio`.
    pub box_filter_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transform: TransformKind::default(),
            threads: None,
            box_filter_ratio: DEFAULT_BOX_RATIO,
        }
    }
}

impl EngineConfig {
    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.box_filter_ratio.is_finite() && self.box_filter_ratio > 0.0,
            "box_filter_ratio must be a positive number, got {}",
            self.box_filter_ratio
        );
        ensure!(self.threads != Some(0), "threads must be at least 1");
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid engine config")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Saves the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write config {}", path.display()))
    }
}
