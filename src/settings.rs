//! Driver settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! default match tuning.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Match driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for item drops; random when absent
    pub seed: Option<u64>,
    /// Fixed simulation step (seconds)
    pub fixed_dt: f64,
    /// Maximum fixed steps run for a single frame
    pub max_substeps: u32,
    /// Time between item drops (milliseconds)
    pub item_drop_interval_ms: f64,
    /// Length of the headless demo bout (seconds)
    pub demo_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            fixed_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            item_drop_interval_ms: ITEM_DROP_INTERVAL_MS,
            demo_seconds: 30.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.fixed_dt > 0.0 && self.fixed_dt <= MAX_FRAME_DT) {
            return Err(SettingsError::Invalid {
                field: "fixed_dt",
                reason: "must be positive and no longer than one frame",
            });
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1",
            });
        }
        if !(self.item_drop_interval_ms > 0.0) {
            return Err(SettingsError::Invalid {
                field: "item_drop_interval_ms",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
