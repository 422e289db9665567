//! Configuration types for the layering core
//!
//! Scene-time constants. They are loaded once (from JSON or defaults),
//! validated, and then read by the orchestrator every frame.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Errors that can occur while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Constants of the depth-partitioning scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeringConfig {
    /// Scale of the primary pass, render units per meter
    pub meter_to_unit: f64,
    /// Radius the primary camera must cover, in meters
    pub scene_radius: f64,
    /// Near clip of the primary camera, in render units
    pub primary_near_clip: f64,
    /// Far extent of the band frustum in meters
    ///
    /// Defaults to the depth where the primary camera's near plane begins.
    pub band_max_depth: Option<f64>,
    /// Render-unit distance of every band's near edge from its camera
    pub near_anchor: f64,
    /// Nominal thickness of a band in render units
    pub band_size: f64,
    /// Bands never start closer than this to see-through objects, in meters
    pub non_solid_min_depth: f64,
    /// Number of secondary cameras available for bands
    pub camera_slots: usize,
    /// Re-apply primary parameters after the last band pass of a frame
    pub restore_primary_after_layers: bool,
}

impl Default for LayeringConfig {
    fn default() -> Self {
        Self {
            meter_to_unit: 1e-9,
            scene_radius: 1e13,
            primary_near_clip: 0.1,
            band_max_depth: None,
            near_anchor: 0.5,
            band_size: 5000.0,
            non_solid_min_depth: 1e5,
            camera_slots: 8,
            restore_primary_after_layers: false,
        }
    }
}

impl LayeringConfig {
    /// Far extent of the band frustum in meters
    pub fn max_depth(&self) -> f64 {
        self.band_max_depth
            .unwrap_or(self.primary_near_clip / self.meter_to_unit)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("meter_to_unit", self.meter_to_unit)?;
        positive("scene_radius", self.scene_radius)?;
        positive("primary_near_clip", self.primary_near_clip)?;
        positive("near_anchor", self.near_anchor)?;
        positive("band_size", self.band_size)?;
        positive("non_solid_min_depth", self.non_solid_min_depth)?;
        if let Some(depth) = self.band_max_depth {
            positive("band_max_depth", depth)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(
            max_depth = config.max_depth(),
            slots = config.camera_slots,
            "Parsed layering config"
        );
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = ?path, "Loading layering config");

        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        info!(path = ?path, "Saving layering config");

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite positive number, got {value}"),
        })
    }
}
