//! Viewer settings with an optional JSON file override.
//!
//! Pass a path as the first CLI argument to load saved settings; anything
//! missing or unreadable falls back to the defaults below.

use cloth::constants::{DEFAULT_RESOLUTION, GRAVITY, RESET_INTERVAL};
use cloth::ClothParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Points per sheet side.
    pub resolution: usize,
    /// Use the extended bending stencil instead of the structural one.
    pub bending: bool,
    /// Simulated seconds between automatic reseeds.
    pub reset_interval: f32,
    /// Gravity vector [x, y, z].
    pub gravity: [f32; 3],
    /// Starting values for the five tunables.
    pub params: ClothParams,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            bending: false,
            reset_interval: RESET_INTERVAL,
            gravity: GRAVITY.to_array(),
            params: ClothParams::default(),
        }
    }
}

impl ViewerSettings {
    /// Load settings from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        Ok(settings)
    }

    /// Save settings to a JSON file.
    pub fn save_json(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
