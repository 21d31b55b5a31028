//! Runtime settings
//!
//! Persisted as JSON next to the binary (or wherever the caller points).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_MS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spawner RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
    /// Upper bound on a single frame delta (ms)
    pub max_frame_ms: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start muted
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_frame_ms: MAX_FRAME_MS,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Clamp a raw frame delta into `[0, max_frame_ms]`
    ///
    /// Negative or non-finite deltas become 0.
    pub fn clamp_frame_ms(&self, elapsed_ms: f64) -> f32 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0.0;
        }
        (elapsed_ms as f32).min(self.max_frame_ms.max(0.0))
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
