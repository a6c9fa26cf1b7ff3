//! Editor settings persisted in localStorage as JSON.

use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

pub const SETTINGS_KEY: &str = "photo_edit_settings";
pub const DEFAULT_ENDPOINT: &str = "/api/process";

/// Thresholds used by the gesture recognizer. Distances are in display units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub tap_window_ms: f64,
    pub double_tap_slop: f64,
    pub swipe_min_distance: f64,
    /// Units per millisecond.
    pub swipe_min_velocity: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_window_ms: 300.0,
            double_tap_slop: 50.0,
            swipe_min_distance: 50.0,
            swipe_min_velocity: 0.3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// URL of the image-processing collaborator.
    pub endpoint: String,
    pub gesture: GestureConfig,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), gesture: GestureConfig::default() }
    }
}

impl EditorSettings {
    /// Parses settings, falling back to defaults on malformed input.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<EditorSettings>(raw) {
            Ok(mut s) => {
                if s.endpoint.trim().is_empty() {
                    s.endpoint = DEFAULT_ENDPOINT.to_string();
                }
                s
            }
            Err(e) => {
                log::warn!("ignoring malformed editor settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        match LocalStorage::raw().get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw),
            _ => Self::default(),
        }
    }

    pub fn save(&self) {
        if let Err(e) = LocalStorage::set(SETTINGS_KEY, self) {
            log::warn!("could not persist editor settings: {}", e);
        }
    }
}
