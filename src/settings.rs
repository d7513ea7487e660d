//! Persisted game configuration
//!
//! Tuning overrides for both games, stored as JSON in LocalStorage. Missing
//! fields fall back to the defaults in [`crate::tuning`].

use serde::{Deserialize, Serialize};

use crate::tuning::{DodgeTuning, PlatformerTuning};

/// Game settings/preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dodge: DodgeTuning,
    pub platformer: PlatformerTuning,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_arcade_settings";

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse `json`, logging and falling back to defaults if it is unreadable
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::web::storage_get(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json_or_default(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = self.to_json() {
            crate::platform::web::storage_set(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_merge_with_defaults() {
        let settings =
            Settings::from_json(r#"{"platformer": {"level_count": 3, "max_jump_height": 40.0}}"#)
                .unwrap();
        assert_eq!(settings.platformer.level_count, 3);
        assert_eq!(settings.platformer.max_jump_height, 40.0);
        assert_eq!(settings.platformer.tick_interval_ms, 16);
        assert_eq!(settings.dodge.tick_interval_ms, 15);
    }

    #[test]
    fn test_unreadable_json_falls_back() {
        let settings = Settings::from_json_or_default("{not json");
        assert_eq!(settings.dodge.enemy_speed, 4);
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.dodge.coupled_vertical_bounce = false;
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert!(!back.dodge.coupled_vertical_bounce);
    }
}
