//! Game settings and preferences
//!
//! Persisted separately from the leaderboard in local storage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Explosion bursts when enemies die
    pub explosions: bool,
    /// Draw the crosshair at the pointer
    pub crosshair: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Footstep sounds while moving
    pub footsteps: bool,
    /// Pause when the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            explosions: true,
            crosshair: true,

            show_fps: false,

            master_volume: 0.5,
            sfx_volume: 1.0,
            footsteps: true,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// On/off options exposed in the pause menu, by name
    pub const TOGGLES: [&'static str; 5] = [
        "explosions",
        "crosshair",
        "show_fps",
        "footsteps",
        "pause_on_blur",
    ];

    fn toggle_mut(&mut self, name: &str) -> Option<&mut bool> {
        match name {
            "explosions" => Some(&mut self.explosions),
            "crosshair" => Some(&mut self.crosshair),
            "show_fps" => Some(&mut self.show_fps),
            "footsteps" => Some(&mut self.footsteps),
            "pause_on_blur" => Some(&mut self.pause_on_blur),
            _ => None,
        }
    }

    /// Current value of a named toggle
    pub fn toggle(&self, name: &str) -> Option<bool> {
        match name {
            "explosions" => Some(self.explosions),
            "crosshair" => Some(self.crosshair),
            "show_fps" => Some(self.show_fps),
            "footsteps" => Some(self.footsteps),
            "pause_on_blur" => Some(self.pause_on_blur),
            _ => None,
        }
    }

    /// Set a named toggle; returns false for unknown names
    pub fn set_toggle(&mut self, name: &str, on: bool) -> bool {
        match self.toggle_mut(name) {
            Some(value) => {
                *value = on;
                true
            }
            None => {
                log::warn!("Unknown setting: {}", name);
                false
            }
        }
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Storage key
    const STORAGE_KEY: &'static str = "last_seconds_settings";

    /// Load settings from storage, falling back to defaults
    pub fn load() -> Self {
        if let Some(json) = storage::get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if storage::set_item(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_volume(), 0.5);
        settings.sfx_volume = 0.0;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_named_toggles() {
        let mut settings = Settings::default();
        for name in Settings::TOGGLES {
            assert!(settings.set_toggle(name, false));
            assert_eq!(settings.toggle(name), Some(false));
        }
        assert!(!settings.crosshair && !settings.pause_on_blur);
        assert!(!settings.set_toggle("fullscreen", true));
        assert_eq!(settings.toggle("fullscreen"), None);
    }

    #[test]
    fn test_master_volume_clamped() {
        let mut settings = Settings::default();
        settings.set_master_volume(1.7);
        assert_eq!(settings.master_volume, 1.0);
        settings.set_master_volume(f32::NAN);
        assert_eq!(settings.master_volume, 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "show_fps": true }"#).unwrap();
        assert!(settings.show_fps);
        assert!(settings.crosshair);
    }

    #[test]
    fn test_save_and_load() {
        let settings = Settings {
            master_volume: 0.2,
            ..Default::default()
        };
        settings.save();
        assert_eq!(Settings::load(), settings);
    }
}
