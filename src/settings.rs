//! Game settings and preferences
//!
//! Persisted to LocalStorage on wasm; defaults elsewhere.

use serde::{Deserialize, Serialize};

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Screen shake on explosions
    pub screen_shake: bool,
    /// Reduced motion (disables shake regardless of the toggle)
    pub reduced_motion: bool,
    /// Draw the lives/score/kills HUD
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            reduced_motion: false,
            show_hud: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "reef_rush_settings";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
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
    fn test_reduced_motion_overrides_shake() {
        let mut s = Settings::default();
        assert!(s.effective_screen_shake());
        s.reduced_motion = true;
        assert!(!s.effective_screen_shake());
        s.screen_shake = false;
        s.reduced_motion = false;
        assert!(!s.effective_screen_shake());
    }

    #[test]
    fn test_roundtrip_json() {
        let s = Settings {
            screen_shake: false,
            reduced_motion: true,
            show_hud: false,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(!back.screen_shake);
        assert!(back.reduced_motion);
        assert!(!back.show_hud);
    }
}
