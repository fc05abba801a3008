use serde::{Deserialize, Serialize};

pub const CONFY_APP_NAME: &str = "folio-rs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub theme: Theme,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { theme: Theme::Light }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "display").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "display", self);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugSettings {
    /// Development-only instrument: W/A/S/D/Q/E nudge the camera and the
    /// pose is written to the debug log. Off by default.
    pub debug_camera: bool,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            debug_camera: false,
        }
    }
}

impl DebugSettings {
    // Flipped by editing the config file, so load-only.
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "debug").unwrap_or_default()
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub display: DisplaySettings,
    pub debug: DebugSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            display: DisplaySettings::load(),
            debug: DebugSettings::load(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_light_and_quiet() {
        assert_eq!(DisplaySettings::default().theme, Theme::Light);
        assert!(!DebugSettings::default().debug_camera);
    }

    #[test]
    fn settings_round_trip_through_serde() {
        let display = DisplaySettings { theme: Theme::Dark };
        let json = serde_json::to_string(&display).unwrap();
        let back: DisplaySettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.theme, Theme::Dark);
    }
}
