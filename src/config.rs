//! Game balance configuration
//!
//! The original ships two build variants (handheld and TV) differing only in
//! jump force and obstacle density. Here that is a single configuration
//! record selected at startup.

use serde::{Deserialize, Serialize};

/// Platform profile the session runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlatformProfile {
    /// Touch devices: base jump force, density ceiling 10
    #[default]
    Mobile,
    /// Living-room build: tripled jump force, density ceiling 30
    Tv,
}

impl PlatformProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformProfile::Mobile => "Mobile",
            PlatformProfile::Tv => "Tv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mobile" => Some(PlatformProfile::Mobile),
            "tv" => Some(PlatformProfile::Tv),
            _ => None,
        }
    }
}

/// Game balance knobs, resolved from a platform profile at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Profile this config was resolved from
    pub profile: PlatformProfile,
    /// Horizontal speed applied on a tap (units/s)
    pub jump_force: f32,
    /// Constant upward speed the movement loop re-applies every tick (units/s)
    pub rise_force: f32,
    /// Maximum simultaneously active obstacles before the spawner stalls
    pub density_ceiling: usize,
}

/// Base horizontal jump speed before any profile multiplier
const BASE_JUMP_FORCE: f32 = 12.0;
/// Constant upward drift speed
const BASE_RISE_FORCE: f32 = 5.0;

impl Default for Config {
    fn default() -> Self {
        Self::from_profile(PlatformProfile::Mobile)
    }
}

impl Config {
    /// Resolve balance values for a platform profile
    pub fn from_profile(profile: PlatformProfile) -> Self {
        match profile {
            PlatformProfile::Mobile => Self {
                profile,
                jump_force: BASE_JUMP_FORCE,
                rise_force: BASE_RISE_FORCE,
                density_ceiling: 10,
            },
            // TV input is coarser, so jumps are faster and the field denser
            PlatformProfile::Tv => Self {
                profile,
                jump_force: BASE_JUMP_FORCE * 3.0,
                rise_force: BASE_RISE_FORCE,
                density_ceiling: 30,
            },
        }
    }

    /// Load a config from a JSON file, falling back to profile defaults
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(cfg) => {
                    log::info!("Loaded config from {}", path.display());
                    cfg
                }
                Err(e) => {
                    log::warn!("Bad config at {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save the config as JSON (best effort)
    pub fn save(&self, path: &std::path::Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save config to {}: {e}", path.display());
                } else {
                    log::info!("Config saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize config: {e}"),
        }
    }
}
