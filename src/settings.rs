//! Game settings and preferences
//!
//! Stored as JSON. Balance constants are not configurable; these are
//! presentation and audio preferences plus an optional fixed seed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "HIGHWAY_SETTINGS";
/// Settings file used when the variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 300,
            QualityPreset::High => 512,
        }
    }

    /// Trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.3,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Bullet trails
    pub trails: bool,
    /// Particle effects (hits, kills, pickups)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Fixed run seed; a fresh one is picked when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            trails: true,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Number of trail points to draw for a trail of `len`
    pub fn trail_points(&self, len: usize) -> usize {
        if !self.trails {
            return 0;
        }
        (len as f32 * self.quality.trail_quality()).round() as usize
    }

    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("highway-shooter-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_particle_cap_follows_preset() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.max_particles(), 100);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_trail_points() {
        let mut settings = Settings::from_preset(QualityPreset::High);
        assert_eq!(settings.trail_points(10), 10);
        settings.quality = QualityPreset::Low;
        assert_eq!(settings.trail_points(10), 3);
        settings.trails = false;
        assert_eq!(settings.trail_points(10), 0);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"muted": true, "seed": 42}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.particles);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip.json");
        let settings = Settings {
            quality: QualityPreset::High,
            seed: Some(7),
            ..Settings::default()
        };
        settings.save_to_path(&path).unwrap();
        assert_eq!(Settings::load_from_path(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let missing = temp_path("missing.json");
        assert!(matches!(
            Settings::load_from_path(&missing),
            Err(SettingsError::Io(_))
        ));
        assert_eq!(Settings::load_or_default(&missing), Settings::default());

        let broken = temp_path("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from_path(&broken),
            Err(SettingsError::Parse(_))
        ));
        assert_eq!(Settings::load_or_default(&broken), Settings::default());
        let _ = fs::remove_file(&broken);
    }
}
