//! Game settings
//!
//! Loaded once at startup from an optional JSON file; every value is fixed for
//! the rest of the session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Runtime configuration.
///
/// Missing keys in a settings file fall back to the defaults in
/// [`crate::consts`], so a file can override just the values it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Outline width for every shape
    pub line_width: f32,
    /// Target frame rate (also the state snapshot cadence)
    pub fps: u32,

    // === Player ===
    pub player_radius: f32,
    /// Degrees per second
    pub player_turn_speed: f32,
    pub player_speed: f32,
    pub player_shoot_speed: f32,
    /// Seconds between shots
    pub player_shoot_cooldown: f32,
    pub shot_radius: f32,

    // === Asteroids ===
    pub asteroid_min_radius: f32,
    pub asteroid_kinds: u32,
    /// Seconds between spawns
    pub asteroid_spawn_rate: f32,

    // === Simulation ===
    /// RNG seed (None = seed from the wall clock)
    pub seed: Option<u64>,
    /// Destroy shots once they can no longer reach anything
    pub despawn_offscreen_shots: bool,

    // === Telemetry ===
    pub telemetry: bool,
    pub state_log_path: PathBuf,
    pub event_log_path: PathBuf,
    /// Snapshots stop after this many seconds of frames
    pub log_max_seconds: u32,
    /// Entities sampled per collection in a snapshot
    pub log_sample_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            line_width: LINE_WIDTH,
            fps: FPS,

            player_radius: PLAYER_RADIUS,
            player_turn_speed: PLAYER_TURN_SPEED,
            player_speed: PLAYER_SPEED,
            player_shoot_speed: PLAYER_SHOOT_SPEED,
            player_shoot_cooldown: PLAYER_SHOOT_COOLDOWN,
            shot_radius: SHOT_RADIUS,

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_kinds: ASTEROID_KINDS,
            asteroid_spawn_rate: ASTEROID_SPAWN_RATE,

            seed: None,
            despawn_offscreen_shots: true,

            telemetry: true,
            state_log_path: PathBuf::from("game_state.jsonl"),
            event_log_path: PathBuf::from("game_events.jsonl"),
            log_max_seconds: LOG_MAX_SECONDS,
            log_sample_limit: LOG_SAMPLE_LIMIT,
        }
    }
}

impl Settings {
    /// Largest asteroid radius (kind == asteroid_kinds)
    pub fn asteroid_max_radius(&self) -> f32 {
        self.asteroid_min_radius * self.asteroid_kinds as f32
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a JSON settings file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use (validated) defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                let settings = Self::default();
                settings.validate()?;
                Ok(settings)
            }
        }
    }

    /// Reject non-positive values. Nothing is coerced.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let floats = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("line_width", self.line_width),
            ("player_radius", self.player_radius),
            ("player_turn_speed", self.player_turn_speed),
            ("player_speed", self.player_speed),
            ("player_shoot_speed", self.player_shoot_speed),
            ("player_shoot_cooldown", self.player_shoot_cooldown),
            ("shot_radius", self.shot_radius),
            ("asteroid_min_radius", self.asteroid_min_radius),
            ("asteroid_spawn_rate", self.asteroid_spawn_rate),
        ];
        for (field, value) in floats {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        let counts = [
            ("fps", self.fps as usize),
            ("asteroid_kinds", self.asteroid_kinds as usize),
            ("log_max_seconds", self.log_max_seconds as usize),
            ("log_sample_limit", self.log_sample_limit),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(SettingsError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        Ok(())
    }

    /// Center of the screen (player start)
    pub fn screen_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.asteroid_max_radius(), 60.0);
        assert_eq!(settings.screen_center(), glam::Vec2::new(640.0, 360.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "asteroid_kinds": 4, "seed": 7 }"#).unwrap();
        assert_eq!(settings.asteroid_kinds, 4);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.player_radius, PLAYER_RADIUS);
        assert_eq!(settings.asteroid_max_radius(), 80.0);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let err = Settings::from_json(r#"{ "player_radius": -5.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "player_radius",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "asteroid_kinds": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "asteroid_kinds",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
