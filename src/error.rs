//! Error types for the simulation and its configuration.
//!
//! Entity constructors validate their inputs and return [`SimError`] instead of
//! coercing bad values. Configuration loading returns [`SettingsError`].

use std::fmt;

/// Invalid input at entity construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Radius is not finite or not strictly positive.
    InvalidRadius {
        /// The rejected radius.
        radius: f32,
    },

    /// A position or velocity component is NaN or infinite.
    NonFinite {
        /// Which vector was rejected ("position", "velocity").
        what: &'static str,
    },

    /// Asteroid size kinds start at 1.
    InvalidKind {
        /// The rejected kind.
        kind: u32,
    },

    /// A game was started with settings that fail validation.
    InvalidSetting {
        /// Name of the setting.
        field: &'static str,
        /// The rejected value, widened for display.
        value: f64,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRadius { radius } => {
                write!(f, "radius must be finite and > 0, got {radius}")
            }
            SimError::NonFinite { what } => write!(f, "{what} must be finite"),
            SimError::InvalidKind { kind } => write!(f, "asteroid kind must be >= 1, got {kind}"),
            SimError::InvalidSetting { field, value } => {
                write!(f, "setting `{field}` must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Failure to load or validate [`crate::Settings`].
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io(std::io::Error),

    /// The settings file is not valid JSON for [`crate::Settings`].
    Parse(serde_json::Error),

    /// A numeric setting is outside its allowed range.
    OutOfRange {
        /// Name of the setting.
        field: &'static str,
        /// The rejected value, widened for display.
        value: f64,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "could not read settings: {err}"),
            SettingsError::Parse(err) => write!(f, "could not parse settings: {err}"),
            SettingsError::OutOfRange { field, value } => {
                write!(f, "setting `{field}` must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Parse(err) => Some(err),
            SettingsError::OutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}
