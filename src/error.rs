//! Error types for CalPal
//!
//! Simulation code never fails: degenerate states (zero distances, empty target
//! sets, dangling handles) are resolved inside the update pass. Errors only come
//! from startup work (reading config), from building bone geometry, and from the
//! platform layer, which reports plain `String`s the way SDL2 does.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`crate::config::SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised while constructing a [`crate::skeleton::Bone`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoneError {
    #[error("the bone data provided was not enough to calculate the bone")]
    InsufficientBoneData,
}

/// Umbrella error for everything that can stop the game from starting.
#[derive(Debug, Error)]
pub enum CalPalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("platform error: {0}")]
    Platform(String),
}

impl From<CalPalError> for String {
    fn from(error: CalPalError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message_names_field() {
        let error = ConfigError::Invalid {
            field: "creature.max_speed",
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid config value `creature.max_speed`: must be positive"
        );
    }

    #[test]
    fn test_umbrella_error_converts_to_string() {
        let error: CalPalError = ConfigError::Invalid {
            field: "window.target_fps",
            reason: "must be positive".to_string(),
        }
        .into();
        let message: String = error.into();
        assert!(message.contains("window.target_fps"));

        let message: String = CalPalError::Platform("no display".to_string()).into();
        assert_eq!(message, "platform error: no display");
    }
}
