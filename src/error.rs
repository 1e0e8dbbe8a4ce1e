/*
 * Error Module
 *
 * Error types for the particle field. The simulator itself has a single
 * failure mode (no usable drawing surface yet); everything else that can go
 * wrong happens while loading configuration.
 */

use std::path::PathBuf;

use thiserror::Error;

/// The drawing surface cannot be used (not mounted yet, or zero sized)
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SurfaceError {
    #[error("surface unavailable: {width}x{height}")]
    Unavailable { width: f32, height: f32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
