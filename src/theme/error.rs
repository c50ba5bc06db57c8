//! Theme Error Types
//!
//! Failures that can occur while loading a palette or applying it to foot.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for theme operations
pub type ThemeResult<T> = Result<T, ThemeError>;

/// Errors raised by palette loading and theme application
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Palette file could not be read or decoded
    #[error("Failed to load palette from {}: {message}", path.display())]
    PaletteParse { path: PathBuf, message: String },

    /// A slot read by the foot colour table is absent or empty
    #[error("Palette is missing required slot '{slot}'")]
    MissingSlot { slot: &'static str },

    /// A slot value that cannot be written as a single ini line
    #[error("Palette slot '{slot}' has an invalid value: {value:?}")]
    InvalidValue { slot: &'static str, value: String },

    /// Config directory creation, write or rename failed
    #[error("Failed to write foot config {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reload signal could not be delivered
    #[error("Failed to signal '{process}': {message}")]
    SignalDelivery { process: String, message: String },
}

impl ThemeError {
    /// Create a palette parse error
    pub fn palette_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::PaletteParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config write error
    pub fn config_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a signal delivery error
    pub fn signal_delivery(process: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SignalDelivery {
            process: process.into(),
            message: message.into(),
        }
    }
}
