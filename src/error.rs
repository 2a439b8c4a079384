//! Crate error type
//!
//! Gameplay never fails; only settings I/O and validation can.

use std::fmt;

#[derive(Debug)]
pub enum ArcadeError {
    /// Settings JSON could not be parsed or produced
    Parse(serde_json::Error),
    /// Settings file could not be read or written
    Io(std::io::Error),
    /// A setting holds a value the engines cannot run with
    InvalidSetting { field: &'static str, reason: String },
}

impl ArcadeError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ArcadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "settings parse error: {err}"),
            Self::Io(err) => write!(f, "settings io error: {err}"),
            Self::InvalidSetting { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ArcadeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidSetting { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ArcadeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for ArcadeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
