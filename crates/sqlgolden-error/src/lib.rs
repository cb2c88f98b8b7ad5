//! Error types shared by the sqlgolden harness and tooling.
//!
//! The normalization core never fails; only reference loading, persistence and
//! the final assertion surface errors, and they all funnel through
//! [`GoldenError`].

use std::path::PathBuf;

/// Environment variable that switches golden assertions into update mode.
pub const UPDATE_ENV_VAR: &str = "SQLGOLDEN_UPDATE_GOLDEN";

/// Errors surfaced by golden file handling.
#[derive(Debug, thiserror::Error)]
pub enum GoldenError {
    /// The golden reference does not exist and update mode is off.
    /// `remediation` tells the user how to create it.
    #[error("{remediation}")]
    MissingReference { path: PathBuf, remediation: String },

    /// The serialized recording differs from the golden reference.
    #[error("golden mismatch for '{}'\n{diagnostics}", path.display())]
    Mismatch { path: PathBuf, diagnostics: String },

    /// Reading or writing a golden file failed.
    #[error("golden file I/O failed for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("invalid golden configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl GoldenError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the reference has to be recorded first.
    #[must_use]
    pub const fn is_missing_reference(&self) -> bool {
        matches!(self, Self::MissingReference { .. })
    }
}

/// Result alias used across the harness crates.
pub type Result<T> = std::result::Result<T, GoldenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_displays_remediation() {
        let err = GoldenError::MissingReference {
            path: PathBuf::from("testdata/users.golden.sql"),
            remediation: format!("rerun with {UPDATE_ENV_VAR}=1"),
        };
        assert_eq!(err.to_string(), "rerun with SQLGOLDEN_UPDATE_GOLDEN=1");
        assert!(err.is_missing_reference());
    }

    #[test]
    fn io_error_keeps_source() {
        let err = GoldenError::io(
            "a/b.sql",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_missing_reference());
        assert!(err.to_string().contains("a/b.sql"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
