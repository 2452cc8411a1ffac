//! Settings Module
//!
//! Optional settings file read once at startup, read-only afterwards.
//! Missing file means defaults; a malformed file is a configuration error.

use crate::error::{DepstrapError, Result};
use crate::utils::paths;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Accept every confirmation prompt without asking.
    pub assume_yes: bool,
    pub color: ColorMode,
    /// Binary used for the native package manager.
    pub dnf_command: String,
    /// Binary used for the Python package manager.
    pub pip_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assume_yes: false,
            color: ColorMode::Auto,
            dnf_command: "dnf".to_string(),
            pip_command: "pip".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the platform config directory, or defaults when
    /// no file exists.
    pub fn load() -> Result<Self> {
        let settings_file = paths::settings_file()?;
        if !settings_file.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&settings_file)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DepstrapError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_yml::from_str(&content).map_err(|e| DepstrapError::ParseError {
            file: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(!settings.assume_yes);
        assert_eq!(settings.color, ColorMode::Auto);
        assert_eq!(settings.dnf_command, "dnf");
        assert_eq!(settings.pip_command, "pip");
    }

    #[test]
    fn parse_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "assume_yes: true\ncolor: never\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert!(settings.assume_yes);
        assert_eq!(settings.color, ColorMode::Never);
        // Unspecified keys keep their defaults
        assert_eq!(settings.pip_command, "pip");
    }

    #[test]
    fn reject_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "no_such_setting: 1\n").unwrap();

        assert!(Settings::from_file(&path).is_err());
    }
}
