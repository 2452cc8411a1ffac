use crate::error::{DepstrapError, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub fn config_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("io", "depstrap", "depstrap").ok_or_else(|| {
        DepstrapError::Other("Could not determine config directory".to_string())
    })?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("settings.yaml"))
}
