use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::EngineConfig;

/// Error type for reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Parse configuration from TOML text
pub fn read_config_str(text: &str) -> Result<EngineConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Load configuration from `path`. A missing file yields the defaults.
/// A relative recovery log path is resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(EngineConfig::default()),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let mut config = read_config_str(&text)?;
    if let Some(log) = &config.recovery.log
        && log.is_relative()
        && let Some(dir) = path.parent()
    {
        let resolved = dir.join(log);
        config.recovery.log = Some(resolved);
    }
    Ok(config)
}
