use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration directory could not be determined")]
    ConfigDirNotFound,

    #[error(
        "configuration file not found: {0}\n\
        set ROUTEGRID_PLANE_CONFIG / ROUTEGRID_IDENTITY_CONFIG to point at \
        the JSON files, or place them under ~/.config/routegrid/"
    )]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
