//! Configuration loading
//!
//! Two JSON files: one for the control-plane endpoint, one for identity
//! credentials. Paths come from environment variables when set, falling
//! back to `~/.config/routegrid/`. Loaded once per operation invocation;
//! caching across invocations is deliberately left to the caller's
//! infrastructure.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const PLANE_CONFIG_ENV: &str = "ROUTEGRID_PLANE_CONFIG";
pub const IDENTITY_CONFIG_ENV: &str = "ROUTEGRID_IDENTITY_CONFIG";

/// Control-plane endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaneConfig {
    pub url: String,
}

/// Identity-service credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub tenant_name: String,
}

impl PlaneConfig {
    pub fn load() -> Result<Self> {
        read_json(&resolve_path(PLANE_CONFIG_ENV, "plane.json")?)
    }
}

impl IdentityConfig {
    pub fn load() -> Result<Self> {
        read_json(&resolve_path(IDENTITY_CONFIG_ENV, "identity.json")?)
    }
}

/// Environment override first, then `~/.config/routegrid/<file>`.
fn resolve_path(env_var: &str, file_name: &str) -> Result<PathBuf> {
    if let Ok(path) = std::env::var(env_var) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(path));
    }

    let path = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("routegrid")
        .join(file_name);
    if path.exists() {
        return Ok(path);
    }
    Err(ConfigError::FileNotFound(path))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn plane_config_from_env_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plane.json");
        fs::write(&path, r#"{"url": "http://sdn.example:9696"}"#).unwrap();

        unsafe {
            std::env::set_var(PLANE_CONFIG_ENV, path.to_str().unwrap());
        }
        let config = PlaneConfig::load().unwrap();
        assert_eq!(config.url, "http://sdn.example:9696");
        unsafe {
            std::env::remove_var(PLANE_CONFIG_ENV);
        }
    }

    #[test]
    #[serial]
    fn identity_config_from_env_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("identity.json");
        fs::write(
            &path,
            r#"{
                "auth_url": "http://keystone.example:5000/v2.0",
                "username": "ops",
                "password": "secret",
                "tenant_name": "infra"
            }"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var(IDENTITY_CONFIG_ENV, path.to_str().unwrap());
        }
        let config = IdentityConfig::load().unwrap();
        assert_eq!(config.username, "ops");
        assert_eq!(config.tenant_name, "infra");
        unsafe {
            std::env::remove_var(IDENTITY_CONFIG_ENV);
        }
    }

    #[test]
    #[serial]
    fn missing_env_path_is_an_error() {
        unsafe {
            std::env::set_var(PLANE_CONFIG_ENV, "/nonexistent/plane.json");
        }
        let err = PlaneConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
        unsafe {
            std::env::remove_var(PLANE_CONFIG_ENV);
        }
    }

    #[test]
    #[serial]
    fn malformed_json_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plane.json");
        fs::write(&path, "not json").unwrap();

        unsafe {
            std::env::set_var(PLANE_CONFIG_ENV, path.to_str().unwrap());
        }
        let err = PlaneConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        unsafe {
            std::env::remove_var(PLANE_CONFIG_ENV);
        }
    }
}
