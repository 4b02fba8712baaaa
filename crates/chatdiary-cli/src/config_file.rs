//! Location of the CLI config file.

use std::env;
use std::path::PathBuf;

use chatdiary_core::config::{ClientConfig, ConfigFile};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";
const ENV_CONFIG_PATH: &str = "CHATDIARY_CONFIG";

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("chatdiary").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("failed to resolve config directory".to_string()))
}

pub fn resolve_config_path() -> Result<PathBuf, CliError> {
    match env::var_os(ENV_CONFIG_PATH) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => default_config_path(),
    }
}

pub fn load_config_file() -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load_from_path(&resolve_config_path()?)?)
}

/// Resolve client settings: `--api-url`, then environment, then config file.
pub fn resolve_client_config(api_url: Option<String>) -> Result<ClientConfig, CliError> {
    let file = load_config_file()?;
    Ok(ClientConfig::resolve(
        api_url,
        |key| env::var(key).ok(),
        &file,
    )?)
}
