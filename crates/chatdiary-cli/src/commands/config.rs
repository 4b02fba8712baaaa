use chatdiary_core::config::{ClientConfig, ConfigFile};

use crate::cli::ConfigCommands;
use crate::config_file::{load_config_file, resolve_client_config, resolve_config_path};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, api_url: Option<String>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => run_config_show(api_url),
        ConfigCommands::Init {
            api_base_url,
            timeout_secs,
        } => run_config_init(&api_base_url, timeout_secs),
    }
}

fn run_config_show(api_url: Option<String>) -> Result<(), CliError> {
    let path = resolve_config_path()?;
    println!("Config file: {}", path.display());

    match resolve_client_config(api_url) {
        Ok(config) => {
            println!("API base URL: {}", config.api_base_url);
            println!("HTTP timeout: {}s", config.request_timeout.as_secs());
        }
        Err(error) => println!("Not configured: {error}"),
    }
    Ok(())
}

fn run_config_init(api_base_url: &str, timeout_secs: Option<u64>) -> Result<(), CliError> {
    let config = build_config_file(load_config_file()?, api_base_url, timeout_secs)?;
    let path = resolve_config_path()?;
    config.save_to_path(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Merge new values into an existing config file after validating them.
pub fn build_config_file(
    existing: ConfigFile,
    api_base_url: &str,
    timeout_secs: Option<u64>,
) -> Result<ConfigFile, CliError> {
    let validated = ClientConfig::new(api_base_url)?;
    if timeout_secs == Some(0) {
        return Err(CliError::Config(
            "--timeout-secs must be positive".to_string(),
        ));
    }

    Ok(ConfigFile {
        api_base_url: Some(validated.api_base_url),
        http_timeout_secs: timeout_secs.or(existing.http_timeout_secs),
        ..existing
    })
}
