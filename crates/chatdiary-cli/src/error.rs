use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] chatdiary_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("No diary content provided")]
    EmptyContent,
    #[error("Search needs --keyword and/or --date")]
    MissingCriteria,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Request failed: {0}")]
    Request(String),
}
