//! ChatDiary CLI - write and search your diary from the terminal
//!
//! Talks to the diary service configured via `chatdiary config init`,
//! `CHATDIARY_API_BASE_URL` or `--api-url`.

mod cli;
mod commands;
mod config_file;
mod error;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::config::run_config;
use crate::commands::list::run_list;
use crate::commands::search::run_search;
use crate::commands::summaries::run_summaries;
use crate::commands::upload::run_upload;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chatdiary=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api_url = cli.api_url;

    match cli.command {
        Commands::List { json } => run_list(json, api_url).await?,
        Commands::Search {
            keyword,
            date,
            json,
        } => run_search(keyword.as_deref(), date, json, api_url).await?,
        Commands::Add { content, position } => run_add(&content, &position, api_url).await?,
        Commands::Upload {
            images,
            position,
            content,
        } => run_upload(images, &position, &content, api_url).await?,
        Commands::Summaries { count, json } => run_summaries(count, json, api_url).await?,
        Commands::Config { command } => run_config(command, api_url)?,
    }

    Ok(())
}
