use std::path::PathBuf;

use chatdiary_core::viewmodel::PRELOAD_SUMMARY_COUNT;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chatdiary")]
#[command(about = "Write, search and summarize your diary from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Diary service base URL (overrides config file and environment)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every diary entry, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search diary entries by keyword and/or day
    Search {
        /// Case-insensitive text to look for in entry content
        #[arg(short, long)]
        keyword: Option<String>,
        /// Only entries written on this day
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a new diary entry
    #[command(alias = "new")]
    Add {
        /// Entry content (read from stdin when omitted)
        content: Vec<String>,
        /// Location label stored with the entry
        #[arg(short, long, default_value = "")]
        position: String,
    },
    /// Upload images as one diary entry
    Upload {
        /// Image files
        #[arg(required = true, value_name = "PATH")]
        images: Vec<PathBuf>,
        /// Location label stored with the images
        #[arg(short, long, default_value = "")]
        position: String,
        /// Caption stored with the images
        #[arg(short, long, default_value = "")]
        content: String,
    },
    /// Show generated day summaries, newest first
    Summaries {
        /// Maximum number of summaries to request
        #[arg(short = 'n', long, default_value_t = PRELOAD_SUMMARY_COUNT)]
        count: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or write the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,
    /// Write the config file
    Init {
        /// Diary service base URL
        #[arg(long, value_name = "URL")]
        api_base_url: String,
        /// HTTP request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
    },
}
