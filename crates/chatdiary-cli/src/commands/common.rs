use std::io::{self, IsTerminal, Read};
use std::sync::Arc;

use chatdiary_core::producer::{
    diary_queue, ForwardReport, QueueForwarder, QueueProducer, DEFAULT_QUEUE_CAPACITY,
};
use chatdiary_core::service::HttpDiaryService;
use chatdiary_core::{DiaryEntry, DiarySummary, DiaryViewModel, FailureKind, Fetch};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config_file::resolve_client_config;
use crate::error::CliError;

pub type CliViewModel = DiaryViewModel<HttpDiaryService, QueueProducer>;

/// View model wired to the HTTP service, with the queue forwarder running.
pub struct ClientSession {
    pub view_model: CliViewModel,
    pub cancel: CancellationToken,
    forwarder: JoinHandle<ForwardReport>,
}

impl ClientSession {
    pub fn open(api_url: Option<String>) -> Result<Self, CliError> {
        let config = resolve_client_config(api_url)?;
        tracing::debug!("Using diary service at {}", config.api_base_url);

        let service = Arc::new(HttpDiaryService::new(&config)?);
        let (producer, queue) = diary_queue(DEFAULT_QUEUE_CAPACITY);
        let forwarder = tokio::spawn(
            QueueForwarder::new(queue, Arc::clone(&service)).run(CancellationToken::new()),
        );

        Ok(Self {
            view_model: DiaryViewModel::from_shared(service, Arc::new(producer)),
            cancel: CancellationToken::new(),
            forwarder,
        })
    }

    /// Drop the view model (closing the queue) and wait for queued entries to be delivered.
    pub async fn finish(self) -> Result<ForwardReport, CliError> {
        let Self {
            view_model,
            forwarder,
            ..
        } = self;
        drop(view_model);
        Ok(forwarder.await?)
    }
}

#[derive(Debug, Serialize)]
pub struct EntryListItem {
    pub title: String,
    pub content: String,
    pub timestamp: String,
    pub position: String,
    #[serde(rename = "type")]
    pub kind: String,
}

pub fn entry_to_list_item(entry: &DiaryEntry) -> EntryListItem {
    EntryListItem {
        title: entry.title.clone(),
        content: entry.content.clone(),
        timestamp: entry.timestamp.clone(),
        position: entry.position.clone(),
        kind: entry.kind.to_string(),
    }
}

/// Unwrap a settled fetch, turning failures into a CLI error.
pub fn settled<T>(fetch: Option<Fetch<T>>) -> Result<T, CliError> {
    match fetch {
        Some(Fetch::Ready(value)) => Ok(value),
        Some(Fetch::Failed(kind)) => Err(CliError::Request(describe_failure(&kind))),
        Some(Fetch::Pending) | None => Err(CliError::Request("request was cancelled".to_string())),
    }
}

pub fn describe_failure(kind: &FailureKind) -> String {
    match kind {
        FailureKind::Network(message) | FailureKind::InvalidInput(message) => message.clone(),
        FailureKind::Parse { timestamp } => {
            format!("diary service returned an unparsable timestamp {timestamp:?}")
        }
        FailureKind::EmptyResult => "diary service returned no data".to_string(),
    }
}

pub fn print_entries(entries: &[DiaryEntry], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let items = entries
            .iter()
            .map(entry_to_list_item)
            .collect::<Vec<EntryListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if entries.is_empty() {
        println!("No diary entries.");
    } else {
        for line in format_entry_lines(entries) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn print_summaries(summaries: &[DiarySummary], as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(summaries)?);
    } else if summaries.is_empty() {
        println!("No generated summaries.");
    } else {
        for line in format_summary_lines(summaries) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_entry_lines(entries: &[DiaryEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let preview = entry_preview(entry, 40);
            let kind = entry.kind.as_str();
            if entry.position.is_empty() {
                format!("{}  {kind:<5}  {preview}", entry.timestamp)
            } else {
                format!(
                    "{}  {kind:<5}  {preview:<40}  @{}",
                    entry.timestamp, entry.position
                )
            }
        })
        .collect()
}

pub fn format_summary_lines(summaries: &[DiarySummary]) -> Vec<String> {
    summaries
        .iter()
        .map(|summary| {
            let payload = summary.as_value().to_string();
            match summary.date() {
                Some(date) => format!("{date}  {payload}"),
                None => payload,
            }
        })
        .collect()
}

pub fn entry_preview(entry: &DiaryEntry, max_chars: usize) -> String {
    let first_line = entry.content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn resolve_entry_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}
