use chatdiary_core::EntryKind;

use crate::commands::common::{resolve_entry_content, ClientSession};
use crate::error::CliError;

pub async fn run_add(
    content_parts: &[String],
    position: &str,
    api_url: Option<String>,
) -> Result<(), CliError> {
    let content = resolve_entry_content(content_parts)?;

    let session = ClientSession::open(api_url)?;
    let published = session
        .view_model
        .send_entry(&content, position, EntryKind::Text, &session.cancel)
        .await;
    let report = session.finish().await?;

    if published != Some(true) {
        return Err(CliError::Request("failed to queue diary entry".to_string()));
    }
    if report.failed > 0 {
        return Err(CliError::Request(
            "diary service rejected the entry".to_string(),
        ));
    }

    println!("Saved diary entry");
    Ok(())
}
