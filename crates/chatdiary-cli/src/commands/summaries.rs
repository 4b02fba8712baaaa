use crate::commands::common::{print_summaries, settled, ClientSession};
use crate::error::CliError;

pub async fn run_summaries(
    count: i64,
    as_json: bool,
    api_url: Option<String>,
) -> Result<(), CliError> {
    if count <= 0 {
        return Err(CliError::Config("--count must be positive".to_string()));
    }

    let session = ClientSession::open(api_url)?;
    let fetch = session
        .view_model
        .load_generated_summaries(count, &session.cancel)
        .await;
    session.finish().await?;

    print_summaries(&settled(fetch)?, as_json)
}
