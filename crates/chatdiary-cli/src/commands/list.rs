use chatdiary_core::FilterCriteria;

use crate::commands::common::{print_entries, settled, ClientSession};
use crate::error::CliError;

pub async fn run_list(as_json: bool, api_url: Option<String>) -> Result<(), CliError> {
    let session = ClientSession::open(api_url)?;
    let fetch = session
        .view_model
        .load_diaries(&FilterCriteria::new(), &session.cancel)
        .await;
    session.finish().await?;

    print_entries(&settled(fetch)?, as_json)
}
