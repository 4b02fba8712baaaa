use chatdiary_core::FilterCriteria;
use chrono::NaiveDate;

use crate::commands::common::{print_entries, settled, ClientSession};
use crate::error::CliError;

pub async fn run_search(
    keyword: Option<&str>,
    date: Option<NaiveDate>,
    as_json: bool,
    api_url: Option<String>,
) -> Result<(), CliError> {
    let criteria = build_criteria(keyword, date)?;

    let session = ClientSession::open(api_url)?;
    let fetch = session
        .view_model
        .load_diaries(&criteria, &session.cancel)
        .await;
    session.finish().await?;

    print_entries(&settled(fetch)?, as_json)
}

pub fn build_criteria(
    keyword: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<FilterCriteria, CliError> {
    let mut criteria = FilterCriteria::new();
    if let Some(keyword) = keyword {
        criteria = criteria.with_keyword(keyword);
    }
    if let Some(date) = date {
        criteria = criteria.with_date(date);
    }
    if criteria.is_empty() {
        return Err(CliError::MissingCriteria);
    }
    Ok(criteria)
}
