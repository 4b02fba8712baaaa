//! Client-side diary filtering and ordering.
//!
//! The diary service only offers a full list fetch; keyword and date search
//! happen here, after the fetch. Every result is ordered newest first.

use chrono::NaiveDate;

use crate::models::DiaryEntry;
use crate::Result;

/// Optional keyword and/or calendar-day constraint, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    keyword: Option<String>,
    date: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Criteria that match every entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to entries whose content contains `keyword`, ignoring case.
    ///
    /// The keyword is matched as given. A blank keyword clears the constraint.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = if keyword.trim().is_empty() {
            None
        } else {
            Some(keyword)
        };
        self
    }

    /// Restrict to entries written on `date`.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// True when no constraint is set.
    pub const fn is_empty(&self) -> bool {
        self.keyword.is_none() && self.date.is_none()
    }
}

/// Entries whose content contains `keyword` case-insensitively, in input order.
#[must_use]
pub fn filter_by_keyword(entries: &[DiaryEntry], keyword: &str) -> Vec<DiaryEntry> {
    let needle = keyword.chars().collect::<Vec<_>>();
    entries
        .iter()
        .filter(|entry| contains_ignore_case(&entry.content, &needle))
        .cloned()
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &[char]) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = haystack.chars().collect::<Vec<_>>();
    haystack.windows(needle.len()).any(|window| {
        window
            .iter()
            .zip(needle)
            .all(|(&left, &right)| chars_eq_ignore_case(left, right))
    })
}

/// Per-character case folding; whole-string lowercasing would change lengths
/// (`İ`) and apply the final-sigma rule.
fn chars_eq_ignore_case(left: char, right: char) -> bool {
    left == right
        || simple_uppercase(left) == simple_uppercase(right)
        || simple_lowercase(left) == simple_lowercase(right)
}

fn simple_uppercase(value: char) -> char {
    let mut upper = value.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => value,
    }
}

// `İ` is the only character whose lowercase expands; its simple mapping is the leading `i`.
fn simple_lowercase(value: char) -> char {
    value.to_lowercase().next().unwrap_or(value)
}

/// Entries whose timestamp falls on `date`, in input order.
///
/// Fails on the first timestamp that does not parse; no partial result is
/// returned.
pub fn filter_by_date(entries: &[DiaryEntry], date: NaiveDate) -> Result<Vec<DiaryEntry>> {
    let mut matching = Vec::new();
    for entry in entries {
        if entry.date()? == date {
            matching.push(entry.clone());
        }
    }
    Ok(matching)
}

/// Order entries newest first by raw timestamp string.
///
/// The sort is stable, so entries sharing a timestamp keep their input order.
pub fn sort_newest_first(entries: &mut [DiaryEntry]) {
    entries.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
}

/// Apply every constraint in `criteria`, then order newest first.
///
/// The keyword runs first; only entries that survive it have their timestamps
/// parsed for the date constraint.
pub fn apply_criteria(
    entries: Vec<DiaryEntry>,
    criteria: &FilterCriteria,
) -> Result<Vec<DiaryEntry>> {
    let mut entries = match criteria.keyword() {
        Some(keyword) => filter_by_keyword(&entries, keyword),
        None => entries,
    };
    if let Some(date) = criteria.date() {
        entries = filter_by_date(&entries, date)?;
    }
    sort_newest_first(&mut entries);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn entry(content: &str, timestamp: &str) -> DiaryEntry {
        DiaryEntry {
            title: String::new(),
            content: content.to_string(),
            timestamp: timestamp.to_string(),
            position: String::new(),
            kind: EntryKind::Text,
        }
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn contents(entries: &[DiaryEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.content.as_str()).collect()
    }

    fn fixture() -> Vec<DiaryEntry> {
        vec![
            entry("beach trip", "2024-01-01 10:00:00.000"),
            entry("work day", "2024-01-05 09:00:00.000"),
        ]
    }

    fn mixed_fixture() -> Vec<DiaryEntry> {
        vec![
            entry("Morning run by the beach", "2024-03-02 06:30:00.000"),
            entry("Quarterly review at work", "2024-03-01 17:45:10.250"),
            entry("BEACH volleyball", "2024-03-01 09:15:00.000"),
            entry("Read a book", "2024-02-28 22:00:00.000"),
            entry("beach cleanup", "2024-03-01 18:00:00.001"),
        ]
    }

    #[test]
    fn keyword_scenario_keeps_matching_entry() {
        let criteria = FilterCriteria::new().with_keyword("beach");
        let result = apply_criteria(fixture(), &criteria).unwrap();
        assert_eq!(contents(&result), vec!["beach trip"]);
    }

    #[test]
    fn date_scenario_keeps_matching_entry() {
        let criteria = FilterCriteria::new().with_date(day(2024, 1, 5));
        let result = apply_criteria(fixture(), &criteria).unwrap();
        assert_eq!(contents(&result), vec!["work day"]);
    }

    #[test]
    fn keyword_match_ignores_case_and_preserves_order() {
        let result = filter_by_keyword(&mixed_fixture(), "Beach");
        assert_eq!(
            contents(&result),
            vec!["Morning run by the beach", "BEACH volleyball", "beach cleanup"]
        );
    }

    #[test]
    fn keyword_match_handles_non_ascii() {
        let entries = vec![
            entry("今天去了海边", "2024-01-01 10:00:00.000"),
            entry("Ärger im Büro", "2024-01-02 10:00:00.000"),
        ];
        assert_eq!(
            contents(&filter_by_keyword(&entries, "海边")),
            vec!["今天去了海边"]
        );
        assert_eq!(
            contents(&filter_by_keyword(&entries, "ärger")),
            vec!["Ärger im Büro"]
        );
    }

    #[test]
    fn date_match_compares_calendar_days() {
        let result = filter_by_date(&mixed_fixture(), day(2024, 3, 1)).unwrap();
        assert_eq!(
            contents(&result),
            vec!["Quarterly review at work", "BEACH volleyball", "beach cleanup"]
        );
        assert!(filter_by_date(&mixed_fixture(), day(2023, 3, 1)).unwrap().is_empty());
    }

    #[test]
    fn combined_criteria_equal_intersection() {
        let entries = mixed_fixture();
        let by_keyword = filter_by_keyword(&entries, "beach");
        let by_date = filter_by_date(&entries, day(2024, 3, 1)).unwrap();
        let mut intersection = by_keyword
            .into_iter()
            .filter(|entry| by_date.contains(entry))
            .collect::<Vec<_>>();
        sort_newest_first(&mut intersection);

        let combined = apply_criteria(
            entries,
            &FilterCriteria::new().with_keyword("beach").with_date(day(2024, 3, 1)),
        )
        .unwrap();

        assert_eq!(combined, intersection);
        assert_eq!(contents(&combined), vec!["beach cleanup", "BEACH volleyball"]);
    }

    #[test]
    fn results_are_sorted_newest_first() {
        let result = apply_criteria(mixed_fixture(), &FilterCriteria::new()).unwrap();
        assert_eq!(
            result.iter().map(|entry| entry.timestamp.as_str()).collect::<Vec<_>>(),
            vec![
                "2024-03-02 06:30:00.000",
                "2024-03-01 18:00:00.001",
                "2024-03-01 17:45:10.250",
                "2024-03-01 09:15:00.000",
                "2024-02-28 22:00:00.000",
            ]
        );
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let mut entries = vec![
            entry("first", "2024-01-01 10:00:00.000"),
            entry("second", "2024-01-01 10:00:00.000"),
            entry("newer", "2024-01-02 10:00:00.000"),
        ];
        sort_newest_first(&mut entries);
        assert_eq!(contents(&entries), vec!["newer", "first", "second"]);
    }

    #[test]
    fn malformed_timestamp_fails_date_filter() {
        let mut entries = fixture();
        entries.push(entry("bad clock", "05/01/2024 09:00"));

        let criteria = FilterCriteria::new().with_date(day(2024, 1, 5));
        let error = apply_criteria(entries, &criteria).unwrap_err();
        assert!(matches!(
            error,
            Error::TimestampParse { timestamp } if timestamp == "05/01/2024 09:00"
        ));
    }

    #[test]
    fn malformed_timestamp_is_ignored_without_date_filter() {
        let mut entries = fixture();
        entries.push(entry("bad clock", "not a time"));

        let result = apply_criteria(entries, &FilterCriteria::new().with_keyword("clock")).unwrap();
        assert_eq!(contents(&result), vec!["bad clock"]);
    }

    #[test]
    fn keyword_runs_before_date_parsing() {
        let mut entries = fixture();
        entries.push(entry("bad clock", "not a time"));

        let criteria = FilterCriteria::new().with_keyword("work").with_date(day(2024, 1, 5));
        let result = apply_criteria(entries, &criteria).unwrap();
        assert_eq!(contents(&result), vec!["work day"]);
    }

    #[test]
    fn keyword_match_folds_single_characters() {
        let entries = vec![
            entry("Trip to İstanbul", "2024-01-01 10:00:00.000"),
            entry("ΟΔΥΣΣΕΥΣ reading", "2024-01-02 10:00:00.000"),
            entry("Straße fest", "2024-01-03 10:00:00.000"),
        ];
        assert_eq!(
            contents(&filter_by_keyword(&entries, "istanbul")),
            vec!["Trip to İstanbul"]
        );
        assert_eq!(
            contents(&filter_by_keyword(&entries, "σευσ")),
            vec!["ΟΔΥΣΣΕΥΣ reading"]
        );
        assert_eq!(
            contents(&filter_by_keyword(&entries, "οδυσσευς")),
            vec!["ΟΔΥΣΣΕΥΣ reading"]
        );
        assert!(filter_by_keyword(&entries, "strasse").is_empty());
    }

    #[test]
    fn keyword_whitespace_is_significant() {
        let entries = vec![
            entry("birthday", "2024-01-01 10:00:00.000"),
            entry("a day off", "2024-01-02 10:00:00.000"),
        ];
        let direct = filter_by_keyword(&entries, "day ");
        let criteria = FilterCriteria::new().with_keyword("day ");
        assert_eq!(criteria.keyword(), Some("day "));

        let piped = apply_criteria(entries, &criteria).unwrap();
        assert_eq!(contents(&direct), vec!["a day off"]);
        assert_eq!(piped, direct);
    }

    #[test]
    fn blank_keyword_is_ignored() {
        let criteria = FilterCriteria::new().with_keyword("   ");
        assert!(criteria.is_empty());
        assert_eq!(apply_criteria(fixture(), &criteria).unwrap().len(), 2);
    }
}
