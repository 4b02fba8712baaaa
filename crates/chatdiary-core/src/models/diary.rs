//! Diary entry model

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Wire format of [`DiaryEntry::timestamp`] (`yyyy-MM-dd HH:mm:ss.SSS`).
///
/// Fixed width and zero padded, so lexicographic order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Human-readable title format (`MMM d, yyyy`, e.g. `Jan 5, 2024`).
pub const TITLE_FORMAT: &str = "%b %-d, %Y";

/// Kind of diary entry content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    /// Plain text entry (older clients sent `TXT`)
    #[default]
    #[serde(alias = "TXT")]
    Text,
    /// Image entry
    Image,
}

impl EntryKind {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TEXT" | "TXT" => Ok(Self::Text),
            "IMAGE" => Ok(Self::Image),
            other => Err(Error::InvalidInput(format!("unknown entry type '{other}'"))),
        }
    }
}

/// A diary entry as exchanged with the diary service.
///
/// Entries are immutable once created. Identity is assigned by the server and
/// is not modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Human-readable day label
    #[serde(default)]
    pub title: String,
    /// Text content (or caption for images)
    pub content: String,
    /// Creation instant in [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
    /// Free-form location label
    #[serde(default)]
    pub position: String,
    /// Entry kind
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
}

impl DiaryEntry {
    /// Compose a new entry stamped with the given local instant.
    ///
    /// The title and timestamp are always derived from `now`.
    #[must_use]
    pub fn compose(
        content: impl Into<String>,
        position: impl Into<String>,
        kind: EntryKind,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            title: now.format(TITLE_FORMAT).to_string(),
            content: content.into(),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            position: position.into(),
            kind,
        }
    }

    /// Compose a new entry stamped with the current local time.
    #[must_use]
    pub fn compose_now(
        content: impl Into<String>,
        position: impl Into<String>,
        kind: EntryKind,
    ) -> Self {
        Self::compose(content, position, kind, Local::now().naive_local())
    }

    /// Parse [`Self::timestamp`] with the canonical format.
    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// Calendar day of the entry.
    pub fn date(&self) -> Result<NaiveDate> {
        Ok(self.parsed_timestamp()?.date())
    }
}

/// Parse a diary timestamp in [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|_| Error::TimestampParse {
        timestamp: raw.to_string(),
    })
}
