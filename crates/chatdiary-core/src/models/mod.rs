//! Data models for ChatDiary

mod diary;
mod envelope;
mod summary;

pub use diary::{parse_timestamp, DiaryEntry, EntryKind, TIMESTAMP_FORMAT, TITLE_FORMAT};
pub use envelope::{decode_envelope, ApiEnvelope};
pub use summary::DiarySummary;
