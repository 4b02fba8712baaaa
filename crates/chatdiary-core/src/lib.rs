//! chatdiary-core - Core library for ChatDiary
//!
//! This crate contains the diary models, the remote diary service client,
//! client-side filtering and the view model used by ChatDiary interfaces.
//! Entries live behind the remote service; nothing is persisted locally.

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod observable;
pub mod producer;
pub mod service;
pub mod state;
pub mod upload;
pub mod util;
pub mod viewmodel;

pub use error::{Error, Result};
pub use filter::FilterCriteria;
pub use models::{DiaryEntry, DiarySummary, EntryKind};
pub use observable::Observable;
pub use state::{FailureKind, Fetch};
pub use viewmodel::DiaryViewModel;
