pub mod add;
pub mod common;
pub mod config;
pub mod list;
pub mod search;
pub mod summaries;
pub mod upload;
