//! Remote diary service contract

mod http;

use std::future::Future;
use std::sync::Arc;

use crate::models::{DiaryEntry, DiarySummary};
use crate::upload::ImageUpload;
use crate::Result;

pub use http::HttpDiaryService;

pub const ROUTE_DIARIES: &str = "/v1/diaries";
pub const ROUTE_DIARY: &str = "/v1/diary";
pub const ROUTE_IMAGE: &str = "/v1/image";
pub const ROUTE_GENERATED_LIST: &str = "/v1/gen/diaryDateList";

/// Trait for diary service operations
pub trait DiaryService: Send + Sync {
    /// Fetch every diary entry (unfiltered, server order)
    fn list_diaries(&self) -> impl Future<Output = Result<Vec<DiaryEntry>>> + Send;

    /// Create one diary entry
    fn create_diary(&self, entry: &DiaryEntry) -> impl Future<Output = Result<()>> + Send;

    /// Upload images with their shared metadata in a single request
    fn upload_images(&self, upload: ImageUpload) -> impl Future<Output = Result<()>> + Send;

    /// Fetch at most `count` generated day summaries (server order)
    fn generated_summaries(
        &self,
        count: i64,
    ) -> impl Future<Output = Result<Vec<DiarySummary>>> + Send;
}

impl<S: DiaryService> DiaryService for Arc<S> {
    fn list_diaries(&self) -> impl Future<Output = Result<Vec<DiaryEntry>>> + Send {
        self.as_ref().list_diaries()
    }

    fn create_diary(&self, entry: &DiaryEntry) -> impl Future<Output = Result<()>> + Send {
        self.as_ref().create_diary(entry)
    }

    fn upload_images(&self, upload: ImageUpload) -> impl Future<Output = Result<()>> + Send {
        self.as_ref().upload_images(upload)
    }

    fn generated_summaries(
        &self,
        count: i64,
    ) -> impl Future<Output = Result<Vec<DiarySummary>>> + Send {
        self.as_ref().generated_summaries(count)
    }
}
