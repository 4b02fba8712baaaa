//! Diary view model.
//!
//! Owns the diary service, the message producer and one observable slot per
//! operation. Every operation catches its own failures and turns them into a
//! terminal slot value; callers never receive an error from here.
//!
//! Each operation comes in two forms: a spawning form (`fetch_diaries`,
//! `submit_entry`, ...) that runs on a child of the view model's cancellation
//! scope and returns the slot immediately, and an awaitable form
//! (`load_diaries`, `send_entry`, ...) that runs in the caller's task under a
//! caller-supplied token. A cancelled operation leaves its slot untouched.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use crate::filter::{apply_criteria, FilterCriteria};
use crate::models::{DiaryEntry, DiarySummary, EntryKind};
use crate::observable::Observable;
use crate::producer::MessageProducer;
use crate::service::DiaryService;
use crate::state::Fetch;
use crate::upload::{ImageUpload, LocalImageRef};

/// Summary count requested when the view model starts (`i32::MAX`).
pub const PRELOAD_SUMMARY_COUNT: i64 = 2_147_483_647;

pub type DiaryListSlot = Observable<Fetch<Vec<DiaryEntry>>>;
pub type SummaryListSlot = Observable<Fetch<Vec<DiarySummary>>>;
/// `None` while in flight, then `Some(success)`.
pub type OutcomeSlot = Observable<Option<bool>>;

pub struct DiaryViewModel<S, P> {
    service: Arc<S>,
    producer: Arc<P>,
    scope: CancellationToken,
    diaries: DiaryListSlot,
    summaries: SummaryListSlot,
    submission: OutcomeSlot,
    upload: OutcomeSlot,
}

impl<S, P> DiaryViewModel<S, P>
where
    S: DiaryService + 'static,
    P: MessageProducer + 'static,
{
    pub fn new(service: S, producer: P) -> Self {
        Self::from_shared(Arc::new(service), Arc::new(producer))
    }

    pub fn from_shared(service: Arc<S>, producer: Arc<P>) -> Self {
        Self {
            service,
            producer,
            scope: CancellationToken::new(),
            diaries: Observable::default(),
            summaries: Observable::default(),
            submission: Observable::new(None),
            upload: Observable::new(None),
        }
    }

    /// Kick off the initial summary preload.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> SummaryListSlot {
        self.fetch_generated_summaries(PRELOAD_SUMMARY_COUNT)
    }

    /// Cancel every operation spawned by this view model.
    pub fn close(&self) {
        self.scope.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_cancelled()
    }

    pub const fn diaries(&self) -> &DiaryListSlot {
        &self.diaries
    }

    pub const fn summaries(&self) -> &SummaryListSlot {
        &self.summaries
    }

    pub const fn submission(&self) -> &OutcomeSlot {
        &self.submission
    }

    pub const fn upload(&self) -> &OutcomeSlot {
        &self.upload
    }

    // ---------------------------------------------------------------------
    // Retrieval
    // ---------------------------------------------------------------------

    /// Fetch, filter and sort diaries in the background.
    pub fn fetch_diaries(&self, criteria: FilterCriteria) -> DiaryListSlot {
        self.diaries.set(Fetch::Pending);
        let service = Arc::clone(&self.service);
        let slot = self.diaries.clone();
        self.spawn_scoped(move |cancel| async move {
            load_diaries_into(service.as_ref(), &criteria, &slot, &cancel).await;
        });
        self.diaries.clone()
    }

    pub fn search_by_keyword(&self, keyword: &str) -> DiaryListSlot {
        self.fetch_diaries(FilterCriteria::new().with_keyword(keyword))
    }

    pub fn search_by_date(&self, date: NaiveDate) -> DiaryListSlot {
        self.fetch_diaries(FilterCriteria::new().with_date(date))
    }

    pub fn search_by_keyword_and_date(&self, keyword: &str, date: NaiveDate) -> DiaryListSlot {
        self.fetch_diaries(FilterCriteria::new().with_keyword(keyword).with_date(date))
    }

    /// Fetch, filter and sort diaries in the caller's task.
    ///
    /// Returns the value written to the slot, or `None` if cancelled.
    pub async fn load_diaries(
        &self,
        criteria: &FilterCriteria,
        cancel: &CancellationToken,
    ) -> Option<Fetch<Vec<DiaryEntry>>> {
        self.diaries.set(Fetch::Pending);
        load_diaries_into(self.service.as_ref(), criteria, &self.diaries, cancel).await
    }

    // ---------------------------------------------------------------------
    // Generated summaries
    // ---------------------------------------------------------------------

    /// Fetch up to `count` generated summaries in the background, newest first.
    pub fn fetch_generated_summaries(&self, count: i64) -> SummaryListSlot {
        self.summaries.set(Fetch::Pending);
        let service = Arc::clone(&self.service);
        let slot = self.summaries.clone();
        self.spawn_scoped(move |cancel| async move {
            load_summaries_into(service.as_ref(), count, &slot, &cancel).await;
        });
        self.summaries.clone()
    }

    pub async fn load_generated_summaries(
        &self,
        count: i64,
        cancel: &CancellationToken,
    ) -> Option<Fetch<Vec<DiarySummary>>> {
        self.summaries.set(Fetch::Pending);
        load_summaries_into(self.service.as_ref(), count, &self.summaries, cancel).await
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    /// Publish a new entry through the message producer in the background.
    pub fn submit_entry(&self, content: &str, position: &str, kind: EntryKind) -> OutcomeSlot {
        self.submission.set(None);
        let producer = Arc::clone(&self.producer);
        let slot = self.submission.clone();
        let entry = DiaryEntry::compose_now(content, position, kind);
        self.spawn_scoped(move |cancel| async move {
            publish_into(producer.as_ref(), entry, &slot, &cancel).await;
        });
        self.submission.clone()
    }

    pub async fn send_entry(
        &self,
        content: &str,
        position: &str,
        kind: EntryKind,
        cancel: &CancellationToken,
    ) -> Option<bool> {
        self.submission.set(None);
        let entry = DiaryEntry::compose_now(content, position, kind);
        publish_into(self.producer.as_ref(), entry, &self.submission, cancel).await
    }

    /// Upload local images with shared metadata in the background.
    pub fn upload_images(
        &self,
        kind: EntryKind,
        position: &str,
        content: &str,
        images: Vec<LocalImageRef>,
    ) -> OutcomeSlot {
        self.upload.set(None);
        let service = Arc::clone(&self.service);
        let slot = self.upload.clone();
        let position = position.to_string();
        let content = content.to_string();
        self.spawn_scoped(move |cancel| async move {
            upload_into(service.as_ref(), kind, &position, &content, &images, &slot, &cancel)
                .await;
        });
        self.upload.clone()
    }

    pub async fn send_images(
        &self,
        kind: EntryKind,
        position: &str,
        content: &str,
        images: &[LocalImageRef],
        cancel: &CancellationToken,
    ) -> Option<bool> {
        self.upload.set(None);
        upload_into(
            self.service.as_ref(),
            kind,
            position,
            content,
            images,
            &self.upload,
            cancel,
        )
        .await
    }

    fn spawn_scoped<F, Fut>(&self, task: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(task(self.scope.child_token()));
    }
}

impl<S, P> Drop for DiaryViewModel<S, P> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

/// Run `future` unless `cancel` fires first.
async fn until_cancelled<F: Future>(cancel: &CancellationToken, future: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        output = future => Some(output),
    }
}

async fn load_diaries_into<S: DiaryService>(
    service: &S,
    criteria: &FilterCriteria,
    slot: &DiaryListSlot,
    cancel: &CancellationToken,
) -> Option<Fetch<Vec<DiaryEntry>>> {
    let Some(result) = until_cancelled(cancel, service.list_diaries()).await else {
        tracing::debug!("Diary fetch cancelled");
        return None;
    };

    let fetch = Fetch::from(result.and_then(|entries| apply_criteria(entries, criteria)));
    if let Some(failure) = fetch.failure() {
        tracing::warn!("Diary fetch failed: {:?}", failure);
    }
    slot.set(fetch.clone());
    Some(fetch)
}

async fn load_summaries_into<S: DiaryService>(
    service: &S,
    count: i64,
    slot: &SummaryListSlot,
    cancel: &CancellationToken,
) -> Option<Fetch<Vec<DiarySummary>>> {
    let Some(result) = until_cancelled(cancel, service.generated_summaries(count)).await else {
        tracing::debug!("Summary fetch cancelled");
        return None;
    };

    let fetch = Fetch::from(result.map(|mut summaries| {
        summaries.reverse();
        summaries
    }));
    if let Some(failure) = fetch.failure() {
        tracing::warn!("Generated summary fetch failed: {:?}", failure);
    }
    slot.set(fetch.clone());
    Some(fetch)
}

async fn publish_into<P: MessageProducer>(
    producer: &P,
    entry: DiaryEntry,
    slot: &OutcomeSlot,
    cancel: &CancellationToken,
) -> Option<bool> {
    let timestamp = entry.timestamp.clone();
    let result = until_cancelled(cancel, producer.publish(entry)).await?;
    let succeeded = match result {
        Ok(()) => {
            tracing::info!("Published diary entry stamped {timestamp}");
            true
        }
        Err(error) => {
            tracing::warn!("Failed to publish diary entry: {error}");
            false
        }
    };
    slot.set(Some(succeeded));
    Some(succeeded)
}

async fn upload_into<S: DiaryService>(
    service: &S,
    kind: EntryKind,
    position: &str,
    content: &str,
    images: &[LocalImageRef],
    slot: &OutcomeSlot,
    cancel: &CancellationToken,
) -> Option<bool> {
    let result = until_cancelled(cancel, async {
        let upload = ImageUpload::prepare(kind, position, content, images).await?;
        service.upload_images(upload).await
    })
    .await?;

    let succeeded = match result {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!("Image upload failed: {error}");
            false
        }
    };
    slot.set(Some(succeeded));
    Some(succeeded)
}
