//! In-process diary queue and its forwarding consumer.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::MessageProducer;
use crate::models::DiaryEntry;
use crate::service::DiaryService;
use crate::{Error, Result};

/// Default number of entries buffered before `publish` waits.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Create a bounded diary queue.
///
/// Publishing fails once the [`DiaryQueue`] half has been dropped.
pub fn diary_queue(capacity: usize) -> (QueueProducer, DiaryQueue) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (QueueProducer { sender }, DiaryQueue { receiver })
}

/// Producer half of the in-process diary queue.
#[derive(Debug, Clone)]
pub struct QueueProducer {
    sender: mpsc::Sender<DiaryEntry>,
}

impl MessageProducer for QueueProducer {
    async fn publish(&self, entry: DiaryEntry) -> Result<()> {
        self.sender
            .send(entry)
            .await
            .map_err(|_| Error::Producer("diary queue is closed".to_string()))
    }
}

/// Consumer half of the in-process diary queue.
#[derive(Debug)]
pub struct DiaryQueue {
    receiver: mpsc::Receiver<DiaryEntry>,
}

impl DiaryQueue {
    /// Next queued entry; `None` once every producer is dropped and the queue is drained.
    pub async fn recv(&mut self) -> Option<DiaryEntry> {
        self.receiver.recv().await
    }
}

/// Delivery counts from one forwarding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Drains a [`DiaryQueue`] into the diary service's create endpoint.
#[derive(Debug)]
pub struct QueueForwarder<S> {
    queue: DiaryQueue,
    service: S,
}

impl<S: DiaryService> QueueForwarder<S> {
    pub const fn new(queue: DiaryQueue, service: S) -> Self {
        Self { queue, service }
    }

    /// Forward entries until the queue closes or `cancel` fires.
    ///
    /// Failed deliveries are logged and counted, never retried.
    pub async fn run(mut self, cancel: CancellationToken) -> ForwardReport {
        let mut report = ForwardReport::default();
        loop {
            let entry = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                entry = self.queue.recv() => match entry {
                    Some(entry) => entry,
                    None => break,
                },
            };

            match self.service.create_diary(&entry).await {
                Ok(()) => {
                    report.delivered += 1;
                    tracing::debug!("Forwarded diary entry stamped {}", entry.timestamp);
                }
                Err(error) => {
                    report.failed += 1;
                    tracing::warn!(
                        "Failed to forward diary entry stamped {}: {}",
                        entry.timestamp,
                        error
                    );
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiarySummary, EntryKind};
    use crate::upload::ImageUpload;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingService {
        created: Mutex<Vec<DiaryEntry>>,
        reject_content: Option<&'static str>,
    }

    impl DiaryService for RecordingService {
        async fn list_diaries(&self) -> Result<Vec<DiaryEntry>> {
            Ok(Vec::new())
        }

        async fn create_diary(&self, entry: &DiaryEntry) -> Result<()> {
            if self.reject_content == Some(entry.content.as_str()) {
                return Err(Error::Api {
                    status: 500,
                    body: "rejected".to_string(),
                });
            }
            self.created.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn upload_images(&self, _upload: ImageUpload) -> Result<()> {
            Ok(())
        }

        async fn generated_summaries(&self, _count: i64) -> Result<Vec<DiarySummary>> {
            Ok(Vec::new())
        }
    }

    fn entry(content: &str) -> DiaryEntry {
        DiaryEntry::compose_now(content, "", EntryKind::Text)
    }

    #[tokio::test]
    async fn forwards_until_producers_are_dropped() {
        let (producer, queue) = diary_queue(4);
        producer.publish(entry("one")).await.unwrap();
        producer.publish(entry("two")).await.unwrap();
        drop(producer);

        let service = std::sync::Arc::new(RecordingService::default());
        let report = QueueForwarder::new(queue, std::sync::Arc::clone(&service))
            .run(CancellationToken::new())
            .await;

        assert_eq!(report, ForwardReport { delivered: 2, failed: 0 });
        let created = service.created.lock().unwrap();
        assert_eq!(created[0].content, "one");
        assert_eq!(created[1].content, "two");
    }

    #[tokio::test]
    async fn counts_failed_deliveries_without_retry() {
        let (producer, queue) = diary_queue(4);
        producer.publish(entry("keep")).await.unwrap();
        producer.publish(entry("drop")).await.unwrap();
        drop(producer);

        let service = std::sync::Arc::new(RecordingService {
            reject_content: Some("drop"),
            ..RecordingService::default()
        });
        let report = QueueForwarder::new(queue, std::sync::Arc::clone(&service))
            .run(CancellationToken::new())
            .await;

        assert_eq!(report, ForwardReport { delivered: 1, failed: 1 });
        assert_eq!(service.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stops_when_cancelled() {
        let (_producer, queue) = diary_queue(4);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = QueueForwarder::new(queue, RecordingService::default())
            .run(cancel)
            .await;
        assert_eq!(report, ForwardReport::default());
    }

    #[tokio::test]
    async fn publish_fails_once_queue_is_dropped() {
        let (producer, queue) = diary_queue(1);
        drop(queue);
        assert!(matches!(
            producer.publish(entry("late")).await,
            Err(Error::Producer(_))
        ));
    }

    #[tokio::test]
    async fn default_capacity_buffers_without_consumer() {
        let (producer, mut queue) = diary_queue(DEFAULT_QUEUE_CAPACITY);
        for _ in 0..DEFAULT_QUEUE_CAPACITY {
            producer.publish(entry("buffered")).await.unwrap();
        }
        drop(producer);

        let mut received = 0;
        while queue.recv().await.is_some() {
            received += 1;
        }
        assert_eq!(received, DEFAULT_QUEUE_CAPACITY);
    }
}
