//! Message producer write path for new diary entries.
//!
//! Entry submission publishes to a queue instead of calling the diary
//! service's create endpoint directly. [`QueueForwarder`] is the consumer that
//! delivers queued entries to that endpoint.

mod queue;

use std::future::Future;

use crate::models::DiaryEntry;
use crate::Result;

pub use queue::{
    diary_queue, DiaryQueue, ForwardReport, QueueForwarder, QueueProducer, DEFAULT_QUEUE_CAPACITY,
};

/// Trait for publishing new diary entries
pub trait MessageProducer: Send + Sync {
    /// Hand an entry to the queue; no delivery acknowledgment is surfaced.
    fn publish(&self, entry: DiaryEntry) -> impl Future<Output = Result<()>> + Send;
}
