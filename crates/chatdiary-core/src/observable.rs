//! Single-slot observable values.
//!
//! An [`Observable`] holds exactly one value. Every write replaces the
//! previous value (last writer wins) and wakes subscribers; writers never wait
//! for subscribers to catch up.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Shared, cloneable single-value holder with change notification.
pub struct Observable<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable").field(&*self.sender.borrow()).finish()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Replace the held value and notify subscribers.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Receiver that observes every subsequent write.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone> Observable<T> {
    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Wait until the held value satisfies `predicate`, then return it.
    ///
    /// Returns immediately when the current value already matches.
    pub async fn wait_for(&self, predicate: impl FnMut(&T) -> bool) -> T {
        let mut receiver = self.subscribe();
        let value = match receiver.wait_for(predicate).await {
            Ok(value) => value.clone(),
            // Unreachable while `self` keeps the sender alive.
            Err(_) => self.get(),
        };
        value
    }
}
