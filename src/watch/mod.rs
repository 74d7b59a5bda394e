//! Watch mechanism for monitoring key changes
//!
//! Clients register a one-shot interest in a key, or in a whole subtree, and
//! receive the first event at or after a requested index. Recent events are
//! kept in a bounded [`EventHistory`] so a client that fell behind can be
//! answered from the past instead of waiting.
//!
//! # Usage Example
//!
//! ```
//! use kv_watch::watch::{action, Event, WatcherHub};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut hub = WatcherHub::new(1000);
//!
//! // Wait for anything under /services
//! let receiver = hub.watch("/services", true, 0).unwrap();
//!
//! // Called from the store's commit path
//! hub.notify(Event::new(action::SET, "/services/api/1", 7, 1)).unwrap();
//!
//! let event = receiver.recv().await.unwrap();
//! assert_eq!(event.key, "/services/api/1");
//! assert_eq!(hub.count(), 0);
//! # });
//! ```
//!
//! # Delivery Guarantees
//!
//! - Each receiver gets at most one event, and exactly one once a qualifying
//!   event is notified.
//! - A watcher with start index `N` never sees an event with a lower index.
//! - Asking for an index older than the history window fails with
//!   [`WatchError::EventIndexCleared`](crate::WatchError::EventIndexCleared)
//!   rather than silently skipping evicted events.
//!
//! # Thread Safety
//!
//! [`WatcherHub`] has no internal locking. Mutating calls take `&mut self`,
//! so sharing a hub means wrapping it in the caller's own mutex together
//! with the store state it mirrors. The pending count can be read without
//! that lock through [`PendingWatchers`].
//!
//! # Limitations
//!
//! Queued watchers cannot be unregistered. Cancelling a receiver's token
//! only ends the consumer's wait; the hub drops the watcher when it is
//! satisfied or when the hub itself is dropped.

mod event;
mod event_history;
mod watcher;
mod watcher_hub;

#[cfg(test)]
mod watcher_test;

pub use event::*;
pub use event_history::EventHistory;
pub use watcher::WatchReceiver;
pub use watcher_hub::PendingWatchers;
pub use watcher_hub::WatcherHub;
