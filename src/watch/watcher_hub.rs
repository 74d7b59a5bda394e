//! Watcher Hub
//!
//! Owns the per-path watcher lists and the event history. Every mutating
//! method takes `&mut self`: the hub does no locking of its own, so callers
//! that share it across tasks serialize access with their own lock (or give
//! one task ownership). Only the pending-watcher counter is atomic, so it can
//! be observed through [`PendingWatchers`] without that lock.
//!
//! ```text
//! watch("/a", recursive, 5)
//!   └─ history.scan_with("/a", 5) ── hit ──> ready receiver (never queued)
//!                                 └─ miss ─> watchers["/a"].push_back(w)
//!
//! notify(Event { key: "/a/b/c", .. })
//!   └─ history.add_event
//!   └─ for path in ["/", "/a", "/a/b", "/a/b/c"]: notify_with_path(path)
//! ```

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use super::event::Event;
use super::event_history::EventHistory;
use super::watcher::WatchReceiver;
use super::watcher::Watcher;
use crate::metrics::WATCHERS_PENDING;
use crate::metrics::WATCHERS_REGISTERED;
use crate::metrics::WATCHERS_SATISFIED;
use crate::metrics::WATCH_EVENTS_NOTIFIED;
use crate::metrics::WATCH_HISTORY_CLEARED;
use crate::metrics::WATCH_REPLAY_HITS;
use crate::path::ancestors;
use crate::path::clean_path;
use crate::Result;
use crate::WatchConfig;

/// Detached handle on a hub's pending-watcher count.
///
/// Diagnostics only; the value may be stale by the time it is read.
#[derive(Debug, Clone, Default)]
pub struct PendingWatchers(Arc<AtomicU64>);

impl PendingWatchers {
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    fn decr(&self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

#[derive(Debug)]
pub struct WatcherHub {
    /// Pending watchers keyed by the exact path they registered at.
    /// A path is present iff its list is non-empty.
    watchers: HashMap<String, VecDeque<Watcher>>,

    count: PendingWatchers,

    history: EventHistory,

    enable_metrics: bool,
}

impl WatcherHub {
    /// Creates a hub retaining at most `capacity` events for replay.
    pub fn new(capacity: usize) -> Self {
        Self {
            watchers: HashMap::new(),
            count: PendingWatchers::default(),
            history: EventHistory::new(capacity),
            enable_metrics: false,
        }
    }

    pub fn from_config(config: &WatchConfig) -> Result<Self> {
        config.validate()?;

        let mut hub = Self::new(config.history_capacity);
        hub.enable_metrics = config.enable_metrics;
        Ok(hub)
    }

    /// Registers interest in `prefix`.
    ///
    /// With `recursive` the first event at or beneath `prefix` satisfies the
    /// watch, otherwise only an event at `prefix` itself. `index == 0` waits
    /// for the next event; a non-zero `index` first replays history from that
    /// index, returning a receiver that already holds the event when one
    /// qualifies.
    ///
    /// # Errors
    /// `WatchError::EventIndexCleared` when `index` is older than the history
    /// still covers.
    pub fn watch(
        &mut self,
        prefix: &str,
        recursive: bool,
        index: u64,
    ) -> Result<WatchReceiver> {
        let prefix = clean_path(prefix);

        if index > 0 {
            match self.history.scan_with(&prefix, recursive, index) {
                Ok(Some(event)) => {
                    debug!(
                        prefix = %prefix,
                        since_index = index,
                        event_index = event.index,
                        "watch satisfied from history"
                    );
                    if self.enable_metrics {
                        WATCH_REPLAY_HITS.inc();
                    }
                    return Ok(WatchReceiver::ready(event));
                }
                Ok(None) => {}
                Err(e) => {
                    if self.enable_metrics && e.is_history_cleared() {
                        WATCH_HISTORY_CLEARED.inc();
                    }
                    return Err(e);
                }
            }
        }

        let (sender, receiver) = WatchReceiver::channel();
        self.watchers
            .entry(prefix.clone())
            .or_default()
            .push_back(Watcher::new(sender, recursive, index));
        self.count.incr();

        if self.enable_metrics {
            WATCHERS_REGISTERED.inc();
            WATCHERS_PENDING.inc();
        }

        trace!(
            prefix = %prefix,
            recursive,
            since_index = index,
            pending = self.count.get(),
            "watcher registered"
        );

        Ok(receiver)
    }

    /// Records a committed event and wakes every matching watcher at the
    /// event's key or any of its ancestors.
    ///
    /// # Errors
    /// `WatchError::IndexNotIncreasing` when the event does not advance the
    /// history; nothing is recorded or delivered in that case.
    pub fn notify(
        &mut self,
        mut event: Event,
    ) -> Result<()> {
        event.key = clean_path(&event.key);
        if let Err(e) = self.history.add_event(event.clone()) {
            warn!(key = %event.key, index = event.index, "rejected event: {}", e);
            return Err(e);
        }
        self.fan_out(&event);
        Ok(())
    }

    /// Records a synthetic event at the next index and fans it out like
    /// [`notify`](Self::notify). The event is stored in history exactly once.
    ///
    /// # Errors
    /// `WatchError::IndexNotIncreasing` when the index space is exhausted.
    pub fn notify_without_index(
        &mut self,
        action: &str,
        key: &str,
    ) -> Result<Event> {
        let event = match self.history.add_event_without_index(action, key) {
            Ok(event) => event,
            Err(e) => {
                warn!(key, "rejected event without index: {}", e);
                return Err(e);
            }
        };
        self.fan_out(&event);
        Ok(event)
    }

    fn fan_out(
        &mut self,
        event: &Event,
    ) {
        for path in ancestors(&event.key) {
            self.notify_with_path(event, path, false);
        }

        if self.enable_metrics {
            WATCH_EVENTS_NOTIFIED.inc();
        }
    }

    /// Delivers `event` to the watchers queued at exactly `path`.
    ///
    /// A watcher is satisfied when it is recursive, the call is forced, or
    /// the event hits `path` itself, and the event is not older than the
    /// watcher's start index. Unsatisfied watchers keep their order.
    pub(crate) fn notify_with_path(
        &mut self,
        event: &Event,
        path: &str,
        force: bool,
    ) {
        let Some(list) = self.watchers.get_mut(path) else {
            return;
        };

        let queued = std::mem::take(list);
        for watcher in queued {
            if !watcher.matches(event, path, force) {
                list.push_back(watcher);
                continue;
            }

            if watcher.deliver(event.clone()) {
                trace!(path, index = event.index, key = %event.key, "watcher notified");
            } else {
                warn!(path, index = event.index, "watch receiver dropped before delivery");
            }
            self.count.decr();

            if self.enable_metrics {
                WATCHERS_SATISFIED.inc();
                WATCHERS_PENDING.dec();
            }
        }

        if list.is_empty() {
            self.watchers.remove(path);
            debug!(path, "all watchers at path notified");
        }
    }

    /// Returns a hub carrying an independent copy of this hub's event
    /// history and none of its watchers. Live subscriptions never move to
    /// the copy.
    pub fn snapshot_history(&self) -> Self {
        Self {
            watchers: HashMap::new(),
            count: PendingWatchers::default(),
            history: self.history.clone(),
            enable_metrics: self.enable_metrics,
        }
    }

    /// Total number of pending watchers.
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    /// Handle for reading the pending count without access to the hub.
    pub fn pending_watchers(&self) -> PendingWatchers {
        self.count.clone()
    }

    /// Number of watchers queued at exactly `path`.
    pub fn watcher_count(
        &self,
        path: &str,
    ) -> usize {
        self.watchers.get(&clean_path(path)).map(|l| l.len()).unwrap_or(0)
    }

    /// Number of paths with at least one pending watcher.
    pub fn watched_path_count(&self) -> usize {
        self.watchers.len()
    }

    pub fn history(&self) -> &EventHistory {
        &self.history
    }
}

impl Drop for WatcherHub {
    fn drop(&mut self) {
        if self.enable_metrics {
            WATCHERS_PENDING.sub(self.count.get() as i64);
        }
    }
}
