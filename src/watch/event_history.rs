//! Bounded replay buffer of recent events.
//!
//! The history answers one question for late watchers: "what is the first
//! event at or under this path with index ≥ N?". It only answers with
//! certainty while N is inside its coverage window; older requests fail with
//! [`WatchError::EventIndexCleared`] instead of pretending nothing happened.

use std::collections::VecDeque;

use tracing::trace;

use super::event::Event;
use crate::path::clean_path;
use crate::path::is_under;
use crate::Result;
use crate::WatchError;

#[derive(Debug, Clone)]
pub struct EventHistory {
    /// Retained events, strictly increasing by index
    queue: VecDeque<Event>,

    capacity: usize,

    /// Lowest index the history still covers completely. Every event with
    /// `index >= start_index` that was ever added is still in `queue`.
    start_index: u64,

    last_index: u64,
    last_term: u64,
}

impl EventHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            capacity,
            start_index: 0,
            last_index: 0,
            last_term: 0,
        }
    }

    /// Returns the first retained event with `index >= since_index` whose key
    /// equals `prefix` or lies beneath it.
    ///
    /// `Ok(None)` means the history is certain no such event exists yet.
    pub fn scan(
        &self,
        prefix: &str,
        since_index: u64,
    ) -> Result<Option<Event>> {
        self.scan_with(prefix, true, since_index)
    }

    /// Like [`scan`](Self::scan), but with `recursive == false` only an event
    /// whose key is exactly `prefix` qualifies.
    pub fn scan_with(
        &self,
        prefix: &str,
        recursive: bool,
        since_index: u64,
    ) -> Result<Option<Event>> {
        if since_index < self.start_index {
            return Err(WatchError::EventIndexCleared {
                requested: since_index,
                start_index: self.start_index,
            }
            .into());
        }

        if since_index > self.last_index {
            return Ok(None);
        }

        let prefix = clean_path(prefix);
        let from = self.queue.partition_point(|e| e.index < since_index);

        let found = self
            .queue
            .range(from..)
            .find(|e| {
                if recursive {
                    is_under(&e.key, &prefix)
                } else {
                    e.key == prefix
                }
            })
            .cloned();

        Ok(found)
    }

    /// Appends an event that already carries its commit index.
    ///
    /// The key is normalized on the way in. An index that does not advance
    /// past the last recorded one is rejected and nothing is stored.
    pub fn add_event(
        &mut self,
        mut event: Event,
    ) -> Result<()> {
        if event.index <= self.last_index {
            return Err(WatchError::IndexNotIncreasing {
                last_index: self.last_index,
                index: event.index,
            }
            .into());
        }

        event.key = clean_path(&event.key);
        self.push(event);
        Ok(())
    }

    /// Builds and records an event at the next index, reusing the last known
    /// term. Returns the recorded event so the caller can fan it out.
    ///
    /// Fails with `IndexNotIncreasing` once `u64::MAX` has been recorded.
    pub fn add_event_without_index(
        &mut self,
        action: &str,
        key: &str,
    ) -> Result<Event> {
        let Some(index) = self.last_index.checked_add(1) else {
            return Err(WatchError::IndexNotIncreasing {
                last_index: self.last_index,
                index: self.last_index,
            }
            .into());
        };

        let event = Event::new(action, clean_path(key), index, self.last_term);
        self.push(event.clone());
        Ok(event)
    }

    fn push(
        &mut self,
        event: Event,
    ) {
        self.last_index = event.index;
        self.last_term = event.term;
        self.queue.push_back(event);

        while self.queue.len() > self.capacity {
            if let Some(evicted) = self.queue.pop_front() {
                trace!(index = evicted.index, key = %evicted.key, "evicted event from history");
                self.start_index = evicted.index.saturating_add(1);
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    pub fn last_index(&self) -> u64 {
        self.last_index
    }

    pub fn last_term(&self) -> u64 {
        self.last_term
    }

    /// Retained events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.queue.iter()
    }
}
