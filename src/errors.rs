//! Watch Engine Error Hierarchy
//!
//! Errors are reported synchronously to the caller, which decides the
//! remediation (typically: re-read current state and re-issue `watch` with a
//! fresh index). Nothing in this crate is fatal to the process.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Watch registration, replay and delivery failures
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// Configuration loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchError {
    /// The requested replay index predates retained history; events in the
    /// gap may have been evicted, so the caller must resynchronize.
    #[error("The event in requested index is outdated and cleared (requested: {requested}, oldest covered: {start_index})")]
    EventIndexCleared { requested: u64, start_index: u64 },

    /// An event was handed in with an index that does not advance the log
    #[error("Event index {index} is not greater than last recorded index {last_index}")]
    IndexNotIncreasing { last_index: u64, index: u64 },

    /// The consumer cancelled its wait before an event arrived
    #[error("Watch cancelled before an event was delivered")]
    Cancelled,

    /// No event will arrive: it was already taken, or the hub dropped the
    /// pending watcher
    #[error("Watch channel closed without a pending event")]
    Closed,
}

impl Error {
    /// True when the error means replay history no longer covers the
    /// requested index.
    pub fn is_history_cleared(&self) -> bool {
        matches!(self, Error::Watch(WatchError::EventIndexCleared { .. }))
    }
}
