//! # kv-watch
//!
//! Change-notification engine of a hierarchical key-value store.
//!
//! A [`WatcherHub`](watch::WatcherHub) hands out one-shot watches on a key
//! or key prefix, fans committed events out to every watcher registered on
//! an ancestor path of the changed key, and replays recent events from a
//! bounded [`EventHistory`](watch::EventHistory) to watchers that ask for a
//! past index.
//!
//! The store, replication, transport and persistence layers are the
//! caller's: this crate consumes already-ordered events.

pub mod config;
mod errors;
pub mod metrics;
mod utils;
pub mod watch;

pub use config::*;
pub use errors::*;
pub use utils::*;

#[cfg(test)]
mod errors_test;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
