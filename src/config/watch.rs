use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use crate::Error;
use crate::Result;

/// Watcher hub configuration
///
/// ```toml
/// [watch]
/// history_capacity = 1000
/// enable_metrics = false
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchConfig {
    /// Number of recent events retained for replay
    ///
    /// Bounds how far back a watcher may ask to start. A watch whose start
    /// index has already fallen out of this window fails with
    /// `EventIndexCleared` and the caller has to resynchronize.
    ///
    /// **Default**: 1000
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Update prometheus counters on every watch and notify
    ///
    /// **Default**: false
    #[serde(default = "default_enable_metrics")]
    pub enable_metrics: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            enable_metrics: default_enable_metrics(),
        }
    }
}

impl WatchConfig {
    /// Validates watch configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "watch.history_capacity must be greater than 0".into(),
            )));
        }

        if self.history_capacity > 1_000_000 {
            warn!(
                "watch.history_capacity ({}) is very large; every retained event stays in memory",
                self.history_capacity
            );
        }

        Ok(())
    }
}

const fn default_history_capacity() -> usize {
    1000
}

const fn default_enable_metrics() -> bool {
    false
}
