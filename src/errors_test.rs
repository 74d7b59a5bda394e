use config::ConfigError;

use crate::Error;
use crate::WatchError;

#[test]
fn history_cleared_error_should_mention_both_indices() {
    let err: Error = WatchError::EventIndexCleared {
        requested: 3,
        start_index: 7,
    }
    .into();

    let msg = err.to_string();
    assert!(msg.contains("requested: 3"), "{msg}");
    assert!(msg.contains("oldest covered: 7"), "{msg}");
    assert!(err.is_history_cleared());
}

#[test]
fn other_errors_should_not_report_history_cleared() {
    let err: Error = WatchError::Cancelled.into();
    assert!(!err.is_history_cleared());

    let err: Error = ConfigError::Message("bad".into()).into();
    assert!(!err.is_history_cleared());
    assert!(matches!(err, Error::Config(_)));
}
