use crate::watch::action;
use crate::watch::Event;
use crate::watch::WatchReceiver;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    env_logger::init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
    println!("setup logger for unit test.");
}

/// A `set` event at `key` committed in term 1
pub fn set_event(
    key: &str,
    index: u64,
) -> Event {
    Event::new(action::SET, key, index, 1)
}

/// Events `(key, index)` in the order given
pub fn set_events(entries: &[(&str, u64)]) -> Vec<Event> {
    entries.iter().map(|(key, index)| set_event(key, *index)).collect()
}

/// Asserts the receiver holds an event right now and returns it
pub fn expect_delivered(receiver: &mut WatchReceiver) -> Event {
    receiver.try_recv().expect("watcher should have been notified")
}

/// Asserts nothing has been delivered to the receiver yet
pub fn expect_pending(receiver: &mut WatchReceiver) {
    assert!(
        receiver.try_recv().is_none(),
        "watcher should still be pending"
    );
}
