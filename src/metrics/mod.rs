use lazy_static::lazy_static;
use prometheus::IntCounter;
use prometheus::IntGauge;
use prometheus::Registry;

lazy_static! {
    pub static ref WATCH_EVENTS_NOTIFIED: IntCounter =
        IntCounter::new("watch_events_notified", "Events fanned out to watchers")
            .expect("metric can not be created");

    pub static ref WATCHERS_REGISTERED: IntCounter =
        IntCounter::new("watchers_registered", "Watchers queued for a live event")
            .expect("metric can not be created");

    pub static ref WATCHERS_SATISFIED: IntCounter =
        IntCounter::new("watchers_satisfied", "Queued watchers that received an event")
            .expect("metric can not be created");

    pub static ref WATCH_REPLAY_HITS: IntCounter =
        IntCounter::new("watch_replay_hits", "Watches answered from event history")
            .expect("metric can not be created");

    pub static ref WATCH_HISTORY_CLEARED: IntCounter = IntCounter::new(
        "watch_history_cleared",
        "Watches rejected because the start index left the history window"
    )
    .expect("metric can not be created");

    pub static ref WATCHERS_PENDING: IntGauge =
        IntGauge::new("watchers_pending", "Watchers currently queued in the hub")
            .expect("metric can not be created");

    pub static ref REGISTRY: Registry = {
        let registry = Registry::new();
        registry
            .register(Box::new(WATCH_EVENTS_NOTIFIED.clone()))
            .expect("collector can be registered");
        registry
            .register(Box::new(WATCHERS_REGISTERED.clone()))
            .expect("collector can be registered");
        registry
            .register(Box::new(WATCHERS_SATISFIED.clone()))
            .expect("collector can be registered");
        registry
            .register(Box::new(WATCH_REPLAY_HITS.clone()))
            .expect("collector can be registered");
        registry
            .register(Box::new(WATCH_HISTORY_CLEARED.clone()))
            .expect("collector can be registered");
        registry
            .register(Box::new(WATCHERS_PENDING.clone()))
            .expect("collector can be registered");
        registry
    };
}
