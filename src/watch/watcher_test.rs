use tokio::time::timeout;
use tokio::time::Duration;

use super::watcher::WatchReceiver;
use super::watcher::Watcher;
use crate::test_utils::set_event;
use crate::Error;
use crate::WatchError;

#[test]
fn test_matching_rule() {
    let (sender, _receiver) = WatchReceiver::channel();
    let exact = Watcher::new(sender, false, 5);

    assert!(exact.matches(&set_event("/a", 5), "/a", false));
    assert!(!exact.matches(&set_event("/a", 4), "/a", false));
    assert!(!exact.matches(&set_event("/a/b", 6), "/a", false));
    assert!(exact.matches(&set_event("/a/b", 6), "/a", true));

    let (sender, _receiver) = WatchReceiver::channel();
    let recursive = Watcher::new(sender, true, 0);

    assert!(recursive.matches(&set_event("/a/b/c", 1), "/a", false));
}

#[test]
fn test_deliver_reports_dropped_receiver() {
    let (sender, receiver) = WatchReceiver::channel();
    drop(receiver);

    assert!(!Watcher::new(sender, true, 0).deliver(set_event("/a", 1)));
}

#[tokio::test]
async fn test_ready_receiver_yields_event_immediately() {
    let receiver = WatchReceiver::ready(set_event("/a", 3));

    let event = timeout(Duration::from_millis(100), receiver.recv())
        .await
        .expect("Timeout")
        .expect("event");
    assert_eq!(event.index, 3);
}

#[tokio::test]
async fn test_recv_waits_for_delivery() {
    let (sender, receiver) = WatchReceiver::channel();
    let watcher = Watcher::new(sender, false, 0);

    let handle = tokio::spawn(receiver.recv());
    tokio::task::yield_now().await;
    assert!(watcher.deliver(set_event("/a", 1)));

    let event = handle.await.unwrap().unwrap();
    assert_eq!(event.key, "/a");
}

#[tokio::test]
async fn test_recv_returns_cancelled_when_token_fires() {
    let (_sender, receiver) = WatchReceiver::channel();
    let token = receiver.cancellation_token();

    let handle = tokio::spawn(receiver.recv());
    token.cancel();

    let result = timeout(Duration::from_millis(100), handle)
        .await
        .expect("Timeout")
        .unwrap();
    assert!(matches!(result, Err(Error::Watch(WatchError::Cancelled))));
}

#[tokio::test]
async fn test_delivered_event_wins_over_cancellation() {
    let receiver = WatchReceiver::ready(set_event("/a", 1));
    receiver.cancellation_token().cancel();

    assert_eq!(receiver.recv().await.unwrap().index, 1);
}

#[tokio::test]
async fn test_recv_returns_closed_when_watcher_dropped() {
    let (sender, receiver) = WatchReceiver::channel();
    drop(Watcher::new(sender, true, 0));

    let result = receiver.recv().await;
    assert!(matches!(result, Err(Error::Watch(WatchError::Closed))));
}

#[tokio::test]
async fn test_try_recv_takes_event_once() {
    let mut receiver = WatchReceiver::ready(set_event("/a", 1));

    assert_eq!(receiver.try_recv().unwrap().index, 1);
    assert!(receiver.try_recv().is_none());
    assert!(matches!(
        receiver.recv().await,
        Err(Error::Watch(WatchError::Closed))
    ));
}
