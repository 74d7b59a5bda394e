use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio_util::sync::CancellationToken;

use super::event::Event;
use crate::Error;
use crate::Result;
use crate::WatchError;

/// Pending single-delivery interest registered at exactly one path.
#[derive(Debug)]
pub(crate) struct Watcher {
    sender: oneshot::Sender<Event>,
    recursive: bool,
    since_index: u64,
}

impl Watcher {
    pub(crate) fn new(
        sender: oneshot::Sender<Event>,
        recursive: bool,
        since_index: u64,
    ) -> Self {
        Self {
            sender,
            recursive,
            since_index,
        }
    }

    /// Matching rule for a watcher queued at `path`.
    pub(crate) fn matches(
        &self,
        event: &Event,
        path: &str,
        force: bool,
    ) -> bool {
        (self.recursive || force || event.key == path) && event.index >= self.since_index
    }

    /// Sends the event, consuming the watcher. Returns false when the
    /// receiving side was already dropped.
    pub(crate) fn deliver(
        self,
        event: Event,
    ) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Caller-side end of a watch.
///
/// Holds at most one event. The embedded [`CancellationToken`] only stops
/// the consumer from waiting: the hub keeps a live watcher queued until an
/// event satisfies it or the hub itself is dropped.
#[derive(Debug)]
pub struct WatchReceiver {
    receiver: Option<oneshot::Receiver<Event>>,
    token: CancellationToken,
}

impl WatchReceiver {
    pub(crate) fn channel() -> (oneshot::Sender<Event>, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            sender,
            Self {
                receiver: Some(receiver),
                token: CancellationToken::new(),
            },
        )
    }

    /// A receiver already holding `event` (history replay).
    pub(crate) fn ready(event: Event) -> Self {
        let (sender, receiver) = Self::channel();
        // The receiver is alive right here, so the send cannot fail.
        let _ = sender.send(event);
        receiver
    }

    /// Waits for the event.
    ///
    /// Returns [`WatchError::Cancelled`] once the cancellation token fires and
    /// [`WatchError::Closed`] when no event can arrive any more. An event that
    /// is already delivered wins over a cancellation.
    pub async fn recv(self) -> Result<Event> {
        let Self { receiver, token } = self;
        let Some(receiver) = receiver else {
            return Err(Error::from(WatchError::Closed));
        };

        tokio::select! {
            biased;
            result = receiver => result.map_err(|_| Error::from(WatchError::Closed)),
            _ = token.cancelled() => Err(Error::from(WatchError::Cancelled)),
        }
    }

    /// Takes the event if it has already been delivered.
    pub fn try_recv(&mut self) -> Option<Event> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(event) => {
                self.receiver = None;
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.receiver = None;
                None
            }
        }
    }

    /// Token that aborts a pending [`recv`](Self::recv) when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}
