//! Observable primitives shared by screen controllers.
//!
//! - [`StateCell`]: latest-value cell. Readers always see the most recent
//!   value; intermediate values may be skipped by slow observers.
//! - [`OneShotChannel`]: fire-and-forget events. Nothing is buffered for
//!   absent subscribers and late subscribers never see earlier events.

use std::fmt;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Receiver half of a [`StateCell`].
pub type StateReceiver<T> = watch::Receiver<T>;

/// Single-writer, many-reader current-value cell.
///
/// Cloning shares the same underlying value. Writes that leave the value
/// unchanged do not notify observers.
pub struct StateCell<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> StateCell<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Replace the value. Returns `true` if it differed from the previous one.
    pub fn set(&self, value: T) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Read-modify-write in place. `f` returns whether it changed anything;
    /// observers are only notified when it did.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.sender.send_if_modified(f)
    }

    /// Observe future changes. The receiver starts at the current value.
    pub fn subscribe(&self) -> StateReceiver<T> {
        self.sender.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &*self.sender.borrow())
            .finish()
    }
}

/// Broadcast channel for one-shot UI events (navigation and the like).
pub struct OneShotChannel<T> {
    sender: broadcast::Sender<T>,
}

impl<T> Clone for OneShotChannel<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> OneShotChannel<T>
where
    T: Clone + Send + 'static,
{
    /// `capacity` bounds how far a subscriber may fall behind before it
    /// starts skipping events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Deliver `event` to current subscribers. Returns how many received it;
    /// with none listening the event is dropped.
    pub fn emit(&self, event: T) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> OneShotReceiver<T> {
        OneShotReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Subscription to a [`OneShotChannel`].
pub struct OneShotReceiver<T> {
    receiver: broadcast::Receiver<T>,
}

impl<T: Clone> OneShotReceiver<T> {
    /// Next event, or `None` once every sender is gone.
    ///
    /// Events skipped because this receiver lagged are not redelivered.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-delivered event, without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

impl<T> fmt::Debug for OneShotReceiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneShotReceiver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_state_cell_latest_value() {
        let cell = StateCell::new(0u32);
        let mut rx = cell.subscribe();
        assert_eq!(*rx.borrow_and_update(), 0);

        cell.set(1);
        cell.set(2);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn test_state_cell_skips_unchanged_writes() {
        let cell = StateCell::new("Loading".to_string());
        let rx = cell.subscribe();

        assert!(!cell.set("Loading".to_string()));
        assert!(!rx.has_changed().unwrap());

        assert!(cell.set("Loaded".to_string()));
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_state_cell_update_if() {
        let cell = StateCell::new(vec![1, 2, 3]);
        let rx = cell.subscribe();

        assert!(!cell.update_if(|_| false));
        assert!(!rx.has_changed().unwrap());

        assert!(cell.update_if(|v| {
            v.push(4);
            true
        }));
        assert_eq!(cell.with(|v| v.len()), 4);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_one_shot_drops_events_without_subscribers() {
        let channel = OneShotChannel::new(8);
        assert_eq!(channel.emit("lost"), 0);

        let mut late = channel.subscribe();
        assert_eq!(late.try_recv(), None);

        assert_eq!(channel.emit("seen"), 1);
        assert_eq!(late.try_recv(), Some("seen"));
        assert_eq!(late.try_recv(), None);
    }

    #[tokio::test]
    async fn test_one_shot_closes_when_sender_dropped() {
        let channel = OneShotChannel::new(4);
        let mut rx = channel.subscribe();
        channel.emit(7);
        drop(channel);

        assert_eq!(rx.recv().await, Some(7));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_lagging_subscriber_skips_to_newest() {
        let channel = OneShotChannel::new(2);
        let mut rx = channel.subscribe();
        for i in 0..5 {
            channel.emit(i);
        }

        assert_eq!(rx.try_recv(), Some(3));
        assert_eq!(rx.try_recv(), Some(4));
    }
}
