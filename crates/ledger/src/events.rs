//! Change notification bus.
//!
//! Every successful mutation publishes exactly one [`ChangeEvent`]; adapters
//! for a remote change feed inject the events they receive through the same
//! [`ChangeNotifier::publish`] path. Subscribers see events in publish order
//! (FIFO). Delivery is at-least-once: a reconnecting feed may replay or a
//! lagging subscriber may skip events, so consumers must treat every event
//! as a hint to refetch a full snapshot rather than as a delta to apply.

use tokio::sync::broadcast;
use uuid::Uuid;

/// Collection a change event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    SavingsGoals,
    WishlistItems,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::SavingsGoals => "savings_goals",
            Self::WishlistItems => "wishlist_items",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One mutation notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    pub affected_id: Uuid,
}

/// Fans change events out to any number of subscribers.
#[derive(Clone, Debug)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Registers a subscriber that receives every event published from now
    /// on, in publish order.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Registers a subscriber that only sees one collection's events.
    #[must_use]
    pub fn subscribe_collection(&self, collection: Collection) -> CollectionSubscription {
        CollectionSubscription {
            collection,
            receiver: self.sender.subscribe(),
        }
    }

    /// Publishes an event without blocking the mutation that produced it.
    ///
    /// Having no subscribers is fine, and lagging subscribers skip ahead
    /// rather than block the sender.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::debug!(
            collection = event.collection.as_str(),
            kind = ?event.kind,
            affected_id = %event.affected_id,
            "change event",
        );
        let _ = self.sender.send(event);
    }
}

/// Receiver filtered to a single collection.
#[derive(Debug)]
pub struct CollectionSubscription {
    collection: Collection,
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl CollectionSubscription {
    /// Waits for the next event on the subscribed collection.
    ///
    /// Returns `None` once the notifier is gone. A lag gap is folded into
    /// the next event: consumers refetch a full snapshot per notification,
    /// so skipped events carry nothing they need.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.collection == self.collection => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
