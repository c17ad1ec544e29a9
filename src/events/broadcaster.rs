//! Live fan-out to spectators.
//!
//! Delivery is at-most-recent-N per subscriber: a slow or disconnected
//! viewer drops the oldest buffered events instead of ever blocking the
//! game. Durable, lossless history belongs to the persistence sink, not
//! here. Late subscribers receive only events from their subscription point
//! forward.

use tokio::sync::broadcast;
use tracing::debug;

use crate::events::Event;

/// Per-game fan-out handle. Cloning shares the same subscriber set.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<Event>,
}

impl Broadcaster {
    /// `buffer` bounds how many events a lagging subscriber can fall behind
    /// before the oldest are dropped for it.
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Deliver to all current subscribers. Never blocks; a send with no
    /// subscribers is a no-op.
    pub fn publish(&self, event: &Event) {
        let _ = self.tx.send(event.clone());
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live event stream for one viewer. Dropping it unsubscribes.
pub struct Subscription {
    rx: broadcast::Receiver<Event>,
}

impl Subscription {
    /// Next live event, or `None` once the game's stream has closed.
    ///
    /// A lagged subscriber silently skips the dropped prefix and resumes
    /// with the oldest event still buffered, so `seq` values are never
    /// duplicated, only omitted.
    pub async fn recv(&mut self) -> Option<Event> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(dropped)) => {
                    debug!(dropped, "subscriber lagged; oldest buffered events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBody;
    use time::OffsetDateTime;

    fn event(seq: u64) -> Event {
        Event {
            seq,
            timestamp: OffsetDateTime::UNIX_EPOCH,
            body: EventBody::SpeakerTurn { player_id: 0 },
        }
    }

    #[tokio::test]
    async fn subscribers_see_events_from_their_subscription_point() {
        let broadcaster = Broadcaster::new(16);
        broadcaster.publish(&event(0));

        let mut sub = broadcaster.subscribe();
        broadcaster.publish(&event(1));
        broadcaster.publish(&event(2));

        assert_eq!(sub.recv().await.map(|e| e.seq), Some(1));
        assert_eq!(sub.recv().await.map(|e| e.seq), Some(2));
    }

    #[tokio::test]
    async fn lagging_subscriber_drops_oldest_and_never_sees_duplicates() {
        let broadcaster = Broadcaster::new(4);
        let mut sub = broadcaster.subscribe();
        for seq in 0..10 {
            broadcaster.publish(&event(seq));
        }
        drop(broadcaster);

        let mut seen = Vec::new();
        while let Some(e) = sub.recv().await {
            seen.push(e.seq);
        }
        // Oldest were dropped; what remains is in order with no duplicates.
        assert!(seen.len() <= 4);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.last(), Some(&9));
    }

    #[tokio::test]
    async fn stream_closes_when_the_game_goes_away() {
        let broadcaster = Broadcaster::new(4);
        let mut sub = broadcaster.subscribe();
        drop(broadcaster);
        assert!(sub.recv().await.is_none());
    }
}
