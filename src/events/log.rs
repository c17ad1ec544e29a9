//! The per-game append-only event log.

use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::warn;

use crate::events::{Broadcaster, Event, EventBody};

/// Owns sequence assignment for one game and splits every append two ways:
/// synchronously to live subscribers, asynchronously (via an in-order queue)
/// to the persistence forwarder.
///
/// Owned exclusively by the session task, so appends are naturally
/// serialized and `seq` stays gapless.
pub struct EventLog {
    next_seq: u64,
    last_timestamp: OffsetDateTime,
    broadcaster: Broadcaster,
    persist_tx: Option<mpsc::UnboundedSender<Event>>,
}

impl EventLog {
    pub fn new(broadcaster: Broadcaster, persist_tx: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            next_seq: 0,
            last_timestamp: OffsetDateTime::UNIX_EPOCH,
            broadcaster,
            persist_tx: Some(persist_tx),
        }
    }

    /// Stamp and record one event, returning it.
    ///
    /// Timestamps are clamped to be non-decreasing so `seq` order implies
    /// timestamp order even across wall-clock steps.
    pub fn append(&mut self, body: EventBody) -> Event {
        let seq = self.next_seq;
        self.next_seq += 1;

        let now = OffsetDateTime::now_utc().max(self.last_timestamp);
        self.last_timestamp = now;

        let event = Event {
            seq,
            timestamp: now,
            body,
        };

        self.broadcaster.publish(&event);
        if let Some(tx) = &self.persist_tx {
            if tx.send(event.clone()).is_err() {
                warn!(seq, "persistence forwarder gone; event not durably queued");
            }
        }
        event
    }

    /// Seq of the most recently appended event, if any.
    pub fn last_seq(&self) -> Option<u64> {
        self.next_seq.checked_sub(1)
    }

    /// Stop accepting events for persistence; lets the forwarder drain its
    /// queue and exit.
    pub fn close(&mut self) {
        self.persist_tx = None;
    }
}
