//! Async bridge between a game's event log and its persistence sink.
//!
//! Drains the in-order event queue into `append`, retrying each write with
//! capped exponential backoff until it lands. Publishes the last acked seq
//! so the session can hold its Completed transition until the final event
//! is durable.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use super::PersistenceSink;
use crate::events::{Event, GameId};

/// Observer side of a running forwarder.
#[derive(Debug, Clone)]
pub struct ForwarderHandle {
    acked: watch::Receiver<Option<u64>>,
}

impl ForwarderHandle {
    /// Last seq acknowledged by the sink.
    pub fn last_acked(&self) -> Option<u64> {
        *self.acked.borrow()
    }

    /// Wait until the sink has acknowledged `seq` (or the forwarder exits,
    /// which only happens after its queue is fully drained).
    pub async fn wait_for(&mut self, seq: u64) {
        loop {
            if self.acked.borrow().is_some_and(|acked| acked >= seq) {
                return;
            }
            if self.acked.changed().await.is_err() {
                return;
            }
        }
    }
}

pub fn spawn_forwarder(
    game_id: GameId,
    sink: Arc<dyn PersistenceSink>,
    mut rx: mpsc::UnboundedReceiver<Event>,
    retry_base: Duration,
    retry_max: Duration,
) -> ForwarderHandle {
    let (acked_tx, acked_rx) = watch::channel(None);

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let seq = event.seq;
            let mut delay = retry_base.max(Duration::from_millis(1));
            loop {
                match sink.append(game_id, event.clone()).await {
                    Ok(()) => break,
                    Err(err) => {
                        warn!(
                            game_id = %game_id,
                            seq,
                            error = %err,
                            retry_in_ms = delay.as_millis() as u64,
                            "persistence write failed; retrying"
                        );
                        tokio::time::sleep(delay).await;
                        delay = (delay * 2).min(retry_max);
                    }
                }
            }
            let _ = acked_tx.send(Some(seq));
        }
        debug!(game_id = %game_id, "persistence forwarder drained");
    });

    ForwarderHandle { acked: acked_rx }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;
    use crate::events::EventBody;
    use crate::persistence::{InMemorySink, PersistenceError, PersistenceSink};

    fn event(seq: u64) -> Event {
        Event {
            seq,
            timestamp: OffsetDateTime::UNIX_EPOCH,
            body: EventBody::SpeakerTurn { player_id: 0 },
        }
    }

    /// Fails the first `failures` appends, then delegates to memory.
    struct FlakySink {
        inner: InMemorySink,
        remaining_failures: AtomicU32,
    }

    #[async_trait]
    impl PersistenceSink for FlakySink {
        async fn append(&self, game_id: GameId, event: Event) -> Result<(), PersistenceError> {
            if self
                .remaining_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(PersistenceError::new("transient outage"));
            }
            self.inner.append(game_id, event).await
        }

        async fn load_history(&self, game_id: GameId) -> Result<Vec<Event>, PersistenceError> {
            self.inner.load_history(game_id).await
        }
    }

    #[tokio::test]
    async fn retries_until_every_event_lands_in_order() {
        let sink = Arc::new(FlakySink {
            inner: InMemorySink::new(),
            remaining_failures: AtomicU32::new(3),
        });
        let game = GameId::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        let mut handle = spawn_forwarder(
            game,
            sink.clone(),
            rx,
            Duration::from_millis(1),
            Duration::from_millis(10),
        );

        for seq in 0..5 {
            tx.send(event(seq)).unwrap();
        }
        drop(tx);

        handle.wait_for(4).await;
        let history = sink.load_history(game).await.unwrap();
        assert_eq!(
            history.iter().map(|e| e.seq).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[tokio::test]
    async fn wait_for_returns_immediately_when_already_acked() {
        let sink = Arc::new(InMemorySink::new());
        let game = GameId::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        let mut handle = spawn_forwarder(
            game,
            sink,
            rx,
            Duration::from_millis(1),
            Duration::from_millis(10),
        );
        tx.send(event(0)).unwrap();
        handle.wait_for(0).await;
        assert_eq!(handle.last_acked(), Some(0));
    }
}
