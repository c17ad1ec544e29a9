//! Game orchestration and event sequencing engine for agent-driven
//! werewolf games.
//!
//! Many independent games run concurrently, each as its own actor task.
//! Every state change becomes one entry in a per-game, gapless,
//! strictly-ordered event log that feeds live spectators (lossy,
//! at-most-recent-N) and durable storage (lossless, retried) at the same
//! time. Agent decisions come from an external [`gateway::AgentGateway`];
//! timeouts and failures degrade to deterministic default actions so a
//! faulty dependency can never corrupt or deadlock a game.

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod logging;
pub mod persistence;
pub mod registry;
pub mod session;

// Re-exports for public API
pub use config::EngineConfig;
pub use errors::EngineError;
pub use events::{Event, EventBody, GameId, Subscription};
pub use gateway::AgentGateway;
pub use persistence::{InMemorySink, PersistenceSink};
pub use registry::GameRegistry;
pub use session::{SessionHandle, SessionStatus};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    logging::init();
}
