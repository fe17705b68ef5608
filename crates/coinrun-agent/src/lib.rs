//! coinrun agent runtime
//!
//! Wires the decision engine to a publish/subscribe transport. Inbound signals land in a
//! single-slot mailbox; the turn loop publishes one move per snapshot it plays.

pub mod config;
pub mod controller;
pub mod error;
pub mod mailbox;
pub mod observability;
pub mod session;
pub mod signal;
pub mod topics;
pub mod transport;

pub use config::AgentConfig;
pub use controller::{GameSummary, TurnController};
pub use error::AgentError;
pub use mailbox::{
    turn_mailbox, NextTurn, StopReason, TurnSignals, TurnState, TurnStatus, TurnWatcher,
};
pub use observability::{AgentEvent, EventLog};
pub use session::Session;
pub use signal::{classify, ProtocolError, Signal};
pub use topics::{Registration, Topics};
pub use transport::{InboundMessage, Publisher, Subscription, TransportError};
