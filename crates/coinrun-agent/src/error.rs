//! Error types for the agent runtime.

use crate::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The server sent a payload containing "Error". Fatal, no retry.
    #[error("server reported an error: {0}")]
    Server(String),

    /// A game-state payload could not be used.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Inbound messages stopped before the game ended.
    #[error("transport closed before the game ended")]
    TransportClosed,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;
