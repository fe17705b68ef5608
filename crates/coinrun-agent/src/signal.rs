//! Inbound message classification.

use coinrun_core::{Snapshot, SnapshotError};

use crate::Topics;

/// Exact lobby payload the server sends when the board is cleared.
pub const GAME_OVER: &str = "Game Over: All coins have been collected";
pub const START: &str = "START";
pub const STOP: &str = "STOP";

/// What an inbound message means to the turn loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Payload contained "Error"; checked before anything else, on every topic.
    Fatal(String),
    GameOver,
    Start,
    Stop,
    Turn(Snapshot),
    /// Lobby chatter other than game over.
    Lobby(String),
    Scores(String),
    /// Not addressed to this agent.
    Ignored,
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("game state is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("game state is unusable: {0}")]
    InvalidSnapshot(#[from] SnapshotError),
}

/// Map a raw `(topic, payload)` pair onto a turn-loop signal.
///
/// A game-state payload that does not parse, or that places the agent off the board, is an
/// error rather than a guess.
pub fn classify(topics: &Topics, topic: &str, payload: &str) -> Result<Signal, ProtocolError> {
    if payload.contains("Error") {
        return Ok(Signal::Fatal(payload.to_string()));
    }

    if topic == topics.lobby {
        if payload == GAME_OVER {
            return Ok(Signal::GameOver);
        }
        return Ok(Signal::Lobby(payload.to_string()));
    }

    if topic == topics.game_state {
        let snapshot: Snapshot = serde_json::from_str(payload)?;
        snapshot.validate()?;
        return Ok(Signal::Turn(snapshot));
    }

    if topic == topics.start {
        return Ok(match payload.trim() {
            START => Signal::Start,
            STOP => Signal::Stop,
            _ => Signal::Ignored,
        });
    }

    if topic == topics.scores {
        return Ok(Signal::Scores(payload.to_string()));
    }

    Ok(Signal::Ignored)
}
