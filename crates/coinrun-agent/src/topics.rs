//! Topic layout and registration payload.

use serde::{Deserialize, Serialize};

use crate::AgentConfig;

/// Every topic the agent reads or writes for one lobby/player pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    pub registration: String,
    pub lobby: String,
    pub game_state: String,
    pub start: String,
    pub moves: String,
    pub scores: String,
}

impl Topics {
    pub fn new(prefix: &str, registration: &str, lobby: &str, player: &str) -> Self {
        let base = if prefix.is_empty() {
            lobby.to_string()
        } else {
            format!("{}/{lobby}", prefix.trim_end_matches('/'))
        };
        Self {
            registration: registration.to_string(),
            lobby: format!("{base}/lobby"),
            game_state: format!("{base}/{player}/game_state"),
            start: format!("{base}/start"),
            moves: format!("{base}/{player}/move"),
            scores: format!("{base}/scores"),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            &config.topic_prefix,
            &config.registration_topic,
            &config.lobby_name,
            &config.player_name,
        )
    }

    /// Topics to subscribe to before registering.
    pub fn subscriptions(&self) -> [&str; 4] {
        [&self.lobby, &self.game_state, &self.scores, &self.start]
    }
}

/// Sent once on the registration topic to join a lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub lobby_name: String,
    pub team_name: String,
    pub player_name: String,
}

impl Registration {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            lobby_name: config.lobby_name.clone(),
            team_name: config.team_name.clone(),
            player_name: config.player_name.clone(),
        }
    }
}
