//! Agent configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::AgentError;

/// Agent configuration, loaded from .coinrun/agent.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Lobby to register in
    pub lobby_name: String,

    /// This agent's player name (also its per-player topic segment)
    pub player_name: String,

    /// Team to join
    pub team_name: String,

    /// Whether this agent created the lobby and controls START/STOP
    pub host: bool,

    /// Topic namespace prefix
    #[serde(default = "default_topic_prefix")]
    pub topic_prefix: String,

    /// Topic the registration JSON is published to
    #[serde(default = "default_registration_topic")]
    pub registration_topic: String,

    /// Half-width of the refreshed vision window
    #[serde(default = "default_vision_radius")]
    pub vision_radius: i32,

    /// Host only: pause after registering before publishing START
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,

    /// Log a warning when no turn arrives for this long (0 disables)
    #[serde(default = "default_stall_warning_secs")]
    pub stall_warning_secs: u64,

    /// Optional JSONL event log
    #[serde(default)]
    pub events_path: Option<PathBuf>,
}

fn default_topic_prefix() -> String {
    "games".to_string()
}
fn default_registration_topic() -> String {
    "new_game".to_string()
}
fn default_vision_radius() -> i32 {
    coinrun_core::DEFAULT_VISION_RADIUS
}
fn default_start_delay_ms() -> u64 {
    1_000
}
fn default_stall_warning_secs() -> u64 {
    30
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            lobby_name: String::new(),
            player_name: String::new(),
            team_name: String::new(),
            host: false,
            topic_prefix: default_topic_prefix(),
            registration_topic: default_registration_topic(),
            vision_radius: default_vision_radius(),
            start_delay_ms: default_start_delay_ms(),
            stall_warning_secs: default_stall_warning_secs(),
            events_path: None,
        }
    }
}

impl AgentConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from project root (looks for .coinrun/agent.yaml)
    pub fn load_from_project(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".coinrun/agent.yaml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn stall_warning(&self) -> Option<Duration> {
        (self.stall_warning_secs > 0).then(|| Duration::from_secs(self.stall_warning_secs))
    }

    /// Names end up as topic segments, so they must be non-empty and free of `/`, `+` and `#`.
    pub fn validate(&self) -> Result<(), AgentError> {
        for (field, value) in [
            ("lobby_name", &self.lobby_name),
            ("player_name", &self.player_name),
            ("team_name", &self.team_name),
        ] {
            if value.trim().is_empty() {
                return Err(AgentError::InvalidConfig(format!("{field} must not be empty")));
            }
            if value.contains(['/', '+', '#']) {
                return Err(AgentError::InvalidConfig(format!(
                    "{field} {value:?} must not contain '/', '+' or '#'"
                )));
            }
        }
        if self.topic_prefix.contains(['+', '#']) {
            return Err(AgentError::InvalidConfig(format!(
                "topic_prefix {:?} must not contain wildcards",
                self.topic_prefix
            )));
        }
        if self.vision_radius < 0 {
            return Err(AgentError::InvalidConfig(
                "vision_radius must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named() -> AgentConfig {
        AgentConfig {
            lobby_name: "lobby1".into(),
            player_name: "alice".into(),
            team_name: "red".into(),
            ..AgentConfig::default()
        }
    }

    #[test]
    fn defaults_match_game_constants() {
        let config = AgentConfig::default();
        assert_eq!(config.topic_prefix, "games");
        assert_eq!(config.registration_topic, "new_game");
        assert_eq!(config.vision_radius, 2);
        assert!(!config.host);
        assert_eq!(config.stall_warning(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn validate_accepts_plain_names() {
        assert!(named().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_and_wildcard_names() {
        let mut config = named();
        config.player_name = "  ".into();
        assert!(config.validate().is_err());

        let mut config = named();
        config.lobby_name = "a/b".into();
        assert!(config.validate().is_err());

        let mut config = named();
        config.team_name = "#red".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_stall_warning_disables_it() {
        let config = AgentConfig {
            stall_warning_secs: 0,
            ..named()
        };
        assert_eq!(config.stall_warning(), None);
    }
}
