//! Game event log.
//!
//! One JSON object per line, appended as the game progresses. Failures to write are the
//! caller's to report; they never stop a game.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const REGISTERED: &str = "registered";
pub const STARTED: &str = "started";
pub const MOVE: &str = "move";
pub const STUCK: &str = "stuck";
pub const STOPPED: &str = "stopped";

/// A single agent event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub turn: Option<u64>,
    pub message: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl AgentEvent {
    pub fn new(event_type: &str, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            turn: None,
            message: message.into(),
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_turn(mut self, turn: u64) -> Self {
        self.turn = Some(turn);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Appends [`AgentEvent`]s to a JSONL file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event, creating the file and its parent directory on first use.
    pub fn emit(&self, event: &AgentEvent) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let line = serde_json::to_string(event)?;
        writeln!(file, "{line}")?;

        Ok(())
    }

    pub fn emit_simple(&self, event_type: &str, message: &str) -> Result<()> {
        self.emit(&AgentEvent::new(event_type, message))
    }

    /// Last `limit` events in file order. Unreadable lines are skipped.
    pub fn read_recent(&self, limit: usize) -> Vec<AgentEvent> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };

        let mut events: Vec<AgentEvent> = BufReader::new(file)
            .lines()
            .map_while(|line| line.ok())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect();

        if events.len() > limit {
            events.drain(0..events.len() - limit);
        }

        events
    }
}
