//! Turn loop: one decision and at most one published move per delivered snapshot.

use std::time::Duration;

use coinrun_core::{MovePolicy, WorldModel};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::mailbox::NextTurn;
use crate::observability::{self, AgentEvent, EventLog};
use crate::{AgentError, Publisher, StopReason, TurnWatcher};

/// How a finished game went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub turns_played: u64,
    pub moves_sent: u64,
    /// Turns where the policy had no legal move and nothing was published.
    pub stuck_turns: u64,
    pub reason: StopReason,
}

/// Drives a [`MovePolicy`] from the turn mailbox.
pub struct TurnController<P: MovePolicy> {
    world: WorldModel,
    policy: P,
    watcher: TurnWatcher,
    moves_topic: String,
    stall_warning: Option<Duration>,
    events: Option<EventLog>,
}

impl<P: MovePolicy> TurnController<P> {
    pub fn new(policy: P, watcher: TurnWatcher, moves_topic: impl Into<String>) -> Self {
        Self {
            world: WorldModel::new(),
            policy,
            watcher,
            moves_topic: moves_topic.into(),
            stall_warning: None,
            events: None,
        }
    }

    pub fn with_world(mut self, world: WorldModel) -> Self {
        self.world = world;
        self
    }

    /// Warn each time this long passes without a new turn.
    pub fn with_stall_warning(mut self, after: Option<Duration>) -> Self {
        self.stall_warning = after;
        self
    }

    pub fn with_events(mut self, events: Option<EventLog>) -> Self {
        self.events = events;
        self
    }

    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Play until the mailbox reports a stop.
    ///
    /// `GameOver` and `STOP` end the game normally. Every other stop reason, and any failure to
    /// publish a move, is returned as an error.
    pub async fn run<O>(&mut self, out: &mut O) -> Result<GameSummary>
    where
        O: Publisher + ?Sized,
    {
        let mut turns_played = 0;
        let mut moves_sent = 0;
        let mut stuck_turns = 0;

        loop {
            let (turn, snapshot) = match self.next_turn().await {
                NextTurn::Play { turn, snapshot } => (turn, snapshot),
                NextTurn::Stopped(reason) => {
                    let summary = GameSummary {
                        turns_played,
                        moves_sent,
                        stuck_turns,
                        reason,
                    };
                    return finish(summary);
                }
            };
            turns_played += 1;

            let position = snapshot.current_position;
            let decision = self.policy.make_move(&mut self.world, &snapshot);
            debug!(turn, "World model:\n{}", self.world.grid());

            let Some(decision) = decision else {
                stuck_turns += 1;
                warn!(turn, %position, "No legal move, skipping turn");
                self.record(
                    AgentEvent::new(observability::STUCK, format!("no legal move from {position}"))
                        .with_turn(turn),
                );
                continue;
            };

            out.publish(&self.moves_topic, decision.direction.as_str())
                .await?;
            moves_sent += 1;

            info!(turn, %position, direction = %decision.direction, kind = ?decision.kind, "Move sent");
            self.record(
                AgentEvent::new(observability::MOVE, decision.direction.as_str())
                    .with_turn(turn)
                    .with_metadata(json!({
                        "position": position,
                        "kind": format!("{:?}", decision.kind),
                    })),
            );
        }
    }

    async fn next_turn(&mut self) -> NextTurn {
        let Some(limit) = self.stall_warning else {
            return self.watcher.next().await;
        };

        loop {
            match tokio::time::timeout(limit, self.watcher.next()).await {
                Ok(next) => return next,
                Err(_) => warn!(
                    waited_secs = limit.as_secs(),
                    last_turn = self.watcher.consumed(),
                    "No turn received, still waiting"
                ),
            }
        }
    }

    fn record(&self, event: AgentEvent) {
        if let Some(events) = &self.events {
            if let Err(e) = events.emit(&event) {
                warn!(error = %e, "Failed to write event");
            }
        }
    }
}

fn finish(summary: GameSummary) -> Result<GameSummary> {
    info!(
        turns = summary.turns_played,
        moves = summary.moves_sent,
        stuck = summary.stuck_turns,
        reason = ?summary.reason,
        "Game finished"
    );
    match &summary.reason {
        StopReason::GameOver | StopReason::StopSignal => Ok(summary),
        StopReason::ServerError(payload) => Err(AgentError::Server(payload.clone())),
        StopReason::MalformedSnapshot(detail) => Err(AgentError::MalformedSnapshot(detail.clone())),
        StopReason::TransportClosed => Err(AgentError::TransportClosed),
    }
}
