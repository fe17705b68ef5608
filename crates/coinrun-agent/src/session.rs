//! One game from registration to stop.

use coinrun_core::{MovePolicy, WorldModel};
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::observability::{self, AgentEvent, EventLog};
use crate::signal::{self, Signal};
use crate::{
    classify, turn_mailbox, AgentConfig, GameSummary, Publisher, Registration, StopReason,
    Subscription, Topics, TurnController, TurnSignals, TurnState,
};

/// Registers with a lobby and plays one game over a transport.
#[derive(Debug, Clone)]
pub struct Session {
    config: AgentConfig,
    topics: Topics,
    events: Option<EventLog>,
}

impl Session {
    /// Fails if the configured names cannot be used as topic segments.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let topics = Topics::from_config(&config);
        let events = config.events_path.clone().map(EventLog::new);
        Ok(Self {
            config,
            topics,
            events,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    /// Subscribe, register, optionally host, then play until the game stops.
    ///
    /// Inbound messages are read on a separate task for the whole game. When hosting, `STOP` is
    /// published after the turn loop ends regardless of how it ended.
    pub async fn run<P, O, S>(
        &self,
        policy: P,
        mut publisher: O,
        subscription: S,
    ) -> Result<GameSummary>
    where
        P: MovePolicy,
        O: Publisher,
        S: Subscription + 'static,
    {
        for topic in self.topics.subscriptions() {
            publisher.subscribe(topic).await?;
            debug!(topic, "Subscribed");
        }

        let (signals, watcher) = turn_mailbox();
        let pump = tokio::spawn(pump(
            subscription,
            self.topics.clone(),
            signals,
            self.events.clone(),
        ));

        let mut controller = TurnController::new(policy, watcher, self.topics.moves.clone())
            .with_world(WorldModel::with_vision_radius(self.config.vision_radius))
            .with_stall_warning(self.config.stall_warning())
            .with_events(self.events.clone());

        let result = self.play(&mut controller, &mut publisher).await;
        pump.abort();

        if self.config.host {
            match publisher.publish(&self.topics.start, signal::STOP).await {
                Ok(()) => info!(topic = %self.topics.start, "Published STOP"),
                Err(e) => warn!(error = %e, "Failed to publish STOP"),
            }
        }

        let message = match &result {
            Ok(summary) => format!("{:?} after {} turns", summary.reason, summary.turns_played),
            Err(e) => e.to_string(),
        };
        self.record(AgentEvent::new(observability::STOPPED, message));

        result
    }

    async fn play<P, O>(
        &self,
        controller: &mut TurnController<P>,
        publisher: &mut O,
    ) -> Result<GameSummary>
    where
        P: MovePolicy,
        O: Publisher,
    {
        let registration = Registration::from_config(&self.config);
        let payload = serde_json::to_string(&registration)?;
        publisher
            .publish(&self.topics.registration, &payload)
            .await?;
        info!(
            lobby = %self.config.lobby_name,
            player = %self.config.player_name,
            team = %self.config.team_name,
            host = self.config.host,
            "Registered"
        );
        self.record(
            AgentEvent::new(
                observability::REGISTERED,
                format!("{} joined {}", self.config.player_name, self.config.lobby_name),
            )
            .with_metadata(serde_json::to_value(&registration)?),
        );

        if self.config.host {
            tokio::time::sleep(self.config.start_delay()).await;
            publisher
                .publish(&self.topics.start, signal::START)
                .await?;
            info!(topic = %self.topics.start, "Published START");
        }

        controller.run(publisher).await
    }

    fn record(&self, event: AgentEvent) {
        if let Some(events) = &self.events {
            if let Err(e) = events.emit(&event) {
                warn!(error = %e, "Failed to write event");
            }
        }
    }
}

/// Feed classified inbound messages into the mailbox until the game stops or the stream ends.
async fn pump<S: Subscription>(
    mut subscription: S,
    topics: Topics,
    signals: TurnSignals,
    events: Option<EventLog>,
) {
    while !signals.is_stopped() {
        let message = match subscription.next_message().await {
            Ok(Some(message)) => message,
            Ok(None) => {
                warn!("Inbound stream ended");
                signals.stop(StopReason::TransportClosed);
                break;
            }
            Err(e) => {
                error!(error = %e, "Inbound transport failed");
                signals.stop(StopReason::TransportClosed);
                break;
            }
        };

        match classify(&topics, &message.topic, &message.payload) {
            Ok(Signal::Start) if signals.state() == TurnState::AwaitingStart => {
                info!("Game started");
                if let Some(events) = &events {
                    if let Err(e) = events.emit_simple(observability::STARTED, "START received") {
                        warn!(error = %e, "Failed to write event");
                    }
                }
                signals.start();
            }
            Ok(Signal::Fatal(payload)) => {
                error!(topic = %message.topic, %payload, "Server reported an error");
                signals.apply(Signal::Fatal(payload));
            }
            Ok(signal) => signals.apply(signal),
            Err(e) => {
                error!(topic = %message.topic, error = %e, "Malformed game state");
                signals.stop(StopReason::MalformedSnapshot(e.to_string()));
            }
        }
    }
}
