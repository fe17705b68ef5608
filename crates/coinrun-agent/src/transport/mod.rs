//! Transport contract consumed by the agent.
//!
//! The agent never talks to a broker directly. Anything that can publish text payloads to
//! topics and deliver inbound `(topic, payload)` pairs can drive it.

pub mod channel;
pub mod stdio;

use async_trait::async_trait;

pub use channel::{channel_transport, BrokerEnd, ChannelPublisher, ChannelSubscription, Outbound};
pub use stdio::{stdio_transport, LinePublisher, LineSubscription};

/// A message delivered on a subscribed topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: String,
}

impl InboundMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound half: subscriptions and fire-and-forget publishes.
#[async_trait]
pub trait Publisher: Send {
    async fn subscribe(&mut self, topic: &str) -> Result<(), TransportError>;

    async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), TransportError>;
}

/// Inbound half. `Ok(None)` means the stream ended cleanly.
#[async_trait]
pub trait Subscription: Send {
    async fn next_message(&mut self) -> Result<Option<InboundMessage>, TransportError>;
}
