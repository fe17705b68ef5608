//! In-process loopback transport over tokio channels.
//!
//! The agent holds the `ChannelPublisher`/`ChannelSubscription` pair; whoever plays the broker
//! holds the `BrokerEnd` and sees every subscribe and publish in order.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{InboundMessage, Publisher, Subscription, TransportError};

/// Something the agent sent toward the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Subscribe(String),
    Publish { topic: String, payload: String },
}

impl Outbound {
    pub fn publish(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Outbound::Publish {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

pub struct ChannelPublisher {
    tx: mpsc::UnboundedSender<Outbound>,
}

pub struct ChannelSubscription {
    rx: mpsc::UnboundedReceiver<InboundMessage>,
}

/// Broker side of a loopback transport.
pub struct BrokerEnd {
    inbound: mpsc::UnboundedSender<InboundMessage>,
    outbound: mpsc::UnboundedReceiver<Outbound>,
}

pub fn channel_transport() -> (ChannelPublisher, ChannelSubscription, BrokerEnd) {
    let (in_tx, in_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    (
        ChannelPublisher { tx: out_tx },
        ChannelSubscription { rx: in_rx },
        BrokerEnd {
            inbound: in_tx,
            outbound: out_rx,
        },
    )
}

impl BrokerEnd {
    /// Deliver a message to the agent. Returns `false` once the agent has hung up.
    pub fn deliver(&self, topic: impl Into<String>, payload: impl Into<String>) -> bool {
        self.inbound
            .send(InboundMessage::new(topic, payload))
            .is_ok()
    }

    /// Next thing the agent sent, waiting if necessary. `None` once the agent has hung up.
    pub async fn recv(&mut self) -> Option<Outbound> {
        self.outbound.recv().await
    }

    /// Next thing the agent sent, if one is already queued.
    pub fn try_recv(&mut self) -> Option<Outbound> {
        self.outbound.try_recv().ok()
    }

    /// Wait for the next publish, skipping subscriptions.
    pub async fn next_publish(&mut self) -> Option<(String, String)> {
        while let Some(out) = self.outbound.recv().await {
            if let Outbound::Publish { topic, payload } = out {
                return Some((topic, payload));
            }
        }
        None
    }

    /// Stop delivering; the agent's subscription will report end of stream.
    pub fn close_inbound(self) -> mpsc::UnboundedReceiver<Outbound> {
        self.outbound
    }
}

#[async_trait]
impl Publisher for ChannelPublisher {
    async fn subscribe(&mut self, topic: &str) -> Result<(), TransportError> {
        self.tx
            .send(Outbound::Subscribe(topic.to_string()))
            .map_err(|_| TransportError::Closed)
    }

    async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), TransportError> {
        self.tx
            .send(Outbound::publish(topic, payload))
            .map_err(|_| TransportError::Closed)
    }
}

#[async_trait]
impl Subscription for ChannelSubscription {
    async fn next_message(&mut self) -> Result<Option<InboundMessage>, TransportError> {
        Ok(self.rx.recv().await)
    }
}
