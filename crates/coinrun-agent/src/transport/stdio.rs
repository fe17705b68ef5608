//! Line-oriented transport for bridging to an external MQTT client.
//!
//! Inbound lines are `<topic> <payload>`, the format `mosquitto_sub -v` prints. Outbound lines
//! are `SUB <topic>` and `PUB <topic> <payload>`.

use async_trait::async_trait;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout,
};

use super::{InboundMessage, Publisher, Subscription, TransportError};

pub struct LinePublisher<W> {
    writer: W,
}

pub struct LineSubscription<R> {
    lines: Lines<R>,
}

/// Transport over the process's stdin and stdout.
pub fn stdio_transport() -> (LinePublisher<Stdout>, LineSubscription<BufReader<Stdin>>) {
    (
        LinePublisher::new(tokio::io::stdout()),
        LineSubscription::new(BufReader::new(tokio::io::stdin())),
    )
}

impl<W> LinePublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    async fn write_line(&mut self, line: String) -> Result<(), TransportError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

impl<R> LineSubscription<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

/// Split `<topic> <payload>`. A line without a space is a topic with an empty payload.
pub fn parse_line(line: &str) -> Option<InboundMessage> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let (topic, payload) = line.split_once(' ').unwrap_or((line, ""));
    Some(InboundMessage::new(topic, payload))
}

#[async_trait]
impl<W> Publisher for LinePublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn subscribe(&mut self, topic: &str) -> Result<(), TransportError> {
        self.write_line(format!("SUB {topic}\n")).await
    }

    async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), TransportError> {
        // One message per line.
        let payload = payload.replace(['\r', '\n'], " ");
        self.write_line(format!("PUB {topic} {payload}\n")).await
    }
}

#[async_trait]
impl<R> Subscription for LineSubscription<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_message(&mut self) -> Result<Option<InboundMessage>, TransportError> {
        while let Some(line) = self.lines.next_line().await? {
            if let Some(message) = parse_line(&line) {
                return Ok(Some(message));
            }
        }
        Ok(None)
    }
}
