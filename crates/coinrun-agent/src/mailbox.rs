//! Single-slot handoff between the inbound signal pump and the decision loop.
//!
//! The pump owns a [`TurnSignals`] and rewrites one shared [`TurnStatus`]; the decision loop owns
//! a [`TurnWatcher`] and blocks until a new turn or a stop becomes visible. A snapshot and its
//! turn number are written in the same modification, so a ready turn always carries its
//! snapshot. Only the latest snapshot is kept.

use std::sync::Arc;

use coinrun_core::Snapshot;
use tokio::sync::watch;
use tracing::debug;

use crate::Signal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Lobby announced that every coin was collected.
    GameOver,
    /// `STOP` on the start topic.
    StopSignal,
    /// Payload containing "Error".
    ServerError(String),
    MalformedSnapshot(String),
    TransportClosed,
}

impl StopReason {
    /// Normal end of a game, as opposed to a failure.
    pub fn is_clean(&self) -> bool {
        matches!(self, StopReason::GameOver | StopReason::StopSignal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    AwaitingStart,
    Active,
    Stopped(StopReason),
}

impl TurnState {
    pub fn is_stopped(&self) -> bool {
        matches!(self, TurnState::Stopped(_))
    }
}

/// Contents of the mailbox slot.
#[derive(Debug, Clone, Default)]
pub struct TurnStatus {
    pub state: TurnState,
    pub snapshot: Option<Arc<Snapshot>>,
    /// Incremented on every delivered snapshot. A turn is ready while this is ahead of the
    /// watcher's last consumed turn.
    pub turn: u64,
}

/// Writer side, driven by inbound signals.
#[derive(Debug)]
pub struct TurnSignals {
    tx: watch::Sender<TurnStatus>,
}

/// Reader side, owned by the decision loop.
#[derive(Debug)]
pub struct TurnWatcher {
    rx: watch::Receiver<TurnStatus>,
    consumed: u64,
}

/// What the decision loop should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextTurn {
    Play { turn: u64, snapshot: Arc<Snapshot> },
    Stopped(StopReason),
}

pub fn turn_mailbox() -> (TurnSignals, TurnWatcher) {
    let (tx, rx) = watch::channel(TurnStatus::default());
    (TurnSignals { tx }, TurnWatcher { rx, consumed: 0 })
}

impl TurnSignals {
    pub fn state(&self) -> TurnState {
        self.tx.borrow().state.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.tx.borrow().state.is_stopped()
    }

    /// `AwaitingStart` becomes `Active`. No effect in any other state.
    pub fn start(&self) {
        self.tx.send_if_modified(|status| {
            if status.state != TurnState::AwaitingStart {
                return false;
            }
            status.state = TurnState::Active;
            true
        });
    }

    /// Store the latest snapshot and mark a turn ready. Ignored once stopped.
    pub fn deliver(&self, snapshot: Snapshot) {
        self.tx.send_if_modified(|status| {
            if status.state.is_stopped() {
                return false;
            }
            status.snapshot = Some(Arc::new(snapshot));
            status.turn += 1;
            true
        });
    }

    /// Enter the terminal state. The first reason wins.
    pub fn stop(&self, reason: StopReason) {
        self.tx.send_if_modified(|status| {
            if status.state.is_stopped() {
                return false;
            }
            status.state = TurnState::Stopped(reason);
            true
        });
    }

    /// Apply one classified inbound signal.
    pub fn apply(&self, signal: Signal) {
        match signal {
            Signal::Fatal(payload) => self.stop(StopReason::ServerError(payload)),
            Signal::GameOver => self.stop(StopReason::GameOver),
            Signal::Stop => self.stop(StopReason::StopSignal),
            Signal::Start => self.start(),
            Signal::Turn(snapshot) => self.deliver(snapshot),
            Signal::Lobby(text) => debug!(message = %text, "Lobby message"),
            Signal::Scores(text) => debug!(scores = %text, "Scores update"),
            Signal::Ignored => {}
        }
    }
}

impl TurnWatcher {
    /// Last turn number handed to the decision loop.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Wait for the next unconsumed turn while active, or for the stop.
    ///
    /// A stop always takes precedence over a pending turn. Cancel-safe: a turn is only marked
    /// consumed when it is returned. If the writer side is dropped without stopping, this
    /// reports `TransportClosed`.
    pub async fn next(&mut self) -> NextTurn {
        loop {
            {
                let status = self.rx.borrow_and_update();
                match &status.state {
                    TurnState::Stopped(reason) => return NextTurn::Stopped(reason.clone()),
                    TurnState::Active if status.turn > self.consumed => {
                        if let Some(snapshot) = &status.snapshot {
                            self.consumed = status.turn;
                            return NextTurn::Play {
                                turn: status.turn,
                                snapshot: Arc::clone(snapshot),
                            };
                        }
                    }
                    _ => {}
                }
            }

            if self.rx.changed().await.is_err() {
                return NextTurn::Stopped(StopReason::TransportClosed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use coinrun_core::Coord;

    use super::*;

    #[tokio::test]
    async fn snapshot_before_start_is_played_once_active() {
        let (signals, mut watcher) = turn_mailbox();
        signals.deliver(Snapshot::at(Coord::new(1, 1)));
        assert_eq!(signals.state(), TurnState::AwaitingStart);

        signals.start();
        match watcher.next().await {
            NextTurn::Play { turn, snapshot } => {
                assert_eq!(turn, 1);
                assert_eq!(snapshot.current_position, Coord::new(1, 1));
            }
            other => panic!("expected a turn, got {other:?}"),
        }
        assert_eq!(watcher.consumed(), 1);
    }

    #[tokio::test]
    async fn only_latest_snapshot_is_kept() {
        let (signals, mut watcher) = turn_mailbox();
        signals.start();
        signals.deliver(Snapshot::at(Coord::new(0, 0)));
        signals.deliver(Snapshot::at(Coord::new(0, 1)));

        match watcher.next().await {
            NextTurn::Play { turn, snapshot } => {
                assert_eq!(turn, 2);
                assert_eq!(snapshot.current_position, Coord::new(0, 1));
            }
            other => panic!("expected a turn, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stop_takes_precedence_over_pending_turn() {
        let (signals, mut watcher) = turn_mailbox();
        signals.start();
        signals.deliver(Snapshot::at(Coord::new(3, 3)));
        signals.apply(Signal::Fatal("Error: bad move".into()));

        assert_eq!(
            watcher.next().await,
            NextTurn::Stopped(StopReason::ServerError("Error: bad move".into()))
        );
    }

    #[tokio::test]
    async fn stopped_is_terminal() {
        let (signals, _watcher) = turn_mailbox();
        signals.stop(StopReason::GameOver);
        signals.start();
        signals.deliver(Snapshot::at(Coord::new(0, 0)));
        signals.stop(StopReason::TransportClosed);

        assert_eq!(signals.state(), TurnState::Stopped(StopReason::GameOver));
    }

    #[tokio::test]
    async fn dropped_writer_reads_as_transport_closed() {
        let (signals, mut watcher) = turn_mailbox();
        drop(signals);
        assert_eq!(
            watcher.next().await,
            NextTurn::Stopped(StopReason::TransportClosed)
        );
    }

    #[tokio::test]
    async fn watcher_wakes_on_later_delivery() {
        let (signals, mut watcher) = turn_mailbox();
        signals.start();

        let handle = tokio::spawn(async move { watcher.next().await });
        tokio::task::yield_now().await;
        signals.deliver(Snapshot::at(Coord::new(4, 4)));

        match handle.await.unwrap() {
            NextTurn::Play { turn, .. } => assert_eq!(turn, 1),
            other => panic!("expected a turn, got {other:?}"),
        }
    }
}
