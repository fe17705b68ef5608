#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Coord, Grid};

/// One turn's view of the board as reported by the game server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    pub current_position: Coord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Coord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub teammate_positions: Vec<Coord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub teammate_names: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_positions: Vec<Coord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coin1: Vec<Coord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coin2: Vec<Coord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coin3: Vec<Coord>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("current position {0} is off the board")]
    PositionOffBoard(Coord),
}

impl Snapshot {
    pub fn at(position: Coord) -> Self {
        Self {
            current_position: position,
            ..Self::default()
        }
    }

    /// Everything the agent must not walk into: walls, teammates and enemies.
    pub fn obstacles(&self) -> impl Iterator<Item = Coord> + '_ {
        self.walls
            .iter()
            .chain(&self.teammate_positions)
            .chain(&self.enemy_positions)
            .copied()
    }

    /// All coin categories, in category order.
    pub fn coins(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coin1
            .iter()
            .chain(&self.coin2)
            .chain(&self.coin3)
            .copied()
    }

    /// A snapshot is unusable if it places the agent off the board. Other entries that fall off
    /// the board are skipped when the world model is refreshed.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if !Grid::in_bounds(self.current_position) {
            return Err(SnapshotError::PositionOffBoard(self.current_position));
        }
        Ok(())
    }
}
