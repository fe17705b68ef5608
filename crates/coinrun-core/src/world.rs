use crate::{Cell, Coord, Grid, Snapshot, GRID_SIZE};

/// Half-width of the square window refreshed on every snapshot.
pub const DEFAULT_VISION_RADIUS: i32 = 2;

/// The agent's belief about the board.
///
/// Only the window around the current position is rewritten on each update. Cells outside it
/// keep whatever they last held, so the model can carry stale coins and walls from earlier turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldModel {
    grid: Grid,
    vision_radius: i32,
}

impl Default for WorldModel {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldModel {
    pub fn new() -> Self {
        Self::with_vision_radius(DEFAULT_VISION_RADIUS)
    }

    pub fn with_vision_radius(vision_radius: i32) -> Self {
        Self {
            grid: Grid::new(),
            vision_radius: vision_radius.max(0),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn vision_radius(&self) -> i32 {
        self.vision_radius
    }

    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.grid.get(coord)
    }

    /// Inclusive `(min, max)` corners of the window around `center`, clamped to the board.
    pub fn window(&self, center: Coord) -> (Coord, Coord) {
        let r = self.vision_radius;
        let min = Coord::new((center.row - r).max(0), (center.col - r).max(0));
        let max = Coord::new(
            (center.row + r).min(GRID_SIZE - 1),
            (center.col + r).min(GRID_SIZE - 1),
        );
        (min, max)
    }

    /// Refresh the window around the snapshot's position.
    ///
    /// Writes happen in the order player, obstacles, coins; a later write wins, so a coin that
    /// shares a square with an obstacle stays a coin.
    pub fn update(&mut self, snapshot: &Snapshot) {
        let position = snapshot.current_position;
        let (min, max) = self.window(position);
        for row in min.row..=max.row {
            for col in min.col..=max.col {
                self.grid.set(Coord::new(row, col), Cell::Unknown);
            }
        }

        self.grid.set(position, Cell::Player);
        for coord in snapshot.obstacles() {
            self.grid.set(coord, Cell::Obstacle);
        }
        for coord in snapshot.coins() {
            self.grid.set(coord, Cell::Coin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_clamps_at_board_edges() {
        let world = WorldModel::new();
        assert_eq!(
            world.window(Coord::new(0, 0)),
            (Coord::new(0, 0), Coord::new(2, 2))
        );
        assert_eq!(
            world.window(Coord::new(9, 5)),
            (Coord::new(7, 3), Coord::new(9, 7))
        );
    }

    #[test]
    fn negative_radius_is_treated_as_zero() {
        let world = WorldModel::with_vision_radius(-3);
        assert_eq!(world.vision_radius(), 0);
        assert_eq!(
            world.window(Coord::new(4, 4)),
            (Coord::new(4, 4), Coord::new(4, 4))
        );
    }
}
