use coinrun_core::{Coord, Decision, Direction, MovePolicy, WorldModel};

use crate::{nearest_target, WallFollower};

/// Default policy: chase the nearest reachable coin, otherwise follow walls.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    follower: WallFollower,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the fallback with a specific heading instead of `Up`.
    pub fn with_heading(heading: Direction) -> Self {
        Self {
            follower: WallFollower::new(heading),
        }
    }

    pub fn heading(&self) -> Direction {
        self.follower.heading()
    }

    /// First step toward the nearest reachable coin, if any.
    pub fn decide_move(&self, world: &WorldModel, start: Coord) -> Option<Decision> {
        let route = nearest_target(world.grid(), start)?;
        Some(Decision::pursue(route.first_step, route.target, route.steps()))
    }

    /// Wall-following move. `None` means every neighbour is blocked.
    pub fn fallback_move(&mut self, world: &WorldModel, position: Coord) -> Option<Decision> {
        self.follower
            .next_move(world.grid(), position)
            .map(Decision::explore)
    }
}

impl MovePolicy for Navigator {
    fn decide(&mut self, world: &WorldModel, position: Coord) -> Option<Decision> {
        self.decide_move(world, position)
            .or_else(|| self.fallback_move(world, position))
    }
}
