use crate::{Coord, Direction, Snapshot, WorldModel};

/// Why a policy picked its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Heading for a visible target `steps` moves away.
    Pursue { target: Coord, steps: usize },
    /// No target reachable; exploring along the remembered heading.
    Explore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub kind: DecisionKind,
}

impl Decision {
    pub fn pursue(direction: Direction, target: Coord, steps: usize) -> Self {
        Self {
            direction,
            kind: DecisionKind::Pursue { target, steps },
        }
    }

    pub fn explore(direction: Direction) -> Self {
        Self {
            direction,
            kind: DecisionKind::Explore,
        }
    }
}

/// Move selection strategy plugged into the turn loop.
///
/// `decide` returns `None` when there is no legal move from `position`.
pub trait MovePolicy: Send + 'static {
    fn decide(&mut self, world: &WorldModel, position: Coord) -> Option<Decision>;

    /// Refresh `world` from `snapshot`, then decide from the reported position.
    fn make_move(&mut self, world: &mut WorldModel, snapshot: &Snapshot) -> Option<Decision> {
        world.update(snapshot);
        self.decide(world, snapshot.current_position)
    }
}

impl<P: MovePolicy + ?Sized> MovePolicy for Box<P> {
    fn decide(&mut self, world: &WorldModel, position: Coord) -> Option<Decision> {
        (**self).decide(world, position)
    }
}
