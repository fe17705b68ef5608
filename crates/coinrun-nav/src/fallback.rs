use coinrun_core::{Coord, Grid, Heading};

/// Keep walking the same way until something is in the way, then turn.
///
/// Turns follow the fixed cycle Up, Left, Down, Right. The heading survives between calls, so the
/// agent sweeps along walls across turns instead of jittering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallFollower {
    heading: Heading,
}

impl WallFollower {
    pub fn new(heading: Heading) -> Self {
        Self { heading }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Rotate until the square ahead is on the board and not an obstacle, then move that way.
    ///
    /// Gives up after a full cycle of four headings and returns `None`; the heading is then back
    /// where it started.
    pub fn next_move(&mut self, grid: &Grid, position: Coord) -> Option<Heading> {
        for _ in 0..4 {
            if grid.is_open(position.step(self.heading)) {
                return Some(self.heading);
            }
            self.heading = self.heading.rotate();
        }
        None
    }
}
