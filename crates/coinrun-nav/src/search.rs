use std::collections::VecDeque;

use coinrun_core::{Coord, Direction, Grid};

/// Shortest route from the start square to the nearest target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// The single move out of the start square.
    pub first_step: Direction,
    pub target: Coord,
    /// Squares visited after the start, ending at `target`.
    pub path: Vec<Coord>,
}

impl Route {
    /// Path length in moves.
    pub fn steps(&self) -> usize {
        self.path.len()
    }
}

/// Breadth-first search from `start` to the closest `Coin` cell.
///
/// Neighbours are expanded in `Direction::SEARCH_ORDER`, so among equally near targets the one
/// that order reaches first wins. Obstacles and off-board squares are never entered. The start
/// square itself is never a target. Returns `None` when the reachable region holds no coin.
pub fn nearest_target(grid: &Grid, start: Coord) -> Option<Route> {
    let start_idx = Grid::index(start)?;

    let mut came_from: Vec<Option<usize>> = vec![None; grid.len()];
    let mut seen = vec![false; grid.len()];
    let mut frontier = VecDeque::with_capacity(grid.len());

    seen[start_idx] = true;
    frontier.push_back(start_idx);

    while let Some(current) = frontier.pop_front() {
        let cell = Grid::coord_at(current);
        if current != start_idx && grid.get(cell).is_some_and(|c| c.is_target()) {
            return route_to(&came_from, start_idx, current);
        }

        for dir in Direction::SEARCH_ORDER {
            let next = cell.step(dir);
            let Some(next_idx) = Grid::index(next) else {
                continue;
            };
            if seen[next_idx] || !grid.is_open(next) {
                continue;
            }
            seen[next_idx] = true;
            came_from[next_idx] = Some(current);
            frontier.push_back(next_idx);
        }
    }

    None
}

fn route_to(came_from: &[Option<usize>], start: usize, goal: usize) -> Option<Route> {
    let mut path = vec![Grid::coord_at(goal)];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        if prev == start {
            break;
        }
        current = prev;
        path.push(Grid::coord_at(current));
    }
    path.reverse();

    let origin = Grid::coord_at(start);
    let first = *path.first()?;
    let first_step = Direction::from_delta(first.row - origin.row, first.col - origin.col)?;

    Some(Route {
        first_step,
        target: Grid::coord_at(goal),
        path,
    })
}

#[cfg(test)]
mod tests {
    use coinrun_core::Cell;

    use super::*;

    #[test]
    fn adjacent_coin_is_one_step() {
        let mut grid = Grid::new();
        grid.set(Coord::new(4, 4), Cell::Player);
        grid.set(Coord::new(5, 4), Cell::Coin);

        let route = nearest_target(&grid, Coord::new(4, 4)).expect("route");
        assert_eq!(route.first_step, Direction::Down);
        assert_eq!(route.steps(), 1);
        assert_eq!(route.path, vec![Coord::new(5, 4)]);
    }

    #[test]
    fn coin_on_start_square_is_ignored() {
        let mut grid = Grid::new();
        grid.set(Coord::new(2, 2), Cell::Coin);

        assert_eq!(nearest_target(&grid, Coord::new(2, 2)), None);
    }

    #[test]
    fn off_board_start_has_no_route() {
        let mut grid = Grid::new();
        grid.set(Coord::new(0, 0), Cell::Coin);

        assert_eq!(nearest_target(&grid, Coord::new(-1, 0)), None);
    }
}
