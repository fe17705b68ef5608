use coinrun_core::{Cell, Coord, Direction, Grid};
use coinrun_nav::nearest_target;

fn grid_with(player: Coord, cells: &[(i32, i32, Cell)]) -> Grid {
    let mut grid = Grid::new();
    grid.set(player, Cell::Player);
    for &(row, col, cell) in cells {
        grid.set(Coord::new(row, col), cell);
    }
    grid
}

#[test]
fn straight_line_coin_to_the_right() {
    let start = Coord::new(3, 3);
    let grid = grid_with(start, &[(3, 5, Cell::Coin)]);

    let route = nearest_target(&grid, start).expect("coin reachable");
    assert_eq!(route.first_step, Direction::Right);
    assert_eq!(route.target, Coord::new(3, 5));
    assert_eq!(route.steps(), 2);
}

#[test]
fn equidistant_coins_prefer_search_order() {
    let start = Coord::new(5, 5);

    // Up beats Down.
    let grid = grid_with(start, &[(3, 5, Cell::Coin), (7, 5, Cell::Coin)]);
    assert_eq!(
        nearest_target(&grid, start).map(|r| r.first_step),
        Some(Direction::Up)
    );

    // Down beats Left and Right.
    let grid = grid_with(
        start,
        &[(5, 3, Cell::Coin), (7, 5, Cell::Coin), (5, 7, Cell::Coin)],
    );
    assert_eq!(
        nearest_target(&grid, start).map(|r| r.first_step),
        Some(Direction::Down)
    );

    // Left beats Right.
    let grid = grid_with(start, &[(5, 3, Cell::Coin), (5, 7, Cell::Coin)]);
    assert_eq!(
        nearest_target(&grid, start).map(|r| r.first_step),
        Some(Direction::Left)
    );
}

#[test]
fn closer_coin_wins_over_search_order() {
    let start = Coord::new(5, 5);
    let grid = grid_with(start, &[(2, 5, Cell::Coin), (5, 7, Cell::Coin)]);

    let route = nearest_target(&grid, start).expect("route");
    assert_eq!(route.first_step, Direction::Right);
    assert_eq!(route.target, Coord::new(5, 7));
}

#[test]
fn routes_around_walls() {
    // Wall directly between player and coin, gap below.
    let start = Coord::new(2, 2);
    let grid = grid_with(
        start,
        &[
            (1, 3, Cell::Obstacle),
            (2, 3, Cell::Obstacle),
            (2, 4, Cell::Coin),
        ],
    );

    let route = nearest_target(&grid, start).expect("route around wall");
    assert_eq!(route.first_step, Direction::Down);
    assert_eq!(route.steps(), 4);
    assert_eq!(
        route.path,
        vec![
            Coord::new(3, 2),
            Coord::new(3, 3),
            Coord::new(3, 4),
            Coord::new(2, 4)
        ]
    );
}

#[test]
fn unknown_cells_are_traversable() {
    // Every cell between start and coin is Unknown.
    let start = Coord::new(0, 0);
    let grid = grid_with(start, &[(9, 9, Cell::Coin)]);

    let route = nearest_target(&grid, start).expect("route through unknown");
    assert_eq!(route.steps(), 18);
    assert_eq!(route.first_step, Direction::Down);
}

#[test]
fn enclosed_coin_is_unreachable() {
    let start = Coord::new(0, 0);
    let grid = grid_with(
        start,
        &[
            (4, 5, Cell::Obstacle),
            (6, 5, Cell::Obstacle),
            (5, 4, Cell::Obstacle),
            (5, 6, Cell::Obstacle),
            (5, 5, Cell::Coin),
        ],
    );

    assert_eq!(nearest_target(&grid, start), None);
}

#[test]
fn no_coin_means_no_route() {
    let start = Coord::new(4, 4);
    let grid = grid_with(start, &[(4, 5, Cell::Obstacle)]);
    assert_eq!(nearest_target(&grid, start), None);
}

#[test]
fn first_step_starts_a_shortest_path() {
    let start = Coord::new(0, 0);
    let mut cells = Vec::new();
    // Column wall with a single gap at row 8.
    for row in 0..10 {
        if row != 8 {
            cells.push((row, 4, Cell::Obstacle));
        }
    }
    cells.push((0, 6, Cell::Coin));
    let grid = grid_with(start, &cells);

    let route = nearest_target(&grid, start).expect("route through gap");
    // Down 8, right 6, up 8.
    assert_eq!(route.steps(), 22);
    assert_eq!(route.first_step, Direction::Down);
    assert!(route.path.iter().all(|c| grid.is_open(*c)));
}
