use coinrun_core::{Cell, Coord, Snapshot, WorldModel};

fn snapshot_at(row: i32, col: i32) -> Snapshot {
    Snapshot::at(Coord::new(row, col))
}

#[test]
fn update_marks_player_obstacles_and_coins() {
    let mut snap = snapshot_at(4, 4);
    snap.walls = vec![Coord::new(3, 4)];
    snap.teammate_positions = vec![Coord::new(5, 5)];
    snap.enemy_positions = vec![Coord::new(4, 2)];
    snap.coin2 = vec![Coord::new(6, 6)];

    let mut world = WorldModel::new();
    world.update(&snap);

    assert_eq!(world.cell(Coord::new(4, 4)), Some(Cell::Player));
    assert_eq!(world.cell(Coord::new(3, 4)), Some(Cell::Obstacle));
    assert_eq!(world.cell(Coord::new(5, 5)), Some(Cell::Obstacle));
    assert_eq!(world.cell(Coord::new(4, 2)), Some(Cell::Obstacle));
    assert_eq!(world.cell(Coord::new(6, 6)), Some(Cell::Coin));
    assert_eq!(world.cell(Coord::new(2, 2)), Some(Cell::Unknown));
}

#[test]
fn coin_overwrites_obstacle_at_same_square() {
    let mut snap = snapshot_at(1, 1);
    snap.walls = vec![Coord::new(1, 2)];
    snap.coin3 = vec![Coord::new(1, 2)];

    let mut world = WorldModel::new();
    world.update(&snap);

    assert_eq!(world.cell(Coord::new(1, 2)), Some(Cell::Coin));
}

#[test]
fn update_is_idempotent() {
    let mut snap = snapshot_at(7, 2);
    snap.walls = vec![Coord::new(6, 2), Coord::new(8, 3)];
    snap.coin1 = vec![Coord::new(9, 0)];

    let mut once = WorldModel::new();
    once.update(&snap);
    let mut twice = once.clone();
    twice.update(&snap);

    assert_eq!(once, twice);
}

#[test]
fn cells_outside_window_keep_stale_values() {
    let mut first = snapshot_at(1, 1);
    first.coin1 = vec![Coord::new(0, 0)];
    first.walls = vec![Coord::new(2, 2)];

    let mut world = WorldModel::new();
    world.update(&first);

    // Far away: (0,0) and (2,2) are outside the new window.
    world.update(&snapshot_at(8, 8));

    assert_eq!(world.cell(Coord::new(0, 0)), Some(Cell::Coin));
    assert_eq!(world.cell(Coord::new(2, 2)), Some(Cell::Obstacle));
    assert_eq!(world.cell(Coord::new(1, 1)), Some(Cell::Player));
    assert_eq!(world.cell(Coord::new(8, 8)), Some(Cell::Player));
}

#[test]
fn window_is_reset_before_writes() {
    let mut first = snapshot_at(5, 5);
    first.coin1 = vec![Coord::new(5, 7)];
    first.walls = vec![Coord::new(3, 3)];

    let mut world = WorldModel::new();
    world.update(&first);

    // Coin collected and wall no longer reported: the window forgets both.
    world.update(&snapshot_at(5, 6));

    assert_eq!(world.cell(Coord::new(5, 7)), Some(Cell::Unknown));
    assert_eq!(world.cell(Coord::new(3, 3)), Some(Cell::Obstacle));
    assert_eq!(world.cell(Coord::new(5, 5)), Some(Cell::Unknown));
    assert_eq!(world.cell(Coord::new(5, 6)), Some(Cell::Player));
}

#[test]
fn window_includes_far_edge_row_and_column() {
    let mut seed = snapshot_at(0, 0);
    seed.walls = vec![Coord::new(6, 6)];
    let mut world = WorldModel::new();
    world.update(&seed);

    world.update(&snapshot_at(4, 4));

    assert_eq!(world.cell(Coord::new(6, 6)), Some(Cell::Unknown));
}

#[test]
fn off_board_entries_are_skipped() {
    let mut snap = snapshot_at(0, 0);
    snap.walls = vec![Coord::new(-1, 0), Coord::new(0, 10)];
    snap.coin1 = vec![Coord::new(12, 12)];

    let mut world = WorldModel::new();
    world.update(&snap);

    assert_eq!(world.grid().find(Cell::Obstacle).count(), 0);
    assert_eq!(world.grid().find(Cell::Coin).count(), 0);
}

#[test]
fn validate_rejects_position_off_board() {
    assert!(snapshot_at(0, 9).validate().is_ok());
    assert!(snapshot_at(10, 0).validate().is_err());
    assert!(snapshot_at(0, -1).validate().is_err());
}
