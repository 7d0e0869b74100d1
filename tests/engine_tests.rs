//! Board engine scenarios - spawn, movement, hard drop, clearing, swap, game over

use lazy_blocks::core::piece::can_place;
use lazy_blocks::core::{
    Anchor, BoardEngine, EngineConfig, Grid, Phase, Piece, PlacementId, SpawnResult,
};
use lazy_blocks::types::{ColorId, GameEvent, Intent, ShapeId, GRID_HEIGHT, GRID_WIDTH};

fn engine_on(grid: Grid, shape: ShapeId) -> BoardEngine {
    let mut engine = BoardEngine::from_grid(EngineConfig::with_seed(12345), grid);
    engine.queue_next(shape);
    engine.spawn();
    engine.drain_events().for_each(drop);
    engine
}

fn fill_row_except(grid: &mut Grid, y: i8, gaps: &[i8]) {
    let cells: Vec<(i8, i8)> = (0..GRID_WIDTH as i8)
        .filter(|x| !gaps.contains(x))
        .map(|x| (x, y))
        .collect();
    grid.place(&cells, ColorId::Blue, PlacementId::new(500), ShapeId::J);
}

#[test]
fn test_o_spawns_top_centre_and_lands_on_floor() {
    let mut engine = engine_on(Grid::new(), ShapeId::O);
    let active = engine.active().unwrap();
    assert_eq!(active.anchor, Anchor::new(4, GRID_HEIGHT as i8 - 1));
    assert!(engine.can_place(&active.matrix, active.anchor));

    let outcome = engine.hard_drop().unwrap();
    assert_eq!(outcome.rows_cleared, 0);

    let grid = engine.grid();
    assert_eq!(grid.occupied_count(), 4);
    for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
        let block = grid.get(x, y).flatten().unwrap();
        assert_eq!(block.shape, ShapeId::O);
        assert_eq!(block.color, ColorId::Green);
        assert_eq!(block.placement, outcome.placement);
    }
}

#[test]
fn test_filling_the_gap_clears_one_row() {
    let mut grid = Grid::new();
    fill_row_except(&mut grid, 0, &[9]);
    grid.place(&[(0, 1), (3, 1)], ColorId::Red, PlacementId::new(501), ShapeId::Z);

    let mut engine = engine_on(grid, ShapeId::I);
    engine.apply(Intent::Rotate);
    // Vertical I in column 3 + 6 = 9.
    for _ in 0..6 {
        assert!(engine.apply(Intent::MoveRight));
    }
    let score_before = engine.score();

    let outcome = engine.hard_drop().unwrap();
    assert_eq!(outcome.rows_cleared, 1);
    assert_eq!(engine.score(), score_before + 1);

    // Old row 1 shifted down into row 0, along with the rest of the I.
    let grid = engine.grid();
    assert!(grid.is_occupied(0, 0));
    assert!(grid.is_occupied(3, 0));
    assert!(grid.is_occupied(9, 0));
    assert!(grid.is_occupied(9, 2));
    assert!(!grid.is_occupied(9, 3));
    assert_eq!(grid.occupied_count(), 2 + 3);

    let events: Vec<_> = engine.drain_events().collect();
    assert!(events.contains(&GameEvent::Dropped));
    assert_eq!(events.iter().filter(|e| **e == GameEvent::RowCleared).count(), 1);
}

#[test]
fn test_two_rows_at_once_score_two_separate_points() {
    let mut grid = Grid::new();
    fill_row_except(&mut grid, 0, &[4, 5]);
    fill_row_except(&mut grid, 1, &[4, 5]);

    let mut engine = engine_on(grid, ShapeId::O);
    let outcome = engine.hard_drop().unwrap();
    assert_eq!(outcome.rows_cleared, 2);
    assert_eq!(engine.score(), 2);
    assert_eq!(engine.grid().occupied_count(), 0);

    let records: Vec<_> = engine.drain_score_records().collect();
    assert_eq!(records.iter().map(|r| r.score).collect::<Vec<_>>(), vec![1, 2]);
    assert!(records.iter().all(|r| r.game_id == engine.session().id()));

    let cleared = engine
        .drain_events()
        .filter(|e| *e == GameEvent::RowCleared)
        .count();
    assert_eq!(cleared, 2);
}

#[test]
fn test_rotating_i_against_left_wall_near_floor_is_rejected() {
    let mut engine = engine_on(Grid::new(), ShapeId::I);
    for _ in 0..3 {
        engine.apply(Intent::MoveLeft);
    }
    for _ in 0..(GRID_HEIGHT - 2) {
        engine.apply(Intent::SoftDrop);
    }
    let before = engine.active().unwrap();
    assert_eq!(before.anchor, Anchor::new(0, 1));
    engine.drain_events().for_each(drop);

    // Vertical I would reach y = -2.
    assert!(!engine.try_rotate());
    assert_eq!(engine.active().unwrap(), before);
    assert_eq!(engine.drain_events().count(), 0);
}

#[test]
fn test_rotating_vertical_i_at_right_wall_is_rejected() {
    let mut engine = engine_on(Grid::new(), ShapeId::I);
    engine.apply(Intent::SoftDrop);
    engine.apply(Intent::SoftDrop);
    engine.apply(Intent::SoftDrop);
    assert!(engine.try_rotate());
    while engine.try_move(1, 0) {}
    let before = engine.active().unwrap();
    assert_eq!(before.anchor.x, GRID_WIDTH as i8 - 1);

    // Horizontal I would span x = 9..12.
    assert!(!engine.try_rotate());
    assert_eq!(engine.active().unwrap(), before);
}

#[test]
fn test_blocked_rotation_has_no_kick() {
    let mut grid = Grid::new();
    // Rotated J would need (6, 19).
    grid.place(&[(6, 19)], ColorId::Red, PlacementId::new(9), ShapeId::I);
    let mut engine = engine_on(grid, ShapeId::J);
    let before = engine.active().unwrap();

    assert!(!engine.try_rotate());
    assert_eq!(engine.active().unwrap(), before);
}

#[test]
fn test_hard_drop_never_overlaps_settled_cells() {
    let mut grid = Grid::new();
    grid.place(&[(4, 5)], ColorId::Red, PlacementId::new(9), ShapeId::I);
    let mut engine = engine_on(grid, ShapeId::T);

    engine.hard_drop().unwrap();
    // T's left foot rests on (4, 5).
    assert!(engine.grid().is_occupied(4, 6));
    assert!(engine.grid().is_occupied(5, 7));
    assert_eq!(engine.grid().occupied_count(), 5);
}

/// Swap recentres the helper without checking that it fits (free swap rule).
#[test]
fn test_swap_skips_placement_check() {
    // Find a seed whose helper covers cells the active piece does not.
    let (seed, blocking) = (1..200)
        .find_map(|seed| {
            let probe = BoardEngine::new(EngineConfig::with_seed(seed));
            let active = probe.active()?.cells();
            let helper = Piece::at_spawn(probe.helper()?).cells();
            let blocking: Vec<(i8, i8)> = helper
                .iter()
                .copied()
                .filter(|c| !active.contains(c))
                .collect();
            (!blocking.is_empty()).then_some((seed, blocking))
        })
        .expect("some seed draws a helper unlike the active piece");

    let mut grid = Grid::new();
    grid.place(&blocking, ColorId::Red, PlacementId::new(99), ShapeId::I);
    // Same seed, same draws: the active piece still fits, the helper does not.
    let mut engine = BoardEngine::from_grid(EngineConfig::with_seed(seed), grid);
    assert_eq!(engine.phase(), Phase::Falling);
    let swapped_in = Piece::at_spawn(engine.helper().unwrap());
    assert!(!can_place(engine.grid(), &swapped_in.matrix, swapped_in.anchor));

    assert!(engine.swap_helper());
    assert_eq!(engine.active().unwrap(), swapped_in);
    assert_eq!(engine.drain_events().last(), Some(GameEvent::Swapped));
}

#[test]
fn test_swap_twice_restores_active() {
    let mut engine = engine_on(Grid::new(), ShapeId::L);
    engine.apply(Intent::MoveLeft);
    let first = engine.active().unwrap();

    assert!(engine.apply(Intent::SwapHelper));
    assert!(engine.apply(Intent::SwapHelper));

    let back = engine.active().unwrap();
    assert_eq!(back.shape, first.shape);
    assert_eq!(back.matrix, first.matrix);
    assert_eq!(back.anchor, Anchor::spawn(&first.matrix));
}

#[test]
fn test_spawn_collision_is_game_over() {
    let mut grid = Grid::new();
    fill_row_except(&mut grid, GRID_HEIGHT as i8 - 1, &[0]);
    let mut engine = BoardEngine::from_grid(EngineConfig::with_seed(3), grid);

    assert_eq!(engine.phase(), Phase::GameOver);
    assert!(engine.is_game_over());
    assert!(engine.session().game_over());
    assert!(engine.snapshot().game_over);
    assert_eq!(engine.drain_events().collect::<Vec<_>>(), vec![GameEvent::GameOver]);
    assert_eq!(engine.spawn(), SpawnResult::GameOver);
}

#[test]
fn test_game_over_ignores_everything_but_reset() {
    let mut grid = Grid::new();
    fill_row_except(&mut grid, GRID_HEIGHT as i8 - 1, &[]);
    let mut engine = BoardEngine::from_grid(EngineConfig::with_seed(3), grid);
    let frozen = engine.snapshot();

    for intent in [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::Rotate,
        Intent::HardDrop,
        Intent::SwapHelper,
        Intent::Undo,
        Intent::ClearRows,
    ] {
        assert!(!engine.apply(intent), "{:?}", intent);
    }
    assert_eq!(engine.snapshot(), frozen);

    assert!(engine.apply(Intent::Reset));
    assert_eq!(engine.phase(), Phase::Falling);
    assert_eq!(engine.grid().occupied_count(), 0);
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut engine = BoardEngine::new(EngineConfig::with_seed(77));
    let mut drops = 0;
    while !engine.is_game_over() {
        engine.queue_next(ShapeId::O);
        engine.hard_drop();
        drops += 1;
        assert!(drops <= GRID_HEIGHT as usize, "column never filled");
    }
    assert_eq!(engine.phase(), Phase::GameOver);
}

#[test]
fn test_same_seed_same_shapes() {
    let mut a = BoardEngine::new(EngineConfig::with_seed(2024));
    let mut b = BoardEngine::new(EngineConfig::with_seed(2024));
    for _ in 0..30 {
        assert_eq!(a.active().map(|p| p.shape), b.active().map(|p| p.shape));
        assert_eq!(a.next(), b.next());
        assert_eq!(a.helper(), b.helper());
        a.hard_drop();
        b.hard_drop();
        if a.is_game_over() {
            break;
        }
    }
}
