//! Score file tests - CSV round trip, upsert by game id, leaderboard

use std::fs;
use std::path::PathBuf;

use lazy_blocks::core::{BoardEngine, EngineConfig, GameSession, Grid, PlacementId};
use lazy_blocks::scores::{ScoreStore, LEADERBOARD_SIZE};
use lazy_blocks::types::{ColorId, ShapeId, GRID_WIDTH};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("lazy-blocks-{}", uuid::Uuid::new_v4()))
        .join(name)
}

#[test]
fn test_missing_file_is_empty_store() {
    let store = ScoreStore::load(temp_path("scores.csv")).unwrap();
    assert!(store.rows().is_empty());
    assert!(store.leaderboard(LEADERBOARD_SIZE).is_empty());
}

#[test]
fn test_record_writes_header_and_row() {
    let path = temp_path("scores.csv");
    let mut store = ScoreStore::load(&path).unwrap();
    let session = GameSession::new();

    store.record("Ada", &session.record()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("date,player,gameid,score"));
    let row = lines.next().unwrap();
    assert!(row.contains(",Ada,"));
    assert!(row.ends_with(&format!("{},0", session.id())));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_score_changes_upsert_one_row_per_game() {
    let path = temp_path("scores.csv");
    let mut store = ScoreStore::load(&path).unwrap();

    let mut grid = Grid::new();
    for y in 0..2 {
        let cells: Vec<(i8, i8)> = (0..GRID_WIDTH as i8)
            .filter(|x| !(4..6).contains(x))
            .map(|x| (x, y))
            .collect();
        grid.place(&cells, ColorId::Blue, PlacementId::new(90), ShapeId::J);
    }
    let mut engine = BoardEngine::from_grid(EngineConfig::with_seed(4), grid);
    engine.queue_next(ShapeId::O);
    engine.spawn();
    engine.hard_drop();

    let records: Vec<_> = engine.drain_score_records().collect();
    assert_eq!(records.len(), 2);
    for record in &records {
        store.record("Player", record).unwrap();
    }

    let reloaded = ScoreStore::load(&path).unwrap();
    assert_eq!(reloaded.rows().len(), 1);
    let row = reloaded.get(engine.session().id()).unwrap();
    assert_eq!(row.score, 2);
    assert_eq!(row.player, "Player");
}

#[test]
fn test_leaderboard_across_reload() {
    let path = temp_path("nested/scores.csv");
    let mut store = ScoreStore::load(&path).unwrap();

    for score in [4u32, 12, 0, 7] {
        let mut record = GameSession::new().record();
        record.score = score;
        store.record("P", &record).unwrap();
    }

    let reloaded = ScoreStore::load(&path).unwrap();
    let best: Vec<u32> = reloaded.leaderboard(2).iter().map(|r| r.score).collect();
    assert_eq!(best, vec![12, 7]);
    assert_eq!(reloaded.leaderboard(LEADERBOARD_SIZE).len(), 4);
}

#[test]
fn test_corrupt_file_reports_path() {
    let path = temp_path("scores.csv");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "date,player,gameid,score\nyesterday,P,not-a-uuid,many\n").unwrap();

    let err = ScoreStore::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("scores.csv"));
}
