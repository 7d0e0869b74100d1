//! Input pipeline tests - key events through held-key repeat into the engine queue

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use lazy_blocks::core::{BoardEngine, EngineConfig};
use lazy_blocks::input::{map_key, HeldKeys};
use lazy_blocks::types::{Intent, ShapeId, TICK_MS};

fn press(keys: &mut HeldKeys, engine: &mut BoardEngine, key: KeyEvent) {
    if let Some(intent) = map_key(key).and_then(|i| keys.press(i)) {
        engine.enqueue(intent);
    }
}

#[test]
fn test_held_left_keeps_moving_every_tick() {
    let mut engine = BoardEngine::new(EngineConfig::with_seed(10));
    engine.queue_next(ShapeId::O);
    engine.spawn();
    let mut keys = HeldKeys::new().with_key_release_timeout_ms(10_000);

    press(&mut keys, &mut engine, KeyEvent::from(KeyCode::Left));
    engine.tick(TICK_MS);
    assert_eq!(engine.active().unwrap().anchor.x, 3);

    // One update to pass the hold delay, then one step per update.
    for expected in [3, 2, 1, 0, 0] {
        for intent in keys.update(TICK_MS) {
            engine.enqueue(intent);
        }
        engine.tick(TICK_MS);
        assert_eq!(engine.active().unwrap().anchor.x, expected);
    }
}

#[test]
fn test_hard_drop_key_fires_once() {
    let mut engine = BoardEngine::new(EngineConfig::with_seed(10));
    let mut keys = HeldKeys::new().with_key_release_timeout_ms(10_000);

    press(&mut keys, &mut engine, KeyEvent::from(KeyCode::Char(' ')));
    engine.tick(TICK_MS);
    assert_eq!(engine.grid().occupied_count(), 4);

    for _ in 0..5 {
        for intent in keys.update(TICK_MS) {
            engine.enqueue(intent);
        }
        engine.tick(TICK_MS);
    }
    assert_eq!(engine.grid().occupied_count(), 4);
}

#[test]
fn test_undo_chord_reaches_engine() {
    let mut engine = BoardEngine::new(EngineConfig::with_seed(10));
    let mut keys = HeldKeys::new();
    engine.apply(Intent::HardDrop);

    press(
        &mut keys,
        &mut engine,
        KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL),
    );
    assert_eq!(engine.pending_intents(), 1);
    assert_eq!(engine.tick(TICK_MS), 1);
    assert_eq!(engine.grid().occupied_count(), 0);
}
