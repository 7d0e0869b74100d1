//! Terminal LazyBlocks runner (default binary).
//!
//! Fixed-rate loop: poll keys until the next update, apply queued intents,
//! persist score changes, then redraw the rows that changed.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use lazy_blocks::audio::{CuePlayer, SoundCue, TerminalCues};
use lazy_blocks::config::Config;
use lazy_blocks::core::{BoardEngine, GameSnapshot};
use lazy_blocks::input::{map_key, should_quit, HeldKeys};
use lazy_blocks::logging;
use lazy_blocks::scores::{ScoreStore, LEADERBOARD_SIZE};
use lazy_blocks::term::{FrameBuffer, GameView, Terminal, Viewport};
use lazy_blocks::types::Intent;

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(&config)?;

    let mut store = ScoreStore::load(&config.scores_path)?;

    let mut term = Terminal::new();
    term.enter()?;
    let result = run(&config, &mut term, &mut store);
    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    print_leaderboard(&store);
    Ok(())
}

fn run(config: &Config, term: &mut Terminal, store: &mut ScoreStore) -> Result<()> {
    let mut engine = BoardEngine::new(config.engine);
    info!(
        seed = config.engine.seed,
        game_id = %engine.session().id(),
        "game started"
    );

    let view = GameView::default();
    let mut held = HeldKeys::new();
    let mut cues = TerminalCues::new(io::stdout(), config.bell);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            break;
                        }
                        let intent = map_key(key).filter(|i| {
                            // Auto-repeat of one-shot keys is ignored.
                            key.kind == KeyEventKind::Press || i.is_held()
                        });
                        if let Some(intent) = intent.and_then(|i| held.press(i)) {
                            if intent == Intent::Reset {
                                held.reset();
                                persist(store, &config.player, engine.final_record());
                            }
                            engine.enqueue(intent);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(intent) = map_key(key) {
                            held.release(intent);
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for intent in held.update(config.tick_ms) {
                engine.enqueue(intent);
            }
            engine.tick(config.tick_ms);

            for cue in engine.drain_events().filter_map(SoundCue::for_event) {
                if let Err(err) = cues.play(cue) {
                    warn!(%err, asset = cue.asset(), "failed to play cue");
                }
            }
            for record in engine.drain_score_records() {
                persist(store, &config.player, record);
            }
        }
    }

    persist(store, &config.player, engine.final_record());
    info!(game_id = %engine.session().id(), score = engine.score(), "quit");
    Ok(())
}

/// Score writes never stop the game.
fn persist(store: &mut ScoreStore, player: &str, record: lazy_blocks::core::ScoreRecord) {
    if let Err(err) = store.record(player, &record) {
        warn!(error = %format!("{err:#}"), path = %store.path().display(), "failed to save score");
    }
}

fn print_leaderboard(store: &ScoreStore) {
    let best = store.leaderboard(LEADERBOARD_SIZE);
    if best.is_empty() {
        return;
    }
    println!("{:<4}{:<16}{:>6}  {}", "#", "PLAYER", "SCORE", "DATE");
    for (rank, row) in best.iter().enumerate() {
        println!(
            "{:<4}{:<16}{:>6}  {}",
            rank + 1,
            row.player,
            row.score,
            row.date.format("%Y-%m-%d %H:%M")
        );
    }
}
