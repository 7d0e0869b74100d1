//! Board engine - the piece lifecycle state machine
//!
//! This module ties the grid, shapes, RNG, placement history and session
//! together. Pieces move only through [`BoardEngine::try_move`],
//! [`BoardEngine::try_rotate`] and [`BoardEngine::hard_drop`], all of which
//! check the same `can_place` predicate.
//!
//! Lifecycle: `Spawning -> Falling -> (lock, row clearing) -> Spawning`, with an
//! absorbing `GameOver` that only [`BoardEngine::reset`] leaves. Lock and row
//! clearing run synchronously inside `hard_drop`, so callers only ever observe
//! `Falling`, `GameOver`, or `Spawning` right after an undo.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::grid::{Grid, PlacementId};
use crate::history::{PlacementHistory, UndoOutcome};
use crate::piece::{can_place, Anchor, Piece, PieceCells, Preview};
use crate::rng::UniformShapes;
use crate::scoring::{remove_lowest_full_row, POINTS_PER_ROW};
use crate::session::{GameSession, ScoreRecord};
use crate::shapes::ShapeMatrix;
use crate::snapshot::GameSnapshot;
use crate::types::{GameEvent, Intent, ShapeId};

/// How the piece descends between player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityPolicy {
    /// Pieces only move down on soft/hard drop intents
    #[default]
    InputDriven,
    /// `tick` also attempts one row down per elapsed interval
    Timed { interval_ms: u32 },
}

/// When full rows are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowClearPolicy {
    /// After every lock
    #[default]
    OnLock,
    /// Only on an explicit `clear_full_rows` / `Intent::ClearRows`
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u32,
    pub gravity: GravityPolicy,
    pub row_clear: RowClearPolicy,
}

impl EngineConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            gravity: GravityPolicy::default(),
            row_clear: RowClearPolicy::default(),
        }
    }
}

/// Observable engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No active piece; `spawn` materialises the next one
    Spawning,
    /// An active piece is in play
    Falling,
    /// Spawn failed; only reset leaves this state
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnResult {
    Ok,
    GameOver,
}

/// Result of a hard drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// Tag written into every cell of the locked piece
    pub placement: PlacementId,
    pub rows_cleared: u32,
    /// Outcome of the spawn that followed the lock
    pub spawn: SpawnResult,
}

/// Owns the grid and the active/next/helper pieces of one game
#[derive(Debug, Clone)]
pub struct BoardEngine {
    config: EngineConfig,
    grid: Grid,
    shapes: UniformShapes,
    history: PlacementHistory,
    session: GameSession,
    active: Option<Piece>,
    next: Option<ShapeId>,
    helper: Option<Preview>,
    phase: Phase,
    intents: VecDeque<Intent>,
    events: Vec<GameEvent>,
    score_records: Vec<ScoreRecord>,
    gravity_timer_ms: u32,
}

impl BoardEngine {
    /// Start a game on an empty grid and spawn the first piece
    pub fn new(config: EngineConfig) -> Self {
        Self::from_grid(config, Grid::new())
    }

    /// Start a game over a prepared grid and spawn the first piece
    ///
    /// Placement ids continue after the highest tag already in `grid`, so undo
    /// never reaches the prepared cells.
    pub fn from_grid(config: EngineConfig, grid: Grid) -> Self {
        let highest = grid
            .iter()
            .filter_map(|(_, _, cell)| cell.map(|block| block.placement))
            .max();
        let mut engine = Self {
            config,
            grid,
            shapes: UniformShapes::new(config.seed),
            history: PlacementHistory::starting_after(highest),
            session: GameSession::new(),
            active: None,
            next: None,
            helper: None,
            phase: Phase::Spawning,
            intents: VecDeque::new(),
            events: Vec::new(),
            score_records: Vec::new(),
            gravity_timer_ms: 0,
        };
        engine.spawn();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<ShapeId> {
        self.next
    }

    pub fn helper(&self) -> Option<Preview> {
        self.helper
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Id of the latest placement still on record
    pub fn last_placement(&self) -> Option<PlacementId> {
        self.history.last()
    }

    /// Whether `matrix` fits at `anchor` on the current grid
    pub fn can_place(&self, matrix: &ShapeMatrix, anchor: Anchor) -> bool {
        can_place(&self.grid, matrix, anchor)
    }

    /// Queue `shape` to be the next piece spawned
    pub fn queue_next(&mut self, shape: ShapeId) {
        self.next = Some(shape);
    }

    /// Spawn the next piece at the top of the grid
    ///
    /// Consumes the queued next shape (or draws one), then draws a fresh helper
    /// and a fresh next. A spawn that does not fit ends the game; the colliding
    /// piece stays visible as the active piece.
    pub fn spawn(&mut self) -> SpawnResult {
        if self.phase == Phase::GameOver {
            return SpawnResult::GameOver;
        }

        let shape = match self.next.take() {
            Some(shape) => shape,
            None => self.shapes.draw(),
        };
        self.helper = Some(Preview::canonical(self.shapes.draw()));
        self.next = Some(self.shapes.draw());

        let piece = Piece::spawn(shape);
        self.active = Some(piece);
        self.gravity_timer_ms = 0;

        if !piece.fits(&self.grid) {
            self.phase = Phase::GameOver;
            self.session.end();
            self.events.push(GameEvent::GameOver);
            info!(
                game_id = %self.session.id(),
                score = self.session.score(),
                "game over"
            );
            return SpawnResult::GameOver;
        }

        self.phase = Phase::Falling;
        debug!(shape = shape.as_str(), next = ?self.next, helper = ?self.helper.map(|h| h.shape), "spawned");
        SpawnResult::Ok
    }

    /// Move the active piece by `(dx, dy)` if it fits there
    ///
    /// A blocked move is silently rejected.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.falling_piece() else {
            return false;
        };

        let Some(moved) = active.moved(dx, dy).filter(|p| p.fits(&self.grid)) else {
            return false;
        };

        self.active = Some(moved);
        self.events.push(GameEvent::Moved);
        true
    }

    /// Rotate the active piece clockwise in place; no kicks are tried
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.falling_piece() else {
            return false;
        };

        let rotated = active.rotated();
        if !rotated.fits(&self.grid) {
            return false;
        }

        self.active = Some(rotated);
        self.events.push(GameEvent::Rotated);
        true
    }

    /// Drop to the lowest free position, lock, clear rows, then spawn
    ///
    /// Returns `None` when there is no piece in play.
    pub fn hard_drop(&mut self) -> Option<DropOutcome> {
        let mut piece = self.falling_piece()?;

        while let Some(lower) = piece.moved(0, -1).filter(|p| p.fits(&self.grid)) {
            piece = lower;
        }

        let placement = self.lock(piece);
        let rows_cleared = match self.config.row_clear {
            RowClearPolicy::OnLock => self.clear_full_rows(),
            RowClearPolicy::Manual => 0,
        };
        let spawn = self.spawn();

        Some(DropOutcome {
            placement,
            rows_cleared,
            spawn,
        })
    }

    /// Copy the piece into the grid under a new placement id
    fn lock(&mut self, piece: Piece) -> PlacementId {
        let placement = self.history.begin_placement();
        let cells: PieceCells = piece.cells().into_iter().filter(|&(_, gy)| gy >= 0).collect();

        let overwritten = self
            .grid
            .place(&cells, piece.shape.color(), placement, piece.shape);
        if overwritten > 0 {
            warn!(
                placement = placement.get(),
                overwritten, "locked piece over settled cells"
            );
        }

        self.active = None;
        self.phase = Phase::Spawning;
        self.events.push(GameEvent::Dropped);
        debug!(
            placement = placement.get(),
            shape = piece.shape.as_str(),
            x = piece.anchor.x,
            y = piece.anchor.y,
            "locked"
        );
        placement
    }

    /// Remove full rows one at a time, lowest first, scoring each
    ///
    /// Every removed row adds one point, emits `RowCleared` and queues a score record.
    pub fn clear_full_rows(&mut self) -> u32 {
        if self.phase == Phase::GameOver {
            return 0;
        }

        let mut cleared = 0;
        while let Some(row) = remove_lowest_full_row(&mut self.grid) {
            cleared += 1;
            let record = self.session.award(POINTS_PER_ROW);
            self.score_records.push(record);
            self.events.push(GameEvent::RowCleared);
            debug!(row, score = record.score, "row cleared");
        }
        cleared
    }

    /// Exchange the active piece with the helper piece
    ///
    /// The new active piece is recentred at the spawn anchor without a fit check,
    /// so a swap always succeeds even onto occupied cells.
    pub fn swap_helper(&mut self) -> bool {
        let (Some(active), Some(helper)) = (self.falling_piece(), self.helper) else {
            return false;
        };

        self.active = Some(Piece::at_spawn(helper));
        self.helper = Some(active.preview());
        self.gravity_timer_ms = 0;
        self.events.push(GameEvent::Swapped);
        true
    }

    /// Take back the most recent placement
    ///
    /// On success the restored kind becomes the next shape, the active piece is
    /// discarded and the engine waits in `Spawning` for the caller to `spawn`.
    /// Rows cleared by that placement are not restored.
    pub fn undo(&mut self) -> UndoOutcome {
        if self.phase == Phase::GameOver {
            return UndoOutcome::NothingToUndo;
        }

        let outcome = self.history.undo(&mut self.grid);
        if let UndoOutcome::Undone { restored, .. } = outcome {
            if let Some(shape) = restored {
                self.next = Some(shape);
            }
            self.active = None;
            self.phase = Phase::Spawning;
        }
        outcome
    }

    /// Throw the current game away and start a new session
    ///
    /// The RNG keeps running, so the new game does not replay the old one.
    pub fn reset(&mut self) {
        let finished = self.session.id();
        self.grid = Grid::new();
        self.history = PlacementHistory::new();
        self.session = GameSession::new();
        self.active = None;
        self.next = None;
        self.helper = None;
        self.phase = Phase::Spawning;
        self.gravity_timer_ms = 0;
        info!(previous = %finished, game_id = %self.session.id(), "game reset");
        self.spawn();
    }

    /// Apply one intent immediately; returns whether it changed anything
    ///
    /// While the game is over only `Reset` is accepted.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.phase == Phase::GameOver && intent != Intent::Reset {
            return false;
        }

        match intent {
            Intent::MoveLeft => self.try_move(-1, 0),
            Intent::MoveRight => self.try_move(1, 0),
            Intent::SoftDrop => self.try_move(0, -1),
            Intent::Rotate => self.try_rotate(),
            Intent::HardDrop => self.hard_drop().is_some(),
            Intent::SwapHelper => self.swap_helper(),
            Intent::Undo => {
                if self.undo().is_undone() {
                    self.spawn();
                    true
                } else {
                    false
                }
            }
            Intent::Reset => {
                self.reset();
                true
            }
            Intent::ClearRows => self.clear_full_rows() > 0,
        }
    }

    /// Queue an intent for the next tick
    pub fn enqueue(&mut self, intent: Intent) {
        self.intents.push_back(intent);
    }

    pub fn pending_intents(&self) -> usize {
        self.intents.len()
    }

    /// Advance one fixed update: drain queued intents in order, then apply gravity
    ///
    /// Returns the number of intents that changed the game.
    pub fn tick(&mut self, elapsed_ms: u32) -> usize {
        let mut applied = 0;
        while let Some(intent) = self.intents.pop_front() {
            if self.apply(intent) {
                applied += 1;
            }
        }

        if let GravityPolicy::Timed { interval_ms } = self.config.gravity {
            self.apply_gravity(elapsed_ms, interval_ms);
        }
        applied
    }

    fn apply_gravity(&mut self, elapsed_ms: u32, interval_ms: u32) {
        if self.phase != Phase::Falling || interval_ms == 0 {
            self.gravity_timer_ms = 0;
            return;
        }

        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        while self.gravity_timer_ms >= interval_ms {
            self.gravity_timer_ms -= interval_ms;
            // Resting pieces stay put; only a hard drop locks them.
            if !self.try_move(0, -1) {
                self.gravity_timer_ms = 0;
                break;
            }
        }
    }

    /// Hand out events emitted since the last drain, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Hand out score records produced since the last drain, oldest first
    pub fn drain_score_records(&mut self) -> std::vec::Drain<'_, ScoreRecord> {
        self.score_records.drain(..)
    }

    /// Record of the current session's score, stamped now
    pub fn final_record(&self) -> ScoreRecord {
        self.session.record()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid.clone_from(&self.grid);
        out.active = self.active;
        out.next = self.next;
        out.helper = self.helper;
        out.score = self.session.score();
        out.game_over = self.phase == Phase::GameOver;
        out.game_id = self.session.id();
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn falling_piece(&self) -> Option<Piece> {
        if self.phase != Phase::Falling {
            return None;
        }
        self.active
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
