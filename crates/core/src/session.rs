//! Game session - identity and score of one game
//!
//! A session is created on setup and on every reset. Each score change produces a
//! [`ScoreRecord`] that a persistence collaborator can upsert keyed on `game_id`.

use chrono::{Local, NaiveDateTime};
use uuid::Uuid;

/// Score snapshot handed to persistence on every score change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreRecord {
    /// Local wall-clock time of the change
    pub recorded_at: NaiveDateTime,
    pub game_id: Uuid,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    id: Uuid,
    score: u32,
    game_over: bool,
}

impl GameSession {
    /// Start a session with a fresh random id
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            score: 0,
            game_over: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub(crate) fn end(&mut self) {
        self.game_over = true;
    }

    /// Add `points` and return the record for the new score
    pub(crate) fn award(&mut self, points: u32) -> ScoreRecord {
        self.score += points;
        self.record()
    }

    /// Record of the current score, stamped now
    pub fn record(&self) -> ScoreRecord {
        ScoreRecord {
            recorded_at: Local::now().naive_local(),
            game_id: self.id,
            score: self.score,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_get_distinct_ids() {
        assert_ne!(GameSession::new().id(), GameSession::new().id());
    }

    #[test]
    fn award_returns_record_for_new_score() {
        let mut session = GameSession::new();
        let record = session.award(1);
        assert_eq!(record.score, 1);
        assert_eq!(record.game_id, session.id());
        assert_eq!(session.award(1).score, 2);
    }
}
