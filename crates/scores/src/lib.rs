//! Score persistence - one CSV row per game, upserted on every score change
//!
//! File layout (header included):
//!
//! ```text
//! date,player,gameid,score
//! 2024-05-01 18:30:12,Player,5c0e...,7
//! ```
//!
//! A game keeps a single row keyed on `gameid`; later records for the same game
//! overwrite its score and date.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use lazy_blocks_core::ScoreRecord;

pub use lazy_blocks_core as core;

/// Number of rows the leaderboard screen shows
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    #[serde(with = "date_format")]
    pub date: NaiveDateTime,
    pub player: String,
    pub gameid: Uuid,
    pub score: u32,
}

impl ScoreRow {
    pub fn from_record(player: &str, record: &ScoreRecord) -> Self {
        Self {
            date: record.recorded_at,
            player: player.to_string(),
            gameid: record.game_id,
            score: record.score,
        }
    }
}

/// In-memory copy of the score file
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    rows: Vec<ScoreRow>,
}

impl ScoreStore {
    /// Read the file at `path`; a missing file is an empty store
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                rows: Vec::new(),
            });
        }

        let mut reader = csv::Reader::from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<ScoreRow>, _>>()
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        debug!(path = %path.display(), rows = rows.len(), "loaded scores");
        Ok(Self { path, rows })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        if self.rows.is_empty() {
            writer.write_record(["date", "player", "gameid", "score"])?;
        }
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn get(&self, gameid: Uuid) -> Option<&ScoreRow> {
        self.rows.iter().find(|r| r.gameid == gameid)
    }

    /// Update the row for `row.gameid` in place, or append it
    ///
    /// The player column keeps its first value.
    pub fn upsert(&mut self, row: ScoreRow) {
        match self.rows.iter_mut().find(|r| r.gameid == row.gameid) {
            Some(existing) => {
                existing.score = row.score;
                existing.date = row.date;
            }
            None => self.rows.push(row),
        }
    }

    /// Upsert `record` for `player` and write the file
    pub fn record(&mut self, player: &str, record: &ScoreRecord) -> Result<()> {
        self.upsert(ScoreRow::from_record(player, record));
        self.save()
    }

    /// Best `n` rows, highest score first; ties keep file order
    pub fn leaderboard(&self, n: usize) -> Vec<&ScoreRow> {
        let mut best: Vec<&ScoreRow> = self.rows.iter().collect();
        best.sort_by(|a, b| b.score.cmp(&a.score));
        best.truncate(n);
        best
    }
}

mod date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&text, FORMAT).map_err(serde::de::Error::custom)
    }
}
