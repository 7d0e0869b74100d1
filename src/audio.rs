//! Sound cues for game events.
//!
//! The terminal build has no audio device; cues are logged and row clears can
//! ring the terminal bell.

use std::io::{self, Write};

use tracing::debug;

use crate::types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Drop,
    ClearRow,
    Switch,
}

impl SoundCue {
    /// Cue for an event; game over is silent.
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Moved => Some(SoundCue::Move),
            GameEvent::Rotated => Some(SoundCue::Rotate),
            GameEvent::Dropped => Some(SoundCue::Drop),
            GameEvent::RowCleared => Some(SoundCue::ClearRow),
            GameEvent::Swapped => Some(SoundCue::Switch),
            GameEvent::GameOver => None,
        }
    }

    pub fn asset(self) -> &'static str {
        match self {
            SoundCue::Move => "move_piece.wav",
            SoundCue::Rotate => "rotate_piece.wav",
            SoundCue::Drop => "drop_piece.wav",
            SoundCue::ClearRow => "clear_full_row.wav",
            SoundCue::Switch => "switch_pieces.wav",
        }
    }
}

/// Anything that can play a cue.
pub trait CuePlayer {
    fn play(&mut self, cue: SoundCue) -> io::Result<()>;
}

/// Plays cues on a terminal: logs every cue, bells on row clears when enabled.
pub struct TerminalCues<W: Write> {
    out: W,
    bell: bool,
}

impl<W: Write> TerminalCues<W> {
    pub fn new(out: W, bell: bool) -> Self {
        Self { out, bell }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CuePlayer for TerminalCues<W> {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        debug!(asset = cue.asset(), "cue");
        if self.bell && cue == SoundCue::ClearRow {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }
}
