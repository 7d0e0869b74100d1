//! Held-key repeat for terminal environments.
//!
//! Movement, soft drop and rotate keep acting while their key is held. Terminals
//! without key-release events are handled with a per-key timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::{Intent, HOLD_DELAY_MS, HOLD_REPEAT_MS, KEY_RELEASE_TIMEOUT_MS};

/// Most intents that can be held at once
const MAX_HELD: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Held {
    intent: Intent,
    last_seen: Instant,
    delay_timer: u32,
    repeat_accumulator: u32,
}

impl Held {
    fn new(intent: Intent) -> Self {
        Self {
            intent,
            last_seen: Instant::now(),
            delay_timer: 0,
            repeat_accumulator: 0,
        }
    }
}

/// Tracks which held intents are down and when they repeat.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    held: ArrayVec<Held, MAX_HELD>,
    delay_ms: u32,
    repeat_ms: u32,
    key_release_timeout_ms: u32,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::with_config(HOLD_DELAY_MS, HOLD_REPEAT_MS)
    }

    pub fn with_config(delay_ms: u32, repeat_ms: u32) -> Self {
        Self {
            held: ArrayVec::new(),
            delay_ms,
            repeat_ms: repeat_ms.max(1),
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        self.held.iter().any(|h| h.intent == intent)
    }

    /// Register a press; returns the intent to apply now, if any.
    ///
    /// Non-held intents pass straight through. A press of an intent that is
    /// already held only refreshes its release timeout (terminal auto-repeat).
    pub fn press(&mut self, intent: Intent) -> Option<Intent> {
        if !intent.is_held() {
            return Some(intent);
        }

        if let Some(held) = self.held.iter_mut().find(|h| h.intent == intent) {
            held.last_seen = Instant::now();
            return None;
        }

        // Opposite directions cancel each other; the newest press wins.
        let opposite = match intent {
            Intent::MoveLeft => Some(Intent::MoveRight),
            Intent::MoveRight => Some(Intent::MoveLeft),
            _ => None,
        };
        if let Some(opposite) = opposite {
            self.release(opposite);
        }

        let _ = self.held.try_push(Held::new(intent));
        Some(intent)
    }

    pub fn release(&mut self, intent: Intent) {
        self.held.retain(|h| h.intent != intent);
    }

    /// Advance held timers and return the repeats that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Intent, 32> {
        let mut intents = ArrayVec::<Intent, 32>::new();

        let timeout = Duration::from_millis(u64::from(self.key_release_timeout_ms));
        self.held.retain(|h| h.last_seen.elapsed() <= timeout);

        for held in self.held.iter_mut() {
            let prev_delay = held.delay_timer;
            held.delay_timer = held.delay_timer.saturating_add(elapsed_ms);
            if held.delay_timer < self.delay_ms {
                continue;
            }

            let excess = if prev_delay < self.delay_ms {
                held.delay_timer - self.delay_ms
            } else {
                elapsed_ms
            };
            held.repeat_accumulator += excess;

            while held.repeat_accumulator >= self.repeat_ms {
                let _ = intents.try_push(held.intent);
                held.repeat_accumulator -= self.repeat_ms;
            }
        }

        intents
    }

    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}
