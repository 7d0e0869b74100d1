//! Shared types - grid constants, shape ids, intents and events
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions can be used by the engine, the terminal front-end, the input
//! layer and the score store.
//!
//! # Grid Dimensions
//!
//! Dimensions follow a 300x600 pixel field drawn with 30px cells:
//!
//! | Constant | Value | Derivation |
//! |----------|-------|------------|
//! | `GRID_WIDTH` | 10 | 300px play width / 30px cells |
//! | `GRID_HEIGHT` | 20 | 600px play height / 30px cells |
//! | `PREVIEW_SIZE` | 4 | 80px preview window / 20px tiny cells |
//!
//! Row 0 is the floor; row indices grow upward.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Fixed update period (10 updates per second) |
//! | `HOLD_DELAY_MS` | 100 | Time a key must be held before it repeats |
//! | `HOLD_REPEAT_MS` | 100 | Interval between repeats of a held key |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Auto-release for terminals without release events |
//!
//! # Examples
//!
//! ```
//! use lazy_blocks_types::{ColorId, Intent, ShapeId, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(ShapeId::from_str("t"), Some(ShapeId::T));
//! assert_eq!(ShapeId::T.color(), ColorId::Blue);
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert_eq!((GRID_WIDTH, GRID_HEIGHT), (10, 20));
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Side length of the next/helper preview windows, in cells
pub const PREVIEW_SIZE: u8 = 4;

/// Largest extent of any shape matrix along either axis
pub const MAX_SHAPE_EXTENT: usize = 4;

/// Fixed update period in milliseconds (10 updates per second)
pub const TICK_MS: u32 = 100;

/// Delay before a held key starts repeating
pub const HOLD_DELAY_MS: u32 = 100;

/// Interval between repeats of a held key
pub const HOLD_REPEAT_MS: u32 = 100;

/// Terminals that never report key release get their held keys dropped after this long
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// The seven tetromino kinds, in color table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeId {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeId {
    /// All kinds, indexed the way the uniform draw indexes them
    pub const ALL: [ShapeId; 7] = [
        ShapeId::I,
        ShapeId::O,
        ShapeId::T,
        ShapeId::S,
        ShapeId::Z,
        ShapeId::J,
        ShapeId::L,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Fill colour used for every cell this kind settles into
    pub fn color(self) -> ColorId {
        match self {
            ShapeId::I => ColorId::Red,
            ShapeId::O => ColorId::Green,
            ShapeId::T => ColorId::Blue,
            ShapeId::S => ColorId::Yellow,
            ShapeId::Z => ColorId::Purple,
            ShapeId::J => ColorId::Orange,
            ShapeId::L => ColorId::Cyan,
        }
    }

    /// Parse a shape from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_blocks_types::ShapeId;
    ///
    /// assert_eq!(ShapeId::from_str("I"), Some(ShapeId::I));
    /// assert_eq!(ShapeId::from_str("l"), Some(ShapeId::L));
    /// assert_eq!(ShapeId::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(ShapeId::I),
            "o" => Some(ShapeId::O),
            "t" => Some(ShapeId::T),
            "s" => Some(ShapeId::S),
            "z" => Some(ShapeId::Z),
            "j" => Some(ShapeId::J),
            "l" => Some(ShapeId::L),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeId::I => "I",
            ShapeId::O => "O",
            ShapeId::T => "T",
            ShapeId::S => "S",
            ShapeId::Z => "Z",
            ShapeId::J => "J",
            ShapeId::L => "L",
        }
    }
}

/// Cell fill colours, one per shape kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorId {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Cyan,
}

/// Discrete player intents delivered by the input source
///
/// The engine drains queued intents once per tick and applies each one fully
/// before looking at the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move the active piece one column left
    MoveLeft,
    /// Move the active piece one column right
    MoveRight,
    /// Move the active piece one row down
    SoftDrop,
    /// Drop to the lowest free position and lock
    HardDrop,
    /// Rotate 90° clockwise, no wall kicks
    Rotate,
    /// Exchange the active piece with the helper piece
    SwapHelper,
    /// Remove the most recent placement and respawn its shape
    Undo,
    /// Start a fresh game
    Reset,
    /// Clear full rows now (only meaningful with manual row clearing)
    ClearRows,
}

impl Intent {
    /// Parse an intent from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_blocks_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("SWAPHELPER"), Some(Intent::SwapHelper));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotate" => Some(Intent::Rotate),
            "swaphelper" => Some(Intent::SwapHelper),
            "undo" => Some(Intent::Undo),
            "reset" => Some(Intent::Reset),
            "clearrows" => Some(Intent::ClearRows),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::Rotate => "rotate",
            Intent::SwapHelper => "swapHelper",
            Intent::Undo => "undo",
            Intent::Reset => "reset",
            Intent::ClearRows => "clearRows",
        }
    }

    /// Intents that keep applying for as long as their key is held
    pub fn is_held(self) -> bool {
        matches!(
            self,
            Intent::MoveLeft | Intent::MoveRight | Intent::SoftDrop | Intent::Rotate
        )
    }
}

/// Named events emitted by the engine for audio and other observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Moved,
    Rotated,
    Dropped,
    RowCleared,
    Swapped,
    GameOver,
}

impl GameEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            GameEvent::Moved => "moved",
            GameEvent::Rotated => "rotated",
            GameEvent::Dropped => "dropped",
            GameEvent::RowCleared => "row-cleared",
            GameEvent::Swapped => "swapped",
            GameEvent::GameOver => "game-over",
        }
    }
}
