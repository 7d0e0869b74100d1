//! Terminal renderer for the board.
//!
//! Renders into a plain framebuffer rather than a widget tree, then flushes the
//! rows that changed to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: pure snapshot-to-framebuffer mapping
//! - [`terminal`]: raw-mode lifecycle and row diffing

pub mod fb;
pub mod game_view;
pub mod terminal;

pub use lazy_blocks_core as core;
pub use lazy_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, FieldLayout, GameView, Viewport};
pub use terminal::{changed_rows, encode_changed_rows_into, encode_full_into, Terminal};
