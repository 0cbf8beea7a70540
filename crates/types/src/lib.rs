//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behavior beyond parsing and lookup, so they
//! can be shared by the simulation core, the terminal presentation layer and
//! any external tooling.
//!
//! # Coordinates
//!
//! The playfield is addressed as `(x, y)` with `x` growing to the right and
//! `y` growing upwards: row 0 is the bottom row.
//!
//! # Default Tuning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_WIDTH` | 10 | Columns |
//! | `BOARD_HEIGHT` | 20 | Rows |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `LEVEL_DROP_STEP_MS` | 75 | Interval reduction per level |
//! | `MIN_DROP_MS` | 100 | Interval floor |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level |
//! | `FLASH_MS` | 120 | Line-clear flash duration |
//!
//! # Examples
//!
//! ```
//! use blockdrop_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame pacing for terminal hosts (16ms = ~60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level gained
pub const LEVEL_DROP_STEP_MS: u32 = 75;

/// Gravity interval floor (100ms)
pub const MIN_DROP_MS: u32 = 100;

/// Lines cleared per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Duration of the line-clear flash (120ms)
pub const FLASH_MS: u32 = 120;

/// Points per cell descended with a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row traversed with a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Most rows a single 4-cell piece can complete at once
pub const MAX_CLEAR_ROWS: usize = 4;

/// Line clear scoring table
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_POINTS: [u32; MAX_CLEAR_ROWS + 1] = [0, 100, 300, 500, 800];

/// Color reported for a cell that unexpectedly holds no piece
pub const NEUTRAL_COLOR: u32 = 0x80_80_80;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockdrop_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Color tag (0xRRGGBB) carried by cells locked from this kind.
    ///
    /// ```
    /// use blockdrop_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color(), 0x00f0f0);
    /// ```
    pub fn color(&self) -> u32 {
        match self {
            PieceKind::I => 0x00_f0_f0,
            PieceKind::O => 0xf0_f0_00,
            PieceKind::T => 0xa0_00_f0,
            PieceKind::S => 0x00_f0_00,
            PieceKind::Z => 0xf0_00_00,
            PieceKind::J => 0x00_00_f0,
            PieceKind::L => 0xf0_a0_00,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by a piece of that kind (and its color)
pub type Cell = Option<PieceKind>;

/// Top-level run state of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunState {
    Playing,
    Paused,
    GameOver,
}

/// Input commands accepted by the engine
///
/// Every command is parameterless; legality is decided by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Rotate piece 90°, trying column kicks
    Rotate,
    /// Drop piece to the lowest legal row and lock it
    HardDrop,
    /// Bank the active piece (once per spawn)
    Hold,
    /// Toggle between playing and paused
    TogglePause,
    /// Reinitialize the whole session
    Reset,
}
