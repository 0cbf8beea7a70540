//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the grid, the piece catalog, collision and rotation,
//! line clearing, scoring, the hold slot and the run state machine. It has no
//! dependency on rendering, input devices or I/O:
//!
//! - **Deterministic**: the same seed, deltas and commands replay the same game
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: hosts drive it from any frame callback
//!
//! # Module Structure
//!
//! - [`board`]: row-major, y-up grid with row detection and compaction
//! - [`pieces`]: shape catalog, rotation and spawn anchors
//! - [`collision`]: collision checks, column-kick rotation and drop distance
//! - [`rng`]: seeded LCG and the uniform piece factory
//! - [`scoring`]: points, levels and drop intervals
//! - [`hold`]: one-swap-per-spawn hold slot
//! - [`game_state`]: the game state machine and per-frame update
//! - [`scheduler`]: [`Session`], the tick lifecycle owner
//! - [`events`]: notifications for presentation layers
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use blockdrop_core::GameState;
//! use blockdrop_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards points per row.
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] (or [`Session::tick`]) every frame with the elapsed
//! milliseconds. Gravity fires once the accumulated time exceeds the current
//! drop interval, moving the piece at most one row per tick.

pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod game_state;
pub mod hold;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use blockdrop_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FullRows};
pub use collision::{check_collision, drop_distance, landing_y, rotate, try_rotate};
pub use config::GameConfig;
pub use error::ConfigError;
pub use events::{GameEvent, GameObserver};
pub use game_state::GameState;
pub use hold::{HoldOutcome, HoldSlot};
pub use pieces::{catalog_shape, rotate_shape, PieceDef, PieceShape, Tetromino};
pub use rng::{PieceFactory, SimpleRng};
pub use scheduler::{Session, TickHandle};
pub use scoring::{check_lines, ClearResult, ClearedCell, Progress};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
