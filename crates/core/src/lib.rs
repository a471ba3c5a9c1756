//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management and simulation logic.
//! It has no dependencies on terminal rendering or input handling, so the same
//! engine runs under the terminal frontend, in benches, or headless in tests.
//!
//! # Module Structure
//!
//! - [`pieces`]: the fixed catalog of piece shapes and their rotation variations
//! - [`factory`]: active piece values and the seedable random piece picker
//! - [`board`]: 10x23 grid (20 visible rows + 3 spawn rows), placement checks, line clearing
//! - [`movement`]: collision-checked translation, rotation and spawning
//! - [`scoring`]: line clear points, level progression and gravity pacing
//! - [`timing`]: clocks and per-category cooldowns
//! - [`game_state`]: the session state machine tying everything together
//! - [`config`]: TOML-loadable engine tuning
//! - [`snapshot`]: copyable per-frame view for renderers
//!
//! # Game Rules
//!
//! - Pieces enter at the top of a hidden 3-row spawn buffer
//! - Rotation steps through pre-computed variations in place; no wall kicks
//! - Only gravity locks a piece; a refused player down-move is simply dropped
//! - Full rows are removed on lock and score `[0, 40, 100, 300, 1200][n] * level`
//! - The level goes up once total lines exceed `level * 10`, speeding up gravity
//! - A downward move refused while the piece is still in the spawn buffer ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameState};
//! use blockfall_types::{Direction, GameAction};
//!
//! let mut game = GameState::new(EngineConfig::default().with_seed(12345));
//! assert!(game.start(0));
//!
//! game.apply_action(GameAction::MoveRight, 100);
//! game.rotate_block(300);
//!
//! // Gravity fires once the interval has strictly elapsed.
//! assert!(game.tick(1001));
//! assert_eq!(game.active().map(|p| p.row), Some(1));
//! assert!(game.move_block(Direction::Down, 1100));
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Every call takes the current time in milliseconds. Gravity, player moves
//! and rotations each run off their own [`Cooldown`], which fires when strictly
//! more than its interval has passed since it last fired.

pub mod board;
pub mod config;
pub mod factory;
pub mod game_state;
pub mod movement;
pub mod pieces;
pub mod scoring;
pub mod snapshot;
pub mod timing;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, EngineConfig};
pub use factory::{ActivePiece, Footprint, PieceFactory};
pub use game_state::{GameEvent, GameState, Phase};
pub use movement::{spawn, try_move, try_rotate, MoveOutcome};
pub use pieces::{piece_def, PieceDef, Shape, CATALOG};
pub use scoring::{gravity_interval_ms, line_clear_score, ClearResult, Progress};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timing::{Clock, Cooldown, ManualClock, MonotonicClock};
