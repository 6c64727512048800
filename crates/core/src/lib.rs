//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and the state of one session.
//! It has **zero dependencies** on rendering, input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Any presentation layer can draw a [`GameSnapshot`]
//!
//! # Module Structure
//!
//! - [`stage`]: 12x20 settled grid, row sweeping and frame compositing
//! - [`pieces`]: Tetromino catalog and matrix rotation
//! - [`player`]: The falling piece, moves and wall-kicked rotation
//! - [`collision`]: Pure collision test of a player against the stage
//! - [`rng`]: Uniform piece generation that never repeats a piece three times
//! - [`scoring`]: Classic line scores, level progression, drop intervals
//! - [`game_state`]: One session: drop step, lock, respawn
//! - [`snapshot`]: Render-boundary snapshot
//!
//! # Game Rules
//!
//! - **Stage**: 12 columns by 20 rows; pieces spawn at (4, 0)
//! - **Lock**: a piece that cannot descend merges into the stage immediately
//! - **Game over**: a piece that cannot descend while still in row 0
//! - **Scoring**: 40 / 100 / 300 / 1200 for 1-4 rows, times (level + 1)
//! - **Levels**: one level per 10 cleared rows
//!
//! # Example
//!
//! ```
//! use blockfall_core::{DropOutcome, GameState};
//! use blockfall_core::types::RotationDir;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.move_horizontal(1);
//! game.rotate(RotationDir::Clockwise);
//! assert_eq!(game.drop(), DropOutcome::Moved);
//!
//! assert_eq!(game.score(), 0);
//! ```

pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stage;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::check_collision;
pub use game_state::{DropOutcome, GameState};
pub use pieces::{spawn_shape, Shape};
pub use player::Player;
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_line_score, drop_interval_ms, ClearOutcome, Scoreboard};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
pub use stage::{Frame, Stage};
