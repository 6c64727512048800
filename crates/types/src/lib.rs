//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond parsing and lookup, making
//! them usable from the core rules, the loop driver and any presentation layer.
//!
//! # Stage Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (4, 0) for every piece
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_MS` | 1000 | Drop interval at level 0 |
//! | `DROP_INTERVAL_BASE_MS` | 1000 | Numerator of the level curve |
//! | `DROP_INTERVAL_FLOOR_MS` | 200 | Interval never goes below this |
//!
//! # Drop Intervals by Level
//!
//! Level 0 drops every 1000ms. From level 1 onward the interval is
//! `1000 / (level + 1) + 200`:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 700ms |
//! | 2 | 533ms |
//! | 3 | 450ms |
//! | 4 | 400ms |
//! | 9 | 300ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, STAGE_HEIGHT, STAGE_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! // Parse game action
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! // Stage dimensions
//! assert_eq!(STAGE_WIDTH, 12);
//! assert_eq!(STAGE_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Stage width in cells (12 columns)
pub const STAGE_WIDTH: u8 = 12;

/// Stage height in cells (20 rows)
pub const STAGE_HEIGHT: u8 = 20;

/// Spawn column for new pieces (top-center)
pub const SPAWN_X: i8 = (STAGE_WIDTH / 2) as i8 - 2;

/// Spawn row for new pieces
pub const SPAWN_Y: i8 = 0;

/// A piece blocked while its row index is below this is stuck at spawn (game over).
pub const GAME_OVER_ROW: i8 = 1;

/// Drop interval when a game starts (1000ms = 1 row per second)
pub const INITIAL_DROP_MS: u32 = 1000;

/// Numerator of the level-based drop curve
pub const DROP_INTERVAL_BASE_MS: u32 = 1000;

/// The drop interval never falls below this (200ms)
pub const DROP_INTERVAL_FLOOR_MS: u32 = 200;

/// Rows that must be cleared per level step
pub const ROWS_PER_LEVEL: u32 = 10;

/// Most rows a single lock can clear
pub const MAX_ROWS_PER_LOCK: u32 = 4;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0, indexed by `lines - 1`:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_POINTS: [u32; 4] = [40, 100, 300, 1200];

/// Key codes forwarded by a browser-style presentation layer
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_is_top_center() {
        assert_eq!(SPAWN_X, 4);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn key_codes_map_to_intents() {
        assert_eq!(
            GameAction::from_key_code(KEY_LEFT, true),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            GameAction::from_key_code(KEY_RIGHT, true),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            GameAction::from_key_code(KEY_UP, true),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            GameAction::from_key_code(KEY_DOWN, true),
            Some(GameAction::SoftDropStart)
        );
        assert_eq!(
            GameAction::from_key_code(KEY_DOWN, false),
            Some(GameAction::SoftDropRelease)
        );
        // Releases of anything but "down" carry no intent.
        assert_eq!(GameAction::from_key_code(KEY_LEFT, false), None);
        assert_eq!(GameAction::from_key_code(13, true), None);
        assert_eq!(GameAction::from_key_code(u32::MAX, true), None);
    }

    #[test]
    fn piece_kind_round_trips_through_str() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("x"), None);
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and colour:
/// - **I**: Cyan, straight bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Display colour of the piece as an RGB triple
    ///
    /// ```
    /// use blockfall_types::{PieceKind, Rgb};
    ///
    /// assert_eq!(PieceKind::I.color(), Rgb(80, 227, 230));
    /// ```
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb(80, 227, 230),
            PieceKind::J => Rgb(36, 95, 223),
            PieceKind::L => Rgb(223, 173, 36),
            PieceKind::O => Rgb(223, 217, 36),
            PieceKind::S => Rgb(48, 211, 56),
            PieceKind::T => Rgb(132, 61, 198),
            PieceKind::Z => Rgb(227, 78, 78),
        }
    }
}

/// 24-bit colour used by presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour of an empty cell
pub const EMPTY_COLOR: Rgb = Rgb(0, 0, 0);

/// Direction of a 90° rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDir {
    Clockwise,
    CounterClockwise,
}

impl RotationDir {
    /// The direction that undoes this one
    pub fn inverse(&self) -> Self {
        match self {
            RotationDir::Clockwise => RotationDir::CounterClockwise,
            RotationDir::CounterClockwise => RotationDir::Clockwise,
        }
    }
}

/// Intents forwarded by the presentation layer
///
/// The engine validates every intent; intents that do not apply in the
/// current state are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Pause the timer and drop one row immediately (key down)
    SoftDropStart,
    /// Resume the level timer (key up)
    SoftDropRelease,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Start a fresh game
    Restart,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdropstart" | "softdrop" => Some(GameAction::SoftDropStart),
            "softdroprelease" => Some(GameAction::SoftDropRelease),
            "rotatecw" | "rotate" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropRelease => "softDropRelease",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Restart => "restart",
        }
    }

    /// Map a key code to an intent
    ///
    /// `pressed` is false for key-up events. Only the "down" key has a
    /// release intent; unknown codes yield `None`.
    pub fn from_key_code(code: u32, pressed: bool) -> Option<Self> {
        match (code, pressed) {
            (KEY_LEFT, true) => Some(GameAction::MoveLeft),
            (KEY_RIGHT, true) => Some(GameAction::MoveRight),
            (KEY_UP, true) => Some(GameAction::RotateCw),
            (KEY_DOWN, true) => Some(GameAction::SoftDropStart),
            (KEY_DOWN, false) => Some(GameAction::SoftDropRelease),
            _ => None,
        }
    }
}

/// A cell of the settled grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Render status of a composited cell
///
/// - **Clear**: drawn for the falling piece (or empty); gone next frame
/// - **Merged**: settled into the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Clear,
    Merged,
}

/// A cell as handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellView {
    pub value: Cell,
    pub status: CellStatus,
}

impl CellView {
    pub const EMPTY: CellView = CellView {
        value: None,
        status: CellStatus::Clear,
    };

    /// Display colour (black when empty)
    pub fn color(&self) -> Rgb {
        self.value.map_or(EMPTY_COLOR, |kind| kind.color())
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::EMPTY
    }
}
