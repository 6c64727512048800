use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::stage::Frame;
use crate::types::{CellView, PieceKind, STAGE_HEIGHT, STAGE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub width: u8,
    pub height: u8,
    pub collided: bool,
}

impl From<Player> for PlayerSnapshot {
    fn from(value: Player) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            width: value.shape.width(),
            height: value.shape.height(),
            collided: value.collided,
        }
    }
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub frame: Frame,
    pub player: PlayerSnapshot,
    pub piece_id: u32,
    pub score: u32,
    pub rows: u32,
    pub level: u32,
    pub started: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    /// Cells currently holding any piece
    pub fn filled_cells(&self) -> usize {
        self.frame
            .iter()
            .flatten()
            .filter(|cell| cell.value.is_some())
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            frame: [[CellView::EMPTY; STAGE_WIDTH as usize]; STAGE_HEIGHT as usize],
            player: PlayerSnapshot {
                kind: PieceKind::I,
                x: 0,
                y: 0,
                width: 0,
                height: 0,
                collided: false,
            },
            piece_id: 0,
            score: 0,
            rows: 0,
            level: 0,
            started: false,
            game_over: false,
        }
    }
}
