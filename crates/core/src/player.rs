//! Player module - the falling piece
//!
//! The player is the current shape (possibly rotated), its offset into the
//! stage, and whether it has collided. Every move is validated with
//! [`check_collision`] before it is applied.

use crate::collision::check_collision;
use crate::pieces::{spawn_shape, Shape};
use crate::stage::Stage;
use crate::types::{PieceKind, RotationDir, SPAWN_X, SPAWN_Y};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
    pub collided: bool,
}

impl Player {
    /// Create a new player at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
            collided: false,
        }
    }

    /// Stage coordinates and kind of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        self.shape
            .filled()
            .map(move |(cx, cy, kind)| (self.x + cx, self.y + cy, kind))
    }

    /// Whether the piece could move by (dx, dy)
    pub fn can_move(&self, stage: &Stage, dx: i8, dy: i8) -> bool {
        !check_collision(self, stage, (dx, dy))
    }

    /// Move by (dx, dy) if nothing blocks it
    pub fn try_move(&mut self, stage: &Stage, dx: i8, dy: i8) -> bool {
        if !self.can_move(stage, dx, dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate with horizontal wall kicks
    ///
    /// After rotating, kicks of +1, -1, +2, -2, ... columns are tried until
    /// the piece fits. Kick magnitude is bounded by `(width + 1) / 2` of the
    /// rotated shape. If nothing fits, the player is left unchanged and
    /// `false` is returned.
    pub fn rotate(&mut self, stage: &Stage, dir: RotationDir) -> bool {
        let mut candidate = Player {
            shape: self.shape.rotated(dir),
            ..*self
        };

        let max_kick = (candidate.shape.width() as i8 + 1) / 2;
        let kicks = std::iter::once(0).chain((1..=max_kick).flat_map(|k| [k, -k]));

        for kick in kicks {
            candidate.x = self.x + kick;
            if !check_collision(&candidate, stage, (0, 0)) {
                *self = candidate;
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{STAGE_HEIGHT, STAGE_WIDTH};

    #[test]
    fn test_spawn_position() {
        let player = Player::spawn(PieceKind::T);
        assert_eq!((player.x, player.y), (4, 0));
        assert!(!player.collided);
    }

    #[test]
    fn test_cells_are_offset_by_position() {
        let mut player = Player::spawn(PieceKind::O);
        player.x = 2;
        player.y = 7;
        let cells: Vec<_> = player.cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells, vec![(2, 7), (3, 7), (2, 8), (3, 8)]);
    }

    #[test]
    fn test_try_move_stops_at_walls() {
        let stage = Stage::new();
        let mut player = Player::spawn(PieceKind::O);

        let mut moved = 0;
        while player.try_move(&stage, -1, 0) {
            moved += 1;
        }
        assert_eq!(moved, 4);
        assert_eq!(player.x, 0);

        while player.try_move(&stage, 1, 0) {}
        assert_eq!(player.x, STAGE_WIDTH as i8 - 2);
    }

    #[test]
    fn test_try_move_down_to_floor() {
        let stage = Stage::new();
        let mut player = Player::spawn(PieceKind::O);
        while player.try_move(&stage, 0, 1) {}
        assert_eq!(player.y, STAGE_HEIGHT as i8 - 2);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let stage = Stage::new();
        let mut player = Player::spawn(PieceKind::T);
        player.y = 5;
        let before = player;

        assert!(player.rotate(&stage, RotationDir::Clockwise));
        assert_eq!(player.x, before.x);
        assert_eq!(player.shape, before.shape.rotated(RotationDir::Clockwise));
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let stage = Stage::new();
        let mut player = Player::spawn(PieceKind::I);
        player.y = 5;
        // Vertical I sits in local column 1; push it flush against the right wall.
        player.x = STAGE_WIDTH as i8 - 2;

        assert!(player.rotate(&stage, RotationDir::Clockwise));
        // Horizontal I needs all four columns of its matrix inside the stage.
        assert!(player.x <= STAGE_WIDTH as i8 - 4);
        assert!(player.cells().all(|(x, _, _)| (0..STAGE_WIDTH as i8).contains(&x)));
    }

    #[test]
    fn test_rotate_kick_prefers_right_over_left() {
        let mut stage = Stage::new();
        let mut player = Player::spawn(PieceKind::T);
        player.y = 5;
        // Blocks the top cell of the rotated T in place; +1 and -1 both fit.
        stage.set(5, 5, Some(PieceKind::Z));

        assert!(player.rotate(&stage, RotationDir::Clockwise));
        assert_eq!(player.x, SPAWN_X + 1);
    }

    #[test]
    fn test_rotate_kick_tries_left_before_two_right() {
        let mut stage = Stage::new();
        let mut player = Player::spawn(PieceKind::T);
        player.y = 5;
        // In place and +1 are blocked; -1 and +2 both fit.
        stage.set(5, 5, Some(PieceKind::Z));
        stage.set(6, 5, Some(PieceKind::Z));

        assert!(player.rotate(&stage, RotationDir::Clockwise));
        assert_eq!(player.x, SPAWN_X - 1);
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        let stage = Stage::new();
        let mut player = Player::spawn(PieceKind::I);
        player.y = 5;
        player.x = -1;

        assert!(player.rotate(&stage, RotationDir::CounterClockwise));
        assert!(player.cells().all(|(x, _, _)| x >= 0));
    }

    #[test]
    fn test_rotate_abandoned_when_boxed_in() {
        let mut stage = Stage::new();
        let mut player = Player::spawn(PieceKind::I);
        player.y = 10;
        // Wall off everything around the vertical bar at column x + 1.
        let column = player.x + 1;
        for y in 0..STAGE_HEIGHT as i8 {
            for x in 0..STAGE_WIDTH as i8 {
                if x != column {
                    stage.set(x, y, Some(PieceKind::Z));
                }
            }
        }
        let before = player;

        assert!(!player.rotate(&stage, RotationDir::Clockwise));
        assert_eq!(player, before);
    }
}
