//! Collision detection between the falling piece and the settled grid

use crate::player::Player;
use crate::stage::Stage;
use crate::types::{STAGE_HEIGHT, STAGE_WIDTH};

/// Would the player collide after moving by `offset`?
///
/// Every filled cell of the shape is moved to `player position + local cell +
/// offset`. A cell collides when it leaves the stage sideways, falls below the
/// last row, or lands on a settled cell. Cells above row 0 never collide, so a
/// freshly spawned piece may stick out of the top.
pub fn check_collision(player: &Player, stage: &Stage, offset: (i8, i8)) -> bool {
    let (dx, dy) = offset;
    player.cells().any(|(x, y, _)| {
        let (x, y) = (x + dx, y + dy);
        if x < 0 || x >= STAGE_WIDTH as i8 || y >= STAGE_HEIGHT as i8 {
            return true;
        }
        y >= 0 && stage.is_occupied(x, y)
    })
}
