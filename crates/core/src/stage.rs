//! Stage module - the settled grid
//!
//! The stage is a 12x20 grid holding only settled cells. The falling piece is
//! kept apart (see [`crate::player`]) and composited over the stage when a
//! frame is requested, so settled cells are only ever changed by a merge, a
//! sweep, or a reset.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..19 (top to bottom)

use crate::player::Player;
use crate::types::{Cell, CellStatus, CellView, STAGE_HEIGHT, STAGE_WIDTH};

/// Total number of cells on the stage
const STAGE_SIZE: usize = (STAGE_WIDTH as usize) * (STAGE_HEIGHT as usize);

/// A composited grid for the presentation layer, indexed `[y][x]`
pub type Frame = [[CellView; STAGE_WIDTH as usize]; STAGE_HEIGHT as usize];

/// The settled grid - 12 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; STAGE_SIZE],
}

impl Stage {
    /// Create a new empty stage
    pub fn new() -> Self {
        Self {
            cells: [None; STAGE_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= STAGE_WIDTH as i8 || y < 0 || y >= STAGE_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (STAGE_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        STAGE_WIDTH
    }

    pub fn height(&self) -> u8 {
        STAGE_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Cells of row `y`
    /// Returns None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= STAGE_HEIGHT as usize {
            return None;
        }
        let start = y * STAGE_WIDTH as usize;
        Some(&self.cells[start..start + STAGE_WIDTH as usize])
    }

    /// Remove every full row and return how many were removed
    ///
    /// Remaining rows keep their relative order and sink to the bottom; the
    /// same number of empty rows appear at the top. Single two-pointer pass,
    /// no allocation.
    pub fn sweep_rows(&mut self) -> u32 {
        let width = STAGE_WIDTH as usize;
        let mut write_y = STAGE_HEIGHT as usize;
        let mut removed = 0u32;

        // Scan from bottom to top
        for read_y in (0..STAGE_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                removed += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        removed
    }

    /// Write the player's filled cells into the settled grid
    ///
    /// Cells outside the stage are dropped. Returns the number of cells written.
    pub fn merge(&mut self, player: &Player) -> usize {
        player
            .cells()
            .filter(|&(x, y, kind)| self.set(x, y, Some(kind)))
            .count()
    }

    /// Composite the player over the settled grid
    ///
    /// Settled cells are `Merged`. The player's cells are `Merged` once it has
    /// collided and `Clear` while it is still falling.
    pub fn compose(&self, player: &Player) -> Frame {
        let mut frame = [[CellView::EMPTY; STAGE_WIDTH as usize]; STAGE_HEIGHT as usize];

        let settled = self.cells.chunks_exact(STAGE_WIDTH as usize);
        for (row, cells) in frame.iter_mut().zip(settled) {
            for (view, cell) in row.iter_mut().zip(cells) {
                if let Some(kind) = *cell {
                    *view = CellView {
                        value: Some(kind),
                        status: CellStatus::Merged,
                    };
                }
            }
        }

        let status = if player.collided {
            CellStatus::Merged
        } else {
            CellStatus::Clear
        };
        for (x, y, kind) in player.cells() {
            if Self::index(x, y).is_some() {
                frame[y as usize][x as usize] = CellView {
                    value: Some(kind),
                    status,
                };
            }
        }

        frame
    }

    /// Number of settled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::spawn_shape;
    use crate::types::PieceKind;

    fn fill_row(stage: &mut Stage, y: i8, kind: PieceKind) {
        for x in 0..STAGE_WIDTH as i8 {
            stage.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_stage_index_calculation() {
        assert_eq!(Stage::index(0, 0), Some(0));
        assert_eq!(Stage::index(11, 0), Some(11));
        assert_eq!(Stage::index(0, 1), Some(12));
        assert_eq!(Stage::index(11, 19), Some(239));
        assert_eq!(Stage::index(-1, 0), None);
        assert_eq!(Stage::index(12, 0), None);
        assert_eq!(Stage::index(0, 20), None);
    }

    #[test]
    fn test_stage_flat_array() {
        let mut stage = Stage::new();
        stage.set(0, 0, Some(PieceKind::I));
        stage.set(5, 10, Some(PieceKind::T));

        assert_eq!(stage.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(stage.cells[0], Some(PieceKind::I));
        assert_eq!(stage.cells[10 * 12 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_sweep_single_full_row() {
        let mut stage = Stage::new();
        fill_row(&mut stage, 19, PieceKind::I);
        stage.set(3, 18, Some(PieceKind::T));

        assert_eq!(stage.sweep_rows(), 1);
        // The partial row sank into the cleared slot.
        assert_eq!(stage.get(3, 19), Some(Some(PieceKind::T)));
        assert_eq!(stage.filled_count(), 1);
    }

    #[test]
    fn test_sweep_keeps_order_of_partial_rows() {
        let mut stage = Stage::new();
        stage.set(0, 15, Some(PieceKind::J));
        fill_row(&mut stage, 16, PieceKind::I);
        stage.set(0, 17, Some(PieceKind::L));
        fill_row(&mut stage, 18, PieceKind::I);
        stage.set(0, 19, Some(PieceKind::Z));

        assert_eq!(stage.sweep_rows(), 2);
        assert_eq!(stage.get(0, 17), Some(Some(PieceKind::J)));
        assert_eq!(stage.get(0, 18), Some(Some(PieceKind::L)));
        assert_eq!(stage.get(0, 19), Some(Some(PieceKind::Z)));
        for y in 0..17 {
            assert!(stage.row(y).unwrap().iter().all(|c| c.is_none()), "row {y}");
        }
    }

    #[test]
    fn test_row_out_of_bounds() {
        let stage = Stage::new();
        assert_eq!(stage.row(0).map(|row| row.len()), Some(STAGE_WIDTH as usize));
        assert_eq!(stage.row(STAGE_HEIGHT as usize - 1).map(|row| row.len()), Some(12));
        assert!(stage.row(STAGE_HEIGHT as usize).is_none());
        assert!(stage.row(usize::MAX).is_none());
        assert!(!stage.is_row_full(usize::MAX));
    }

    #[test]
    fn test_sweep_without_full_rows_is_noop() {
        let mut stage = Stage::new();
        stage.set(4, 19, Some(PieceKind::O));
        let before = stage.clone();
        assert_eq!(stage.sweep_rows(), 0);
        assert_eq!(stage, before);
    }

    #[test]
    fn test_merge_and_compose() {
        let mut stage = Stage::new();
        stage.set(0, 19, Some(PieceKind::Z));

        let mut player = Player::spawn(PieceKind::O);
        assert_eq!(player.shape, spawn_shape(PieceKind::O));

        let frame = stage.compose(&player);
        assert_eq!(frame[19][0].status, CellStatus::Merged);
        assert_eq!(frame[0][4].value, Some(PieceKind::O));
        assert_eq!(frame[0][4].status, CellStatus::Clear);
        assert_eq!(frame[5][5], CellView::EMPTY);

        // Composing never touches the settled grid.
        assert_eq!(stage.filled_count(), 1);

        player.collided = true;
        let frame = stage.compose(&player);
        assert_eq!(frame[1][5].status, CellStatus::Merged);

        assert_eq!(stage.merge(&player), 4);
        assert_eq!(stage.get(4, 0), Some(Some(PieceKind::O)));
        assert_eq!(stage.get(5, 1), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_compose_rebuilds_from_settled_grid() {
        let stage = Stage::new();
        let mut player = Player::spawn(PieceKind::O);
        let _ = stage.compose(&player);

        player.y += 3;
        let frame = stage.compose(&player);
        // Nothing is left where the piece used to be.
        assert_eq!(frame[0][4], CellView::EMPTY);
        assert_eq!(frame[3][4].value, Some(PieceKind::O));
    }
}
