//! Pieces module - tetromino catalog and matrix rotation
//!
//! Every piece is a small square matrix of cells. Rotation works on the matrix
//! itself (transpose plus a flip), so a rotated piece is just another `Shape`.
//! Wall kicks live with the player, since they need the stage.

use crate::types::{Cell, PieceKind, RotationDir};

/// Largest side of any shape matrix (the I piece is 4x4)
pub const MAX_SHAPE_SIDE: usize = 4;

const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

/// A shape matrix of up to 4x4 cells, row-major with stride `width`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [Cell; MAX_SHAPE_CELLS],
}

impl Shape {
    /// Build a shape from text rows, `#` marking a filled cell.
    ///
    /// Rows must all have the same length and fit in 4x4.
    pub(crate) fn from_pattern(kind: PieceKind, rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        debug_assert!(width <= MAX_SHAPE_SIDE && height <= MAX_SHAPE_SIDE);
        debug_assert!(rows.iter().all(|r| r.len() == width));

        let mut cells = [None; MAX_SHAPE_CELLS];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.bytes().enumerate() {
                if ch == b'#' {
                    cells[y * width + x] = Some(kind);
                }
            }
        }

        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell at local (x, y); `None` outside the matrix
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.cells[y * self.width as usize + x]
    }

    /// Local coordinates and kind of every filled cell
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        let w = self.width as usize;
        let len = w * self.height as usize;
        self.cells[..len]
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|kind| ((i % w) as i8, (i / w) as i8, kind)))
    }

    /// Rotate 90° in the given direction; width and height swap.
    ///
    /// Clockwise is a transpose followed by reversing each row; counter-clockwise
    /// is a transpose followed by reversing the row order.
    pub fn rotated(&self, dir: RotationDir) -> Shape {
        let (w, h) = (self.width as usize, self.height as usize);
        let (new_w, new_h) = (h, w);
        let mut cells = [None; MAX_SHAPE_CELLS];

        for r in 0..new_h {
            for c in 0..new_w {
                let src = match dir {
                    RotationDir::Clockwise => (h - 1 - c) * w + r,
                    RotationDir::CounterClockwise => c * w + (w - 1 - r),
                };
                cells[r * new_w + c] = self.cells[src];
            }
        }

        Shape {
            width: new_w as u8,
            height: new_h as u8,
            cells,
        }
    }
}

/// Catalog shape for a piece kind, in spawn orientation
pub fn spawn_shape(kind: PieceKind) -> Shape {
    let rows: &[&str] = match kind {
        PieceKind::I => &[".#..", ".#..", ".#..", ".#.."],
        PieceKind::J => &[".#.", ".#.", "##."],
        PieceKind::L => &[".#.", ".#.", ".##"],
        PieceKind::O => &["##", "##"],
        PieceKind::S => &[".##", "##.", "..."],
        PieceKind::T => &["...", "###", ".#."],
        PieceKind::Z => &["##.", ".##", "..."],
    };
    Shape::from_pattern(kind, rows)
}
