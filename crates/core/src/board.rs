//! Board module - the engine's playfield
//!
//! 10 columns by 22 rows: two hidden spawn rows on top of the 20 visible ones.
//! Flat row-major storage; `(x, y)` with `y = 0` the top hidden row.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};

/// Total rows including the hidden spawn area
pub const TOTAL_ROWS: usize = BOARD_HEIGHT + HIDDEN_ROWS;

const BOARD_SIZE: usize = BOARD_WIDTH * TOTAL_ROWS;

/// A cell: empty or filled with the kind that locked there
pub type Cell = Option<PieceKind>;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= TOTAL_ROWS as i8 {
            return None;
        }
        Some((y as usize) * BOARD_WIDTH + (x as usize))
    }

    /// Cell at `(x, y)`; `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

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

    /// In bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Whether every mino of `shape` at origin `(x, y)` lands on a free cell
    pub fn fits(&self, shape: &[(i8, i8)], x: i8, y: i8) -> bool {
        shape.iter().all(|&(dx, dy)| self.is_free(x + dx, y + dy))
    }

    /// Write the piece into the grid; false (and no change) if it does not fit
    pub fn lock_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8, kind: PieceKind) -> bool {
        if !self.fits(shape, x, y) {
            return false;
        }
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(kind));
        }
        true
    }

    fn is_row_full(&self, y: usize) -> bool {
        let start = y * BOARD_WIDTH;
        self.cells[start..start + BOARD_WIDTH]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Clear every full row, shifting the rows above down.
    /// Returns the cleared row indices, bottom first.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let mut write_y = TOTAL_ROWS;

        for read_y in (0..TOTAL_ROWS).rev() {
            if self.is_row_full(read_y) {
                let _ = cleared.try_push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * BOARD_WIDTH;
                    self.cells
                        .copy_within(src..src + BOARD_WIDTH, write_y * BOARD_WIDTH);
                }
            }
        }

        for cell in &mut self.cells[..write_y * BOARD_WIDTH] {
            *cell = None;
        }
        cleared
    }

    /// Any locked cell in the hidden spawn rows
    pub fn hidden_rows_occupied(&self) -> bool {
        self.cells[..HIDDEN_ROWS * BOARD_WIDTH]
            .iter()
            .any(|cell| cell.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Visible rows as 0/1 occupancy, column-major (`x * BOARD_HEIGHT + y`)
    pub fn visible_occupancy(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(BOARD_WIDTH * BOARD_HEIGHT);
        for x in 0..BOARD_WIDTH {
            for y in HIDDEN_ROWS..TOTAL_ROWS {
                out.push(u8::from(self.cells[y * BOARD_WIDTH + x].is_some()));
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
