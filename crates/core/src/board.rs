//! Board module - manages the settled grid
//!
//! The board is a 10x20 grid of tile colors stored as a flat array for cache
//! locality and zero allocation. Coordinates are (row, col) with **row 0 at the
//! bottom**; flat index is `row * COLUMNS + col`.

use arrayvec::ArrayVec;

use crate::types::{Color, COLUMNS, ROWS, TOTAL_TILE_COUNT};

/// Pre-clear indices of rows removed by one collapse, bottom to top.
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// The settled board - `COLUMNS` x `ROWS` tile colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Flat array of colors, row-major order (row * COLUMNS + col)
    cells: [Color; TOTAL_TILE_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Color::EMPTY; TOTAL_TILE_COUNT],
        }
    }

    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= ROWS as i32 || col < 0 || col >= COLUMNS as i32 {
            return None;
        }
        Some(row as usize * COLUMNS + col as usize)
    }

    /// Color at (row, col)
    ///
    /// Panics if the position is outside the board; use [`Board::get`] for
    /// positions that may lie above or beside it.
    pub fn cell_at(&self, row: usize, col: usize) -> Color {
        assert!(row < ROWS && col < COLUMNS, "tile ({row}, {col}) out of bounds");
        self.cells[row * COLUMNS + col]
    }

    /// Set the color at (row, col). Out-of-bounds writes are ignored and
    /// return false.
    pub fn set_cell(&mut self, row: usize, col: usize, color: Color) -> bool {
        match Self::index(row as i32, col as i32) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Bounds-checked lookup, None outside the board
    pub fn get(&self, row: i32, col: i32) -> Option<Color> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// True only for in-bounds, non-empty cells
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(c) if !c.is_empty())
    }

    /// Color by flat index
    pub fn flat(&self, index: usize) -> Color {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Row slice, left to right
    pub fn row(&self, row: usize) -> &[Color] {
        let start = row * COLUMNS;
        &self.cells[start..start + COLUMNS]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        self.row(row).iter().all(|c| !c.is_empty())
    }

    /// Highest occupied row, None for an empty board
    pub fn stack_height(&self) -> Option<usize> {
        self.cells
            .iter()
            .rposition(|c| !c.is_empty())
            .map(|idx| idx / COLUMNS)
    }

    /// Remove every full row and collapse the rows above it.
    ///
    /// Two-pointer pass from the bottom: surviving rows are copied down to the
    /// next write slot, the vacated rows at the top are emptied. Rows below
    /// the lowest cleared row are untouched and survivors keep their order.
    pub fn clear_and_collapse(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_row = 0usize;

        for read_row in 0..ROWS {
            if self.is_row_full(read_row) {
                cleared.push(read_row);
                continue;
            }
            if write_row != read_row {
                let src = read_row * COLUMNS;
                self.cells
                    .copy_within(src..src + COLUMNS, write_row * COLUMNS);
            }
            write_row += 1;
        }

        self.cells[write_row * COLUMNS..].fill(Color::EMPTY);
        cleared
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Color::EMPTY);
    }

    /// Build a board from rows listed **top to bottom**, `#` = filled, `.` = empty.
    ///
    /// Missing rows at the top are empty. Handy for tests and benches.
    pub fn from_ascii(rows: &[&str], fill: Color) -> Self {
        let mut board = Self::new();
        let n = rows.len().min(ROWS);
        for (i, line) in rows.iter().rev().take(n).enumerate() {
            for (col, ch) in line.chars().take(COLUMNS).enumerate() {
                if ch == '#' {
                    board.set_cell(i, col, fill);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
