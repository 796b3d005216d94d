//! Active piece controller - the currently falling tetromino
//!
//! A [`Tetromino`] owns four tile positions (pivot last), its color, shape and
//! rotation state. Every operation checks against a borrowed [`Board`] and
//! either applies completely or leaves the piece untouched.

use crate::board::Board;
use crate::pieces::{kicks, spawn_layout, spawn_origin, TilePos};
use crate::types::{BlockType, Color, Direction, Rotation, RotationDirection, COLUMNS};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    cells: [TilePos; 4],
    color: Color,
    kind: BlockType,
    rotation: Rotation,
}

impl Tetromino {
    /// Spawn a piece above the stack.
    ///
    /// Spawning on top of settled tiles is allowed; the round only ends when
    /// a piece locks above the visible board.
    pub fn spawn(kind: BlockType, stack_height: Option<usize>) -> Self {
        Self::at(kind, spawn_origin(stack_height))
    }

    /// Spawn-orientation piece laid out around an explicit reference tile
    pub fn at(kind: BlockType, origin: TilePos) -> Self {
        let layout = spawn_layout(kind);
        let cells = layout.map(|(dc, dr)| origin.offset(dc, dr));
        Self {
            cells,
            color: kind.color(),
            kind,
            rotation: Rotation::North,
        }
    }

    pub fn cells(&self) -> &[TilePos; 4] {
        &self.cells
    }

    /// Rotation center (always the last cell)
    pub fn pivot(&self) -> TilePos {
        self.cells[3]
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> BlockType {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// True unless a cell sits on the floor or on a settled tile.
    /// Cells still above the board never collide.
    pub fn can_descend(&self, board: &Board) -> bool {
        self.cells
            .iter()
            .all(|c| c.row > 0 && !board.is_occupied(c.row - 1, c.col))
    }

    /// Shift down one row if possible
    pub fn descend(&mut self, board: &Board) -> bool {
        if !self.can_descend(board) {
            return false;
        }
        for c in &mut self.cells {
            c.row -= 1;
        }
        true
    }

    /// Shift one column; fails without mutation at a wall or settled tile
    pub fn move_horizontal(&mut self, board: &Board, direction: Direction) -> bool {
        let dx = direction.dx();
        let blocked = self.cells.iter().any(|c| {
            let col = c.col + dx;
            col < 0 || col >= COLUMNS as i32 || board.is_occupied(c.row, col)
        });
        if blocked {
            return false;
        }
        for c in &mut self.cells {
            c.col += dx;
        }
        true
    }

    /// Rotate around the pivot using SRS kicks.
    ///
    /// O never rotates (returns false). For every other shape the rotation
    /// state always advances and `true` is returned; the cells only move when
    /// one of the five kick candidates fits.
    pub fn rotate(&mut self, board: &Board, direction: RotationDirection) -> bool {
        let target = self.rotation.rotate(direction);
        let Some(candidates) = kicks(self.kind, self.rotation, target) else {
            return false;
        };

        if let Some(cells) = candidates
            .iter()
            .map(|&kick| self.rotated_cells(direction, kick))
            .find(|cells| Self::fits(board, cells))
        {
            self.cells = cells;
        }

        self.rotation = target;
        true
    }

    fn rotated_cells(&self, direction: RotationDirection, (dx, dy): (i32, i32)) -> [TilePos; 4] {
        let d = direction.sign();
        let pivot = self.pivot();
        self.cells.map(|c| {
            let (rc, rr) = (c.col - pivot.col, c.row - pivot.row);
            TilePos::new(pivot.col + d * rr + dx, pivot.row - d * rc - dy)
        })
    }

    fn fits(board: &Board, cells: &[TilePos; 4]) -> bool {
        cells.iter().all(|c| {
            c.col >= 0 && c.col < COLUMNS as i32 && c.row >= 0 && !board.is_occupied(c.row, c.col)
        })
    }

    /// The piece as it would rest after a hard drop
    pub fn landed(&self, board: &Board) -> Tetromino {
        let mut shadow = *self;
        while shadow.descend(board) {}
        shadow
    }

    /// Pivot position after a simulated hard drop; `self` is unchanged
    pub fn end_location(&self, board: &Board) -> TilePos {
        self.landed(board).pivot()
    }
}
