use crate::piece::{Color, Position, Tetromino};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }
}

pub type Row = [Cell; BOARD_WIDTH];

/// Landed cells. Row 0 is the top of the well.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.rows
    }

    fn index(x: i16, y: i16) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as usize >= BOARD_WIDTH || y as usize >= BOARD_HEIGHT {
            return None;
        }
        Some((y as usize, x as usize))
    }

    /// `None` outside the grid.
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        Self::index(x, y).map(|(row, col)| self.rows[row][col])
    }

    /// Returns false (and writes nothing) outside the grid.
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((row, col)) => {
                self.rows[row][col] = cell;
                true
            }
            None => false,
        }
    }

    /// Out-of-bounds cells count as occupied.
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        self.get(x, y).map_or(true, |cell| !cell.is_empty())
    }

    /// True if `piece` at `position` overlaps a wall, the floor, or a landed
    /// cell.
    pub fn collides(&self, piece: &Tetromino, position: Position) -> bool {
        piece
            .blocks(position)
            .any(|block| self.is_occupied(block.x, block.y))
    }

    /// Writes the piece's color into every cell it covers. Cells outside the
    /// grid are dropped; callers only merge positions that just passed a
    /// collision check.
    pub fn merge(&mut self, piece: &Tetromino, position: Position) {
        let color = piece.color();
        for block in piece.blocks(position) {
            self.set(block.x, block.y, Cell::Filled(color));
        }
    }

    pub fn is_row_complete(&self, y: usize) -> bool {
        self.rows[y].iter().all(|cell| !cell.is_empty())
    }

    pub fn filled_count_in_row(&self, y: usize) -> usize {
        self.rows[y].iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn total_filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Drops every full row and refills from the top with empty rows.
    /// Surviving rows keep their relative order. Returns the number removed.
    pub fn clear_completed_rows(&mut self) -> u32 {
        let mut write = BOARD_HEIGHT;
        for read in (0..BOARD_HEIGHT).rev() {
            if !self.is_row_complete(read) {
                write -= 1;
                self.rows[write] = self.rows[read];
            }
        }

        let cleared = write;
        for row in &mut self.rows[..cleared] {
            *row = [Cell::Empty; BOARD_WIDTH];
        }
        cleared as u32
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
