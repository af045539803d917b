use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    /// Every piece spawns with its bounding box at the top-left corner.
    pub const SPAWN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Color tag written into the board when a piece locks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Orange,
    Blue,
}

impl Color {
    pub fn name(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Blue => "blue",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum TetrominoKind {
    I,
    O,
    S,
    Z,
    T,
    L,
    J,
}

// Standard L and J. The web version used a second O-like block for orange L and an L shape for blue J.
const SHAPE_I: &[&[u8]] = &[&[1, 1, 1, 1]];
const SHAPE_O: &[&[u8]] = &[&[1, 1], &[1, 1]];
const SHAPE_S: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const SHAPE_Z: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];
const SHAPE_T: &[&[u8]] = &[&[1, 1, 1], &[0, 1, 0]];
const SHAPE_L: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];
const SHAPE_J: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];

impl TetrominoKind {
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::T,
        TetrominoKind::L,
        TetrominoKind::J,
    ];

    /// Spawn orientation of this kind.
    pub fn shape(&self) -> Shape {
        let table = match self {
            TetrominoKind::I => SHAPE_I,
            TetrominoKind::O => SHAPE_O,
            TetrominoKind::S => SHAPE_S,
            TetrominoKind::Z => SHAPE_Z,
            TetrominoKind::T => SHAPE_T,
            TetrominoKind::L => SHAPE_L,
            TetrominoKind::J => SHAPE_J,
        };
        Shape::from_table(table)
    }

    pub fn color(&self) -> Color {
        match self {
            TetrominoKind::I => Color::Cyan,
            TetrominoKind::O => Color::Yellow,
            TetrominoKind::S => Color::Green,
            TetrominoKind::Z => Color::Purple,
            TetrominoKind::T => Color::Red,
            TetrominoKind::L => Color::Orange,
            TetrominoKind::J => Color::Blue,
        }
    }
}

// ============================================================================
// Shape
// ============================================================================

/// Rectangular occupancy matrix, indexed `[row][col]`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Shape {
    cells: Vec<Vec<bool>>,
}

impl Shape {
    fn from_table(rows: &[&[u8]]) -> Self {
        Self {
            cells: rows
                .iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Local `(row, col)` of every occupied cell, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(c, _)| (r, c))
        })
    }

    /// 90° clockwise: `new[c][height - 1 - r] = old[r][c]`.
    pub fn rotated_clockwise(&self) -> Self {
        let height = self.height();
        let cells = (0..self.width())
            .map(|c| (0..height).rev().map(|r| self.cells[r][c]).collect())
            .collect();
        Self { cells }
    }
}

// ============================================================================
// Tetromino
// ============================================================================

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tetromino {
    kind: TetrominoKind,
    shape: Shape,
}

impl Tetromino {
    pub fn new(kind: TetrominoKind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
        }
    }

    pub fn kind(&self) -> TetrominoKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Board cells covered by this piece when its origin sits at `position`.
    pub fn blocks(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        self.shape
            .occupied()
            .map(move |(r, c)| position.offset(c as i16, r as i16))
    }

    /// Clockwise rotation. The receiver is left untouched.
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.rotated_clockwise(),
        }
    }
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> TetrominoKind;
}

/// Uniform choice over the seven kinds.
pub struct RandomPieceProvider {
    rng: StdRng,
}

impl RandomPieceProvider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPieceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceProvider for RandomPieceProvider {
    fn next_piece(&mut self) -> TetrominoKind {
        TetrominoKind::ALL[self.rng.gen_range(0..TetrominoKind::ALL.len())]
    }
}

/// Replays a fixed list of kinds, cycling when exhausted.
pub struct SequencePieceProvider {
    pieces: Vec<TetrominoKind>,
    index: usize,
}

impl SequencePieceProvider {
    /// # Panics
    ///
    /// Panics if `pieces` is empty.
    pub fn new(pieces: Vec<TetrominoKind>) -> Self {
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> TetrominoKind {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}
