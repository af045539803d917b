use std::collections::VecDeque;

use crate::board::{Board, Cell, Row, BOARD_HEIGHT};
use crate::config::Config;
use crate::piece::{PieceProvider, Position, RandomPieceProvider, Tetromino, TetrominoKind};

// ============================================================================
// Configuration
// ============================================================================

pub const SCORE_PER_ROW: u32 = 100;

/// Undrained events beyond this are dropped oldest first.
pub const MAX_PENDING_EVENTS: usize = 256;

// ============================================================================
// Types
// ============================================================================

/// What happens when a freshly spawned piece overlaps landed cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SpawnPolicy {
    /// Stop play and raise the game-over flag.
    #[default]
    EndGame,
    /// Place the piece anyway and keep playing.
    Ignore,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    GameStarted,
    PieceSpawned(TetrominoKind),
    PieceMoved,
    PieceRotated,
    PieceLocked,
    LinesCleared(u32),
    GameOver,
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    board: Board,
    current: Option<Tetromino>,
    position: Position,
    score: u32,
    lines_cleared: u32,
    playing: bool,
    game_over: bool,
    spawn_policy: SpawnPolicy,
    piece_provider: Box<dyn PieceProvider>,
    events: VecDeque<GameEvent>,
}

impl Game {
    /// An idle game: empty board, no active piece, waiting for `start`.
    pub fn new() -> Self {
        Self::with_provider(Box::new(RandomPieceProvider::new()))
    }

    pub fn with_provider(piece_provider: Box<dyn PieceProvider>) -> Self {
        Self {
            board: Board::new(),
            current: None,
            position: Position::SPAWN,
            score: 0,
            lines_cleared: 0,
            playing: false,
            game_over: false,
            spawn_policy: SpawnPolicy::default(),
            piece_provider,
            events: VecDeque::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let provider = match config.seed {
            Some(seed) => RandomPieceProvider::seeded(seed),
            None => RandomPieceProvider::new(),
        };
        Self::with_provider(Box::new(provider)).with_spawn_policy(config.spawn_policy())
    }

    pub fn with_spawn_policy(mut self, spawn_policy: SpawnPolicy) -> Self {
        self.spawn_policy = spawn_policy;
        self
    }

    /// A game already in play with a prepared board and active piece.
    pub fn with_board(board: Board, piece: Tetromino, position: Position) -> Self {
        let mut game = Self::new();
        game.board = board;
        game.current = Some(piece);
        game.position = position;
        game.playing = true;
        game
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Begins a fresh session. Valid from any state. Undrained events from
    /// the previous session stay queued ahead of `GameStarted`.
    pub fn start(&mut self) {
        self.board = Board::new();
        self.score = 0;
        self.lines_cleared = 0;
        self.game_over = false;
        self.playing = true;
        self.record(GameEvent::GameStarted);
        self.spawn_piece();
    }

    /// One gravity step: fall a row, or lock, clear, score and respawn.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(piece) = self.current.take() else {
            return;
        };

        let below = self.position.offset(0, 1);
        if self.board.collides(&piece, below) {
            self.lock_and_spawn(piece);
        } else {
            self.position = below;
            self.current = Some(piece);
            self.record(GameEvent::PieceMoved);
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    /// Clockwise rotation in place. No wall kicks: a colliding rotation is
    /// rejected.
    pub fn rotate(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let Some(rotated) = self.current.as_ref().map(Tetromino::rotated) else {
            return false;
        };
        if self.board.collides(&rotated, self.position) {
            return false;
        }
        self.current = Some(rotated);
        self.record(GameEvent::PieceRotated);
        true
    }

    fn shift(&mut self, dx: i16) -> bool {
        if !self.playing {
            return false;
        }
        let Some(piece) = self.current.as_ref() else {
            return false;
        };
        let target = self.position.offset(dx, 0);
        if self.board.collides(piece, target) {
            return false;
        }
        self.position = target;
        self.record(GameEvent::PieceMoved);
        true
    }

    fn lock_and_spawn(&mut self, piece: Tetromino) {
        self.board.merge(&piece, self.position);
        self.record(GameEvent::PieceLocked);

        let cleared = self.board.clear_completed_rows();
        if cleared > 0 {
            self.add_score(cleared);
            self.record(GameEvent::LinesCleared(cleared));
        }

        self.spawn_piece();
    }

    fn add_score(&mut self, rows: u32) {
        self.score += rows * SCORE_PER_ROW;
        self.lines_cleared += rows;
    }

    fn spawn_piece(&mut self) {
        let piece = self.generate_piece();
        self.position = Position::SPAWN;
        self.record(GameEvent::PieceSpawned(piece.kind()));

        let blocked = self.board.collides(&piece, self.position);
        self.current = Some(piece);

        if blocked && self.spawn_policy == SpawnPolicy::EndGame {
            self.playing = false;
            self.game_over = true;
            self.record(GameEvent::GameOver);
        }
    }

    /// Draws the next piece from the provider in spawn orientation.
    pub fn generate_piece(&mut self) -> Tetromino {
        Tetromino::new(self.piece_provider.next_piece())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// True if `piece` with its origin at `(x, y)` would overlap a wall, the
    /// floor, or a landed cell.
    pub fn check_collision(&self, piece: &Tetromino, x: i16, y: i16) -> bool {
        self.board.collides(piece, Position::new(x, y))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_piece(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn spawn_policy(&self) -> SpawnPolicy {
        self.spawn_policy
    }

    /// Returns the visual grid state with the active piece overlaid
    pub fn render_grid(&self) -> [Row; BOARD_HEIGHT] {
        let mut visual = self.board.clone();
        if let Some(piece) = &self.current {
            let cell = Cell::Filled(piece.color());
            for block in piece.blocks(self.position) {
                visual.set(block.x, block.y, cell);
            }
        }
        *visual.rows()
    }

    /// Takes and clears all pending events, oldest first. At most
    /// `MAX_PENDING_EVENTS` are kept between drains.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    fn record(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;
    use crate::board::BOARD_WIDTH;
    use crate::piece::{Color, Shape};

    pub fn empty_board() -> Board {
        Board::new()
    }

    pub fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set(x as i16, y as i16, Cell::Filled(Color::Red));
        }
    }

    pub fn fill_row_with_gap(board: &mut Board, y: usize, gap_x: usize) {
        for x in 0..BOARD_WIDTH {
            if x != gap_x {
                board.set(x as i16, y as i16, Cell::Filled(Color::Red));
            }
        }
    }

    /// The shape matrix as 0/1 rows.
    pub fn shape_rows(shape: &Shape) -> Vec<Vec<u8>> {
        let mut rows = vec![vec![0; shape.width()]; shape.height()];
        for (r, c) in shape.occupied() {
            rows[r][c] = 1;
        }
        rows
    }

    /// A vertical I piece (4x1 column).
    pub fn vertical_i() -> Tetromino {
        Tetromino::new(TetrominoKind::I).rotated()
    }
}
