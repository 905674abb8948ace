use std::fmt;
use std::str::FromStr;

use super::board::{Board, Cell, COLS, ROWS};
use super::{Move, Player};
use crate::error::{IllegalMoveError, ParsePositionError};

/// Moves in a full game: one per cell.
pub const MAX_PLIES: usize = ROWS * COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// A Connect Four position: the grid, the side to move, the number of moves
/// played and the moves available next.
///
/// Positions are values. [`Position::apply_move`] returns a fresh position and
/// leaves `self` untouched, so a search can branch from the same parent as
/// many times as it likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    active_player: Player,
    ply_count: usize,
    legal_moves: Vec<Move>,
}

impl Position {
    /// Empty board, player one to move.
    pub fn initial() -> Self {
        Self::with_board(Board::new(), Player::One, 0)
    }

    /// Build a position from an arbitrary board. The side to move and the
    /// ply count are derived from the number of marks of each player.
    pub fn from_board(board: Board) -> Result<Self, ParsePositionError> {
        if board.has_floating_piece() {
            return Err(ParsePositionError::FloatingPiece);
        }

        let player_one = board.count(Cell::PlayerOne);
        let player_two = board.count(Cell::PlayerTwo);
        let active_player = if player_one == player_two {
            Player::One
        } else if player_one == player_two + 1 {
            Player::Two
        } else {
            return Err(ParsePositionError::BadCounts {
                player_one,
                player_two,
            });
        };

        Ok(Self::with_board(board, active_player, player_one + player_two))
    }

    fn with_board(board: Board, active_player: Player, ply_count: usize) -> Self {
        let legal_moves = Self::compute_legal_moves(&board);
        Position {
            board,
            active_player,
            ply_count,
            legal_moves,
        }
    }

    fn compute_legal_moves(board: &Board) -> Vec<Move> {
        (0..COLS)
            .filter_map(|column| board.open_row(column).map(|row| Move { column, row }))
            .collect()
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Moves played since the empty board
    pub fn ply_count(&self) -> usize {
        self.ply_count
    }

    /// One move per non-full column, left to right.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Row a piece dropped in `column` would land in.
    pub fn open_row(&self, column: usize) -> Option<usize> {
        self.board.open_row(column)
    }

    /// Resolve a column to the move that drops a piece there.
    pub fn move_for_column(&self, column: usize) -> Result<Move, IllegalMoveError> {
        if column >= COLS {
            return Err(IllegalMoveError::ColumnOutOfRange(column));
        }
        self.open_row(column)
            .map(|row| Move { column, row })
            .ok_or(IllegalMoveError::ColumnFull(column))
    }

    /// Apply a move and return the new position.
    pub fn apply_move(&self, mv: Move) -> Result<Position, IllegalMoveError> {
        if !self.legal_moves.contains(&mv) {
            return Err(IllegalMoveError::NotLegal {
                attempted: mv,
                legal: self.legal_moves.clone(),
            });
        }

        Ok(self.child(mv))
    }

    /// Apply a move taken from `self.legal_moves()` without re-checking it.
    pub(crate) fn child(&self, mv: Move) -> Position {
        debug_assert!(self.legal_moves.contains(&mv));
        let mut board = self.board;
        board.set(mv.row, mv.column, self.active_player.to_cell());

        Self::with_board(board, self.active_player.other(), self.ply_count + 1)
    }

    /// Drop a piece for the side to move in `column`.
    pub fn play_column(&self, column: usize) -> Result<Position, IllegalMoveError> {
        let mv = self.move_for_column(column)?;
        self.apply_move(mv)
    }

    /// Four in a line for `player` anywhere on the board.
    pub fn has_winner(&self, player: Player) -> bool {
        self.board.has_four(player.to_cell())
    }

    /// Board is full. Says nothing about winners; check those first.
    pub fn is_draw(&self) -> bool {
        self.ply_count == MAX_PLIES
    }

    /// Winner if there is one, otherwise a draw on a full board.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.has_winner(Player::One) {
            Some(GameOutcome::Winner(Player::One))
        } else if self.has_winner(Player::Two) {
            Some(GameOutcome::Winner(Player::Two))
        } else if self.is_draw() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}

/// Parse a diagram of six lines, top row first: `.` empty, `X` player one,
/// `O` player two. Blank lines and surrounding whitespace are ignored.
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(ParsePositionError::RowCount(lines.len()));
        }

        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != COLS {
                return Err(ParsePositionError::RowLength { row, found });
            }
            for (col, symbol) in line.chars().enumerate() {
                cells[row][col] = Cell::from_symbol(symbol)
                    .ok_or(ParsePositionError::UnknownSymbol { row, col, symbol })?;
            }
        }

        Position::from_board(Board::from_cells(cells))
    }
}
