use std::path::PathBuf;

use crate::game::{Move, COLS, ROWS};

/// Errors raised when a move does not fit the position it is applied to.
/// The position itself is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveError {
    #[error("move {attempted} is not legal here (legal: {})", list_moves(.legal))]
    NotLegal { attempted: Move, legal: Vec<Move> },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is out of range (expected 0..{cols})", cols = COLS)]
    ColumnOutOfRange(usize),
}

/// Errors from parsing move notation such as `d1`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("move notation must be a column letter and a rank, got {0:?}")]
    Malformed(String),

    #[error("unknown column letter {0:?} (expected a-g)")]
    BadColumn(char),

    #[error("unknown rank {0:?} (expected 1-6)")]
    BadRank(char),
}

/// Errors from parsing a text diagram into a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePositionError {
    #[error("expected {rows} rows, found {0}", rows = ROWS)]
    RowCount(usize),

    #[error("row {row} has {found} cells, expected {cols}", cols = COLS)]
    RowLength { row: usize, found: usize },

    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },

    #[error("a piece is floating above an empty cell")]
    FloatingPiece,

    #[error("mark counts X={player_one} O={player_two} cannot arise from alternating play")]
    BadCounts { player_one: usize, player_two: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

fn list_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
