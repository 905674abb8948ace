use std::fmt;
use std::str::FromStr;

use super::board::{COLS, ROWS};
use crate::error::ParseMoveError;

/// A piece drop: the column chosen and the row the piece lands in.
///
/// Callers address moves by column; the row is filled in by
/// [`Position::move_for_column`](super::Position::move_for_column) or taken
/// from [`Position::legal_moves`](super::Position::legal_moves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub column: usize,
    pub row: usize,
}

impl Move {
    /// Rank counted from the bottom of the board, starting at 1.
    /// `None` for a row below the board.
    pub fn rank(self) -> Option<usize> {
        ROWS.checked_sub(self.row).filter(|&rank| rank > 0)
    }
}

/// Column letter `a`-`g` followed by the rank `1`-`6`, e.g. `d1`.
/// Off-board coordinates print as `(col 9, row 0)`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank() {
            Some(rank) if self.column < COLS => {
                let letter = (b'a' + self.column as u8) as char;
                write!(f, "{letter}{rank}")
            }
            _ => write!(f, "(col {}, row {})", self.column, self.row),
        }
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseMoveError::Malformed(s.to_string()));
        };

        let column = match letter.to_ascii_lowercase() {
            c @ 'a'..='g' => (c as u8 - b'a') as usize,
            _ => return Err(ParseMoveError::BadColumn(letter)),
        };
        let rank = match digit.to_digit(10) {
            Some(r) if (1..=ROWS as u32).contains(&r) => r as usize,
            _ => return Err(ParseMoveError::BadRank(digit)),
        };

        Ok(Move {
            column,
            row: ROWS - rank,
        })
    }
}
