//! Core Connect Four game logic: board, players, moves and immutable
//! positions.

mod board;
mod moves;
mod player;
mod position;

pub use board::{windows, Board, Cell, Window, CENTER_COL, COLS, ROWS, WINDOW_COUNT};
pub use moves::Move;
pub use player::Player;
pub use position::{GameOutcome, Position, MAX_PLIES};
