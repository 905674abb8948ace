use crate::game::{Move, Position};

/// Anything that can pick a move for the side to move.
pub trait Agent {
    /// Select a legal move, or `None` when the board is full.
    fn select_move(&mut self, position: &Position) -> Option<Move>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
