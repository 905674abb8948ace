use crate::game::{windows, Board, Cell, Player, CENTER_COL, ROWS, WINDOW_COUNT};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> f64;
}

const FOUR_OWN: f64 = 100.0;
const THREE_OWN: f64 = 5.0;
const TWO_OWN: f64 = 2.0;
const THREE_OPP: f64 = -4.0;
const CENTER_BONUS: f64 = 3.0;

/// Largest value [`ConnectFourHeuristic`] can produce: every window full of
/// own marks plus a full centre column.
pub const MAX_HEURISTIC: f64 = WINDOW_COUNT as f64 * FOUR_OWN + ROWS as f64 * CENTER_BONUS;

/// Default heuristic: scores every 4-cell window for the evaluating player
/// and adds a bonus for each of its marks in the centre column.
///
/// Centre marks also contribute through the windows that contain them; the
/// two terms are summed as is.
pub struct ConnectFourHeuristic;

impl ConnectFourHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> f64 {
        let mut score = if own == 4 {
            FOUR_OWN
        } else if own == 3 && empty == 1 {
            THREE_OWN
        } else if own == 2 && empty == 2 {
            TWO_OWN
        } else {
            0.0
        };

        if opp == 3 && empty == 1 {
            score += THREE_OPP;
        }

        score
    }
}

impl Heuristic for ConnectFourHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();

        let center = (0..ROWS)
            .filter(|&row| board.get(row, CENTER_COL) == own_cell)
            .count();
        let mut score = center as f64 * CENTER_BONUS;

        for window in windows() {
            let mut own = 0;
            let mut opp = 0;
            let mut empty = 0;
            for cell in board.window(&window) {
                match cell {
                    Cell::Empty => empty += 1,
                    c if c == own_cell => own += 1,
                    c if c == opp_cell => opp += 1,
                    _ => unreachable!("cell is empty or belongs to one of the players"),
                }
            }
            score += Self::score_window(own, opp, empty);
        }

        score
    }
}
