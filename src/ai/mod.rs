//! Move selection: the alpha-beta search engine, its static heuristic, and
//! a random sparring agent.

mod agent;
pub mod alpha_beta;
pub mod heuristic;
mod random;

pub use agent::Agent;
pub use alpha_beta::{
    BestMove, MoveOrdering, SearchConfig, SearchEngine, SearchStats, DRAW_UTILITY, LOSS_UTILITY,
    MAX_DEPTH, MIN_DEPTH, WIN_UTILITY,
};
pub use heuristic::{ConnectFourHeuristic, Heuristic, MAX_HEURISTIC};
pub use random::RandomAgent;
