use tracing::{debug, trace};

use crate::game::{Move, Player, Position, COLS};

use super::agent::Agent;
use super::heuristic::{ConnectFourHeuristic, Heuristic};

/// Utility of a position the searching side has won.
pub const WIN_UTILITY: f64 = f64::INFINITY;
/// Utility of a position the searching side has lost.
pub const LOSS_UTILITY: f64 = f64::NEG_INFINITY;
/// Utility of a full board with no winner.
pub const DRAW_UTILITY: f64 = 0.0;

/// Depth budgets accepted by the configuration layer.
pub const MIN_DEPTH: u32 = 1;
pub const MAX_DEPTH: u32 = 5;

/// Column ordering: center-first for better alpha-beta pruning.
const CENTER_FIRST: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Order in which interior nodes expand their children. The root always
/// walks left to right so ties go to the leftmost column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveOrdering {
    #[default]
    Natural,
    CenterFirst,
}

/// Search settings, loadable from the `[search]` table of the config file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u32,
    pub ordering: MoveOrdering,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 3,
            ordering: MoveOrdering::Natural,
        }
    }
}

/// Counters for one top-level search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Result of [`SearchEngine::find_best_move`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMove {
    pub mv: Move,
    pub utility: f64,
    pub stats: SearchStats,
}

/// Depth-limited alpha-beta minimax.
///
/// Values are always from the perspective of the side to move at the root:
/// that side maximizes, its opponent minimizes. Won and lost positions score
/// `±∞`, a full board without a winner scores 0, and the heuristic is only
/// consulted once the depth budget runs out.
pub struct SearchEngine {
    depth: u32,
    ordering: MoveOrdering,
    heuristic: Box<dyn Heuristic>,
}

impl SearchEngine {
    pub fn new(depth: u32) -> Self {
        SearchEngine {
            depth,
            ordering: MoveOrdering::Natural,
            heuristic: Box::new(ConnectFourHeuristic),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.depth).with_ordering(config.ordering)
    }

    pub fn with_ordering(mut self, ordering: MoveOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Box<dyn Heuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn ordering(&self) -> MoveOrdering {
        self.ordering
    }

    /// Best move for the side to move, or `None` if the board is full.
    ///
    /// Each legal move is applied and the child is searched to the configured
    /// depth with a full window. The strictly greatest value wins; ties keep
    /// the leftmost column.
    pub fn find_best_move(&self, position: &Position) -> Option<BestMove> {
        let me = position.active_player();
        self.select(position, |child, stats| {
            self.search(
                child,
                self.depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                me,
                stats,
            )
        })
    }

    /// Same selection rule as [`find_best_move`](Self::find_best_move) but
    /// without pruning. Exponentially slower; kept as a reference.
    pub fn find_best_move_unpruned(&self, position: &Position) -> Option<BestMove> {
        let me = position.active_player();
        self.select(position, |child, stats| {
            self.exhaustive(child, self.depth, me, stats)
        })
    }

    /// Alpha-beta value of `position` for `perspective` with a full window.
    pub fn alpha_beta(&self, position: &Position, depth: u32, perspective: Player) -> f64 {
        let mut stats = SearchStats::default();
        self.search(
            position,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            perspective,
            &mut stats,
        )
    }

    /// Plain minimax value of `position` for `perspective`.
    pub fn minimax(&self, position: &Position, depth: u32, perspective: Player) -> f64 {
        let mut stats = SearchStats::default();
        self.exhaustive(position, depth, perspective, &mut stats)
    }

    /// Exact score of a finished game, `None` while the game is still open.
    /// A winner takes precedence over a full board.
    pub fn terminal_utility(position: &Position, perspective: Player) -> Option<f64> {
        if position.has_winner(perspective) {
            Some(WIN_UTILITY)
        } else if position.has_winner(perspective.other()) {
            Some(LOSS_UTILITY)
        } else if position.legal_moves().is_empty() {
            Some(DRAW_UTILITY)
        } else {
            None
        }
    }

    /// Heuristic value of `position` for `perspective`.
    pub fn static_eval(&self, position: &Position, perspective: Player) -> f64 {
        self.heuristic.evaluate(position.board(), perspective)
    }

    fn select<F>(&self, position: &Position, mut evaluate: F) -> Option<BestMove>
    where
        F: FnMut(&Position, &mut SearchStats) -> f64,
    {
        let mut stats = SearchStats::default();
        let mut best: Option<(Move, f64)> = None;

        for &mv in position.legal_moves() {
            let utility = evaluate(&position.child(mv), &mut stats);
            trace!(mv = %mv, utility, "root move evaluated");
            if best.map_or(true, |(_, top)| utility > top) {
                best = Some((mv, utility));
            }
        }

        let (mv, utility) = best?;
        debug!(
            mv = %mv,
            utility,
            depth = self.depth,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            "search finished"
        );
        Some(BestMove { mv, utility, stats })
    }

    fn search(
        &self,
        position: &Position,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        perspective: Player,
        stats: &mut SearchStats,
    ) -> f64 {
        stats.nodes += 1;

        if depth == 0 {
            return self.static_eval(position, perspective);
        }
        if let Some(utility) = Self::terminal_utility(position, perspective) {
            return utility;
        }

        if position.active_player() == perspective {
            let mut best = f64::NEG_INFINITY;
            for mv in self.ordered_moves(position) {
                let child = position.child(mv);
                best = best.max(self.search(&child, depth - 1, alpha, beta, perspective, stats));
                alpha = alpha.max(best);
                if beta <= alpha {
                    stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for mv in self.ordered_moves(position) {
                let child = position.child(mv);
                best = best.min(self.search(&child, depth - 1, alpha, beta, perspective, stats));
                beta = beta.min(best);
                if beta <= alpha {
                    stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }

    fn exhaustive(
        &self,
        position: &Position,
        depth: u32,
        perspective: Player,
        stats: &mut SearchStats,
    ) -> f64 {
        stats.nodes += 1;

        if depth == 0 {
            return self.static_eval(position, perspective);
        }
        if let Some(utility) = Self::terminal_utility(position, perspective) {
            return utility;
        }

        let values = position
            .legal_moves()
            .iter()
            .map(|&mv| self.exhaustive(&position.child(mv), depth - 1, perspective, stats));
        if position.active_player() == perspective {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.fold(f64::INFINITY, f64::min)
        }
    }

    fn ordered_moves(&self, position: &Position) -> Vec<Move> {
        let legal = position.legal_moves();
        match self.ordering {
            MoveOrdering::Natural => legal.to_vec(),
            MoveOrdering::CenterFirst => CENTER_FIRST
                .iter()
                .filter_map(|&col| legal.iter().find(|m| m.column == col).copied())
                .collect(),
        }
    }
}

impl Agent for SearchEngine {
    fn select_move(&mut self, position: &Position) -> Option<Move> {
        self.find_best_move(position).map(|best| best.mv)
    }

    fn name(&self) -> &str {
        "Alpha-Beta"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::heuristic::MAX_HEURISTIC;
    use crate::ai::RandomAgent;
    use crate::game::GameOutcome;

    fn pos(diagram: &str) -> Position {
        diagram.parse().unwrap()
    }

    /// Human (X) has three along the bottom with both ends open.
    const OPEN_THREE: &str = "
        .......
        .......
        .......
        .......
        .OO....
        .XXX...
    ";

    /// Human (X) has three on the second row; only the left end is playable now.
    const SUPPORTED_THREE: &str = "
        .......
        .......
        .......
        .......
        ..XXX.O
        .XOOX.O
    ";

    /// Computer (O) completes the bottom row by playing column 0.
    const ONE_FROM_WIN: &str = "
        .......
        .......
        .......
        .......
        ....X..
        .OOOXXX
    ";

    const MID_GAMES: [&str; 4] = [
        "
        .......
        .......
        .....O.
        .O...X.
        OX...X.
        XOX.XO.
        ",
        "
        .......
        .......
        O...X..
        X...X..
        OX..O..
        XO.OX..
        ",
        "
        .......
        .......
        .......
        .....XX
        ...XOOX
        OOXXOXO
        ",
        "
        .......
        .......
        .......
        O.O....
        OOOX...
        XXXO.XX
        ",
    ];

    const DRAWN: &str = "
        XXOOXXO
        XXOOXXO
        OOXXOOX
        XXOOXXO
        OOXXOOX
        OOXXOOX
    ";

    // --- Scenario tests ---

    #[test]
    fn opening_prefers_center() {
        let engine = SearchEngine::new(3);
        let best = engine.find_best_move(&Position::initial()).unwrap();
        assert_eq!(best.mv.column, 3);
        assert_eq!(best.mv.row, 5);
    }

    #[test]
    fn blocks_open_ended_three() {
        let position = pos(OPEN_THREE);
        assert_eq!(position.active_player(), Player::Two);
        for depth in 2..=3 {
            let best = SearchEngine::new(depth).find_best_move(&position).unwrap();
            assert!(
                best.mv.column == 0 || best.mv.column == 4,
                "depth {depth}: expected a block at column 0 or 4, got {}",
                best.mv
            );
        }
    }

    #[test]
    fn blocks_the_playable_end() {
        let position = pos(SUPPORTED_THREE);
        for depth in 2..=4 {
            let best = SearchEngine::new(depth).find_best_move(&position).unwrap();
            assert_eq!(best.mv, Move { column: 1, row: 4 }, "depth {depth}");
        }
    }

    #[test]
    fn takes_immediate_win() {
        let position = pos(ONE_FROM_WIN);
        for depth in 1..=4 {
            let best = SearchEngine::new(depth).find_best_move(&position).unwrap();
            assert_eq!(best.mv.column, 0, "depth {depth}");
            assert_eq!(best.utility, WIN_UTILITY, "depth {depth}");
        }
    }

    #[test]
    fn no_move_on_full_board() {
        let engine = SearchEngine::new(3);
        assert!(engine.find_best_move(&pos(DRAWN)).is_none());
    }

    // --- Utility tests ---

    #[test]
    fn terminal_utilities() {
        let drawn = pos(DRAWN);
        assert_eq!(
            SearchEngine::terminal_utility(&drawn, Player::One),
            Some(DRAW_UTILITY)
        );

        let won = pos(ONE_FROM_WIN).play_column(0).unwrap();
        assert_eq!(won.outcome(), Some(GameOutcome::Winner(Player::Two)));
        assert_eq!(
            SearchEngine::terminal_utility(&won, Player::Two),
            Some(WIN_UTILITY)
        );
        assert_eq!(
            SearchEngine::terminal_utility(&won, Player::One),
            Some(LOSS_UTILITY)
        );
        assert_eq!(
            SearchEngine::terminal_utility(&Position::initial(), Player::One),
            None
        );
    }

    #[test]
    fn win_on_full_board_is_not_a_draw() {
        // O's last drop at d6 completes the d6-g3 diagonal
        let full = pos("
            XXXOXXO
            XXOOOXO
            OOXXOOX
            XXOOXXO
            OOXXOOX
            OOXXOOX
        ");
        assert_eq!(full.ply_count(), 42);
        assert!(full.legal_moves().is_empty());
        assert!(full.is_draw());
        assert_eq!(full.outcome(), Some(GameOutcome::Winner(Player::Two)));
        assert_eq!(
            SearchEngine::terminal_utility(&full, Player::Two),
            Some(WIN_UTILITY)
        );
        assert_eq!(
            SearchEngine::terminal_utility(&full, Player::One),
            Some(LOSS_UTILITY)
        );
    }

    #[test]
    fn sentinels_dominate_heuristic_range() {
        assert!(WIN_UTILITY > MAX_HEURISTIC);
        assert!(LOSS_UTILITY < -MAX_HEURISTIC);
        // the most negative heuristic is bounded by one penalty per window
        assert!(LOSS_UTILITY < -(crate::game::WINDOW_COUNT as f64) * 4.0);
        assert!(DRAW_UTILITY.is_finite());
    }

    #[test]
    fn depth_zero_uses_heuristic_even_when_won() {
        let won = pos(ONE_FROM_WIN).play_column(0).unwrap();
        let engine = SearchEngine::new(1);
        let value = engine.alpha_beta(&won, 0, Player::Two);
        assert!(value.is_finite());
        assert_eq!(value, engine.static_eval(&won, Player::Two));
    }

    // --- Pruning tests ---

    #[test]
    fn alpha_beta_matches_minimax() {
        let mut diagrams = MID_GAMES.to_vec();
        diagrams.extend([OPEN_THREE, SUPPORTED_THREE, ONE_FROM_WIN]);
        for diagram in diagrams {
            let position = pos(diagram);
            for depth in 1..=3 {
                let engine = SearchEngine::new(depth);
                let pruned = engine.find_best_move(&position).unwrap();
                let full = engine.find_best_move_unpruned(&position).unwrap();
                assert_eq!(pruned.mv, full.mv, "depth {depth}\n{position}");
                assert_eq!(pruned.utility, full.utility, "depth {depth}\n{position}");
                assert!(pruned.stats.nodes <= full.stats.nodes);

                let me = position.active_player();
                assert_eq!(
                    engine.alpha_beta(&position, depth, me),
                    engine.minimax(&position, depth, me)
                );
            }
        }
    }

    #[test]
    fn center_first_ordering_keeps_results() {
        for diagram in MID_GAMES {
            let position = pos(diagram);
            let natural = SearchEngine::new(3);
            let centered = SearchEngine::new(3).with_ordering(MoveOrdering::CenterFirst);
            let a = natural.find_best_move(&position).unwrap();
            let b = centered.find_best_move(&position).unwrap();
            assert_eq!(a.mv, b.mv);
            assert_eq!(a.utility, b.utility);
        }
    }

    #[test]
    fn mid_game_regression() {
        let best = SearchEngine::new(3).find_best_move(&pos(MID_GAMES[0])).unwrap();
        assert_eq!(best.mv, Move { column: 2, row: 4 });
        assert_eq!(best.utility, 6.0);
        assert!(best.stats.cutoffs > 0);
    }

    #[test]
    fn custom_heuristic_is_used() {
        struct Flat;
        impl Heuristic for Flat {
            fn evaluate(&self, _board: &crate::game::Board, _player: Player) -> f64 {
                1.0
            }
        }
        let engine = SearchEngine::new(2).with_heuristic(Box::new(Flat));
        let best = engine.find_best_move(&Position::initial()).unwrap();
        // every line scores the same, so the leftmost column wins the tie
        assert_eq!(best.mv.column, 0);
        assert_eq!(best.utility, 1.0);
    }

    // --- Integration tests ---

    #[test]
    fn full_game_vs_self_completes() {
        let mut first = SearchEngine::new(2);
        let mut second = SearchEngine::new(3);
        let mut position = Position::initial();

        while !position.is_game_over() {
            let agent: &mut dyn Agent = match position.active_player() {
                Player::One => &mut first,
                Player::Two => &mut second,
            };
            let mv = agent.select_move(&position).unwrap();
            position = position.apply_move(mv).unwrap();
        }

        assert!(position.outcome().is_some());
        assert!(position.ply_count() <= crate::game::MAX_PLIES);
    }

    #[test]
    fn beats_random_agent() {
        let games = 20;
        let mut wins = 0;

        for seed in 0..games {
            let engine_side = if seed % 2 == 0 { Player::One } else { Player::Two };
            let mut engine = SearchEngine::new(3);
            let mut random = RandomAgent::seeded(seed);
            let mut position = Position::initial();

            while !position.is_game_over() {
                let mv = if position.active_player() == engine_side {
                    engine.select_move(&position)
                } else {
                    random.select_move(&position)
                };
                position = position.apply_move(mv.unwrap()).unwrap();
            }

            if position.outcome() == Some(GameOutcome::Winner(engine_side)) {
                wins += 1;
            }
        }

        assert!(
            wins * 10 >= games * 8,
            "alpha-beta should beat random at least 80% of the time, won {wins}/{games}"
        );
    }

    #[test]
    fn name_is_alpha_beta() {
        assert_eq!(SearchEngine::new(3).name(), "Alpha-Beta");
    }

    #[test]
    fn from_config_applies_settings() {
        let config = SearchConfig {
            depth: 5,
            ordering: MoveOrdering::CenterFirst,
        };
        let engine = SearchEngine::from_config(&config);
        assert_eq!(engine.depth(), 5);
        assert_eq!(engine.ordering(), MoveOrdering::CenterFirst);
    }
}
