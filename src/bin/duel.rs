use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use ab_connect_four::ai::{Agent, MoveOrdering, RandomAgent, SearchEngine, MAX_DEPTH, MIN_DEPTH};
use ab_connect_four::game::{GameOutcome, Player, Position};
use ab_connect_four::logging;

/// Play headless matches between the alpha-beta engine and an opponent.
#[derive(Parser)]
#[command(name = "duel", about = "Pit the alpha-beta engine against an opponent")]
struct Cli {
    /// Search depth of the engine under test
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Opponent kind
    #[arg(long, value_enum, default_value = "random")]
    opponent: Opponent,

    /// Search depth of an alpha-beta opponent
    #[arg(long, default_value_t = 1)]
    opponent_depth: u32,

    /// Number of games; sides alternate, the engine starts the first game
    #[arg(long, default_value_t = 20)]
    games: u64,

    /// Seed for the random opponent
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Child ordering for interior search nodes of both alpha-beta players
    #[arg(long, value_enum, default_value = "natural")]
    ordering: Ordering,
}

#[derive(Clone, Copy, ValueEnum)]
enum Opponent {
    Random,
    AlphaBeta,
}

#[derive(Clone, Copy, ValueEnum)]
enum Ordering {
    Natural,
    CenterFirst,
}

impl From<Ordering> for MoveOrdering {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Natural => MoveOrdering::Natural,
            Ordering::CenterFirst => MoveOrdering::CenterFirst,
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    wins: u64,
    losses: u64,
    draws: u64,
}

fn main() -> Result<()> {
    logging::init_stderr("info");
    let cli = Cli::parse();

    for (name, depth) in [("depth", cli.depth), ("opponent-depth", cli.opponent_depth)] {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            bail!("--{name} must be in {MIN_DEPTH}..={MAX_DEPTH}, got {depth}");
        }
    }

    let mut engine = SearchEngine::new(cli.depth).with_ordering(cli.ordering.into());
    let mut opponent: Box<dyn Agent> = match cli.opponent {
        Opponent::Random => Box::new(RandomAgent::seeded(cli.seed)),
        Opponent::AlphaBeta => Box::new(
            SearchEngine::new(cli.opponent_depth).with_ordering(cli.ordering.into()),
        ),
    };

    let mut tally = Tally::default();
    for game in 0..cli.games {
        let engine_side = if game % 2 == 0 { Player::One } else { Player::Two };
        let (outcome, plies) = play_game(&mut engine, opponent.as_mut(), engine_side)
            .with_context(|| format!("game {game}"))?;

        match outcome {
            GameOutcome::Winner(p) if p == engine_side => tally.wins += 1,
            GameOutcome::Winner(_) => tally.losses += 1,
            GameOutcome::Draw => tally.draws += 1,
        }
        tracing::info!(game, engine_side = ?engine_side, outcome = ?outcome, plies, "game finished");
    }

    println!(
        "{} (depth {}) vs {}: {} wins, {} losses, {} draws over {} games",
        engine.name(),
        cli.depth,
        opponent.name(),
        tally.wins,
        tally.losses,
        tally.draws,
        cli.games
    );
    Ok(())
}

fn play_game(
    engine: &mut SearchEngine,
    opponent: &mut dyn Agent,
    engine_side: Player,
) -> Result<(GameOutcome, usize)> {
    let mut position = Position::initial();

    loop {
        if let Some(outcome) = position.outcome() {
            return Ok((outcome, position.ply_count()));
        }

        let agent: &mut dyn Agent = if position.active_player() == engine_side {
            &mut *engine
        } else {
            &mut *opponent
        };
        let Some(mv) = agent.select_move(&position) else {
            bail!("{} found no move on an open board", agent.name());
        };
        position = position.apply_move(mv)?;
    }
}
