use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use quoridor::search::SearchConfig;
use quoridor::strategy::StrategyKind;
use quoridor::tournament::{Tournament, TournamentConfig};

/// Play computer strategies against each other and tabulate win rates
#[derive(Parser, Debug)]
#[command(name = "quoridor-tournament", version)]
struct Args {
    /// Games per pairing; seats alternate between games
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Plies after which a game is scored as a draw
    #[arg(long, default_value_t = 150)]
    max_plies: usize,

    /// Look-ahead of the search strategy
    #[arg(short, long, default_value_t = 1)]
    depth: usize,

    /// Per-turn time budget of the search strategy, in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Search every legal wall instead of the relevant ones
    #[arg(long)]
    all_walls: bool,

    /// Seed for the random choices of every strategy
    #[arg(long)]
    seed: Option<u64>,

    /// Strategies taking part
    #[arg(short, long, value_enum, num_args = 1.., default_values_t = StrategyKind::ALL)]
    strategies: Vec<StrategyKind>,

    /// Where to write the CSV results
    #[arg(short, long, default_value = "tournament_results.csv")]
    output: PathBuf,
}

impl Args {
    fn config(&self) -> TournamentConfig {
        let search = SearchConfig {
            depth: self.depth,
            deadline: self.deadline_ms.map(Duration::from_millis),
            prune_walls: !self.all_walls,
            seed: self.seed,
            ..SearchConfig::default()
        };
        TournamentConfig {
            games_per_match: self.games,
            max_plies: self.max_plies,
            search,
            output: self.output.clone(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut tournament = Tournament::new(args.config());

    info!(strategies = ?args.strategies, games = args.games, "running tournament");
    if let Err(err) = tournament.run_tournament(&args.strategies) {
        error!(%err, "tournament aborted");
        return ExitCode::FAILURE;
    }

    for result in tournament.results() {
        println!(
            "{:>14} vs {:<14} {:>3}W {:>3}L {:>3}D  {:6.2}%",
            result.strategy,
            result.opponent,
            result.wins,
            result.losses,
            result.draws,
            result.win_rate()
        );
    }

    match tournament.save() {
        Ok(()) => {
            info!(path = %args.output.display(), "results saved");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "could not write results");
            ExitCode::FAILURE
        }
    }
}
