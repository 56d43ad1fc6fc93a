//! Round-robin matches between strategies, tallied to CSV.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::game::Quoridor;
use crate::player::PlayerId;
use crate::search::SearchConfig;
use crate::strategy::StrategyKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentConfig {
    pub games_per_match: usize,
    /// Plies after which an unfinished game is a draw.
    pub max_plies: usize,
    pub search: SearchConfig,
    pub output: PathBuf,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games_per_match: 10,
            max_plies: 150,
            search: SearchConfig::default().with_depth(1),
            output: PathBuf::from("tournament_results.csv"),
        }
    }
}

/// Tally of one strategy against one opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub strategy: String,
    pub opponent: String,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl MatchResult {
    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            n => self.wins as f64 / n as f64 * 100.0,
        }
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    strategy: &'a str,
    opponent: &'a str,
    games: usize,
    wins: usize,
    losses: usize,
    draws: usize,
    #[serde(rename = "win %")]
    win_rate: String,
}

/// How a single game ended, from the first strategy's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    Won,
    Lost,
    Drawn,
}

pub struct Tournament {
    config: TournamentConfig,
    results: Vec<MatchResult>,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Self {
        Tournament {
            config,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    /// Plays `strategy` against `opponent`, alternating who moves first.
    pub fn run_match(&mut self, strategy: StrategyKind, opponent: StrategyKind) -> Result<&MatchResult> {
        let mut first = strategy.build(&self.config.search);
        let mut second = opponent.build(&self.config.search);
        let mut result = MatchResult {
            strategy: first.name(),
            opponent: second.name(),
            wins: 0,
            losses: 0,
            draws: 0,
        };

        for game_num in 0..self.config.games_per_match {
            // `strategy` sits in seat 0 on even games
            let own_seat = PlayerId(game_num % 2);
            let mut game = Quoridor::two_player(&result.strategy, &result.opponent)?;
            let mut plies = 0;

            let ending = loop {
                if plies >= self.config.max_plies {
                    break Ending::Drawn;
                }
                let mover = game.current_player();
                let player = if mover == own_seat { &mut first } else { &mut second };
                let Some(turn) = player.choose_turn(&game) else {
                    // no turn to make: the mover forfeits
                    break if mover == own_seat { Ending::Lost } else { Ending::Won };
                };
                if let Err(err) = game.play(turn) {
                    warn!(%err, "strategy chose an illegal turn, forfeiting");
                    break if mover == own_seat { Ending::Lost } else { Ending::Won };
                }
                plies += 1;
                if let Some(winner) = game.winner() {
                    break if winner == own_seat { Ending::Won } else { Ending::Lost };
                }
            };

            debug!(game = game_num, plies, ?ending, "game finished");
            match ending {
                Ending::Won => result.wins += 1,
                Ending::Lost => result.losses += 1,
                Ending::Drawn => result.draws += 1,
            }
        }

        info!(
            strategy = %result.strategy,
            opponent = %result.opponent,
            wins = result.wins,
            losses = result.losses,
            draws = result.draws,
            "match finished"
        );
        self.results.push(result);
        Ok(&self.results[self.results.len() - 1])
    }

    /// Plays every ordered pairing of distinct strategies.
    pub fn run_tournament(&mut self, roster: &[StrategyKind]) -> Result<()> {
        for &strategy in roster {
            for &opponent in roster {
                if strategy != opponent {
                    self.run_match(strategy, opponent)?;
                }
            }
        }
        Ok(())
    }

    pub fn write_results_to_csv(&self, path: impl AsRef<Path>) -> csv::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for result in &self.results {
            writer.serialize(CsvRow {
                strategy: &result.strategy,
                opponent: &result.opponent,
                games: result.games(),
                wins: result.wins,
                losses: result.losses,
                draws: result.draws,
                win_rate: format!("{:.2}", result.win_rate()),
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save(&self) -> csv::Result<()> {
        self.write_results_to_csv(&self.config.output)
    }
}
