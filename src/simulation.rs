//! Headless batches of complete games, played in parallel.

use std::fmt::Display;

use rand::{SeedableRng, rngs::StdRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::info;

use crate::{
    race::{Board, PlayerId, RaceGame, RollOutcome},
    stats::{self, Summary},
};

/// A game still without a winner after this many rolls is given up.
pub const MAX_ROLLS_PER_GAME: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub winner: Option<PlayerId>,
    pub lucky_events: usize,
    pub unlucky_events: usize,
    /// Every accepted roll sum, in turn order.
    pub roll_sums: Vec<u8>,
}

impl GameRecord {
    pub fn rolls(&self) -> usize {
        self.roll_sums.len()
    }
}

/// Plays one game to the end with dice seeded from `seed`.
pub fn play_game(board: &Board, seed: u64) -> GameRecord {
    let mut game = RaceGame::with_board(board.clone(), StdRng::seed_from_u64(seed));
    let mut record = GameRecord {
        winner: None,
        lucky_events: 0,
        unlucky_events: 0,
        roll_sums: Vec::new(),
    };

    while record.rolls() < MAX_ROLLS_PER_GAME {
        match game.roll_for_current_player() {
            RollOutcome::Rolled(report) => {
                record.roll_sums.push(report.dice.sum());
                match report.event {
                    Some(event) if event.tile.effect().is_lucky() => record.lucky_events += 1,
                    Some(_) => record.unlucky_events += 1,
                    None => (),
                }
                if report.winner.is_some() {
                    record.winner = report.winner;
                    break;
                }
            }
            RollOutcome::GameOver(winner) => {
                record.winner = Some(winner);
                break;
            }
        }
    }

    record
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub games: usize,
    pub seed: u64,
    pub wins: [usize; 2],
    pub unfinished: usize,
    pub lucky_events: usize,
    pub unlucky_events: usize,
    /// Total rolls per finished or abandoned game, both players together.
    pub mean_game_length: Option<f64>,
    pub shortest_game: Option<usize>,
    pub longest_game: Option<usize>,
    /// Every roll of every game.
    pub rolls: Option<Summary>,
}

impl SimulationReport {
    pub fn win_rate(&self, player: PlayerId) -> Option<f64> {
        if self.games == 0 {
            return None;
        }
        Some(self.wins[player.index()] as f64 / self.games as f64 * 100.0)
    }
}

impl Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "============================================")?;
        writeln!(f, "Games: {}, Seed: {}, Unfinished: {}", self.games, self.seed, self.unfinished)?;
        for player in PlayerId::ALL {
            writeln!(
                f,
                "{} Wins: {}, Winrate: {}%",
                player,
                self.wins[player.index()],
                stats::or_no_data(self.win_rate(player), 2)
            )?;
        }
        writeln!(f, "Lucky tiles hit: {}, Unlucky tiles hit: {}", self.lucky_events, self.unlucky_events)?;
        match (self.mean_game_length, self.shortest_game, self.longest_game) {
            (Some(mean), Some(shortest), Some(longest)) => writeln!(
                f,
                "Game length: mean {:.2}, shortest {}, longest {}",
                mean, shortest, longest
            )?,
            _ => writeln!(f, "Game length: No data")?,
        }
        match &self.rolls {
            Some(rolls) => writeln!(f, "Rolls: {}", rolls)?,
            None => writeln!(f, "Rolls: No data")?,
        }
        write!(f, "============================================")
    }
}

/// Plays `games` games on the standard board.
pub fn simulate(games: usize, seed: u64) -> SimulationReport {
    simulate_on(&Board::standard(), games, seed)
}

/// Plays `games` games in parallel. Game `i` uses seed `seed + i`, so the
/// report only depends on the arguments.
pub fn simulate_on(board: &Board, games: usize, seed: u64) -> SimulationReport {
    info!(games, seed, "simulation started");

    let records = (0..games)
        .into_par_iter()
        .map(|i| play_game(board, seed.wrapping_add(i as u64)))
        .collect::<Vec<_>>();

    let mut wins = [0; 2];
    let mut unfinished = 0;
    for record in records.iter() {
        match record.winner {
            Some(winner) => wins[winner.index()] += 1,
            None => unfinished += 1,
        }
    }

    let lengths = records.iter().map(GameRecord::rolls);
    let mean_game_length = match games {
        0 => None,
        _ => Some(lengths.clone().sum::<usize>() as f64 / games as f64),
    };
    let all_rolls: Vec<u8> = records.iter().flat_map(|record| record.roll_sums.iter().copied()).collect();

    let report = SimulationReport {
        games,
        seed,
        wins,
        unfinished,
        lucky_events: records.iter().map(|r| r.lucky_events).sum(),
        unlucky_events: records.iter().map(|r| r.unlucky_events).sum(),
        mean_game_length,
        shortest_game: lengths.clone().min(),
        longest_game: lengths.max(),
        rolls: Summary::of(&all_rolls),
    };

    info!(wins_one = wins[0], wins_two = wins[1], unfinished, "simulation finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::Tile;

    #[test]
    fn test_single_game_finishes() {
        let record = play_game(&Board::standard(), 5);
        assert!(record.winner.is_some());
        assert!(record.rolls() >= 4);
        assert!(record.roll_sums.iter().all(|&s| (2..=12).contains(&s)));
        assert_eq!(play_game(&Board::standard(), 5), record);
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let a = simulate(200, 11);
        let b = simulate(200, 11);
        assert_eq!(a, b);
        assert_eq!(a.games, 200);
        assert_eq!(a.wins[0] + a.wins[1] + a.unfinished, 200);
        assert_eq!(a.unfinished, 0);

        let sequential: usize = (0..200)
            .map(|i| play_game(&Board::standard(), 11 + i))
            .filter(|record| record.winner == Some(PlayerId::One))
            .count();
        assert_eq!(a.wins[0], sequential);
    }

    #[test]
    fn test_roll_statistics_approach_seven() {
        let report = simulate(2_000, 1);
        let rolls = report.rolls.unwrap();
        assert!((rolls.mean - 7.0).abs() < 0.2);
        assert_eq!(rolls.min, 2);
        assert_eq!(rolls.max, 12);
        assert_eq!(rolls.mode, 7);
        assert!(report.lucky_events > 0);
        assert!(report.unlucky_events > 0);
    }

    #[test]
    fn test_short_track_without_tiles() {
        let board = Board::with_tiles(3, &[]).unwrap();
        let report = simulate_on(&board, 50, 0);
        assert_eq!(report.wins, [50, 0]);
        assert_eq!(report.lucky_events + report.unlucky_events, 0);
        assert_eq!(report.mean_game_length, Some(1.0));
        assert_eq!((report.shortest_game, report.longest_game), (Some(1), Some(1)));

        let board = Board::with_tiles(6, &[Tile::lucky(2, 3, "Jump")]).unwrap();
        assert!(simulate_on(&board, 20, 0).wins.iter().sum::<usize>() == 20);
    }

    #[test]
    fn test_empty_batch() {
        let report = simulate(0, 3);
        assert_eq!(report.wins, [0, 0]);
        assert_eq!(report.win_rate(PlayerId::One), None);
        assert_eq!(report.mean_game_length, None);
        assert_eq!(report.longest_game, None);
        assert_eq!(report.rolls, None);
        assert!(report.to_string().contains("Rolls: No data"));
    }
}
