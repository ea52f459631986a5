//! Series plotted next to the board: how often each sum was rolled, and how
//! each player's running mean converges to [`Dice::EXPECTED_SUM`].

use crate::{
    race::{Dice, GameSnapshot, PlayerId, RaceGame},
    stats,
};

/// Every sum two dice can produce, in plotting order.
pub const SUMS: [u8; 11] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Relative frequency of each entry of [`SUMS`], per player.
    pub frequencies: [[f64; 11]; 2],
    /// Probability of each entry of [`SUMS`] for fair dice.
    pub theoretical: [f64; 11],
    pub running_means: [Vec<f64>; 2],
    /// Top of the frequency axis.
    pub frequency_ceiling: f64,
    /// Bottom and top of the running mean axis, always including 7.
    pub mean_range: (f64, f64),
    /// Longest running mean series, the extent of the x axis.
    pub max_rolls: usize,
}

impl ChartData {
    /// `None` until somebody has rolled.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Option<Self> {
        if snapshot.total_rolls() == 0 {
            return None;
        }

        let theoretical = SUMS.map(Dice::sum_probability);
        let frequencies = PlayerId::ALL.map(|id| relative_frequencies(snapshot.player(id).roll_history()));
        let running_means = PlayerId::ALL.map(|id| snapshot.player(id).running_means().to_vec());

        let frequency_ceiling = frequencies
            .iter()
            .flatten()
            .chain(theoretical.iter())
            .fold(0.0f64, |acc, &f| acc.max(f));

        let (low, high) = running_means
            .iter()
            .flatten()
            .fold((Dice::EXPECTED_SUM, Dice::EXPECTED_SUM), |(low, high), &m| (low.min(m), high.max(m)));

        let max_rolls = running_means.iter().map(Vec::len).max().unwrap_or(0);

        Some(ChartData {
            frequencies,
            theoretical,
            running_means,
            frequency_ceiling,
            mean_range: (low.floor(), high.ceil()),
            max_rolls,
        })
    }
}

fn relative_frequencies(history: &[u8]) -> [f64; 11] {
    let total = stats::count(history);
    if total == 0 {
        return [0.0; 11];
    }
    let counts = stats::frequencies(history);
    SUMS.map(|sum| counts.get(&sum).map_or(0.0, |&count| count as f64 / total as f64))
}

/// Memoized [`ChartData`], rebuilt only when the game reports new data.
#[derive(Debug, Default)]
pub struct ChartCache {
    data: Option<ChartData>,
    rebuilds: usize,
}

impl ChartCache {
    pub fn new() -> Self {
        ChartCache::default()
    }

    /// Rebuilds the series if the game changed since the last refresh and
    /// clears the game's dirty flag. Returns whether a rebuild happened.
    pub fn refresh(&mut self, game: &mut RaceGame) -> bool {
        if !game.is_dirty() {
            return false;
        }
        self.data = ChartData::from_snapshot(&game.snapshot());
        self.rebuilds += 1;
        game.mark_clean();
        true
    }

    pub fn data(&self) -> Option<&ChartData> {
        self.data.as_ref()
    }

    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}
