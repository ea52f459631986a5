//! Descriptive statistics over a sequence of roll sums.
//!
//! Every function returns [`None`] for an empty slice instead of panicking, so
//! callers can render "no data" distinctly from a numeric result.

use std::fmt::Display;

use hashbrown::HashMap;

/// Number of observations. Zero is a valid count, so this one is not optional.
pub fn count(xs: &[u8]) -> usize {
    xs.len()
}

pub fn sum(xs: &[u8]) -> Option<u32> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().map(|&x| x as u32).sum())
}

pub fn mean(xs: &[u8]) -> Option<f64> {
    sum(xs).map(|total| total as f64 / xs.len() as f64)
}

/// Middle element of the sorted values, or the average of the two middle
/// elements when the count is even.
pub fn median(xs: &[u8]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid] as f64)
    } else {
        Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
    }
}

/// How often each distinct value occurs.
pub fn frequencies(xs: &[u8]) -> HashMap<u8, usize> {
    let mut counts = HashMap::new();
    for &x in xs {
        *counts.entry(x).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value. Ties resolve to the smallest of the tied values.
pub fn mode(xs: &[u8]) -> Option<u8> {
    frequencies(xs)
        .into_iter()
        .max_by(|(value_a, count_a), (value_b, count_b)| {
            count_a.cmp(count_b).then(value_b.cmp(value_a))
        })
        .map(|(value, _)| value)
}

/// Population variance (divides by N).
pub fn variance(xs: &[u8]) -> Option<f64> {
    let mean = mean(xs)?;
    let squared = xs
        .iter()
        .map(|&x| {
            let diff = x as f64 - mean;
            diff * diff
        })
        .sum::<f64>();
    Some(squared / xs.len() as f64)
}

pub fn std_dev(xs: &[u8]) -> Option<f64> {
    variance(xs).map(f64::sqrt)
}

pub fn min(xs: &[u8]) -> Option<u8> {
    xs.iter().copied().min()
}

pub fn max(xs: &[u8]) -> Option<u8> {
    xs.iter().copied().max()
}

/// All statistics of a non-empty roll history at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub sum: u32,
    pub mean: f64,
    pub median: f64,
    pub mode: u8,
    pub variance: f64,
    pub std_dev: f64,
    pub min: u8,
    pub max: u8,
}

impl Summary {
    pub fn of(xs: &[u8]) -> Option<Summary> {
        let variance = variance(xs)?;
        Some(Summary {
            count: count(xs),
            sum: sum(xs)?,
            mean: mean(xs)?,
            median: median(xs)?,
            mode: mode(xs)?,
            variance,
            std_dev: variance.sqrt(),
            min: min(xs)?,
            max: max(xs)?,
        })
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={} mean={:.2} median={:.1} mode={} sd={:.2} min={} max={}",
            self.count, self.mean, self.median, self.mode, self.std_dev, self.min, self.max
        )
    }
}

/// Formats an optional statistic, falling back to "No data".
pub fn or_no_data<T: Display>(value: Option<T>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "No data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_basic_statistics() {
        let rolls = [4, 4, 6];
        assert!(close(mean(&rolls).unwrap(), 14.0 / 3.0));
        assert!(close(median(&rolls).unwrap(), 4.0));
        assert_eq!(mode(&rolls), Some(4));
        assert_eq!(sum(&rolls), Some(14));
        assert_eq!(count(&rolls), 3);
        assert_eq!(min(&rolls), Some(4));
        assert_eq!(max(&rolls), Some(6));
    }

    #[test]
    fn test_empty_is_no_data() {
        let rolls: [u8; 0] = [];
        assert_eq!(mean(&rolls), None);
        assert_eq!(median(&rolls), None);
        assert_eq!(mode(&rolls), None);
        assert_eq!(variance(&rolls), None);
        assert_eq!(std_dev(&rolls), None);
        assert_eq!(min(&rolls), None);
        assert_eq!(max(&rolls), None);
        assert_eq!(sum(&rolls), None);
        assert_eq!(count(&rolls), 0);
        assert_eq!(Summary::of(&rolls), None);
        assert_eq!(or_no_data(mean(&rolls), 2), "No data");
    }

    #[test]
    fn test_median_even_count() {
        assert!(close(median(&[2, 12, 7, 8]).unwrap(), 7.5));
        assert!(close(median(&[5, 3]).unwrap(), 4.0));
    }

    #[test]
    fn test_mode_tie_picks_smallest() {
        assert_eq!(mode(&[9, 3, 9, 3, 12]), Some(3));
        assert_eq!(mode(&[11, 2, 7]), Some(2));
        assert_eq!(mode(&[8, 8, 8, 6, 6, 6, 10, 10, 10]), Some(6));
    }

    #[test]
    fn test_population_variance() {
        let rolls = [2, 4, 4, 4, 5, 5, 7, 9];
        assert!(close(variance(&rolls).unwrap(), 4.0));
        assert!(close(std_dev(&rolls).unwrap(), 2.0));
        assert!(close(variance(&[7]).unwrap(), 0.0));
    }

    #[test]
    fn test_summary() {
        let summary = Summary::of(&[4, 4, 6]).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mode, 4);
        assert_eq!(summary.min, 4);
        assert_eq!(summary.max, 6);
        assert!(close(summary.std_dev, summary.variance.sqrt()));
        assert_eq!(or_no_data(Some(summary.mean), 2), "4.67");
    }

    #[test]
    fn test_frequencies() {
        let counts = frequencies(&[7, 7, 2, 12, 7]);
        assert_eq!(counts.get(&7), Some(&3));
        assert_eq!(counts.get(&2), Some(&1));
        assert_eq!(counts.get(&5), None);
    }
}
