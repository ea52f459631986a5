use std::{fmt::Debug, num::NonZeroU8};

use rand::Rng;

/// A throw of two six-sided dice, stored in a single byte.
///
/// Memory_layout: 00BBBAAA
///
/// A = die1, B = die2. Both are in 1..=6 so the byte is never zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dice {
    data: NonZeroU8,
}

impl Dice {
    /// Number of equally likely (die1, die2) pairs.
    pub const OUTCOMES: u8 = 36;

    /// Expected value of the sum of two fair dice.
    pub const EXPECTED_SUM: f64 = 7.0;

    pub const MIN_SUM: u8 = 2;
    pub const MAX_SUM: u8 = 12;

    pub fn roll_with<R: Rng>(rng: &mut R) -> Self {
        let die1 = rng.random_range(1..=6);
        let die2 = rng.random_range(1..=6);
        Dice::from_numbers(die1, die2)
    }

    /// Panics in const context (and at runtime) when a die is 0.
    pub const fn from_numbers(die1: u8, die2: u8) -> Self {
        Dice { data: NonZeroU8::new((die2 << 3) | die1).unwrap() }
    }

    /// The throw whose faces add up to `sum`, lowest first die possible.
    /// Returns `None` outside 2..=12.
    pub fn with_sum(sum: u8) -> Option<Self> {
        if !(Self::MIN_SUM..=Self::MAX_SUM).contains(&sum) {
            return None;
        }
        let die1 = sum.saturating_sub(6).max(1);
        Some(Dice::from_numbers(die1, sum - die1))
    }

    pub fn die1(&self) -> u8 {
        self.data.get() & 0x7
    }

    pub fn die2(&self) -> u8 {
        (self.data.get() >> 3) & 0x7
    }

    pub fn sum(&self) -> u8 {
        self.die1() + self.die2()
    }

    /// Probability that two fair dice add up to `sum`.
    pub fn sum_probability(sum: u8) -> f64 {
        let ways = match sum {
            2..=7 => sum - 1,
            8..=12 => 13 - sum,
            _ => 0,
        };
        ways as f64 / Self::OUTCOMES as f64
    }
}

impl Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dice({} | {}) = {}", self.die1(), self.die2(), self.sum())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_dice() {
        for i in 1..=6 {
            for j in 1..=6 {
                let dice = Dice::from_numbers(i, j);
                assert_eq!(dice.die1(), i);
                assert_eq!(dice.die2(), j);
                assert_eq!(dice.sum(), i + j);
            }
        }
    }

    #[test]
    fn test_dice_roll() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 1..=1000 {
            let dice = Dice::roll_with(&mut rng);
            assert!(dice.die1() >= 1 && dice.die1() <= 6);
            assert!(dice.die2() >= 1 && dice.die2() <= 6);
            assert!((Dice::MIN_SUM..=Dice::MAX_SUM).contains(&dice.sum()));
        }
    }

    #[test]
    fn test_sum_distribution() {
        let mut ways = [0u8; 13];
        for i in 1..=6 {
            for j in 1..=6 {
                ways[Dice::from_numbers(i, j).sum() as usize] += 1;
            }
        }
        for sum in 2..=12u8 {
            let expected = ways[sum as usize] as f64 / 36.0;
            assert!((Dice::sum_probability(sum) - expected).abs() < 1e-12);
        }
        assert!((Dice::sum_probability(7) - 6.0 / 36.0).abs() < 1e-12);
        assert!((Dice::sum_probability(2) - 1.0 / 36.0).abs() < 1e-12);
        assert!((Dice::sum_probability(12) - 1.0 / 36.0).abs() < 1e-12);
        assert_eq!(Dice::sum_probability(1), 0.0);
        assert_eq!(Dice::sum_probability(13), 0.0);

        let total: f64 = (2..=12).map(Dice::sum_probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
        let expected: f64 = (2..=12).map(|s| s as f64 * Dice::sum_probability(s)).sum();
        assert!((expected - Dice::EXPECTED_SUM).abs() < 1e-12);
    }

    #[test]
    fn test_with_sum() {
        for sum in 2..=12 {
            let dice = Dice::with_sum(sum).unwrap();
            assert_eq!(dice.sum(), sum);
            assert!(dice.die1() >= 1 && dice.die2() <= 6);
        }
        assert_eq!(Dice::with_sum(1), None);
        assert_eq!(Dice::with_sum(13), None);
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(Dice::roll_with(&mut a), Dice::roll_with(&mut b));
        }
    }
}
