use std::fmt::Display;

use crate::stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn opposite(&self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// The 1-based number shown to users.
    pub fn number(&self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// One racer: its token position plus everything it has rolled so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: PlayerId,
    position: u8,
    roll_history: Vec<u8>,
    running_means: Vec<f64>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Player {
            id,
            position: 0,
            roll_history: Vec::new(),
            running_means: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn roll_history(&self) -> &[u8] {
        &self.roll_history
    }

    /// Mean of the history after each roll, one entry per roll.
    pub fn running_means(&self) -> &[f64] {
        &self.running_means
    }

    pub fn rolls(&self) -> usize {
        self.roll_history.len()
    }

    pub fn summary(&self) -> Option<stats::Summary> {
        stats::Summary::of(&self.roll_history)
    }

    pub(crate) fn record_roll(&mut self, sum: u8) {
        self.roll_history.push(sum);
        if let Some(mean) = stats::mean(&self.roll_history) {
            self.running_means.push(mean);
        }
    }

    pub(crate) fn set_position(&mut self, position: u8) {
        self.position = position;
    }

    pub(crate) fn reset(&mut self) {
        self.position = 0;
        self.roll_history.clear();
        self.running_means.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_alternates() {
        assert_eq!(PlayerId::One.opposite(), PlayerId::Two);
        assert_eq!(PlayerId::Two.opposite(), PlayerId::One);
        assert_eq!(PlayerId::One.number(), 1);
        assert_eq!(PlayerId::Two.number(), 2);
        assert_eq!(PlayerId::Two.to_string(), "Player 2");
    }

    #[test]
    fn test_running_means_follow_history() {
        let mut player = Player::new(PlayerId::One);
        for sum in [4, 4, 6, 12] {
            player.record_roll(sum);
        }
        assert_eq!(player.roll_history(), &[4, 4, 6, 12]);
        assert_eq!(player.running_means().len(), 4);
        assert_eq!(player.running_means()[0], 4.0);
        assert_eq!(player.running_means()[1], 4.0);
        assert!((player.running_means()[2] - 14.0 / 3.0).abs() < 1e-9);
        assert_eq!(player.running_means()[3], 6.5);

        player.set_position(9);
        player.reset();
        assert_eq!(player, Player::new(PlayerId::One));
        assert_eq!(player.summary(), None);
    }
}
