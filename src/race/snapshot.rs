use crate::race::{Dice, GameOutcome, Player, PlayerId};

/// Read-only copy of a game's state, handed to the renderer and to stats
/// callers.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub players: [Player; 2],
    pub current_player: PlayerId,
    pub winner: Option<PlayerId>,
    pub goal_index: u8,
    pub last_roll: Option<Dice>,
}

impl GameSnapshot {
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.winner {
            Some(winner) => GameOutcome::Won(winner),
            None => GameOutcome::Ongoing,
        }
    }

    pub fn total_rolls(&self) -> usize {
        self.players.iter().map(Player::rolls).sum()
    }
}
