use crate::race::{Dice, PlayerId, TileEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Won(PlayerId),
}

/// Everything that happened during one accepted roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnReport {
    pub player: PlayerId,
    pub dice: Dice,
    /// Tiles moved by the dice alone, before any tile effect.
    pub movement: u8,
    pub previous_position: u8,
    pub position: u8,
    pub event: Option<TileEvent>,
    pub winner: Option<PlayerId>,
}

impl TurnReport {
    /// Banner text for the turn, if anything noteworthy happened.
    pub fn message(&self) -> Option<String> {
        match (self.winner, self.event) {
            (Some(winner), _) => Some(format!("{} WINS!", winner)),
            (None, Some(event)) => Some(event.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RollOutcome {
    Rolled(TurnReport),
    /// The game already has a winner; nothing changed.
    GameOver(PlayerId),
}
