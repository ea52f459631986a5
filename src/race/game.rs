use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::race::{Board, Dice, GameSnapshot, Player, PlayerId, RollOutcome, TileEvent, TurnReport};

/// A two player race along a [`Board`].
///
/// All mutation goes through [`RaceGame::roll_for_current_player`],
/// [`RaceGame::apply_roll`] and [`RaceGame::reset`]. Only the tile a token
/// lands on is checked for an effect; tiles passed over are ignored and an
/// effect never chains into another one.
#[derive(Debug, Clone)]
pub struct RaceGame {
    board: Board,
    players: [Player; 2],
    current_player: PlayerId,
    winner: Option<PlayerId>,
    last_roll: Option<Dice>,
    dirty: bool,
    rng: StdRng,
}

impl RaceGame {
    /// Upper bound on the tiles a single roll moves a token before tile effects.
    pub const MAX_MOVEMENT: u8 = 5;

    /// Standard board, dice seeded from the operating system.
    pub fn new() -> Self {
        Self::with_board(Board::standard(), StdRng::from_os_rng())
    }

    /// Standard board with reproducible dice.
    pub fn seeded(seed: u64) -> Self {
        Self::with_board(Board::standard(), StdRng::seed_from_u64(seed))
    }

    pub fn with_board(board: Board, rng: StdRng) -> Self {
        RaceGame {
            board,
            players: [Player::new(PlayerId::One), Player::new(PlayerId::Two)],
            current_player: PlayerId::One,
            winner: None,
            last_roll: None,
            dirty: true,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// The most recent accepted roll, kept for the dice display.
    pub fn last_roll(&self) -> Option<Dice> {
        self.last_roll
    }

    /// True when state changed since the renderer last called [`Self::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            current_player: self.current_player,
            winner: self.winner,
            goal_index: self.board.goal_index(),
            last_roll: self.last_roll,
        }
    }

    /// Rolls two dice for the player whose turn it is and plays the turn.
    pub fn roll_for_current_player(&mut self) -> RollOutcome {
        if let Some(winner) = self.winner {
            debug!(%winner, "roll ignored, game is over");
            return RollOutcome::GameOver(winner);
        }
        let dice = Dice::roll_with(&mut self.rng);
        self.apply_roll(dice)
    }

    /// Plays the current player's turn with an already thrown `dice`.
    pub fn apply_roll(&mut self, dice: Dice) -> RollOutcome {
        if let Some(winner) = self.winner {
            return RollOutcome::GameOver(winner);
        }

        let player_id = self.current_player;
        let goal = self.board.goal_index();
        let sum = dice.sum();
        let movement = sum.min(Self::MAX_MOVEMENT);

        let player = &mut self.players[player_id.index()];
        player.record_roll(sum);

        let previous_position = player.position();
        let mut position = previous_position + movement;

        let mut event = None;
        if let Some(tile) = self.board.tile_at(position.min(goal)) {
            let position_after = tile.effect().apply(position);
            info!(player = %player_id, tile = tile.index(), effect = %tile.effect(), "{}", tile.label());
            event = Some(TileEvent { tile: *tile, position_before: position, position_after });
            position = position_after;
        }

        if position >= goal {
            position = goal;
            self.winner = Some(player_id);
            info!(winner = %player_id, rolls = player.rolls(), "race finished");
        }
        player.set_position(position);

        debug!(
            player = %player_id,
            die1 = dice.die1(),
            die2 = dice.die2(),
            from = previous_position,
            to = position,
            "roll"
        );

        if self.winner.is_none() {
            self.current_player = player_id.opposite();
        }
        self.last_roll = Some(dice);
        self.dirty = true;

        RollOutcome::Rolled(TurnReport {
            player: player_id,
            dice,
            movement,
            previous_position,
            position,
            event,
            winner: self.winner,
        })
    }

    /// Back to the starting position. The board and the dice generator are kept.
    pub fn reset(&mut self) {
        for player in self.players.iter_mut() {
            player.reset();
        }
        self.current_player = PlayerId::One;
        self.winner = None;
        self.last_roll = None;
        self.dirty = true;
        info!("game reset");
    }
}

impl Default for RaceGame {
    fn default() -> Self {
        RaceGame::new()
    }
}
