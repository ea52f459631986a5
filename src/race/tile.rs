use std::fmt::Display;

/// What a special tile does to the token that lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileEffect {
    /// Moves the token forward by the given number of tiles.
    Lucky(u8),
    /// Moves the token back by the given number of tiles, never past the start.
    Unlucky(u8),
}

impl TileEffect {
    pub fn delta(&self) -> u8 {
        match self {
            TileEffect::Lucky(delta) | TileEffect::Unlucky(delta) => *delta,
        }
    }

    pub fn is_lucky(&self) -> bool {
        matches!(self, TileEffect::Lucky(_))
    }

    /// Position after the effect fires on a token at `position`.
    pub fn apply(&self, position: u8) -> u8 {
        match self {
            TileEffect::Lucky(delta) => position.saturating_add(*delta),
            TileEffect::Unlucky(delta) => position.saturating_sub(*delta),
        }
    }
}

impl Display for TileEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileEffect::Lucky(delta) => write!(f, "+{}", delta),
            TileEffect::Unlucky(delta) => write!(f, "-{}", delta),
        }
    }
}

/// A special tile of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    index: u8,
    effect: TileEffect,
    label: &'static str,
}

impl Tile {
    pub const fn new(index: u8, effect: TileEffect, label: &'static str) -> Self {
        Tile { index, effect, label }
    }

    pub const fn lucky(index: u8, delta: u8, label: &'static str) -> Self {
        Tile::new(index, TileEffect::Lucky(delta), label)
    }

    pub const fn unlucky(index: u8, delta: u8, label: &'static str) -> Self {
        Tile::new(index, TileEffect::Unlucky(delta), label)
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn effect(&self) -> TileEffect {
        self.effect
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// A tile effect that fired during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEvent {
    pub tile: Tile,
    pub position_before: u8,
    pub position_after: u8,
}

impl Display for TileEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}! {}", self.tile.label(), self.tile.effect())
    }
}
