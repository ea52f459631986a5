use hashbrown::HashMap;
use thiserror::Error;

use crate::race::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("track needs at least 2 tiles, got {0}")]
    TrackTooShort(u8),
    #[error("track may have at most {max} tiles, got {got}")]
    TrackTooLong { max: u8, got: u8 },
    #[error("tile {index} lies outside a track of {track_length} tiles")]
    TileOutsideTrack { index: u8, track_length: u8 },
    #[error("tile {0} is the start or the goal and cannot carry an effect")]
    ReservedTile(u8),
    #[error("tile {0} has an effect of zero")]
    ZeroDelta(u8),
    #[error("tile {0} is defined twice")]
    DuplicateTile(u8),
}

/// The linear track: its length and the fixed table of special tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    track_length: u8,
    tiles: HashMap<u8, Tile>,
}

impl Board {
    pub const TRACK_LENGTH: u8 = 30;

    /// Keeps every reachable position well inside `u8`.
    pub const MAX_TRACK_LENGTH: u8 = 100;

    pub const STANDARD_TILES: [Tile; 13] = [
        Tile::lucky(3, 2, "Shortcut"),
        Tile::unlucky(4, 2, "Fall"),
        Tile::unlucky(7, 3, "Pit"),
        Tile::lucky(8, 3, "Wind"),
        Tile::unlucky(11, 1, "Oops"),
        Tile::lucky(12, 1, "Step"),
        Tile::unlucky(14, 2, "Slip"),
        Tile::unlucky(17, 4, "Crisis"),
        Tile::lucky(18, 2, "Ladder"),
        Tile::unlucky(21, 2, "Retreat"),
        Tile::lucky(22, 4, "Jet"),
        Tile::unlucky(26, 3, "Monster"),
        Tile::lucky(28, 1, "Almost"),
    ];

    /// The 30 tile track every game is played on.
    pub fn standard() -> Self {
        Board {
            track_length: Self::TRACK_LENGTH,
            tiles: Self::STANDARD_TILES.iter().map(|tile| (tile.index(), *tile)).collect(),
        }
    }

    /// Builds a track with a custom tile table, rejecting tables that could
    /// break the position invariants.
    pub fn with_tiles(track_length: u8, tiles: &[Tile]) -> Result<Self, BoardError> {
        if track_length < 2 {
            return Err(BoardError::TrackTooShort(track_length));
        }
        if track_length > Self::MAX_TRACK_LENGTH {
            return Err(BoardError::TrackTooLong { max: Self::MAX_TRACK_LENGTH, got: track_length });
        }

        let goal_index = track_length - 1;
        let mut table = HashMap::with_capacity(tiles.len());
        for tile in tiles {
            let index = tile.index();
            if index >= track_length {
                return Err(BoardError::TileOutsideTrack { index, track_length });
            }
            if index == 0 || index == goal_index {
                return Err(BoardError::ReservedTile(index));
            }
            if tile.effect().delta() == 0 {
                return Err(BoardError::ZeroDelta(index));
            }
            if table.insert(index, *tile).is_some() {
                return Err(BoardError::DuplicateTile(index));
            }
        }

        Ok(Board { track_length, tiles: table })
    }

    pub fn track_length(&self) -> u8 {
        self.track_length
    }

    pub fn goal_index(&self) -> u8 {
        self.track_length - 1
    }

    pub fn tile_at(&self, index: u8) -> Option<&Tile> {
        self.tiles.get(&index)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}
