mod board;
pub use board::Board;
pub use board::BoardError;

mod player;
pub use player::Player;
pub use player::PlayerId;

mod tile;
pub use tile::Tile;
pub use tile::TileEffect;
pub use tile::TileEvent;

mod outcome;
pub use outcome::GameOutcome;
pub use outcome::RollOutcome;
pub use outcome::TurnReport;

mod snapshot;
pub use snapshot::GameSnapshot;

mod game;
pub use game::RaceGame;

mod dice;
pub use dice::Dice;
