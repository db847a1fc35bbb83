use thiserror::Error;

/// Every way a game engine call can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board construction parameters were unusable
    #[error("Invalid game configuration: {0}")]
    Configuration(String),

    /// The move was malformed or pointed outside the board
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// The revealed cell held a bomb
    #[error("Explosion at [{row}:{column}]")]
    BombHit { row: i32, column: i32 },

    /// No session is registered under the identifier
    #[error("Game with id [{0}] not found")]
    NotFound(String),
}

impl GameError {
    /// Whether the error came from a move that ended the game, as opposed to a
    /// request that was rejected outright.
    pub fn ends_game(&self) -> bool {
        matches!(self, Self::BombHit { .. } | Self::InvalidAction(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
