use crate::game::player::PlayerSlot;

/// Reasons a move is rejected. A rejected move never changes the game state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("'{0}' is not a single letter A-Z")]
    InvalidLetter(String),

    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: PlayerSlot },

    #[error("the game is already finished")]
    GameFinished,
}
