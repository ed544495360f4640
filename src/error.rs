use crate::board::Color;
use crate::status::GameResult;
use thiserror::Error;

/// Errors raised by board queries and setup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("square index {0} is outside 0..64")]
    SquareOutOfRange(usize),
    #[error("no {0:?} king on the board")]
    MissingKing(Color),
    #[error("invalid setup: {0}")]
    InvalidSetup(String),
}

/// Errors raised while decoding wire data.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("square {0} is outside 0..64")]
    InvalidSquare(u8),
    #[error("unknown piece code {0}")]
    InvalidPiece(u8),
    #[error("unknown colour code {0}")]
    InvalidColor(u8),
    #[error("unknown castling right {0}")]
    InvalidCastling(u8),
    #[error("castling flag set without naming the right")]
    AmbiguousCastling,
}

/// Rejections produced by the session layer. The `Display` text is what the
/// peer sees in its `{error}` message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Invalid move")]
    IllegalMove,
    #[error("Invalid move format")]
    MalformedMove,
    #[error("Game has not started")]
    GameNotStarted,
    #[error("Game is over: {0:?}")]
    GameOver(GameResult),
    #[error("Unknown room {0}")]
    UnknownRoom(u64),
}
