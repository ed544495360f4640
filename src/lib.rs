pub mod board;
pub mod error;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub mod session;
pub mod square;
pub mod status;
pub mod wire;

pub use board::{Board, Color, Piece, PieceKind};
pub use error::{BoardError, SessionError, WireError};
pub use moves::types::Move;
pub use square::Square;
pub use status::GameResult;
