use crate::board::{Board, PieceKind};
use crate::moves::square_control::is_in_check;
use crate::moves::types::Move;
use tracing::info;

/// Plies without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// Occurrences of one position that draw the game.
pub const REPETITION_LIMIT: u32 = 3;

/// Terminal state of a game. `Disconnect` is only ever set from outside the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameResult {
    #[default]
    None,
    Disconnect,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl GameResult {
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameResult::Stalemate
                | GameResult::InsufficientMaterial
                | GameResult::FiftyMoveRule
                | GameResult::ThreefoldRepetition
        )
    }
}

// Free helpers that do not live on Board
pub fn is_draw_by_threefold(board: &Board) -> bool {
    board.max_repetition() >= REPETITION_LIMIT
}

pub fn is_draw_by_fifty_move(board: &Board) -> bool {
    board.fifty_move_counter() >= FIFTY_MOVE_LIMIT
}

/// No material besides kings, or a single knight or bishop and nothing else.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut material = board.non_king_material();
    match (material.next(), material.next()) {
        (None, _) => true,
        (Some((_, piece)), None) => piece.kind().is_some_and(PieceKind::is_minor),
        _ => false,
    }
}

/// Decide the game status for the side to move, given its fresh legal moves.
///
/// Priority (highest → lowest):
///  1) `Checkmate` / `Stalemate`  (no legal moves)
///  2) `InsufficientMaterial`
///  3) `FiftyMoveRule`           (halfmove clock ≥ 100)
///  4) `ThreefoldRepetition`     (any position seen 3 times)
///  5) `None`
pub fn classify(board: &Board, legal: &[Move]) -> GameResult {
    let result = if legal.is_empty() {
        if is_in_check(board, board.side_to_move()) {
            GameResult::Checkmate
        } else {
            GameResult::Stalemate
        }
    } else if is_insufficient_material(board) {
        GameResult::InsufficientMaterial
    } else if is_draw_by_fifty_move(board) {
        GameResult::FiftyMoveRule
    } else if is_draw_by_threefold(board) {
        GameResult::ThreefoldRepetition
    } else {
        GameResult::None
    };

    if result != GameResult::None {
        info!(?result, side = ?board.side_to_move(), "game over");
    }
    result
}
