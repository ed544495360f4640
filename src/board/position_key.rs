// src/board/position_key.rs

use crate::board::castle_bits::CastleBits;
use crate::board::{Board, Color, Piece, PieceKind};
use crate::square::Square;

/// Identity of a position for repetition counting.
///
/// Two positions are the same when placement, side to move, castling rights
/// and en-passant availability all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub squares: [Piece; 64],
    pub side_to_move: Color,
    pub castling_rights: CastleBits,
    /// Target square of a capturable en-passant, `None` when no capture is available.
    pub en_passant: Option<Square>,
}

impl PositionKey {
    pub fn of(board: &Board) -> Self {
        PositionKey {
            squares: board.squares,
            side_to_move: board.side_to_move,
            castling_rights: board.castling_rights,
            en_passant: en_passant_to_key(board),
        }
    }
}

/// Returns the en-passant target if it should be part of the key *this ply*.
/// Rule: only when the previous ply was a double push and the side to move has
/// a pawn beside the pushed pawn. Pseudo-legal only (pins are ignored).
pub fn en_passant_to_key(board: &Board) -> Option<Square> {
    let last = board.last_move?;
    if !last.is_double_pawn_push() {
        return None;
    }

    let mover = board.side_to_move;
    let landing = last.end;
    let own_pawn = Piece::new(PieceKind::Pawn, mover);

    let has_capturing_pawn = [-1i8, 1].iter().any(|&df| {
        let file = landing.file() as i8 + df;
        (0..8).contains(&file)
            && board.squares[Square::from_coords(landing.rank(), file as u8).index() as usize]
                == own_pawn
    });

    if has_capturing_pawn {
        Some(Square::from_index((last.start.index() + last.end.index()) / 2))
    } else {
        None
    }
}
