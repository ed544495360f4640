use crate::board::{Board, Color, Piece, PieceKind};
use crate::moves::movegen::{
    DIAGONAL_DIRS, KING_DIRS, KNIGHT_JUMPS, ORTHOGONAL_DIRS, generate_moves, king_target,
    knight_target, slide_target,
};
use crate::moves::types::MoveList;
use crate::square::Square;

/// True if `side`'s king is attacked.
///
/// Opponent moves are generated with kings excluded: castling generation asks this
/// question itself, so including kings would recurse without bound. Contact with the
/// enemy king is probed directly instead.
pub fn is_in_check(board: &Board, side: Color) -> bool {
    let king_sq = board.king_square(side);
    let opponent = side.opposite();

    let mut responses = MoveList::new();
    generate_moves(board, opponent, false, &mut responses);
    if responses.iter().any(|m| m.end == king_sq) {
        return true;
    }

    is_touched_by_king(board, king_sq, opponent)
}

/// Whether `attacker`'s king stands next to `square`.
#[inline(always)]
fn is_touched_by_king(board: &Board, square: Square, attacker: Color) -> bool {
    let king = Piece::new(PieceKind::King, attacker);
    KING_DIRS
        .iter()
        .filter_map(|&d| king_target(square, d))
        .any(|s| board.piece_at(s) == king)
}

/// Geometric attack probe that works for empty squares too (pawn diagonals
/// included, pawn pushes excluded). Used for the squares a castling king crosses.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    // Pawns attack diagonally forward, so look one rank "behind" the square.
    let pawn = Piece::new(PieceKind::Pawn, attacker);
    let back = -attacker.forward();
    for df in [-1i8, 1] {
        let file = square.file() as i8 + df;
        if !(0..8).contains(&file) {
            continue;
        }
        if let Some(from) = square.offset(back + df)
            && board.piece_at(from) == pawn
        {
            return true;
        }
    }

    let knight = Piece::new(PieceKind::Knight, attacker);
    if KNIGHT_JUMPS
        .iter()
        .filter_map(|&(j, r)| knight_target(square, j, r))
        .any(|s| board.piece_at(s) == knight)
    {
        return true;
    }

    if is_touched_by_king(board, square, attacker) {
        return true;
    }

    let rays = DIAGONAL_DIRS
        .iter()
        .map(|&d| (d, true))
        .chain(ORTHOGONAL_DIRS.iter().map(|&d| (d, false)));
    for (dir, diagonal) in rays {
        for step in 1..8u8 {
            let Some(to) = slide_target(square, dir, step) else { break };
            let p = board.piece_at(to);
            if p.is_none() {
                continue;
            }
            let slides_here = if diagonal {
                p.can_slide_diagonal()
            } else {
                p.can_slide_orthogonal()
            };
            if p.is_color(attacker) && slides_here {
                return true;
            }
            break;
        }
    }

    false
}
