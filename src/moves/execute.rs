use crate::board::castle_bits::*;
use crate::board::{Board, Color, PROMOTION_KINDS, Piece, PieceKind, PositionKey};
use crate::moves::movegen::generate_moves;
use crate::moves::square_control::is_in_check;
use crate::moves::types::{Move, MoveBuffer, MoveList, Snapshot};
use crate::status::classify;
use tracing::{debug, trace};

/// Apply `mv` for its mover without refreshing legal moves or the result.
///
/// Pushes a full snapshot first so `undo_move_basic` can restore the position
/// exactly. The move is trusted: legality is the caller's job.
pub fn make_move_basic(board: &mut Board, mv: Move) {
    let color = board.side_of(mv.piece);
    let start = mv.start.index() as usize;
    let end = mv.end.index() as usize;

    board.history.push(Snapshot {
        squares: board.squares,
        side_to_move: board.side_to_move,
        castling_rights: board.castling_rights,
        last_move: board.last_move,
        halfmove_clock: board.halfmove_clock,
        game_result: board.game_result,
    });

    // Compute all rights to clear for this move
    let mut mask_to_clear: CastleBits = CASTLE_NONE;

    if mv.is_promotion() {
        debug_assert!(
            mv.promotion_piece.is_some(),
            "promotion piece must be chosen before applying {mv}"
        );
        let promoted = if mv.promotion_piece.is_some() {
            mv.promotion_piece
        } else {
            Piece::new(PieceKind::Queen, color)
        };
        board.squares[end] = promoted;
    } else if mv.is_en_passant() {
        board.squares[mv.en_passant_victim().index() as usize] = Piece::NONE;
        board.squares[end] = mv.piece;
    } else if let Some(g) = castle_geometry(mv.castling) {
        board.squares[g.king_from.index() as usize] = Piece::NONE;
        board.squares[g.rook_from.index() as usize] = Piece::NONE;
        board.squares[g.king_to.index() as usize] = mv.piece;
        board.squares[g.rook_to.index() as usize] = Piece::new(PieceKind::Rook, color);
        mask_to_clear |= rights_of(color);
    } else {
        board.squares[end] = mv.piece;
        // (i) King moved → clear both for that color
        if mv.piece.is(PieceKind::King) {
            mask_to_clear |= rights_of(color);
        }
        // (ii) Rook moved from a corner → clear that corner's right
        if mv.piece.is(PieceKind::Rook) {
            mask_to_clear |= right_for_rook_square(mv.start);
        }
    }

    // (iii) Captured a rook on its home corner → clear that corner's right.
    // Applies to promotion captures as well.
    if mv.captured_piece.is(PieceKind::Rook) && !mv.is_en_passant() {
        mask_to_clear |= right_for_rook_square(mv.end);
    }

    board.squares[start] = Piece::NONE;
    board.castling_rights &= !mask_to_clear;
    board.side_to_move = color.opposite();
    board.last_move = Some(mv);

    if mv.piece.is(PieceKind::Pawn) || mv.is_capture() {
        board.halfmove_clock = 0;
    } else {
        board.halfmove_clock += 1;
    }

    *board
        .position_frequency
        .entry(PositionKey::of(board))
        .or_insert(0) += 1;
}

/// Pop the last snapshot and restore it. Returns `false` on an empty history.
pub fn undo_move_basic(board: &mut Board) -> bool {
    if board.history.is_empty() {
        return false;
    }

    // Forget one occurrence of the position being left.
    let leaving = PositionKey::of(board);
    if let Some(count) = board.position_frequency.get_mut(&leaving) {
        *count -= 1;
        if *count == 0 {
            let _ = board.position_frequency.remove(&leaving);
        }
    }

    let Some(prev) = board.history.pop() else {
        return false;
    };
    board.squares = prev.squares;
    board.side_to_move = prev.side_to_move;
    board.castling_rights = prev.castling_rights;
    board.last_move = prev.last_move;
    board.halfmove_clock = prev.halfmove_clock;
    board.game_result = prev.game_result;
    true
}

/// True if `mv` leaves `side`'s own king unattacked. The board is restored before returning.
#[inline]
pub fn is_legal_move(board: &mut Board, side: Color, mv: Move) -> bool {
    make_move_basic(board, mv);
    let illegal = is_in_check(board, side);
    let _ = undo_move_basic(board);
    !illegal
}

/// Legality filter: pseudo-legal moves for `side` minus those that leave its king
/// attacked, with every promotion expanded into one move per promotion piece.
pub fn generate_legal(
    board: &mut Board,
    side: Color,
    moves: &mut impl MoveBuffer,
    scratch: &mut impl MoveBuffer,
) {
    scratch.clear();
    generate_moves(board, side, true, scratch);
    moves.clear();

    for mv in scratch.iter().copied() {
        if mv.is_promotion() {
            // King safety does not depend on the piece chosen.
            if is_legal_move(board, side, mv.with_promotion(PieceKind::Queen)) {
                for kind in PROMOTION_KINDS {
                    moves.push(mv.with_promotion(kind));
                }
            }
        } else if is_legal_move(board, side, mv) {
            moves.push(mv);
        }
    }
}

/// Owned legal-move list for `side`.
pub fn generate_legal_moves(board: &mut Board, side: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let mut scratch = MoveList::new();
    generate_legal(board, side, &mut moves, &mut scratch);
    moves
}

impl Board {
    /// Apply a move from the current legal set, then refresh legal moves and the
    /// game result for the new side to move.
    pub fn apply_move(&mut self, mv: Move) {
        debug!(%mv, side = ?self.side_to_move, "apply");
        make_move_basic(self, mv);
        self.refresh();
    }

    /// Take back the last applied move. No-op on an empty history.
    pub fn unmake_move(&mut self) {
        if !undo_move_basic(self) {
            trace!("unmake on empty history");
            return;
        }
        debug!(side = ?self.side_to_move, "unmake");
        let side = self.side_to_move;
        self.legal_moves = generate_legal_moves(self, side);
    }

    /// Recompute the cached legal moves and classify the position.
    pub(crate) fn refresh(&mut self) {
        let side = self.side_to_move;
        self.legal_moves = generate_legal_moves(self, side);
        self.game_result = classify(self, &self.legal_moves);
    }
}
