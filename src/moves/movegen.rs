use crate::board::castle_bits::{castle_geometry, side_rights};
use crate::board::{Board, Color, Piece, PieceKind};
use crate::moves::square_control::{is_in_check, is_square_attacked};
use crate::moves::types::{Move, MoveBuffer};
use crate::square::Square;

pub const DIAGONAL_DIRS: [i8; 4] = [-9, -7, 7, 9];
pub const ORTHOGONAL_DIRS: [i8; 4] = [-8, -1, 1, 8];
pub const KING_DIRS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
/// Knight jumps paired with the rank distance each must cover.
pub const KNIGHT_JUMPS: [(i8, u8); 8] = [
    (-17, 2),
    (-15, 2),
    (-10, 1),
    (-6, 1),
    (6, 1),
    (10, 1),
    (15, 2),
    (17, 2),
];

/// King step in `dir`, rejecting steps that wrap around a board edge.
#[inline(always)]
pub fn king_target(from: Square, dir: i8) -> Option<Square> {
    let target = from.offset(dir)?;
    let df = from.file().abs_diff(target.file());
    let expected = if dir == 8 || dir == -8 { 0 } else { 1 };
    (df == expected).then_some(target)
}

/// Knight jump, rejected when the actual rank distance betrays a wrap.
#[inline(always)]
pub fn knight_target(from: Square, jump: i8, rank_delta: u8) -> Option<Square> {
    let target = from.offset(jump)?;
    (from.rank().abs_diff(target.rank()) == rank_delta).then_some(target)
}

/// `step`-th square along `dir` from `from`, `None` once the ray leaves the board
/// or wraps to the other edge.
#[inline(always)]
pub fn slide_target(from: Square, dir: i8, step: u8) -> Option<Square> {
    let target = from.offset(dir * step as i8)?;
    let dr = from.rank().abs_diff(target.rank());
    let df = from.file().abs_diff(target.file());
    let on_ray = match dir {
        -9 | -7 | 7 | 9 => dr == df && dr == step,
        -1 | 1 => dr == 0,
        _ => df == 0,
    };
    on_ray.then_some(target)
}

/// All pseudo-legal moves for `side`. With `include_king == false` king steps and
/// castling are skipped, which is what check detection relies on to avoid recursing
/// back into castling generation.
pub fn generate_moves(
    board: &Board,
    side: Color,
    include_king: bool,
    move_list: &mut impl MoveBuffer,
) {
    for idx in 0..64u8 {
        let sq = Square::from_index(idx);
        let piece = board.piece_at(sq);
        if !piece.is_color(side) {
            continue;
        }
        let Some(kind) = piece.kind() else { continue };

        match kind {
            PieceKind::Pawn => generate_pawn_moves(board, sq, piece, move_list),
            PieceKind::Knight => generate_knight_moves(board, sq, piece, move_list),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                generate_sliding_moves(board, sq, piece, move_list)
            }
            PieceKind::King => {
                if include_king {
                    generate_king_moves(board, sq, piece, move_list);
                    generate_castling_moves(board, sq, piece, move_list);
                }
            }
        }
    }
}

/// Convenience wrapper returning an owned list.
pub fn pseudo_legal_moves(board: &Board, side: Color, include_king: bool) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_moves(board, side, include_king, &mut moves);
    moves
}

pub fn generate_king_moves(board: &Board, from: Square, piece: Piece, move_list: &mut impl MoveBuffer) {
    let color = board.side_of(piece);
    for dir in KING_DIRS {
        let Some(to) = king_target(from, dir) else { continue };
        let target = board.piece_at(to);
        if target.is_none() || target.is_enemy_of(color) {
            move_list.push(Move::new(from, to, piece, target));
        }
    }
}

/// Castling: never out of check, never through an attacked square, and only with
/// every square between king and rook empty. The landing square is left to the
/// legality filter.
pub fn generate_castling_moves(
    board: &Board,
    from: Square,
    king: Piece,
    move_list: &mut impl MoveBuffer,
) {
    let color = board.side_of(king);
    let rights = side_rights(color);
    if !rights.iter().any(|&r| board.can_castle(r)) {
        return;
    }
    if is_in_check(board, color) {
        return;
    }

    for right in rights {
        if !board.can_castle(right) {
            continue;
        }
        let Some(g) = castle_geometry(right) else { continue };
        if g.king_from != from {
            continue;
        }
        if g.between.iter().any(|&i| board.piece_at(Square::from_index(i)).is_some()) {
            continue;
        }
        if is_square_attacked(board, g.transit, color.opposite()) {
            continue;
        }
        move_list.push(Move::castle(g, king));
    }
}

pub fn generate_knight_moves(board: &Board, from: Square, piece: Piece, move_list: &mut impl MoveBuffer) {
    let color = board.side_of(piece);
    for (jump, rank_delta) in KNIGHT_JUMPS {
        let Some(to) = knight_target(from, jump, rank_delta) else { continue };
        let target = board.piece_at(to);
        if target.is_none() || target.is_enemy_of(color) {
            move_list.push(Move::new(from, to, piece, target));
        }
    }
}

pub fn generate_sliding_moves(board: &Board, from: Square, piece: Piece, move_list: &mut impl MoveBuffer) {
    let color = board.side_of(piece);
    let diagonal: &[i8] = if piece.can_slide_diagonal() { &DIAGONAL_DIRS[..] } else { &[] };
    let orthogonal: &[i8] = if piece.can_slide_orthogonal() { &ORTHOGONAL_DIRS[..] } else { &[] };

    for &dir in diagonal.iter().chain(orthogonal) {
        for step in 1..8u8 {
            let Some(to) = slide_target(from, dir, step) else { break };
            let target = board.piece_at(to);
            if target.is_none() {
                move_list.push(Move::new(from, to, piece, Piece::NONE));
                continue;
            }
            if target.is_enemy_of(color) {
                move_list.push(Move::new(from, to, piece, target));
            }
            break;
        }
    }
}

/// Pawn push or capture, flagged as a promotion when it reaches the far rank.
#[inline(always)]
fn push_pawn_move(from: Square, to: Square, piece: Piece, captured: Piece, move_list: &mut impl MoveBuffer) {
    let promo_rank = match piece.color() {
        Some(Color::Black) => 0,
        _ => 7,
    };
    if to.rank() == promo_rank {
        move_list.push(Move::promoting(from, to, piece, captured));
    } else {
        move_list.push(Move::new(from, to, piece, captured));
    }
}

pub fn generate_pawn_moves(board: &Board, from: Square, piece: Piece, move_list: &mut impl MoveBuffer) {
    let color = board.side_of(piece);
    let forward = color.forward();
    let start_rank = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    // Single and double advance
    if let Some(one) = from.offset(forward)
        && board.piece_at(one).is_none()
    {
        push_pawn_move(from, one, piece, Piece::NONE, move_list);

        if from.rank() == start_rank
            && let Some(two) = one.offset(forward)
            && board.piece_at(two).is_none()
        {
            move_list.push(Move::new(from, two, piece, Piece::NONE));
        }
    }

    // Diagonal captures
    for df in [-1i8, 1] {
        let file = from.file() as i8 + df;
        if !(0..8).contains(&file) {
            continue;
        }
        let Some(to) = from.offset(forward + df) else { continue };
        let target = board.piece_at(to);
        if target.is_enemy_of(color) {
            push_pawn_move(from, to, piece, target, move_list);
        }
    }

    // En passant: the previous ply was an enemy double push landing beside us.
    if let Some(last) = board.last_move()
        && last.is_double_pawn_push()
        && last.piece.is_enemy_of(color)
        && last.end.rank() == from.rank()
        && last.end.file().abs_diff(from.file()) == 1
        && let Some(to) = last.end.offset(forward)
        && board.piece_at(to).is_none()
    {
        move_list.push(Move::en_passant(from, to, piece, last.piece));
    }
}

impl Board {
    /// Colour of a piece known to be on the board.
    #[inline(always)]
    pub(crate) fn side_of(&self, piece: Piece) -> Color {
        piece.color().unwrap_or(self.side_to_move)
    }
}
