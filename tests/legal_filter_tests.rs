use duel::board::{Board, CASTLE_NONE, CASTLE_W, CASTLE_WK, CASTLE_WQ, Color, Piece, PieceKind};
use duel::moves::execute::{generate_legal_moves, is_legal_move};
use duel::moves::movegen::pseudo_legal_moves;
use duel::moves::square_control::is_in_check;
use duel::square::Square;

fn sq(i: u8) -> Square {
    Square::from_index(i)
}

fn place(pieces: &[(u8, PieceKind, Color)], side: Color, rights: u8) -> Board {
    let mut squares = [Piece::NONE; 64];
    for &(i, kind, color) in pieces {
        squares[i as usize] = Piece::new(kind, color);
    }
    Board::with_position(squares, side, rights).unwrap()
}

#[test]
fn pinned_piece_cannot_leave_the_line() {
    use Color::*;
    use PieceKind::*;
    // Knight e2 pinned against the e1 king by the e8 rook.
    let b = place(
        &[(4, King, White), (12, Knight, White), (60, Rook, Black), (56, King, Black)],
        White,
        CASTLE_NONE,
    );
    assert!(b.legal_moves_from(sq(12)).is_empty());
    assert!(pseudo_legal_moves(&b, White, true).iter().any(|m| m.start == sq(12)));
}

#[test]
fn pinned_slider_may_move_along_the_pin() {
    use Color::*;
    use PieceKind::*;
    let b = place(
        &[(4, King, White), (12, Rook, White), (60, Rook, Black), (56, King, Black)],
        White,
        CASTLE_NONE,
    );
    let mut ends: Vec<u8> = b.legal_moves_from(sq(12)).iter().map(|m| m.end.index()).collect();
    ends.sort_unstable();
    assert_eq!(ends, vec![20, 28, 36, 44, 52, 60]);
}

#[test]
fn check_must_be_answered() {
    use Color::*;
    use PieceKind::*;
    // Rook on e8 checks the e1 king; a rook on a2 can block on e2.
    let b = place(
        &[(4, King, White), (8, Rook, White), (60, Rook, Black), (63, King, Black)],
        White,
        CASTLE_NONE,
    );
    assert!(is_in_check(&b, White));
    for mv in b.legal_moves() {
        let blocks = mv.piece.is(Rook) && mv.end == sq(12);
        let steps_aside = mv.piece.is(King) && mv.end.file() != 4;
        assert!(blocks || steps_aside, "{mv:#} does not answer the check");
    }
    assert!(b.legal_moves().iter().any(|m| m.piece.is(Rook) && m.end == sq(12)));
}

#[test]
fn king_cannot_step_into_attack() {
    use Color::*;
    use PieceKind::*;
    // Black rook on the d-file guards d1 and d2.
    let b = place(
        &[(4, King, White), (59, Rook, Black), (63, King, Black)],
        White,
        CASTLE_NONE,
    );
    let ends: Vec<u8> = b.legal_moves().iter().map(|m| m.end.index()).collect();
    assert!(!ends.contains(&3));
    assert!(!ends.contains(&11));
    assert!(ends.contains(&5));
}

#[test]
fn king_cannot_capture_a_defended_piece() {
    use Color::*;
    use PieceKind::*;
    // Knight e2 is covered by the d3 bishop.
    let b = place(
        &[(4, King, White), (12, Knight, Black), (19, Bishop, Black), (63, King, Black)],
        White,
        CASTLE_NONE,
    );
    assert!(b.legal_moves().iter().all(|m| m.end != sq(12)));
}

#[test]
fn is_legal_move_leaves_board_untouched() {
    let mut b = Board::new();
    let before = b.clone();
    for mv in pseudo_legal_moves(&b.clone(), Color::White, true) {
        assert!(is_legal_move(&mut b, Color::White, mv));
    }
    assert_eq!(b, before);
    assert_eq!(generate_legal_moves(&mut b, Color::White), before.legal_moves());
}

#[test]
fn castling_requires_empty_and_safe_path() {
    use Color::*;
    use PieceKind::*;
    let pieces = [(4, King, White), (0, Rook, White), (7, Rook, White), (60, King, Black)];

    let b = place(&pieces, White, CASTLE_W);
    let castles: Vec<u8> = b.legal_moves().iter().filter(|m| m.is_castling()).map(|m| m.castling).collect();
    assert_eq!(castles.len(), 2);
    assert!(castles.contains(&CASTLE_WK) && castles.contains(&CASTLE_WQ));

    // A knight on b1 blocks only the long castle.
    let mut blocked = pieces.to_vec();
    blocked.push((1, Knight, White));
    let b = place(&blocked, White, CASTLE_W);
    let castles: Vec<u8> = b.legal_moves().iter().filter(|m| m.is_castling()).map(|m| m.castling).collect();
    assert_eq!(castles, vec![CASTLE_WK]);
}

#[test]
fn no_castling_out_of_or_through_check() {
    use Color::*;
    use PieceKind::*;
    let base = [(4, King, White), (0, Rook, White), (7, Rook, White), (42, King, Black)];

    // Rook on e8: king in check, neither castle allowed.
    let mut in_check = base.to_vec();
    in_check.push((60, Rook, Black));
    let b = place(&in_check, White, CASTLE_W);
    assert!(b.legal_moves().iter().all(|m| !m.is_castling()));

    // Rook on f8 covers f1, the short castle's transit square.
    let mut through = base.to_vec();
    through.push((61, Rook, Black));
    let b = place(&through, White, CASTLE_W);
    let castles: Vec<u8> = b.legal_moves().iter().filter(|m| m.is_castling()).map(|m| m.castling).collect();
    assert_eq!(castles, vec![CASTLE_WQ]);

    // Rook on g8 covers the landing square g1.
    let mut into = base.to_vec();
    into.push((62, Rook, Black));
    let b = place(&into, White, CASTLE_W);
    let castles: Vec<u8> = b.legal_moves().iter().filter(|m| m.is_castling()).map(|m| m.castling).collect();
    assert_eq!(castles, vec![CASTLE_WQ]);

    // Rook on b8 attacks b1 only; the long castle is still allowed.
    let mut b_file = base.to_vec();
    b_file.push((57, Rook, Black));
    let b = place(&b_file, White, CASTLE_W);
    let castles: Vec<u8> = b.legal_moves().iter().filter(|m| m.is_castling()).map(|m| m.castling).collect();
    assert_eq!(castles.len(), 2);
}

#[test]
fn en_passant_that_exposes_the_king_is_illegal() {
    use Color::*;
    use PieceKind::*;
    // White king a5, pawn b5; black pawn c7 double-pushes next to it with a rook on h5.
    let mut b = place(
        &[(32, King, White), (33, Pawn, White), (50, Pawn, Black), (39, Rook, Black), (60, King, Black)],
        Black,
        CASTLE_NONE,
    );
    let push = b
        .legal_moves()
        .iter()
        .copied()
        .find(|m| m.start == sq(50) && m.end == sq(34))
        .unwrap();
    b.apply_move(push);
    assert!(b.legal_moves_from(sq(33)).iter().all(|m| !m.is_en_passant()));
}
