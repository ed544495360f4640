use duel::board::{Board, CASTLE_BQ, CASTLE_NONE, Color, Piece, PieceKind};
use duel::moves::promotion::Proposal;
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
fn push_to_last_rank_asks_for_a_piece() {
    use Color::*;
    use PieceKind::*;
    let mut b = place(&[(0, King, White), (52, Pawn, White), (7, King, Black)], White, CASTLE_NONE);

    let Proposal::NeedsPromotion(pending) = b.propose(sq(52), sq(60)) else {
        panic!("e7e8 should need a promotion choice");
    };
    assert_eq!((pending.start(), pending.end()), (sq(52), sq(60)));
    assert_eq!(pending.choices().collect::<Vec<_>>(), vec![Queen, Rook, Bishop, Knight]);
    assert_eq!(pending.finalize(King), None);
    assert_eq!(pending.finalize(Pawn), None);

    let knight = pending.finalize(Knight).unwrap();
    assert!(b.is_valid_move(&knight));
    assert_eq!(knight.promotion_piece, Piece::new(Knight, White));
    assert_eq!(knight.to_uci(), "e7e8n");

    b.apply_move(knight);
    assert_eq!(b.piece_at(sq(60)), Piece::new(Knight, White));
    assert_eq!(b.piece_at(sq(52)), Piece::NONE);
    assert_eq!(b.fifty_move_counter(), 0);

    b.unmake_move();
    assert_eq!(b.piece_at(sq(52)), Piece::new(Pawn, White));
    assert_eq!(b.piece_at(sq(60)), Piece::NONE);
}

#[test]
fn each_promotion_is_its_own_legal_move() {
    use Color::*;
    use PieceKind::*;
    let b = place(&[(0, King, White), (52, Pawn, White), (7, King, Black)], White, CASTLE_NONE);
    let promos: Vec<_> = b.legal_moves_from(sq(52));
    assert_eq!(promos.len(), 4);
    assert!(promos.iter().all(|m| m.is_promotion() && m.promotion_piece.is_some()));
}

#[test]
fn black_underpromotes_with_capture() {
    use Color::*;
    use PieceKind::*;
    // b2 pawn takes the a1 rook.
    let mut b = place(
        &[(9, Pawn, Black), (0, Rook, White), (7, King, White), (60, King, Black)],
        Black,
        CASTLE_NONE,
    );
    let Proposal::NeedsPromotion(pending) = b.propose(sq(9), sq(0)) else {
        panic!("b2xa1 should need a promotion choice");
    };
    let rook = pending.finalize(Rook).unwrap();
    assert!(rook.is_capture());
    b.apply_move(rook);
    assert_eq!(b.piece_at(sq(0)), Piece::new(Rook, Black));
    assert_eq!(b.non_king_material().count(), 1);
}

#[test]
fn promoting_capture_on_a_corner_clears_castling() {
    use Color::*;
    use PieceKind::*;
    let mut b = place(
        &[(49, Pawn, White), (56, Rook, Black), (60, King, Black), (7, King, White)],
        White,
        CASTLE_BQ,
    );
    assert_eq!(b.castling_rights(), CASTLE_BQ);

    let Proposal::NeedsPromotion(pending) = b.propose(sq(49), sq(56)) else {
        panic!("b7xa8 should need a promotion choice");
    };
    b.apply_move(pending.finalize(Queen).unwrap());
    assert_eq!(b.castling_rights(), CASTLE_NONE);
}

#[test]
fn ordinary_and_illegal_proposals() {
    let b = Board::new();
    assert!(matches!(b.propose(sq(12), sq(28)), Proposal::Ready(m) if m.to_uci() == "e2e4"));
    assert_eq!(b.propose(sq(12), sq(36)), Proposal::Illegal);
    assert_eq!(b.propose(sq(52), sq(44)), Proposal::Illegal, "not Black's turn");
}
