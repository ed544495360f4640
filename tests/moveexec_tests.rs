use duel::board::{Board, CASTLE_ALL, CASTLE_B, CASTLE_BK, CASTLE_BQ, CASTLE_NONE, CASTLE_W, CASTLE_WK, Color, Piece, PieceKind};
use duel::moves::promotion::Proposal;
use duel::moves::types::Move;
use duel::square::Square;
use duel::status::GameResult;

fn sq(i: u8) -> Square {
    Square::from_index(i)
}

fn find(b: &Board, from: u8, to: u8) -> Move {
    b.legal_moves()
        .iter()
        .copied()
        .find(|m| m.start == sq(from) && m.end == sq(to))
        .unwrap_or_else(|| panic!("{}{} not legal in\n{b}", sq(from), sq(to)))
}

fn play(b: &mut Board, moves: &[&str]) {
    for text in moves {
        let start: Square = text[0..2].parse().unwrap();
        let end: Square = text[2..4].parse().unwrap();
        let mv = match b.propose(start, end) {
            Proposal::Ready(mv) => mv,
            Proposal::NeedsPromotion(p) => {
                let letter = text.chars().nth(4).unwrap_or('q');
                p.finalize(PieceKind::from_letter(letter).unwrap()).unwrap()
            }
            Proposal::Illegal => panic!("{text} is illegal in\n{b}"),
        };
        b.apply_move(mv);
    }
}

fn place(pieces: &[(u8, PieceKind, Color)], side: Color, rights: u8) -> Board {
    let mut squares = [Piece::NONE; 64];
    for &(i, kind, color) in pieces {
        squares[i as usize] = Piece::new(kind, color);
    }
    Board::with_position(squares, side, rights).unwrap()
}

#[test]
fn opening_pawn_pushes() {
    let mut b = Board::new();

    let e4 = find(&b, 12, 28);
    b.apply_move(e4);
    assert_eq!(b.piece_at(sq(28)), Piece::new(PieceKind::Pawn, Color::White));
    assert_eq!(b.piece_at(sq(12)), Piece::NONE);
    assert_eq!(b.side_to_move(), Color::Black);
    assert_eq!(b.last_move(), Some(e4));
    assert_eq!(b.castling_rights(), CASTLE_ALL);

    let e5 = find(&b, 52, 36);
    b.apply_move(e5);
    assert_eq!(b.piece_at(sq(36)), Piece::new(PieceKind::Pawn, Color::Black));
    assert_eq!(b.piece_at(sq(52)), Piece::NONE);
    assert_eq!(b.side_to_move(), Color::White);
    assert_eq!(b.last_move().map(|m| m.end), Some(sq(36)));
    assert_eq!(b.fifty_move_counter(), 0);
    assert_eq!(b.history_len(), 2);
    assert_eq!(b.game_result(), GameResult::None);
}

#[test]
fn apply_then_unmake_restores_everything() {
    let mut b = Board::new();
    play(&mut b, &["e2e4", "d7d5", "e4d5", "g8f6"]);

    let before = b.clone();
    let moves = before.legal_moves().to_vec();
    assert!(!moves.is_empty());
    for mv in moves {
        b.apply_move(mv);
        b.unmake_move();
        assert_eq!(b, before, "state drifted after {mv:#}");
    }
}

#[test]
fn unmake_on_fresh_board_is_noop() {
    let mut b = Board::new();
    b.unmake_move();
    assert_eq!(b, Board::new());
}

#[test]
fn unmake_walks_back_to_start() {
    let mut b = Board::new();
    play(&mut b, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"]);
    assert_eq!(b.history_len(), 7);
    for _ in 0..7 {
        b.unmake_move();
    }
    assert_eq!(b, Board::new());
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut b = Board::new();
    play(&mut b, &["e2e4", "a7a6", "e4e5", "d7d5"]);

    let ep = find(&b, 36, 43);
    assert!(ep.is_en_passant());
    assert_eq!(ep.captured_piece, Piece::new(PieceKind::Pawn, Color::Black));

    b.apply_move(ep);
    assert_eq!(b.piece_at(sq(43)), Piece::new(PieceKind::Pawn, Color::White));
    assert_eq!(b.piece_at(sq(35)), Piece::NONE, "d5 pawn should be gone");
    assert_eq!(b.piece_at(sq(36)), Piece::NONE);
    assert_eq!(b.fifty_move_counter(), 0);

    b.unmake_move();
    assert_eq!(b.piece_at(sq(35)), Piece::new(PieceKind::Pawn, Color::Black));
    assert_eq!(b.piece_at(sq(36)), Piece::new(PieceKind::Pawn, Color::White));
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut b = Board::new();
    play(&mut b, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert!(b.legal_moves_from(sq(36)).iter().all(|m| !m.is_en_passant()));
}

#[test]
fn kingside_castle_moves_rook_and_clears_rights() {
    let mut b = Board::new();
    play(&mut b, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);

    let castle = find(&b, 4, 6);
    assert!(castle.is_castling());
    assert_eq!(castle.castling, CASTLE_WK);

    b.apply_move(castle);
    assert_eq!(b.piece_at(sq(6)), Piece::new(PieceKind::King, Color::White));
    assert_eq!(b.piece_at(sq(5)), Piece::new(PieceKind::Rook, Color::White));
    assert_eq!(b.piece_at(sq(4)), Piece::NONE);
    assert_eq!(b.piece_at(sq(7)), Piece::NONE);
    assert_eq!(b.castling_rights(), CASTLE_B);
}

#[test]
fn queenside_castle_for_black() {
    use Color::*;
    use PieceKind::*;
    let mut b = place(
        &[(4, King, White), (60, King, Black), (56, Rook, Black), (63, Rook, Black)],
        Black,
        CASTLE_B,
    );

    b.apply_move(find(&b, 60, 58));
    assert_eq!(b.piece_at(sq(58)), Piece::new(King, Black));
    assert_eq!(b.piece_at(sq(59)), Piece::new(Rook, Black));
    assert_eq!(b.piece_at(sq(56)), Piece::NONE);
    assert_eq!(b.castling_rights(), CASTLE_NONE);
}

#[test]
fn king_move_forfeits_both_rights() {
    let mut b = Board::new();
    play(&mut b, &["e2e4", "e7e5", "e1e2"]);
    assert_eq!(b.castling_rights(), CASTLE_B);
}

#[test]
fn rook_move_forfeits_its_side_only() {
    let mut b = Board::new();
    play(&mut b, &["h2h4", "a7a5", "h1h3", "a8a6"]);
    assert_eq!(b.castling_rights(), CASTLE_ALL & !CASTLE_WK & !CASTLE_BQ);
}

#[test]
fn capturing_a_corner_rook_forfeits_that_right() {
    use Color::*;
    use PieceKind::*;
    // White bishop on b2 looks down the long diagonal at the h8 rook.
    let mut b = place(
        &[(4, King, White), (9, Bishop, White), (60, King, Black), (63, Rook, Black), (56, Rook, Black)],
        White,
        CASTLE_B,
    );
    assert_eq!(b.castling_rights(), CASTLE_B);

    b.apply_move(find(&b, 9, 63));
    assert_eq!(b.castling_rights(), CASTLE_BQ);
}

#[test]
fn halfmove_clock_counts_and_resets() {
    let mut b = Board::new();
    play(&mut b, &["g1f3", "g8f6"]);
    assert_eq!(b.fifty_move_counter(), 2);
    play(&mut b, &["e2e4"]);
    assert_eq!(b.fifty_move_counter(), 0);
    play(&mut b, &["f6e4"]);
    assert_eq!(b.fifty_move_counter(), 0, "capture resets the clock");
    play(&mut b, &["b1c3"]);
    assert_eq!(b.fifty_move_counter(), 1);

    b.unmake_move();
    assert_eq!(b.fifty_move_counter(), 0);
}
