use crate::error::BoardError;
use crate::moves::square_control::is_in_check;
use crate::moves::types::{Move, Snapshot};
use crate::square::Square;
use crate::status::GameResult;
use std::collections::HashMap;
use std::fmt;

pub mod castle_bits;
mod piece;
pub mod position_key;
pub use castle_bits::*;
pub use piece::{Color, Piece, PieceKind, PROMOTION_KINDS};
pub use position_key::PositionKey;

/// Back-rank order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The authoritative game position.
///
/// Mutated only through `apply_move` / `unmake_move` once built. Every apply
/// pushes a full [`Snapshot`], so undo restores state bit for bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Square contents, 0 = a1 … 63 = h8.
    pub(crate) squares: [Piece; 64],
    /// White or Black to move
    pub(crate) side_to_move: Color,
    /// Castling rights: bit 0=White kingside, 1=White queenside, 2=Black kingside, 3=Black queenside
    pub(crate) castling_rights: CastleBits,
    /// Previous ply; drives en-passant eligibility.
    pub(crate) last_move: Option<Move>,
    /// Undo stack, one snapshot per applied move.
    pub(crate) history: Vec<Snapshot>,
    /// Occurrences of every position reached on the current line.
    pub(crate) position_frequency: HashMap<PositionKey, u32>,
    /// Plies since the last pawn move or capture.
    pub(crate) halfmove_clock: u32,
    /// Legal moves for `side_to_move`, refreshed after every apply/unmake.
    pub(crate) legal_moves: Vec<Move>,
    pub(crate) game_result: GameResult,
}

impl Board {
    /// Standard starting position, White to move, all castling rights.
    pub fn new() -> Self {
        let mut squares = [Piece::NONE; 64];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            squares[file] = Piece::new(kind, Color::White);
            squares[8 + file] = Piece::new(PieceKind::Pawn, Color::White);
            squares[48 + file] = Piece::new(PieceKind::Pawn, Color::Black);
            squares[56 + file] = Piece::new(kind, Color::Black);
        }
        let mut b = Board::from_parts(squares, Color::White, CASTLE_ALL);
        b.refresh();
        b
    }

    /// Build an arbitrary position.
    ///
    /// Requires exactly one king per side, no pawn on either back rank and the
    /// side not to move out of check.
    /// Castling bits whose king or rook is not on its home square are dropped.
    pub fn with_position(
        squares: [Piece; 64],
        side_to_move: Color,
        castling_rights: CastleBits,
    ) -> Result<Self, BoardError> {
        for color in [Color::White, Color::Black] {
            let king = Piece::new(PieceKind::King, color);
            let kings = squares.iter().filter(|&&p| p == king).count();
            if kings != 1 {
                return Err(BoardError::InvalidSetup(format!(
                    "expected one {:?} king, found {}",
                    color, kings
                )));
            }
        }
        let stray_pawn = squares
            .iter()
            .enumerate()
            .any(|(i, p)| p.is(PieceKind::Pawn) && (i < 8 || i >= 56));
        if stray_pawn {
            return Err(BoardError::InvalidSetup(
                "pawn on a back rank".to_string(),
            ));
        }

        let mut rights = CASTLE_NONE;
        for g in &CASTLES {
            if castling_rights & g.right == 0 {
                continue;
            }
            let color = if g.right & CASTLE_W != 0 {
                Color::White
            } else {
                Color::Black
            };
            let king_home = squares[g.king_from.index() as usize] == Piece::new(PieceKind::King, color);
            let rook_home = squares[g.rook_from.index() as usize] == Piece::new(PieceKind::Rook, color);
            if king_home && rook_home {
                rights |= g.right;
            }
        }

        let mut b = Board::from_parts(squares, side_to_move, rights);
        if is_in_check(&b, side_to_move.opposite()) {
            return Err(BoardError::InvalidSetup(format!(
                "{:?} is in check but not to move",
                side_to_move.opposite()
            )));
        }
        b.refresh();
        Ok(b)
    }

    /// Assemble a board from a placement and seed the repetition map.
    /// Legal moves are filled in by the caller's `refresh`.
    fn from_parts(squares: [Piece; 64], side_to_move: Color, castling_rights: CastleBits) -> Self {
        let mut b = Board {
            squares,
            side_to_move,
            castling_rights,
            last_move: None,
            history: Vec::new(),
            position_frequency: HashMap::new(),
            halfmove_clock: 0,
            legal_moves: Vec::new(),
            game_result: GameResult::None,
        };
        let _ = b.position_frequency.insert(PositionKey::of(&b), 1);
        b
    }

    /// Contents of square `index`; fails outside 0..64.
    pub fn get_square(&self, index: usize) -> Result<Piece, BoardError> {
        self.squares
            .get(index)
            .copied()
            .ok_or(BoardError::SquareOutOfRange(index))
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[sq.index() as usize]
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn can_castle(&self, right: CastleBits) -> bool {
        self.castling_rights & right != 0
    }

    #[inline(always)]
    pub fn castling_rights(&self) -> CastleBits {
        self.castling_rights
    }

    #[inline(always)]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Half-move counter for the fifty-move rule, in plies.
    #[inline(always)]
    pub fn fifty_move_counter(&self) -> u32 {
        self.halfmove_clock
    }

    /// Number of moves that can be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Legal moves starting on `sq`.
    pub fn legal_moves_from(&self, sq: Square) -> Vec<Move> {
        self.legal_moves
            .iter()
            .filter(|m| m.start == sq)
            .copied()
            .collect()
    }

    /// Structural membership in the current legal-move set.
    pub fn is_valid_move(&self, mv: &Move) -> bool {
        self.legal_moves.contains(mv)
    }

    #[inline(always)]
    pub fn game_result(&self) -> GameResult {
        self.game_result
    }

    pub fn is_game_over(&self) -> bool {
        self.game_result != GameResult::None
    }

    /// Ends the game from outside the rules, e.g. when a networked peer drops.
    pub fn declare_result(&mut self, result: GameResult) {
        self.game_result = result;
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey::of(self)
    }

    /// How often `key` has occurred on the current line.
    pub fn repetition_count(&self, key: &PositionKey) -> u32 {
        self.position_frequency.get(key).copied().unwrap_or(0)
    }

    /// Highest occurrence count of any position on the current line.
    pub fn max_repetition(&self) -> u32 {
        self.position_frequency.values().copied().max().unwrap_or(0)
    }

    /// Square of `color`'s king.
    pub fn get_king_square(&self, color: Color) -> Result<Square, BoardError> {
        let king = Piece::new(PieceKind::King, color);
        self.squares
            .iter()
            .position(|&p| p == king)
            .map(|i| Square::from_index(i as u8))
            .ok_or(BoardError::MissingKing(color))
    }

    /// Function to get exactly what square the king sits on.
    /// A missing king is an invariant violation and aborts.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Square {
        match self.get_king_square(color) {
            Ok(sq) => sq,
            Err(e) => panic!("{e}\n{self}"),
        }
    }

    /// Pieces other than kings, with their squares.
    pub fn non_king_material(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_some() && !p.is(PieceKind::King))
            .map(|(i, &p)| (Square::from_index(i as u8), p))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                write!(f, " {}", self.piece_at(Square::from_coords(rank, file)))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{:?} to move", self.side_to_move)
    }
}
