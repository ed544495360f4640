use crate::board::castle_bits::{CASTLE_NONE, CastleBits, CastleGeometry, castle_geometry};
use crate::board::{Color, Piece, PieceKind};
use crate::error::WireError;
use crate::square::Square;
use crate::status::GameResult;
use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Upper bound on pseudo-legal moves in any reachable position.
pub const MAX_MOVES: usize = 320;

/// Stack-allocated move list for generation scratch space.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

pub trait MoveBuffer: Deref<Target = [Move]> + DerefMut {
    fn push(&mut self, mv: Move);
    fn clear(&mut self);
}

impl MoveBuffer for Vec<Move> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<const N: usize> MoveBuffer for ArrayVec<Move, N> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// One ply. Equality is structural, which is what legal-set membership relies on.
///
/// The serde form is the wire record exchanged between peers:
/// `start`, `end`, `piece`, `captured_piece`, `promotion`, `promotion_piece`,
/// `enpassant`, `castling`, all plain integers or booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece: Piece,
    #[serde(default, deserialize_with = "nullable_piece")]
    pub captured_piece: Piece,
    #[serde(default)]
    pub promotion: bool,
    #[serde(default)]
    pub promotion_piece: Piece,
    #[serde(default, rename = "enpassant")]
    pub en_passant: bool,
    /// The single right this castle exercises, `CASTLE_NONE` otherwise.
    #[serde(default, deserialize_with = "castling_right")]
    pub castling: CastleBits,
}

fn nullable_piece<'de, D: Deserializer<'de>>(d: D) -> Result<Piece, D::Error> {
    Ok(Option::<Piece>::deserialize(d)?.unwrap_or(Piece::NONE))
}

/// Peers may send `castling` as the right exercised or as a plain `false`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CastlingField {
    Right(u8),
    Flag(bool),
}

fn castling_right<'de, D: Deserializer<'de>>(d: D) -> Result<CastleBits, D::Error> {
    let v = match Option::<CastlingField>::deserialize(d)? {
        None | Some(CastlingField::Flag(false)) => CASTLE_NONE,
        Some(CastlingField::Right(v)) => v,
        // A bare `true` does not say which right was used.
        Some(CastlingField::Flag(true)) => {
            return Err(serde::de::Error::custom(WireError::AmbiguousCastling));
        }
    };
    if v == CASTLE_NONE || castle_geometry(v).is_some() {
        Ok(v)
    } else {
        Err(serde::de::Error::custom(WireError::InvalidCastling(v)))
    }
}

impl Move {
    /// Plain move or capture.
    #[inline(always)]
    pub fn new(start: Square, end: Square, piece: Piece, captured_piece: Piece) -> Self {
        Move {
            start,
            end,
            piece,
            captured_piece,
            promotion: false,
            promotion_piece: Piece::NONE,
            en_passant: false,
            castling: CASTLE_NONE,
        }
    }

    /// Pawn move onto the far rank; the promotion piece is chosen later.
    #[inline(always)]
    pub fn promoting(start: Square, end: Square, piece: Piece, captured_piece: Piece) -> Self {
        Move {
            promotion: true,
            ..Move::new(start, end, piece, captured_piece)
        }
    }

    #[inline(always)]
    pub fn en_passant(start: Square, end: Square, piece: Piece, captured_piece: Piece) -> Self {
        Move {
            en_passant: true,
            ..Move::new(start, end, piece, captured_piece)
        }
    }

    #[inline(always)]
    pub fn castle(geometry: &CastleGeometry, king: Piece) -> Self {
        Move {
            castling: geometry.right,
            ..Move::new(geometry.king_from, geometry.king_to, king, Piece::NONE)
        }
    }

    /// Same move with the promotion resolved to `kind` for the mover's colour.
    pub fn with_promotion(self, kind: PieceKind) -> Self {
        let color = self.color().unwrap_or(Color::White);
        Move {
            promotion_piece: Piece::new(kind, color),
            ..self
        }
    }

    #[inline(always)]
    pub fn color(&self) -> Option<Color> {
        self.piece.color()
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        self.castling != CASTLE_NONE
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion
    }

    #[inline(always)]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.is(PieceKind::Pawn) && self.start.index().abs_diff(self.end.index()) == 16
    }

    /// Square of the pawn removed by an en-passant capture: beside `start`, on `end`'s file.
    #[inline(always)]
    pub fn en_passant_victim(&self) -> Square {
        Square::from_coords(self.start.rank(), self.end.file())
    }

    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Start with from->to like e2e4
        let mut s = format!("{}{}", self.start, self.end);

        if self.promotion {
            s.push(self.promotion_piece.kind().map_or('?', |k| k.letter()));
        }

        if f.alternate() {
            if self.is_castling() {
                s.push_str(" (castle)");
            } else if self.is_en_passant() {
                s.push_str(" (ep)");
            } else if self.is_capture() {
                s.push_str(" (x)");
            }
        }

        write!(f, "{}", s)
    }
}

/// Full pre-move state pushed on every make, restored verbatim on unmake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub squares: [Piece; 64],
    pub side_to_move: Color,
    pub castling_rights: CastleBits,
    pub last_move: Option<Move>,
    pub halfmove_clock: u32,
    pub game_result: GameResult,
}
