// src/board/castle_bits.rs

use crate::board::Color;
use crate::square::Square;

/// Underlying bit type for castling rights.
pub type CastleBits = u8;

pub const CASTLE_NONE: CastleBits = 0b0000;
pub const CASTLE_WK: CastleBits = 0b0001;
pub const CASTLE_WQ: CastleBits = 0b0010;
pub const CASTLE_BK: CastleBits = 0b0100;
pub const CASTLE_BQ: CastleBits = 0b1000;

pub const CASTLE_W: CastleBits = CASTLE_WK | CASTLE_WQ;
pub const CASTLE_B: CastleBits = CASTLE_BK | CASTLE_BQ;
pub const CASTLE_ALL: CastleBits = CASTLE_W | CASTLE_B;

/// Fixed geometry of one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub right: CastleBits,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook; all must be empty.
    pub between: &'static [u8],
    /// Square the king crosses on its way to `king_to`.
    pub transit: Square,
}

const fn sq(i: u8) -> Square {
    Square::from_index(i)
}

pub const CASTLES: [CastleGeometry; 4] = [
    CastleGeometry {
        right: CASTLE_WK,
        king_from: sq(4),
        king_to: sq(6),
        rook_from: sq(7),
        rook_to: sq(5),
        between: &[5, 6],
        transit: sq(5),
    },
    CastleGeometry {
        right: CASTLE_WQ,
        king_from: sq(4),
        king_to: sq(2),
        rook_from: sq(0),
        rook_to: sq(3),
        between: &[1, 2, 3],
        transit: sq(3),
    },
    CastleGeometry {
        right: CASTLE_BK,
        king_from: sq(60),
        king_to: sq(62),
        rook_from: sq(63),
        rook_to: sq(61),
        between: &[61, 62],
        transit: sq(61),
    },
    CastleGeometry {
        right: CASTLE_BQ,
        king_from: sq(60),
        king_to: sq(58),
        rook_from: sq(56),
        rook_to: sq(59),
        between: &[57, 58, 59],
        transit: sq(59),
    },
];

/// Geometry for a single right bit, `None` for anything else.
#[inline(always)]
pub fn castle_geometry(right: CastleBits) -> Option<&'static CastleGeometry> {
    CASTLES.iter().find(|g| g.right == right)
}

/// Both rights belonging to `color`.
#[inline(always)]
pub fn rights_of(color: Color) -> CastleBits {
    match color {
        Color::White => CASTLE_W,
        Color::Black => CASTLE_B,
    }
}

/// Kingside then queenside right for `color`.
#[inline(always)]
pub fn side_rights(color: Color) -> [CastleBits; 2] {
    match color {
        Color::White => [CASTLE_WK, CASTLE_WQ],
        Color::Black => [CASTLE_BK, CASTLE_BQ],
    }
}

/// Right forfeited when a rook leaves, or is captured on, `sq`.
#[inline(always)]
pub fn right_for_rook_square(sq: Square) -> CastleBits {
    match sq.index() {
        0 => CASTLE_WQ,  // a1
        7 => CASTLE_WK,  // h1
        56 => CASTLE_BQ, // a8
        63 => CASTLE_BK, // h8
        _ => CASTLE_NONE,
    }
}
