// src/board/piece.rs

use crate::error::WireError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Kind lives in bits 0-2, colour in bits 3-4.
// Bit 2 marks sliders; bits 0 and 1 mark diagonal and orthogonal rays.
const KIND_MASK: u8 = 0b00111;
const COLOR_MASK: u8 = 0b11000;
const SLIDER_BIT: u8 = 0b00100;
const DIAGONAL_BITS: u8 = 0b00101;
const ORTHOGONAL_BITS: u8 = 0b00110;

/// Which side a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Color {
    White = 0b01000,
    Black = 0b10000,
}

/// Piece kinds, numbered so the slider predicates fall out of the bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 0b001,
    Pawn = 0b010,
    Knight = 0b011,
    Bishop = 0b101,
    Rook = 0b110,
    Queen = 0b111,
}

/// Kinds a pawn may promote to, in the order they are offered.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A packed (kind, colour) value. `Piece::NONE` marks an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Piece(u8);

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Rank index of this side's back rank.
    #[inline(always)]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Square-index step of a one-rank pawn advance.
    #[inline(always)]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl TryFrom<u8> for Color {
    type Error = WireError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0b01000 => Ok(Color::White),
            0b10000 => Ok(Color::Black),
            _ => Err(WireError::InvalidColor(v)),
        }
    }
}

impl From<Color> for u8 {
    fn from(c: Color) -> u8 {
        c.bits()
    }
}

impl PieceKind {
    #[inline(always)]
    fn from_bits(v: u8) -> Option<Self> {
        match v {
            0b001 => Some(PieceKind::King),
            0b010 => Some(PieceKind::Pawn),
            0b011 => Some(PieceKind::Knight),
            0b101 => Some(PieceKind::Bishop),
            0b110 => Some(PieceKind::Rook),
            0b111 => Some(PieceKind::Queen),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

impl Piece {
    pub const NONE: Piece = Piece(0);

    #[inline(always)]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece(kind as u8 | color as u8)
    }

    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    #[inline(always)]
    pub fn kind(self) -> Option<PieceKind> {
        PieceKind::from_bits(self.0 & KIND_MASK)
    }

    #[inline(always)]
    pub fn color(self) -> Option<Color> {
        match self.0 & COLOR_MASK {
            0b01000 => Some(Color::White),
            0b10000 => Some(Color::Black),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is(self, kind: PieceKind) -> bool {
        self.0 & KIND_MASK == kind as u8
    }

    #[inline(always)]
    pub fn is_color(self, color: Color) -> bool {
        self.0 & COLOR_MASK == color as u8
    }

    /// Occupied by the side opposite to `color`.
    #[inline(always)]
    pub fn is_enemy_of(self, color: Color) -> bool {
        self.is_some() && !self.is_color(color)
    }

    #[inline(always)]
    pub fn is_sliding(self) -> bool {
        self.0 & SLIDER_BIT == SLIDER_BIT
    }

    #[inline(always)]
    pub fn can_slide_diagonal(self) -> bool {
        self.0 & DIAGONAL_BITS == DIAGONAL_BITS
    }

    #[inline(always)]
    pub fn can_slide_orthogonal(self) -> bool {
        self.0 & ORTHOGONAL_BITS == ORTHOGONAL_BITS
    }

    /// Letter for diagrams: uppercase for White, lowercase for Black, '.' for empty.
    pub fn symbol(self) -> char {
        match (self.kind(), self.color()) {
            (Some(kind), Some(Color::White)) => kind.letter().to_ascii_uppercase(),
            (Some(kind), Some(Color::Black)) => kind.letter(),
            _ => '.',
        }
    }
}

impl TryFrom<u8> for Piece {
    type Error = WireError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        if v == 0 {
            return Ok(Piece::NONE);
        }
        if v & !(KIND_MASK | COLOR_MASK) != 0 {
            return Err(WireError::InvalidPiece(v));
        }
        let piece = Piece(v);
        match (piece.kind(), piece.color()) {
            (Some(_), Some(_)) => Ok(piece),
            _ => Err(WireError::InvalidPiece(v)),
        }
    }
}

impl From<Piece> for u8 {
    fn from(p: Piece) -> u8 {
        p.0
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
