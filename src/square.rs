use crate::error::WireError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board square, 0 = a1 … 63 = h8 (index = rank * 8 + file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    /// Build from a raw index. Callers guarantee `idx < 64`.
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Self {
        debug_assert!(idx < 64);
        Square(idx)
    }

    #[inline(always)]
    pub const fn from_coords(rank: u8, file: u8) -> Self {
        Square(rank * 8 + file)
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Offset by a signed delta, `None` when the result leaves 0..64.
    /// Edge wraparound is the caller's problem.
    #[inline(always)]
    pub fn offset(self, delta: i8) -> Option<Square> {
        let target = self.0 as i16 + delta as i16;
        if (0..64).contains(&target) {
            Some(Square(target as u8))
        } else {
            None
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 64 {
            Ok(Square(value))
        } else {
            Err(WireError::InvalidSquare(value))
        }
    }
}

impl From<Square> for u8 {
    fn from(sq: Square) -> u8 {
        sq.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("Invalid square `{}`", s));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(format!("Invalid square `{}`", s));
        }
        Ok(Square::from_coords(rank, file))
    }
}
