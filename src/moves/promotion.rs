//! Two-phase move entry: propose a from/to pair, and if it promotes, finalize it
//! with the chosen piece.

use crate::board::{Board, PieceKind};
use crate::moves::types::Move;
use crate::square::Square;
use arrayvec::ArrayVec;

/// Outcome of proposing a from/to pair against the current legal moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    /// Exactly one legal move matches; submit it as is.
    Ready(Move),
    /// A pawn reaches the far rank; a piece must be chosen first.
    NeedsPromotion(PendingPromotion),
    Illegal,
}

/// A promotion waiting for the mover's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPromotion {
    candidates: ArrayVec<Move, 4>,
}

impl PendingPromotion {
    pub fn start(&self) -> Square {
        self.candidates[0].start
    }

    pub fn end(&self) -> Square {
        self.candidates[0].end
    }

    /// Kinds the mover may pick from, Queen first.
    pub fn choices(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.candidates
            .iter()
            .filter_map(|m| m.promotion_piece.kind())
    }

    /// The concrete legal move for `kind`, or `None` if `kind` cannot be promoted to.
    pub fn finalize(&self, kind: PieceKind) -> Option<Move> {
        self.candidates
            .iter()
            .find(|m| m.promotion_piece.is(kind))
            .copied()
    }
}

impl Board {
    /// First phase of move entry.
    pub fn propose(&self, start: Square, end: Square) -> Proposal {
        let mut matching = self
            .legal_moves()
            .iter()
            .filter(|m| m.start == start && m.end == end)
            .copied()
            .peekable();

        let Some(first) = matching.peek().copied() else {
            return Proposal::Illegal;
        };

        if first.is_promotion() {
            let candidates: ArrayVec<Move, 4> = matching.take(4).collect();
            Proposal::NeedsPromotion(PendingPromotion { candidates })
        } else {
            Proposal::Ready(first)
        }
    }
}
