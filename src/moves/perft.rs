//! Leaf-node counting over the legal move tree, for checking the generator
//! against published node counts.

use crate::board::Board;
use crate::moves::execute::{generate_legal, make_move_basic, undo_move_basic};
use crate::moves::types::{Move, MoveList};
use tracing::{debug, instrument};

/// Deepest search `perft` accepts.
pub const MAX_PERFT_DEPTH: usize = 12;

/// Root splits are logged only this shallow.
const LOGGED_DEPTH: u32 = 3;

/// One reusable move list per ply, plus shared generation scratch.
struct PlyBuffers {
    plies: [Vec<Move>; MAX_PERFT_DEPTH],
    scratch: MoveList,
}

impl PlyBuffers {
    fn new() -> Self {
        PlyBuffers {
            plies: std::array::from_fn(|_| Vec::with_capacity(64)),
            scratch: MoveList::new(),
        }
    }

    fn count(&mut self, board: &mut Board, depth: u32, ply: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let side = board.side_to_move();
        generate_legal(board, side, &mut self.plies[ply], &mut self.scratch);
        // Bulk count the last ply.
        if depth == 1 {
            return self.plies[ply].len() as u64;
        }

        let mut nodes = 0;
        for i in 0..self.plies[ply].len() {
            let mv = self.plies[ply][i];
            make_move_basic(board, mv);
            nodes += self.count(board, depth - 1, ply + 1);
            let _ = undo_move_basic(board);
        }
        nodes
    }
}

fn check_depth(depth: u32) {
    assert!(
        depth as usize <= MAX_PERFT_DEPTH,
        "perft depth {depth} exceeds {MAX_PERFT_DEPTH}"
    );
}

/// Count leaf nodes of the legal move tree to `depth`. The board is restored
/// before returning.
#[instrument(skip(board), fields(depth))]
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    check_depth(depth);
    PlyBuffers::new().count(board, depth, 0)
}

/// Perft split by root move; `on_root` sees each root move with its subtree
/// count as soon as it is known. Returns the total.
#[instrument(skip(board, on_root), fields(depth))]
pub fn perft_divide_with(board: &mut Board, depth: u32, mut on_root: impl FnMut(Move, u64)) -> u64 {
    check_depth(depth);
    assert!(depth >= 1, "perft divide needs depth 1 or more");

    let roots = board.legal_moves().to_vec();
    let verbose = depth <= LOGGED_DEPTH;
    if verbose {
        debug!(depth, moves = roots.len(), "divide: root legal moves");
    }

    let mut buffers = PlyBuffers::new();
    roots
        .into_iter()
        .map(|mv| {
            make_move_basic(board, mv);
            let nodes = buffers.count(board, depth - 1, 1);
            let _ = undo_move_basic(board);

            if verbose {
                debug!(%mv, nodes, "divide: root move");
            }
            on_root(mv, nodes);
            nodes
        })
        .sum()
}

/// Perft split by root move, collected.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    let mut split = Vec::new();
    let _ = perft_divide_with(board, depth, |mv, n| split.push((mv, n)));
    split
}
