use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 0;
        };

        legal_moves_into(pos, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter_mut() {
            let captured = pos.apply_move(mv);
            nodes += inner(pos, depth - 1, rest);
            pos.revert_move(mv, captured);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Per-root-move node counts, for comparing against another generator.
pub fn divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    moves
        .into_iter()
        .map(|mut mv| {
            let captured = pos.apply_move(&mut mv);
            let nodes = perft(pos, depth.saturating_sub(1));
            pos.revert_move(&mv, captured);
            (mv, nodes)
        })
        .collect()
}
