//! Static exchange evaluation.

use mailbox_core::{Board, Move, Position, Square};

/// Net material for the side that opens with the piece on `first_attacker`
/// when both sides keep recapturing on `square` with their cheapest piece,
/// each free to stop once continuing would lose material.
///
/// Runs on a scratch copy; x-ray attackers appear once the piece in front
/// of them has been used up.
pub fn see(board: &Board, square: Square, first_attacker: Square) -> i32 {
    let (Some(victim), Some(attacker)) = (board.piece_at(square), board.piece_at(first_attacker))
    else {
        return 0;
    };

    let mut scratch = board.clone();
    let mut gains: Vec<i32> = Vec::with_capacity(32);
    gains.push(victim.value());

    scratch.set_piece(square, Some(attacker));
    scratch.set_piece(first_attacker, None);
    let mut to_move = attacker.color.other();

    while let Some(next) = scratch.least_valuable_attacker(square, to_move) {
        let Some(on_square) = scratch.piece_at(square) else {
            break;
        };
        let prev = gains[gains.len() - 1];
        gains.push(on_square.value() - prev);

        let mover = scratch.take(next);
        scratch.set_piece(square, mover);
        to_move = to_move.other();
    }

    // Fold back: each side either stops or continues, whichever is better.
    for d in (1..gains.len()).rev() {
        gains[d - 1] = -i32::max(-gains[d - 1], gains[d]);
    }
    gains[0]
}

/// SEE of a capture move in the current position; 0 for quiet moves.
/// En passant gains a pawn with no exchange to follow on an empty target.
pub fn see_move(pos: &Position, mv: &Move) -> i32 {
    if mv.en_passant {
        return mailbox_core::PieceKind::Pawn.value();
    }
    if pos.piece_at(mv.to).is_none() {
        return 0;
    }
    see(&pos.board, mv.to, mv.from)
}

#[cfg(test)]
#[path = "see_tests.rs"]
mod see_tests;
