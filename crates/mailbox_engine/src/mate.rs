//! Forced-mate probes used ahead of, and inside, the search.
//!
//! All functions mutate the position while probing and leave it exactly as
//! they found it.

use mailbox_core::{Move, Position, legal_moves_into};
use tracing::debug;

/// Whether playing `mv` leaves the opponent checkmated.
pub fn gives_mate(pos: &mut Position, mv: &mut Move) -> bool {
    let captured = pos.apply_move(mv);
    let mated = is_mated(pos);
    pos.revert_move(mv, captured);
    mated
}

fn is_mated(pos: &mut Position) -> bool {
    if !pos.in_check(pos.side_to_move) {
        return false;
    }
    let mut replies = Vec::with_capacity(8);
    legal_moves_into(pos, &mut replies);
    replies.is_empty()
}

/// Every legal move of the side to move that mates immediately.
pub fn find_mate_in_one(pos: &mut Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    moves.retain_mut(|mv| gives_mate(pos, mv));
    moves
}

/// Short-circuiting form of [`find_mate_in_one`].
pub fn has_mate_in_one(pos: &mut Position) -> bool {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    moves.iter_mut().any(|mv| gives_mate(pos, mv))
}

/// Could the opponent mate right now if it were their turn?
///
/// A side already in check is not probed: passing would let the opponent
/// take the king, which is not a threat but an illegal position.
pub fn opponent_has_mate_in_one(pos: &mut Position) -> bool {
    if pos.in_check(pos.side_to_move) {
        return false;
    }
    let ep = pos.make_null_move();
    let threat = has_mate_in_one(pos);
    pos.unmake_null_move(ep);
    threat
}

/// First legal move after which the opponent has no mate-in-one.
///
/// `None` when there is no threat to parry or when every move still allows
/// mate.
pub fn find_mate_defense(pos: &mut Position) -> Option<Move> {
    if !opponent_has_mate_in_one(pos) {
        return None;
    }
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    for mv in moves.iter_mut() {
        let captured = pos.apply_move(mv);
        let still_mated = has_mate_in_one(pos);
        pos.revert_move(mv, captured);
        if !still_mated {
            debug!(mv = %mailbox_core::move_to_uci(*mv), "found defence against mate in one");
            return Some(*mv);
        }
    }
    debug!("no defence against mate in one");
    None
}

/// Could the opponent, moving now, force mate on their second move whatever
/// we reply?
pub fn opponent_has_mate_in_two(pos: &mut Position) -> bool {
    if pos.in_check(pos.side_to_move) {
        return false;
    }
    let ep = pos.make_null_move();

    let mut firsts = Vec::with_capacity(64);
    legal_moves_into(pos, &mut firsts);
    let mut found = false;
    let mut replies = Vec::with_capacity(64);

    for first in firsts.iter_mut() {
        let c1 = pos.apply_move(first);
        legal_moves_into(pos, &mut replies);
        let forced = !replies.is_empty()
            && replies.iter_mut().all(|reply| {
                let c2 = pos.apply_move(reply);
                let mates = has_mate_in_one(pos);
                pos.revert_move(reply, c2);
                mates
            });
        pos.revert_move(first, c1);
        if forced {
            found = true;
            break;
        }
    }

    pos.unmake_null_move(ep);
    found
}

#[cfg(test)]
#[path = "mate_tests.rs"]
mod mate_tests;
