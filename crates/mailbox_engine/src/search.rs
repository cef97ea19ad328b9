//! Iterative deepening minimax with alpha-beta pruning, a capture-only
//! quiescence tail and a wall-clock deadline.
//!
//! Scores are from White's point of view throughout: White maximizes,
//! Black minimizes. One position is mutated in place and every applied move
//! is reverted before control leaves the frame, also when the clock runs out.

use std::cmp::Reverse;

use tracing::{debug, info, trace};

use mailbox_core::{
    Color, Move, Position, TimeControl, legal_captures_into, legal_moves_into, move_to_uci,
};

use crate::eval::{Evaluator, MATE_SCORE};
use crate::mate;
use crate::see::see_move;
use crate::threats::{Threat, destination_attacked_after, threatened_pieces};

/// Window bound, far outside any reachable score.
pub const INFINITY: i32 = 10_000_000;
/// Added at the root to a move that mates on the spot.
pub const ROOT_MATE_BONUS: i32 = 100_000;
/// Any capture sorts ahead of any quiet move.
const CAPTURE_BASE: i32 = 1_000;

/// Ordering key: captures rank by victim minus attacker on top of a fixed
/// base, quiet moves score zero.
pub fn move_score(pos: &Position, mv: &Move) -> i32 {
    match (pos.captured_by(mv), pos.piece_at(mv.from)) {
        (Some(victim), Some(attacker)) => CAPTURE_BASE + victim.value() - attacker.value(),
        _ => 0,
    }
}

/// Stable sort by `move_score`, best first.
pub fn order_moves(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_cached_key(|mv| Reverse(move_score(pos, mv)));
}

/// Result of a root search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best move and its adjusted root score (None if no legal moves)
    pub best_move: Option<(Move, i32)>,
    /// Deepest completed iteration; 0 when a mate shortcut decided
    pub depth: u8,
    /// True if the deadline cut an iteration short
    pub stopped: bool,
}

impl SearchOutcome {
    fn none() -> Self {
        Self {
            best_move: None,
            depth: 0,
            stopped: false,
        }
    }
}

pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
    tc: &'a TimeControl,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a Evaluator, tc: &'a TimeControl) -> Self {
        Self {
            evaluator,
            tc,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    // Counts the node and reads the clock every `check_interval` nodes.
    fn tick(&mut self) -> bool {
        self.nodes += 1;
        self.tc.is_stopped() || (self.tc.should_check_time(self.nodes) && self.tc.check_time())
    }

    /// Picks a move for the side to move, searching at most `max_depth`
    /// plies. Mate-in-one and parrying a mate-in-one threat skip the search.
    pub fn find_best_move(&mut self, pos: &mut Position, max_depth: u8) -> SearchOutcome {
        let us = pos.side_to_move;
        let maximizing = us == Color::White;

        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            return SearchOutcome::none();
        }

        if let Some(i) = (0..moves.len()).find(|&i| mate::gives_mate(pos, &mut moves[i])) {
            info!(mv = %move_to_uci(moves[i]), "playing mate in one");
            return SearchOutcome {
                best_move: Some((moves[i], us.sign() * MATE_SCORE)),
                depth: 0,
                stopped: false,
            };
        }

        if let Some(defence) = mate::find_mate_defense(pos) {
            info!(mv = %move_to_uci(defence), "parrying mate in one");
            let score = self.evaluator.evaluate(pos, false);
            return SearchOutcome {
                best_move: Some((defence, score)),
                depth: 0,
                stopped: false,
            };
        }

        order_moves(pos, &mut moves);
        let threatened = threatened_pieces(pos, us);
        let mut root: Vec<(Move, i32)> = moves
            .into_iter()
            .map(|mut mv| {
                let bonus = self.root_bonus(pos, &mut mv, &threatened);
                (mv, bonus)
            })
            .collect();

        let mut completed: Option<(Move, i32)> = None;
        let mut completed_depth = 0;
        let mut stopped = false;

        for depth in 1..=max_depth.max(1) {
            if depth > 1 && self.tc.check_time() {
                stopped = true;
                break;
            }

            let mut best: Option<(Move, i32)> = None;
            let mut interrupted = false;

            for (mv, bonus) in root.iter_mut() {
                if self.tc.check_time() {
                    interrupted = true;
                    break;
                }

                let captured = pos.apply_move(mv);
                let (score, was_stopped) =
                    self.alpha_beta(pos, depth - 1, -INFINITY, INFINITY, !maximizing);
                pos.revert_move(mv, captured);

                if was_stopped {
                    interrupted = true;
                    break;
                }

                let adjusted = score + us.sign() * *bonus;
                trace!(depth, mv = %move_to_uci(*mv), score, adjusted, "root move");
                let better = match best {
                    None => true,
                    Some((_, b)) if maximizing => adjusted > b,
                    Some((_, b)) => adjusted < b,
                };
                if better {
                    best = Some((*mv, adjusted));
                }
            }

            if interrupted {
                stopped = true;
                // Only the very first iteration may hand back a partial answer.
                if completed.is_none() {
                    completed = best.or_else(|| root.first().map(|&(mv, _)| (mv, 0)));
                }
                break;
            }

            if let Some((mv, score)) = best {
                debug!(depth, mv = %move_to_uci(mv), score, nodes = self.nodes, "depth complete");
                if let Some(i) = root.iter().position(|(m, _)| *m == mv) {
                    let entry = root.remove(i);
                    root.insert(0, entry);
                }
            }
            completed = best;
            completed_depth = depth;
        }

        SearchOutcome {
            best_move: completed,
            depth: completed_depth,
            stopped,
        }
    }

    fn root_bonus(&self, pos: &mut Position, mv: &mut Move, threatened: &[Threat]) -> i32 {
        let mut bonus = 0;
        if let Some(t) = threatened.iter().find(|t| t.square == mv.from)
            && !destination_attacked_after(pos, mv)
        {
            bonus += t.value * 3 / 2;
        }
        if pos.is_capture(mv) {
            bonus += see_move(pos, mv);
        }
        if mate::gives_mate(pos, mv) {
            bonus += ROOT_MATE_BONUS;
        }
        bonus
    }

    /// Fixed-depth minimax with alpha-beta pruning.
    ///
    /// Returns (score, stopped); when stopped is true the score is
    /// meaningless and the caller must discard it.
    pub fn alpha_beta(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, bool) {
        if self.tick() {
            return (0, true);
        }
        if depth == 0 {
            return self.quiescence(pos, alpha, beta, maximizing);
        }

        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            let stm = pos.side_to_move;
            // Nearer mates keep more depth and so score further from zero.
            let score = if pos.in_check(stm) {
                -stm.sign() * (MATE_SCORE + depth as i32)
            } else {
                0
            };
            return (score, false);
        }
        order_moves(pos, &mut moves);

        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in moves.iter_mut() {
            let captured = pos.apply_move(mv);
            let (score, stopped) = self.alpha_beta(pos, depth - 1, alpha, beta, !maximizing);
            pos.revert_move(mv, captured);

            if stopped {
                return (best, true);
            }

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        (best, false)
    }

    /// Captures-only extension with a fail-hard stand pat.
    pub fn quiescence(
        &mut self,
        pos: &mut Position,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, bool) {
        if self.tick() {
            return (0, true);
        }

        let stand_pat = self.evaluator.evaluate(pos, false);
        if maximizing {
            if stand_pat >= beta {
                return (beta, false);
            }
            alpha = alpha.max(stand_pat);
        } else {
            if stand_pat <= alpha {
                return (alpha, false);
            }
            beta = beta.min(stand_pat);
        }

        let mut captures = Vec::with_capacity(16);
        legal_captures_into(pos, &mut captures);
        order_moves(pos, &mut captures);

        for mv in captures.iter_mut() {
            let captured = pos.apply_move(mv);
            let (score, stopped) = self.quiescence(pos, alpha, beta, !maximizing);
            pos.revert_move(mv, captured);

            if stopped {
                return (0, true);
            }

            if maximizing {
                alpha = alpha.max(score);
                if alpha >= beta {
                    break;
                }
            } else {
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
        }

        (if maximizing { alpha } else { beta }, false)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
