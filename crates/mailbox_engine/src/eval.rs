//! Static evaluation from White's point of view.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use mailbox_core::{Board, Color, PieceKind, Position, Square, index64, legal_moves_into};

use crate::config::EvalConfig;
use crate::mate;
use crate::see::see;

/// Score of a side that can mate (or is mated) on the spot.
pub const MATE_SCORE: i32 = 1_000_000;
/// Score of a side facing a forced mate in two.
pub const MATE_IN_TWO_SCORE: i32 = 500_000;

// Tables are laid out rank 8 first, as read from White's side of the board.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  5,  5, -10, -10,  5,  5,  0,
     0, 10, 10,   0,   0, 10, 10,  0,
     0, 10, 20,  20,  20, 20, 10,  0,
     5, 15, 15,  25,  25, 15, 15,  5,
    10, 20, 20,  30,  30, 20, 20, 10,
     5, 10, 10,  20,  20, 10, 10,  5,
     0,  0,  0,   0,   0,  0,  0,  0,
     0,  0,  0,   0,   0,  0,  0,  0,
];
#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];
#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];
#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];
#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -10,   0,   5,  5,  5,   5,   0, -10,
     -5,   0,   5,  5,  5,   5,   0,  -5,
      0,   0,   5,  5,  5,   5,   0,  -5,
    -10,   5,   5,  5,  5,   5,   0, -10,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];
#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

fn table(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King => &KING_PST,
    }
}

/// Table entry for a piece of `color` on `sq`, unsigned. White reads the
/// table mirrored so both sides see their own back rank in the last row.
pub fn pst_value(kind: PieceKind, color: Color, sq: Square) -> i32 {
    let i = index64(sq);
    let (rank, file) = (i / 8, i % 8);
    let idx = match color {
        Color::White => (7 - rank) * 8 + file,
        Color::Black => rank * 8 + file,
    };
    table(kind)[idx]
}

/// Signed material sum.
pub fn material(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, pc)| pc.color.sign() * pc.value())
        .sum()
}

/// Signed piece-square sum.
pub fn placement(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(sq, pc)| pc.color.sign() * pst_value(pc.kind, pc.color, sq))
        .sum()
}

/// A piece counts as undefended when the opponent's cheapest attacker wins
/// material by starting an exchange on it. Its owner loses half that gain.
pub fn safety(board: &Board) -> i32 {
    let mut score = 0;
    for (sq, pc) in board.pieces() {
        if pc.kind == PieceKind::King {
            continue;
        }
        let Some(attacker) = board.least_valuable_attacker(sq, pc.color.other()) else {
            continue;
        };
        let gain = see(board, sq, attacker);
        if gain > 0 {
            score -= pc.color.sign() * gain / 2;
        }
    }
    score
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvalBreakdown {
    pub material: i32,
    pub position: i32,
    pub safety: i32,
    pub mate: i32,
    pub total: i32,
}

impl fmt::Display for EvalBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Material: {:>8}", self.material)?;
        writeln!(f, "Position: {:>8}", self.position)?;
        writeln!(f, "Safety:   {:>8}", self.safety)?;
        writeln!(f, "Mate:     {:>8}", self.mate)?;
        write!(f, "Total:    {:>8}", self.total)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Score in centipawns, positive when White is better.
    /// `verbose` logs the breakdown at debug level.
    pub fn evaluate(&self, pos: &mut Position, verbose: bool) -> i32 {
        let b = self.breakdown(pos);
        if verbose {
            debug!(
                material = b.material,
                position = b.position,
                safety = b.safety,
                mate = b.mate,
                total = b.total,
                "evaluation"
            );
        }
        b.total
    }

    /// Each term of the evaluation. Finished games and forced mates short
    /// circuit: the other terms are left at zero.
    pub fn breakdown(&self, pos: &mut Position) -> EvalBreakdown {
        let us = pos.side_to_move;

        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            let mate = if pos.in_check(us) {
                -us.sign() * MATE_SCORE
            } else {
                0
            };
            return EvalBreakdown {
                mate,
                total: mate,
                ..Default::default()
            };
        }

        if self.config.mate_threats {
            let mate = if moves.iter_mut().any(|mv| mate::gives_mate(pos, mv)) {
                us.sign() * MATE_SCORE
            } else if mate::opponent_has_mate_in_one(pos) {
                -us.sign() * MATE_SCORE
            } else if self.config.mate_in_two && mate::opponent_has_mate_in_two(pos) {
                -us.sign() * MATE_IN_TWO_SCORE
            } else {
                0
            };
            if mate != 0 {
                return EvalBreakdown {
                    mate,
                    total: mate,
                    ..Default::default()
                };
            }
        }

        let material = material(&pos.board);
        let position = placement(&pos.board);
        let safety = safety(&pos.board);
        EvalBreakdown {
            material,
            position,
            safety,
            mate: 0,
            total: material + position + safety,
        }
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
