//! Attack oracle for the 0x88 board.
//!
//! Everything here is pseudo-legal: pins are ignored and a king counts as an
//! attacker of its neighbouring cells. Offsets are 0x88 index deltas, so a step
//! leaves the board exactly when `target & 0x88 != 0`.

use crate::board::Board;
use crate::types::*;

pub const KNIGHT_OFFSETS: [i8; 8] = [-33, -31, -18, -14, 14, 18, 31, 33];
pub const KING_OFFSETS: [i8; 8] = [-17, -16, -15, -1, 1, 15, 16, 17];
pub const ROOK_DIRECTIONS: [i8; 4] = [-16, 16, -1, 1];
pub const BISHOP_DIRECTIONS: [i8; 4] = [-17, -15, 15, 17];
pub const QUEEN_DIRECTIONS: [i8; 8] = [-16, 16, -1, 1, -17, -15, 15, 17];

/// Diagonal capture deltas for a pawn of `color`.
#[inline]
pub fn pawn_capture_offsets(color: Color) -> [i8; 2] {
    let fwd = color.forward();
    [fwd - 1, fwd + 1]
}

impl Board {
    /// Does any piece of `by` attack `target`?
    pub fn attacks(&self, target: Square, by: Color) -> bool {
        // A pawn of `by` attacks `target` from one rank behind it (from by's view).
        for d in pawn_capture_offsets(by) {
            if let Some(s) = offset(target, -d)
                && self.piece_at(s) == Some(Piece::new(by, PieceKind::Pawn))
            {
                return true;
            }
        }

        for d in KNIGHT_OFFSETS {
            if let Some(s) = offset(target, d)
                && self.piece_at(s) == Some(Piece::new(by, PieceKind::Knight))
            {
                return true;
            }
        }

        for d in KING_OFFSETS {
            if let Some(s) = offset(target, d)
                && self.piece_at(s) == Some(Piece::new(by, PieceKind::King))
            {
                return true;
            }
        }

        self.slider_hits(target, by, &BISHOP_DIRECTIONS, PieceKind::Bishop)
            || self.slider_hits(target, by, &ROOK_DIRECTIONS, PieceKind::Rook)
    }

    /// Walk each ray out of `target` and report whether the first piece met is a
    /// `by` slider of `kind` or a queen.
    fn slider_hits(&self, target: Square, by: Color, dirs: &[i8], kind: PieceKind) -> bool {
        for &d in dirs {
            let mut cur = target;
            while let Some(s) = offset(cur, d) {
                if let Some(pc) = self.piece_at(s) {
                    if pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                cur = s;
            }
        }
        false
    }

    /// Can the piece standing on `from` hit `target` on the current board?
    pub fn piece_attacks_square(&self, from: Square, target: Square) -> bool {
        let Some(pc) = self.piece_at(from) else {
            return false;
        };
        match pc.kind {
            PieceKind::Pawn => pawn_capture_offsets(pc.color)
                .iter()
                .any(|&d| offset(from, d) == Some(target)),
            PieceKind::Knight => KNIGHT_OFFSETS.iter().any(|&d| offset(from, d) == Some(target)),
            PieceKind::King => KING_OFFSETS.iter().any(|&d| offset(from, d) == Some(target)),
            PieceKind::Bishop => self.ray_reaches(from, target, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.ray_reaches(from, target, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.ray_reaches(from, target, &QUEEN_DIRECTIONS),
        }
    }

    fn ray_reaches(&self, from: Square, target: Square, dirs: &[i8]) -> bool {
        for &d in dirs {
            let mut cur = from;
            while let Some(s) = offset(cur, d) {
                if s == target {
                    return true;
                }
                if self.piece_at(s).is_some() {
                    break;
                }
                cur = s;
            }
        }
        false
    }

    /// Every square holding a `by` piece that attacks `target`, in board-scan order.
    pub fn attackers(&self, target: Square, by: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces_of(by)
            .filter(move |&(from, _)| from != target && self.piece_attacks_square(from, target))
            .map(|(from, _)| from)
    }

    /// The cheapest `by` attacker of `target`; ties go to the first one scanned.
    pub fn least_valuable_attacker(&self, target: Square, by: Color) -> Option<Square> {
        let mut best: Option<(Square, i32)> = None;
        for from in self.attackers(target, by) {
            let value = self.piece_at(from).map_or(i32::MAX, Piece::value);
            if best.is_none_or(|(_, v)| value < v) {
                best = Some((from, value));
            }
        }
        best.map(|(s, _)| s)
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
