//! Forsyth-Edwards Notation in and out of a [`Position`].

use std::str::FromStr;

use tracing::warn;

use crate::board::Position;
use crate::error::{FenError, FenResult};
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parses placement, side to move, castling and en passant. Move clocks,
    /// when present, are accepted and ignored.
    ///
    /// An unknown piece letter leaves its cell empty and is logged; anything
    /// that breaks the board shape is an error.
    pub fn from_fen(fen: &str) -> FenResult<Position> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(FenError::MissingField("placement"))?;
        let stm = parts.next().ok_or(FenError::MissingField("side to move"))?;
        let castle = parts.next().unwrap_or("-");
        let ep = parts.next().unwrap_or("-");

        let mut pos = Position::empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: u32 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d;
                    continue;
                }
                if file >= 8 {
                    file += 1;
                    break;
                }
                match Piece::from_char(ch) {
                    Some(pc) => {
                        if let Some(s) = sq(file as i8, rank) {
                            pos.board.set_piece(s, Some(pc));
                        }
                    }
                    None => warn!(%ch, rank = rank + 1, "unknown piece letter in FEN, leaving square empty"),
                }
                file += 1;
            }
            if file != 8 {
                return Err(FenError::RankWidth {
                    rank: (rank + 1) as u8,
                    files: file,
                });
            }
        }

        pos.side_to_move = match stm {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::SideToMove(stm.to_string())),
        };

        if castle != "-" && !castle.chars().all(|c| "KQkq".contains(c)) {
            return Err(FenError::Castling(castle.to_string()));
        }
        for (color, k, q) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
            let side = pos.castling.side_mut(color);
            side.kingside_rook_moved = !castle.contains(k);
            side.queenside_rook_moved = !castle.contains(q);
            side.king_moved = side.kingside_rook_moved && side.queenside_rook_moved;
        }

        pos.en_passant = match ep {
            "-" => None,
            coord => Some(coord_to_sq(coord).ok_or_else(|| FenError::EnPassant(coord.to_string()))?),
        };

        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match sq(file, rank).and_then(|s| self.piece_at(s)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        for (color, k, q) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
            let side = self.castling.side(color);
            if side.can_castle_kingside() {
                out.push(k);
            }
            if side.can_castle_queenside() {
                out.push(q);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(s) => out.push_str(&sq_to_coord(s)),
            None => out.push('-'),
        }
        out.push_str(" 0 1");
        out
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
