use tracing::warn;

use crate::{board::Position, error::FenResult, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promotion {
        s.push(p.to_char());
    }
    s
}

/// Long algebraic text to a move, matched against the legal moves so the
/// castle and en-passant flags come out right.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.chars().nth(4) {
        Some(ch) => Some(PieceKind::from_char(ch).filter(|k| PieceKind::PROMOTIONS.contains(k))?),
        None => None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promotion == promo)
}

/// Applies the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
///
/// Unparseable moves stop the replay at that point with a warning.
pub fn set_position_from_uci(pos: &mut Position, args: &[&str]) -> FenResult<()> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let setup = &args[..moves_at.unwrap_or(args.len())];

    *pos = match setup.split_first() {
        Some((&"fen", fields)) => Position::from_fen(&fields.join(" "))?,
        _ => Position::startpos(),
    };

    if let Some(i) = moves_at {
        for txt in &args[i + 1..] {
            match parse_uci_move(pos, txt) {
                Some(mut mv) => {
                    pos.apply_move(&mut mv);
                }
                None => {
                    warn!(mv = %txt, fen = %pos.to_fen(), "illegal move in position command");
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
