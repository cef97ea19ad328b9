use crate::attacks::*;
use crate::board::{Position, castle_squares};
use crate::types::*;

/// What the pseudo-legal generator is asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenMode {
    /// Ordinary moves, castling included.
    Moves,
    /// Only the cells each piece hits: pawns emit their diagonals whether or
    /// not something stands there, pushes and castling are left out.
    Attacks,
}

/// Generate all legal moves for the side to move, returning a fresh vector.
/// Clones the position once and filters on the copy.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    let side = pos.side_to_move;
    pseudo_moves_into(pos, side, GenMode::Moves, out);
    retain_legal(pos, side, out);
}

/// Legal moves for `side`, which need not be the side to move.
pub fn generate_legal(pos: &mut Position, side: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_moves_into(pos, side, GenMode::Moves, &mut out);
    retain_legal(pos, side, &mut out);
    out
}

/// Legal captures (en passant included) for the side to move.
pub fn legal_captures_into(pos: &mut Position, out: &mut Vec<Move>) {
    legal_moves_into(pos, out);
    out.retain(|mv| pos.is_capture(mv));
}

// Drop every move that leaves the mover's own king attacked.
fn retain_legal(pos: &mut Position, side: Color, out: &mut Vec<Move>) {
    out.retain_mut(|mv| {
        let captured = pos.apply_move(mv);
        let illegal = pos.in_check(side);
        pos.revert_move(mv, captured);
        !illegal
    });
}

pub fn generate_pseudo_legal(pos: &Position, side: Color, mode: GenMode) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_moves_into(pos, side, mode, &mut out);
    out
}

pub fn pseudo_moves_into(pos: &Position, side: Color, mode: GenMode, out: &mut Vec<Move>) {
    for (from, pc) in pos.board.pieces_of(side) {
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, side, mode, out),
            PieceKind::Knight => gen_steps(pos, from, side, &KNIGHT_OFFSETS, out),
            PieceKind::Bishop => gen_slider(pos, from, side, &BISHOP_DIRECTIONS, out),
            PieceKind::Rook => gen_slider(pos, from, side, &ROOK_DIRECTIONS, out),
            PieceKind::Queen => gen_slider(pos, from, side, &QUEEN_DIRECTIONS, out),
            PieceKind::King => {
                gen_steps(pos, from, side, &KING_OFFSETS, out);
                if mode == GenMode::Moves {
                    gen_castle(pos, from, side, out);
                }
            }
        }
    }
}

/// Cells `side` attacks, indexed by 0x88 square. Built from the
/// `GenMode::Attacks` generator, so friendly-occupied cells are not marked.
pub fn attack_coverage(pos: &Position, side: Color) -> [bool; 128] {
    let mut map = [false; 128];
    for mv in generate_pseudo_legal(pos, side, GenMode::Attacks) {
        map[mv.to as usize] = true;
    }
    map
}

fn push_pawn_move(from: Square, to: Square, c: Color, out: &mut Vec<Move>) {
    let promo_rank = match c {
        Color::White => 7,
        Color::Black => 0,
    };
    if rank_of(to) == promo_rank {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::with_promotion(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, mode: GenMode, out: &mut Vec<Move>) {
    if mode == GenMode::Attacks {
        for d in pawn_capture_offsets(c) {
            if let Some(to) = offset(from, d)
                && pos.piece_at(to).is_none_or(|pc| pc.color != c)
            {
                out.push(Move::new(from, to));
            }
        }
        return;
    }

    let dir = c.forward();
    let (start_rank, ep_rank) = match c {
        Color::White => (1, 4),
        Color::Black => (6, 3),
    };

    // forward 1, then 2 from the start rank when both cells are empty
    if let Some(to) = offset(from, dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, c, out);
        if rank_of(from) == start_rank
            && let Some(to2) = offset(to, dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    for d in pawn_capture_offsets(c) {
        if let Some(to) = offset(from, d)
            && let Some(target) = pos.piece_at(to)
            && target.color != c
        {
            push_pawn_move(from, to, c, out);
        }
    }

    // En passant: an enemy pawn beside us and the cell behind it is the target.
    if rank_of(from) == ep_rank
        && let Some(ep) = pos.en_passant
    {
        for side in [-1i8, 1] {
            if let Some(beside) = offset(from, side)
                && pos.piece_at(beside) == Some(Piece::new(c.other(), PieceKind::Pawn))
                && offset(from, dir + side) == Some(ep)
            {
                out.push(Move::en_passant(from, ep));
            }
        }
    }
}

fn gen_steps(pos: &Position, from: Square, c: Color, deltas: &[i8], out: &mut Vec<Move>) {
    for &d in deltas {
        if let Some(to) = offset(from, d) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, dirs: &[i8], out: &mut Vec<Move>) {
    for &d in dirs {
        let mut cur = from;
        while let Some(to) = offset(cur, d) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let home = castle_squares(c);
    if from != home.king {
        return;
    }
    let rights = pos.castling.side(c);
    if rights.king_moved {
        return;
    }
    // Can't castle out of check.
    if pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let rook = Some(Piece::new(c, PieceKind::Rook));
    let empty = |cells: &[Square]| cells.iter().all(|&s| pos.piece_at(s).is_none());
    let safe = |cells: &[Square]| cells.iter().all(|&s| !pos.attacks(s, enemy));

    // King side: f and g empty, e f g unattacked.
    let (f, g) = (home.king + 1, home.king + 2);
    if rights.can_castle_kingside()
        && pos.piece_at(home.kingside_rook) == rook
        && empty(&[f, g])
        && safe(&[home.king, f, g])
    {
        out.push(Move::castle(home.king, g, true));
    }

    // Queen side: b c d empty, e d c unattacked.
    let (d, cc, b) = (home.king - 1, home.king - 2, home.king - 3);
    if rights.can_castle_queenside()
        && pos.piece_at(home.queenside_rook) == rook
        && empty(&[d, cc, b])
        && safe(&[home.king, d, cc])
    {
        out.push(Move::castle(home.king, cc, false));
    }
}

/// Side to move has no legal moves and is in check.
pub fn is_checkmate(pos: &Position) -> bool {
    pos.in_check(pos.side_to_move) && legal_moves(pos).is_empty()
}

/// Side to move has no legal moves and is not in check.
pub fn is_stalemate(pos: &Position) -> bool {
    !pos.in_check(pos.side_to_move) && legal_moves(pos).is_empty()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The contained color delivered mate.
    Checkmate(Color),
    Stalemate,
}

pub fn game_status(pos: &Position) -> GameStatus {
    if !legal_moves(pos).is_empty() {
        return GameStatus::Ongoing;
    }
    if pos.in_check(pos.side_to_move) {
        GameStatus::Checkmate(pos.side_to_move.other())
    } else {
        GameStatus::Stalemate
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
