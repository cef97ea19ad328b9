//! Which of our pieces are hanging, and whether a move parks a piece on a
//! covered square.

use mailbox_core::{Color, Move, PieceKind, Position, Square, attack_coverage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threat {
    pub square: Square,
    pub value: i32,
}

/// Non-king pieces of `side` standing on a cell the opponent covers,
/// most valuable first.
pub fn threatened_pieces(pos: &Position, side: Color) -> Vec<Threat> {
    let cover = attack_coverage(pos, side.other());
    let mut out: Vec<Threat> = pos
        .board
        .pieces_of(side)
        .filter(|(sq, pc)| pc.kind != PieceKind::King && cover[*sq as usize])
        .map(|(square, pc)| Threat {
            square,
            value: pc.value(),
        })
        .collect();
    out.sort_by(|a, b| b.value.cmp(&a.value));
    out
}

/// After playing `mv`, can the opponent hit the destination square?
pub fn destination_attacked_after(pos: &mut Position, mv: &mut Move) -> bool {
    let mover = pos.side_to_move;
    let captured = pos.apply_move(mv);
    let attacked = pos.attacks(mv.to, mover.other());
    pos.revert_move(mv, captured);
    attacked
}
