use std::fmt;

use crate::types::*;

/// 128-cell padded mailbox. Only cells with `sq & 0x88 == 0` are real squares;
/// the other half exists so that off-board steps can be rejected with one mask.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 128],
}

impl Board {
    pub fn empty() -> Self {
        Self { cells: [None; 128] }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if sq & 0x88 != 0 {
            return None;
        }
        self.cells[sq as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        debug_assert!(sq & 0x88 == 0, "set_piece on padding cell {sq:#x}");
        self.cells[sq as usize] = pc;
    }

    /// Remove and return the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        let pc = self.piece_at(sq);
        self.set_piece(sq, None);
        pc
    }

    /// The 64 real squares in index order (a1, b1, .., h8).
    pub fn squares() -> impl Iterator<Item = Square> {
        (0..128u8).filter(|s| s & 0x88 == 0)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Self::squares().filter_map(|s| self.cells[s as usize].map(|pc| (s, pc)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, pc)| pc == Piece::new(color, PieceKind::King))
            .map(|(s, _)| s)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let ch = sq(file, rank)
                    .and_then(|s| self.piece_at(s))
                    .map_or('.', Piece::to_char);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// Home squares for the castling pieces of one side.
pub(crate) struct CastleSquares {
    pub king: Square,
    pub kingside_rook: Square,
    pub queenside_rook: Square,
}

pub(crate) fn castle_squares(c: Color) -> CastleSquares {
    let base: Square = match c {
        Color::White => 0x00,
        Color::Black => 0x70,
    };
    CastleSquares {
        king: base + 4,
        kingside_rook: base + 7,
        queenside_rook: base,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub castling: CastlingRights,
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            side_to_move: Color::White,
            en_passant: None,
            castling: CastlingRights::default(),
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as u8;
            p.board.set_piece(f, Some(Piece::new(Color::White, kind)));
            p.board.set_piece(0x10 + f, Some(Piece::new(Color::White, PieceKind::Pawn)));
            p.board.set_piece(0x60 + f, Some(Piece::new(Color::Black, PieceKind::Pawn)));
            p.board.set_piece(0x70 + f, Some(Piece::new(Color::Black, kind)));
        }
        p
    }

    /// Back to the initial array.
    pub fn reset(&mut self) {
        *self = Position::startpos();
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.board.king_square(c)
    }

    pub fn attacks(&self, target: Square, by: Color) -> bool {
        self.board.attacks(target, by)
    }

    /// A side without a king is treated as checked so searches never score it.
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(k) => self.board.attacks(k, c.other()),
            None => true,
        }
    }

    /// Whether `mv` removes an enemy piece (en passant included).
    pub fn is_capture(&self, mv: &Move) -> bool {
        mv.en_passant || self.piece_at(mv.to).is_some()
    }

    /// Piece removed by `mv` if it were played now.
    pub fn captured_by(&self, mv: &Move) -> Option<Piece> {
        if mv.en_passant {
            let victim = self.piece_at(mv.from)?.color.other();
            Some(Piece::new(victim, PieceKind::Pawn))
        } else {
            self.piece_at(mv.to)
        }
    }

    /// Plays `mv`, storing the overwritten flags in `mv.undo`.
    /// Returns the captured piece, which `revert_move` needs back.
    pub fn apply_move(&mut self, mv: &mut Move) -> Option<Piece> {
        mv.undo = Snapshot {
            castling: self.castling,
            en_passant: self.en_passant,
        };

        let moving = self
            .board
            .take(mv.from)
            .expect("apply_move: origin square is empty");
        let us = moving.color;

        let captured = if mv.en_passant {
            self.board.take(ep_victim_square(mv.to, us))
        } else {
            self.piece_at(mv.to)
        };

        let placed = match mv.promotion {
            Some(kind) => Piece::new(us, kind),
            None => moving,
        };
        self.board.set_piece(mv.to, Some(placed));

        let home = castle_squares(us);
        if mv.castle_kingside {
            let rook = self.board.take(home.kingside_rook);
            self.board.set_piece(home.king + 1, rook);
        } else if mv.castle_queenside {
            let rook = self.board.take(home.queenside_rook);
            self.board.set_piece(home.king - 1, rook);
        }

        self.en_passant = None;
        if moving.kind == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 32 {
            self.en_passant = Some((mv.from + mv.to) / 2);
        }

        match moving.kind {
            PieceKind::King => self.castling.side_mut(us).king_moved = true,
            PieceKind::Rook if mv.from == home.kingside_rook => {
                self.castling.side_mut(us).kingside_rook_moved = true
            }
            PieceKind::Rook if mv.from == home.queenside_rook => {
                self.castling.side_mut(us).queenside_rook_moved = true
            }
            _ => {}
        }
        // A rook taken on its corner can no longer castle either.
        if let Some(cp) = captured
            && cp.kind == PieceKind::Rook
        {
            let theirs = castle_squares(cp.color);
            if mv.to == theirs.kingside_rook {
                self.castling.side_mut(cp.color).kingside_rook_moved = true;
            } else if mv.to == theirs.queenside_rook {
                self.castling.side_mut(cp.color).queenside_rook_moved = true;
            }
        }

        self.side_to_move = us.other();
        captured
    }

    /// Exact inverse of `apply_move` for the same `mv` and captured piece.
    pub fn revert_move(&mut self, mv: &Move, captured: Option<Piece>) {
        self.side_to_move = self.side_to_move.other();
        let us = self.side_to_move;
        self.castling = mv.undo.castling;
        self.en_passant = mv.undo.en_passant;

        let home = castle_squares(us);
        if mv.castle_kingside {
            let rook = self.board.take(home.king + 1);
            self.board.set_piece(home.kingside_rook, rook);
        } else if mv.castle_queenside {
            let rook = self.board.take(home.king - 1);
            self.board.set_piece(home.queenside_rook, rook);
        }

        let placed = self.board.take(mv.to);
        let original = match mv.promotion {
            Some(_) => Some(Piece::new(us, PieceKind::Pawn)),
            None => placed,
        };
        self.board.set_piece(mv.from, original);

        if mv.en_passant {
            self.board.set_piece(ep_victim_square(mv.to, us), captured);
        } else {
            self.board.set_piece(mv.to, captured);
        }
    }

    /// Hands the move to the other side without moving a piece.
    /// Returns the en-passant target to pass back to `unmake_null_move`.
    pub fn make_null_move(&mut self) -> Option<Square> {
        let ep = self.en_passant.take();
        self.side_to_move = self.side_to_move.other();
        ep
    }

    pub fn unmake_null_move(&mut self, en_passant: Option<Square>) {
        self.side_to_move = self.side_to_move.other();
        self.en_passant = en_passant;
    }
}

/// The pawn removed by an en-passant capture landing on `to` sits one rank
/// behind it from the mover's point of view.
#[inline]
fn ep_victim_square(to: Square, mover: Color) -> Square {
    (to as i16 - mover.forward() as i16) as Square
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "Fen: {}", self.to_fen())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
