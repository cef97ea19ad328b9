use std::hash::{Hash, Hasher};

/// Index into the 128-cell 0x88 board: `rank * 16 + file`.
pub type Square = u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    /// +1 for White, -1 for Black. Scores are kept from White's point of view.
    pub fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
    /// Direction a pawn of this color advances in 0x88 index space.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 16,
            Color::Black => -16,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices in the order they are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Material value in centipawns.
    #[inline]
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20_000,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Signed piece code: magnitude 1..=6 from pawn to king, positive for White.
    pub fn code(self) -> i8 {
        let magnitude = self.kind as i8 + 1;
        match self.color {
            Color::White => magnitude,
            Color::Black => -magnitude,
        }
    }

    pub fn from_code(code: i8) -> Option<Piece> {
        let color = if code > 0 { Color::White } else { Color::Black };
        let kind = *PieceKind::ALL.get((code.unsigned_abs() as usize).checked_sub(1)?)?;
        Some(Piece { color, kind })
    }

    /// FEN letter: uppercase for White.
    pub fn to_char(self) -> char {
        let ch = self.kind.to_char();
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        let kind = PieceKind::from_char(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }

    #[inline]
    pub fn value(self) -> i32 {
        self.kind.value()
    }
}

/// Castling bookkeeping for one side, tracked as "has moved" flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SideCastling {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}

impl SideCastling {
    pub fn can_castle_kingside(&self) -> bool {
        !self.king_moved && !self.kingside_rook_moved
    }
    pub fn can_castle_queenside(&self) -> bool {
        !self.king_moved && !self.queenside_rook_moved
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white: SideCastling,
    pub black: SideCastling,
}

impl CastlingRights {
    pub fn side(&self, c: Color) -> &SideCastling {
        match c {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
    pub fn side_mut(&mut self, c: Color) -> &mut SideCastling {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// State that a move overwrites and must put back on revert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
}

#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub en_passant: bool,
    pub castle_kingside: bool,
    pub castle_queenside: bool,
    pub promotion: Option<PieceKind>,
    /// Filled by `Position::apply_move`, read by `Position::revert_move`.
    pub undo: Snapshot,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            en_passant: false,
            castle_kingside: false,
            castle_queenside: false,
            promotion: None,
            undo: Snapshot::default(),
        }
    }

    pub fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..Self::new(from, to)
        }
    }

    pub fn en_passant(from: Square, to: Square) -> Self {
        Self {
            en_passant: true,
            ..Self::new(from, to)
        }
    }

    pub fn castle(from: Square, to: Square, kingside: bool) -> Self {
        Self {
            castle_kingside: kingside,
            castle_queenside: !kingside,
            ..Self::new(from, to)
        }
    }

    pub fn is_castle(&self) -> bool {
        self.castle_kingside || self.castle_queenside
    }
}

// The snapshot is scratch space for apply/revert and never part of identity.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.en_passant == other.en_passant
            && self.castle_kingside == other.castle_kingside
            && self.castle_queenside == other.castle_queenside
            && self.promotion == other.promotion
    }
}
impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.en_passant.hash(state);
        self.castle_kingside.hash(state);
        self.castle_queenside.hash(state);
        self.promotion.hash(state);
    }
}

// Helpers
#[inline]
pub fn is_on_board(sq: i16) -> bool {
    (0..128).contains(&sq) && sq & 0x88 == 0
}
#[inline]
pub fn file_of(sq: Square) -> i8 {
    (sq & 7) as i8
}
#[inline]
pub fn rank_of(sq: Square) -> i8 {
    (sq >> 4) as i8
}
pub fn sq(file: i8, rank: i8) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank as u8) * 16 + (file as u8))
    } else {
        None
    }
}
/// Step from `from` by a 0x88 delta; `None` when the target leaves the board.
#[inline]
pub fn offset(from: Square, delta: i8) -> Option<Square> {
    let to = from as i16 + delta as i16;
    if is_on_board(to) { Some(to as Square) } else { None }
}
/// Dense 0..64 index (a1 = 0, h8 = 63) for per-square tables.
#[inline]
pub fn index64(sq: Square) -> usize {
    (rank_of(sq) as usize) * 8 + file_of(sq) as usize
}

pub fn sq_to_coord(sq: Square) -> String {
    let f = (b'a' + (sq & 7)) as char;
    let r = (b'1' + (sq >> 4)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<Square> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    sq((f - b'a') as i8, (r - b'1') as i8)
}
