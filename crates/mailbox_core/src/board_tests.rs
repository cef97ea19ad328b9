use super::*;
use crate::movegen::legal_moves;
use crate::uci::parse_uci_move;

fn s(coord: &str) -> Square {
    coord_to_sq(coord).unwrap()
}

fn play(pos: &mut Position, txt: &str) -> (Move, Option<Piece>) {
    let mut mv = parse_uci_move(pos, txt).unwrap_or_else(|| panic!("{txt} not legal"));
    let captured = pos.apply_move(&mut mv);
    (mv, captured)
}

#[test]
fn test_startpos_layout() {
    let pos = Position::startpos();
    assert_eq!(pos.piece_at(s("e1")), Some(Piece::new(Color::White, PieceKind::King)));
    assert_eq!(pos.piece_at(s("d8")), Some(Piece::new(Color::Black, PieceKind::Queen)));
    assert_eq!(pos.board.pieces().count(), 32);
    assert_eq!(pos.side_to_move, Color::White);
    assert!(pos.castling.white.can_castle_kingside());
    assert!(pos.castling.black.can_castle_queenside());
}

#[test]
fn test_padding_cells_read_as_empty() {
    let pos = Position::startpos();
    assert_eq!(pos.piece_at(0x08), None);
    assert_eq!(pos.piece_at(0x7f), None);
    assert_eq!(Board::squares().count(), 64);
}

#[test]
fn test_piece_codes() {
    assert_eq!(Piece::new(Color::White, PieceKind::Pawn).code(), 1);
    assert_eq!(Piece::new(Color::Black, PieceKind::King).code(), -6);
    assert_eq!(Piece::from_code(-4), Some(Piece::new(Color::Black, PieceKind::Rook)));
    assert_eq!(Piece::from_code(0), None);
    assert_eq!(Piece::from_code(7), None);
}

#[test]
fn test_missing_king_counts_as_check() {
    let pos = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(!pos.in_check(Color::White));
    assert!(pos.in_check(Color::Black));
}

#[test]
fn test_double_push_sets_en_passant_only() {
    let mut pos = Position::startpos();
    play(&mut pos, "e2e4");
    assert_eq!(pos.en_passant, Some(s("e3")));
    play(&mut pos, "g8f6");
    assert_eq!(pos.en_passant, None);
    play(&mut pos, "d2d3");
    assert_eq!(pos.en_passant, None);

    // The pawn beside the double-pushed one gets exactly one en-passant capture.
    let mut pos = Position::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
    play(&mut pos, "e2e4");
    assert_eq!(pos.en_passant, Some(s("e3")));
    let ep: Vec<Move> = legal_moves(&pos).into_iter().filter(|m| m.en_passant).collect();
    assert_eq!(ep.len(), 1);
    assert_eq!((ep[0].from, ep[0].to), (s("d4"), s("e3")));
}

#[test]
fn test_en_passant_capture_and_revert() {
    let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let before = pos.clone();
    let (mv, captured) = play(&mut pos, "e5d6");
    assert!(mv.en_passant);
    assert_eq!(captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
    assert_eq!(pos.piece_at(s("d5")), None);
    assert_eq!(pos.piece_at(s("d6")), Some(Piece::new(Color::White, PieceKind::Pawn)));

    pos.revert_move(&mv, captured);
    assert_eq!(pos, before);
}

#[test]
fn test_castling_moves_rook_and_revert_restores_flags() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let before = pos.clone();

    let (mv, captured) = play(&mut pos, "e1g1");
    assert!(mv.castle_kingside);
    assert_eq!(pos.piece_at(s("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(pos.piece_at(s("h1")), None);
    assert!(pos.castling.white.king_moved);
    pos.revert_move(&mv, captured);
    assert_eq!(pos, before);

    pos.side_to_move = Color::Black;
    let before = pos.clone();
    let (mv, captured) = play(&mut pos, "e8c8");
    assert!(mv.castle_queenside);
    assert_eq!(pos.piece_at(s("d8")), Some(Piece::new(Color::Black, PieceKind::Rook)));
    assert_eq!(pos.piece_at(s("a8")), None);
    pos.revert_move(&mv, captured);
    assert_eq!(pos, before);
}

#[test]
fn test_rook_moves_and_captures_clear_castling() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut pos, "h1h8");
    assert!(pos.castling.white.kingside_rook_moved);
    assert!(pos.castling.black.kingside_rook_moved);
    assert!(!pos.castling.black.queenside_rook_moved);
    assert!(!pos.castling.white.king_moved);
}

#[test]
fn test_promotion_revert_gives_back_pawn() {
    let mut pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before = pos.clone();
    let (mv, captured) = play(&mut pos, "a7b8n");
    assert_eq!(mv.promotion, Some(PieceKind::Knight));
    assert_eq!(captured, Some(Piece::new(Color::Black, PieceKind::Knight)));
    assert_eq!(pos.piece_at(s("b8")), Some(Piece::new(Color::White, PieceKind::Knight)));
    pos.revert_move(&mv, captured);
    assert_eq!(pos, before);
}

#[test]
fn test_every_startpos_reply_reverts_cleanly() {
    let mut pos = Position::startpos();
    let before = pos.clone();
    for mut mv in legal_moves(&pos) {
        let captured = pos.apply_move(&mut mv);
        assert_ne!(pos, before);
        pos.revert_move(&mv, captured);
        assert_eq!(pos, before);
    }
}

#[test]
fn test_null_move_round_trip() {
    let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let before = pos.clone();
    let ep = pos.make_null_move();
    assert_eq!(pos.side_to_move, Color::Black);
    assert_eq!(pos.en_passant, None);
    pos.unmake_null_move(ep);
    assert_eq!(pos, before);
}

#[test]
fn test_display_shows_board_and_fen() {
    let text = Position::startpos().to_string();
    assert!(text.starts_with("8 r n b q k b n r"));
    assert!(text.contains("Fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
}
