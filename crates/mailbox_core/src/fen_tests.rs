use super::*;

#[test]
fn test_startpos_round_trip() {
    let pos = Position::from_fen(STARTPOS_FEN).unwrap();
    assert_eq!(pos, Position::startpos());
    assert_eq!(pos.to_fen(), STARTPOS_FEN);
}

#[test]
fn test_kiwipete_fields() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let pos: Position = fen.parse().unwrap();
    assert_eq!(pos.to_fen(), fen);
    assert_eq!(pos.side_to_move, Color::White);
    assert_eq!(pos.board.pieces().count(), 32);
}

#[test]
fn test_missing_castling_letters_mark_pieces_moved() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1").unwrap();
    let w = pos.castling.white;
    assert!(!w.kingside_rook_moved);
    assert!(w.queenside_rook_moved);
    assert!(!w.king_moved);
    let b = pos.castling.black;
    assert!(b.kingside_rook_moved);
    assert!(!b.queenside_rook_moved);

    let none = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    assert!(none.castling.white.king_moved);
    assert!(none.castling.black.king_moved);
    assert!(none.to_fen().contains(" w - - "));
}

#[test]
fn test_en_passant_and_optional_fields() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6").unwrap();
    assert_eq!(pos.en_passant, coord_to_sq("d6"));

    // Only placement and side are required.
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
    assert_eq!(pos.side_to_move, Color::Black);
    assert_eq!(pos.en_passant, None);
}

#[test]
fn test_unknown_piece_letter_leaves_square_empty() {
    let pos = Position::from_fen("4k3/8/8/8/3X4/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(pos.piece_at(coord_to_sq("d4").unwrap()), None);
    assert_eq!(pos.board.pieces().count(), 2);
}

#[test]
fn test_structural_errors() {
    assert_eq!(Position::from_fen(""), Err(FenError::MissingField("placement")));
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/8"),
        Err(FenError::MissingField("side to move"))
    );
    assert_eq!(Position::from_fen("8/8/8 w - -"), Err(FenError::RankCount(3)));
    assert!(matches!(
        Position::from_fen("9/8/8/8/8/8/8/8 w - -"),
        Err(FenError::RankWidth { rank: 8, .. })
    ));
    assert!(matches!(
        Position::from_fen("7/8/8/8/8/8/8/8 w - -"),
        Err(FenError::RankWidth { rank: 8, files: 7 })
    ));
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/8 x - -"),
        Err(FenError::SideToMove("x".into()))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/8 w KX -"),
        Err(FenError::Castling("KX".into()))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/8 w - z9"),
        Err(FenError::EnPassant("z9".into()))
    );
}
