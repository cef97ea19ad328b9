use super::*;
use crate::error::FenError;

#[test]
fn test_move_text_round_trip() {
    let pos = Position::startpos();
    let mv = parse_uci_move(&pos, "g1f3").unwrap();
    assert_eq!(move_to_uci(mv), "g1f3");
    assert!(parse_uci_move(&pos, "e2e5").is_none());
    assert!(parse_uci_move(&pos, "e2").is_none());
    assert!(parse_uci_move(&pos, "e2e4x").is_none());
}

#[test]
fn test_promotion_suffix_must_match() {
    let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "a7a8r").unwrap();
    assert_eq!(mv.promotion, Some(PieceKind::Rook));
    assert_eq!(move_to_uci(mv), "a7a8r");
    // A bare push to the last rank is not one of the generated moves.
    assert!(parse_uci_move(&pos, "a7a8").is_none());
    assert!(parse_uci_move(&pos, "a7a8k").is_none());
}

#[test]
fn test_castle_flag_comes_from_the_generator() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "e1g1").unwrap();
    assert!(mv.castle_kingside);
}

#[test]
fn test_set_position_startpos_with_moves() {
    let mut pos = Position::empty();
    set_position_from_uci(&mut pos, &["startpos", "moves", "e2e4", "e7e5", "g1f3"]).unwrap();
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 1"
    );
}

#[test]
fn test_set_position_fen_with_moves() {
    let mut pos = Position::startpos();
    let args = ["fen", "4k3/8/8/8/8/8/4P3/4K3", "w", "-", "-", "0", "1", "moves", "e2e4"];
    set_position_from_uci(&mut pos, &args).unwrap();
    assert_eq!(pos.to_fen(), "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");
}

#[test]
fn test_set_position_stops_at_illegal_move() {
    let mut pos = Position::startpos();
    set_position_from_uci(&mut pos, &["startpos", "moves", "e2e4", "e2e4", "e7e5"]).unwrap();
    assert_eq!(pos.side_to_move, Color::Black);
    assert!(pos.piece_at(coord_to_sq("e7").unwrap()).is_some());
}

#[test]
fn test_set_position_bad_fen() {
    let mut pos = Position::startpos();
    let err = set_position_from_uci(&mut pos, &["fen", "8/8", "w"]).unwrap_err();
    assert_eq!(err, FenError::RankCount(2));
}
