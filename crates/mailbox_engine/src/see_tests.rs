use super::*;
use mailbox_core::{coord_to_sq, parse_uci_move};

fn s(coord: &str) -> Square {
    coord_to_sq(coord).unwrap()
}

fn board(fen: &str) -> Board {
    Position::from_fen(fen).unwrap().board
}

#[test]
fn test_pawn_takes_undefended_pawn() {
    let b = board("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    assert_eq!(see(&b, s("d5"), s("e4")), 100);
}

#[test]
fn test_queen_takes_pawn_defended_by_pawn() {
    let b = board("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1");
    assert_eq!(see(&b, s("d5"), s("d1")), -800);
}

#[test]
fn test_xray_rook_behind_rook() {
    let doubled = board("3rk3/8/8/3p4/8/8/3R4/3RK3 w - - 0 1");
    assert_eq!(see(&doubled, s("d5"), s("d2")), 100);

    let single = board("3rk3/8/8/3p4/8/8/3R4/4K3 w - - 0 1");
    assert_eq!(see(&single, s("d5"), s("d2")), -400);
}

#[test]
fn test_defender_can_decline_a_losing_recapture() {
    // Nxd5 wins the bishop; Qxd5 would hand the queen to the e4 pawn, so
    // black stops and the knight keeps the full bishop.
    let b = board("4k3/8/4q3/3b4/4P3/2N5/8/4K3 w - - 0 1");
    assert_eq!(see(&b, s("d5"), s("c3")), 330);
}

#[test]
fn test_empty_target_is_zero() {
    let b = board("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    assert_eq!(see(&b, s("d5"), s("d1")), 0);
}

#[test]
fn test_see_move_quiet_and_en_passant() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let ep = parse_uci_move(&pos, "e5d6").unwrap();
    assert_eq!(see_move(&pos, &ep), 100);
    let quiet = parse_uci_move(&pos, "e1d2").unwrap();
    assert_eq!(see_move(&pos, &quiet), 0);
}
