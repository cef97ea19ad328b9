//! Random playouts: every applied move must revert to the exact prior state.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use mailbox_core::{Color, Position, legal_moves, legal_moves_into};

const FENS: [&str; 3] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

#[test]
fn apply_then_revert_is_identity_along_random_games() {
    let mut rng = StdRng::seed_from_u64(0x88);
    for fen in FENS {
        for _ in 0..20 {
            let mut pos = Position::from_fen(fen).unwrap();
            let mut line = Vec::new();
            let mut moves = Vec::new();

            for _ply in 0..60 {
                legal_moves_into(&mut pos, &mut moves);
                // Every sibling reverts cleanly.
                let snapshot = pos.clone();
                for mv in moves.iter_mut() {
                    let captured = pos.apply_move(mv);
                    pos.revert_move(mv, captured);
                    assert_eq!(pos, snapshot);
                }

                let Some(&choice) = moves.choose(&mut rng) else {
                    break;
                };
                let mut mv = choice;
                let before = pos.clone();
                let captured = pos.apply_move(&mut mv);
                let mover = before.side_to_move;
                assert!(!pos.in_check(mover), "legal move left king attacked");
                line.push((mv, captured, before));
            }

            // Unwind the whole game.
            while let Some((mv, captured, before)) = line.pop() {
                pos.revert_move(&mv, captured);
                assert_eq!(pos, before);
            }
            assert_eq!(pos, Position::from_fen(fen).unwrap());
        }
    }
}

#[test]
fn kings_never_disappear_in_legal_play() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut pos = Position::startpos();
    for _ in 0..200 {
        let moves = legal_moves(&pos);
        let Some(&choice) = moves.choose(&mut rng) else {
            break;
        };
        let mut mv = choice;
        pos.apply_move(&mut mv);
        assert!(pos.king_square(Color::White).is_some());
        assert!(pos.king_square(Color::Black).is_some());
    }
}
