use std::time::Instant;

use rayon::prelude::*;

use mailbox_core::{Position, divide, perft};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 1_000_000;

fn parse_epd_line(line: &str) -> Option<(String, Vec<(u8, u64)>)> {
    let mut parts = line.split(';');
    let fen = parts.next()?.trim();
    if fen.is_empty() {
        return None;
    }

    let mut depths = Vec::new();
    for part in parts {
        let mut items = part.split_whitespace();
        let (Some(key), Some(val)) = (items.next(), items.next()) else {
            continue;
        };
        let Some(depth) = key.strip_prefix('D') else {
            continue;
        };
        let depth: u8 = depth
            .parse()
            .unwrap_or_else(|_| panic!("Invalid depth token in EPD: {}", key));
        let expected: u64 = val
            .parse()
            .unwrap_or_else(|_| panic!("Invalid node count in EPD: {}", val));
        depths.push((depth, expected));
    }
    if depths.is_empty() {
        return None;
    }
    depths.sort_by_key(|(d, _)| *d);
    Some((fen.to_string(), depths))
}

#[test]
fn perft_from_standard_epd() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();
    let data = include_str!("standard.epd");
    let cases: Vec<(usize, String, Vec<(u8, u64)>)> = data
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_epd_line(line.trim()).map(|(fen, d)| (idx, fen, d)))
        .collect();
    assert_eq!(cases.len(), 6);

    cases.par_iter().for_each(|(idx, fen, depths)| {
        let case_start = Instant::now();
        let mut total_nodes: u64 = 0;
        let mut ran_depths = Vec::new();

        for (depth, expected) in depths {
            if !full && *expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {} for case {} ({} nodes), set {}=1 to run all.",
                    depth,
                    idx + 1,
                    expected,
                    FULL_PERFT_ENV
                );
                continue;
            }
            let mut pos = Position::from_fen(fen).expect("EPD fen parses");
            let before = pos.clone();
            let got = perft(&mut pos, *depth);
            assert_eq!(
                got, *expected,
                "Perft mismatch for FEN '{}' at depth {}",
                fen, depth
            );
            assert_eq!(pos, before, "perft left the position modified");
            ran_depths.push(*depth);
            total_nodes += got;
        }

        println!(
            "Case {:03} done: depths {:?}, total nodes {}, elapsed {:.3?}",
            idx + 1,
            ran_depths,
            total_nodes,
            case_start.elapsed()
        );
    });
}

#[test]
fn divide_sums_to_perft() {
    let mut pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .expect("kiwipete parses");
    let split = divide(&mut pos, 2);
    assert_eq!(split.len(), 48);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 2039);
}
