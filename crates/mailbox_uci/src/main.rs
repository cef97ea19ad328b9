use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use mailbox_core::{
    Color, Engine, Position, SearchLimits, divide, move_to_uci, set_position_from_uci,
};
use mailbox_engine::{EngineConfig, MailboxEngine};

/// UCI front-end for the mailbox engine. Talks UCI on stdin/stdout and logs
/// to stderr.
#[derive(Parser, Debug)]
#[command(name = "mailbox_uci", version, about)]
struct Args {
    /// Engine config file (TOML, or JSON by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the maximum search depth
    #[arg(short, long)]
    depth: Option<u8>,

    /// Override the per-move time budget in milliseconds (0 = no limit)
    #[arg(short, long)]
    movetime: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(d) = args.depth {
        config.max_depth = d.max(1);
    }
    if let Some(ms) = args.movetime {
        config.move_time_ms = ms;
    }
    info!(?config, "engine configured");

    let mut engine = MailboxEngine::new(config);
    let mut pos = Position::startpos();

    // UCI engines communicate via stdin/stdout.
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, rest)) = parts.split_first() else {
            continue;
        };
        debug!(%line, "command");

        match cmd {
            "uci" => {
                writeln!(stdout, "id name {}", engine.name())?;
                writeln!(stdout, "id author {}", engine.author())?;
                let cfg = engine.config();
                writeln!(
                    stdout,
                    "option name Depth type spin default {} min 1 max 64",
                    cfg.max_depth
                )?;
                writeln!(
                    stdout,
                    "option name MoveTime type spin default {} min 0 max 600000",
                    cfg.move_time_ms
                )?;
                writeln!(
                    stdout,
                    "option name MateThreats type check default {}",
                    cfg.eval.mate_threats
                )?;
                writeln!(stdout, "uciok")?;
            }
            "isready" => writeln!(stdout, "readyok")?,
            "setoption" => {
                // setoption name <name> value <value>
                let Some((name, value)) = parse_setoption(rest) else {
                    warn!(%line, "malformed setoption");
                    continue;
                };
                if !engine.set_option(&name, &value) {
                    warn!(%name, %value, "unsupported option");
                }
            }
            "ucinewgame" => {
                engine.new_game();
                pos.reset();
            }
            "position" => {
                if let Err(e) = set_position_from_uci(&mut pos, rest) {
                    error!(error = %e, "bad position command");
                }
            }
            "go" => {
                let limits = parse_go(rest, pos.side_to_move, engine.config());
                let result = engine.search(&pos, limits);
                writeln!(
                    stdout,
                    "info depth {} score cp {} nodes {}",
                    result.depth,
                    result.score * pos.side_to_move.sign(),
                    result.nodes
                )?;
                match result.best_move {
                    Some(mv) => writeln!(stdout, "bestmove {}", move_to_uci(mv))?,
                    None => writeln!(stdout, "bestmove 0000")?,
                }
            }
            "eval" => {
                let breakdown = engine.evaluator().breakdown(&mut pos);
                writeln!(stdout, "{breakdown}")?;
            }
            "d" => writeln!(stdout, "{pos}")?,
            "perft" => {
                let depth = rest.first().and_then(|d| d.parse::<u8>().ok()).unwrap_or(1);
                let start = Instant::now();
                let counts = divide(&mut pos, depth);
                let total: u64 = counts.iter().map(|(_, n)| n).sum();
                for (mv, n) in &counts {
                    writeln!(stdout, "{}: {}", move_to_uci(*mv), n)?;
                }
                writeln!(stdout)?;
                writeln!(stdout, "Nodes searched: {total}")?;
                info!(depth, total, elapsed_ms = start.elapsed().as_millis() as u64, "perft");
            }
            // Searches run to completion on this thread, so there is nothing to stop.
            "stop" => {}
            "quit" => break,
            _ => debug!(%cmd, "ignoring unknown command"),
        }
        stdout.flush()?;
    }

    Ok(())
}

fn parse_setoption(args: &[&str]) -> Option<(String, String)> {
    let name_at = args.iter().position(|&a| a == "name")?;
    let value_at = args.iter().position(|&a| a == "value");
    let name_end = value_at.unwrap_or(args.len());
    if name_end <= name_at + 1 {
        return None;
    }
    let name = args[name_at + 1..name_end].join(" ");
    let value = value_at.map(|i| args[i + 1..].join(" ")).unwrap_or_default();
    Some((name, value))
}

/// Search limits for a `go` command. A clock for the side to move wins over
/// `movetime`, which wins over the configured budget.
fn parse_go(args: &[&str], side: Color, config: &EngineConfig) -> SearchLimits {
    let mut depth = config.max_depth;
    let mut movetime = None;
    let (mut wtime, mut btime, mut winc, mut binc) = (None, None, None, None);
    let mut infinite = false;

    let mut it = args.iter();
    while let Some(&key) = it.next() {
        let mut num = || it.next().and_then(|v| v.parse::<u64>().ok());
        match key {
            "depth" => {
                if let Some(d) = num() {
                    depth = d.clamp(1, u8::MAX as u64) as u8;
                }
            }
            "movetime" => movetime = num(),
            "wtime" => wtime = num(),
            "btime" => btime = num(),
            "winc" => winc = num(),
            "binc" => binc = num(),
            "infinite" => infinite = true,
            _ => {}
        }
    }

    let (remaining, inc) = match side {
        Color::White => (wtime, winc),
        Color::Black => (btime, binc),
    };

    if let Some(ms) = remaining {
        let inc = Duration::from_millis(inc.unwrap_or(0));
        return SearchLimits::from_clock(depth, Duration::from_millis(ms), inc);
    }
    if let Some(ms) = movetime {
        return SearchLimits::depth_and_time(depth, Duration::from_millis(ms));
    }
    match config.move_time() {
        Some(t) if !infinite => SearchLimits::depth_and_time(depth, t),
        _ => SearchLimits::depth(depth),
    }
}
