//! Mailbox chess engine
//!
//! Iterative deepening alpha-beta over the 0x88 position from `mailbox_core`,
//! with material, piece-square, SEE safety and mate-threat evaluation.

pub mod config;
pub mod eval;
pub mod mate;
pub mod search;
pub mod see;
pub mod threats;

use tracing::info;

use mailbox_core::{Engine, Move, Position, SearchLimits, SearchResult, TimeControl, move_to_uci};

pub use config::{ConfigError, EngineConfig, EvalConfig};
pub use eval::{EvalBreakdown, Evaluator, MATE_IN_TWO_SCORE, MATE_SCORE};
pub use search::{SearchOutcome, Searcher};

/// The engine driven by the UCI front end.
#[derive(Debug, Clone, Default)]
pub struct MailboxEngine {
    config: EngineConfig,
    evaluator: Evaluator,
    /// Node counter for statistics
    nodes: u64,
}

impl MailboxEngine {
    pub fn new(config: EngineConfig) -> Self {
        let evaluator = Evaluator::new(config.eval);
        Self {
            config,
            evaluator,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Best move for `pos` under the configured move time, at most
    /// `max_depth` plies deep.
    pub fn find_best_move(&mut self, pos: &Position, max_depth: u8) -> Option<Move> {
        let limits = SearchLimits {
            depth: max_depth,
            ..self.config.limits()
        };
        self.search(pos, limits).best_move
    }
}

impl Engine for MailboxEngine {
    fn search(&mut self, pos: &Position, mut limits: SearchLimits) -> SearchResult {
        limits.start();
        let tc: TimeControl = limits
            .time_control
            .clone()
            .with_check_interval(self.config.node_check_interval);

        let mut work = pos.clone();
        let mut searcher = Searcher::new(&self.evaluator, &tc);
        let outcome = searcher.find_best_move(&mut work, limits.depth);
        self.nodes = searcher.nodes();

        if let Some((mv, score)) = outcome.best_move {
            info!(
                mv = %move_to_uci(mv),
                score,
                depth = outcome.depth,
                nodes = self.nodes,
                elapsed_ms = tc.elapsed().as_millis() as u64,
                "search finished"
            );
        }

        SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score: outcome.best_move.map(|(_, s)| s).unwrap_or(0),
            depth: outcome.depth,
            nodes: self.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "Mailbox v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "depth" => match value.parse::<u8>() {
                Ok(d) if d > 0 => {
                    self.config.max_depth = d;
                    true
                }
                _ => false,
            },
            "movetime" => match value.parse::<u64>() {
                Ok(ms) => {
                    self.config.move_time_ms = ms;
                    true
                }
                Err(_) => false,
            },
            "matethreats" => match value.parse::<bool>() {
                Ok(on) => {
                    self.config.eval.mate_threats = on;
                    self.evaluator = Evaluator::new(self.config.eval);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }
}
