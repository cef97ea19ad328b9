pub mod attacks;
pub mod board;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;

pub use attacks::*;
pub use board::*;
pub use error::*;
pub use fen::STARTPOS_FEN;
pub use movegen::*;
pub use perft::{divide, perft};
pub use time_control::*;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Score in centipawns, positive favouring White
    pub score: i32,
    /// Deepest fully completed iteration (0 when a shortcut decided the move)
    pub depth: u8,
    pub nodes: u64,
    /// Whether the deadline cut the search short
    pub stopped: bool,
}

/// Anything that can pick a move for a position.
///
/// The engine receives a shared position and searches its own copy of it.
pub trait Engine: Send {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
