//! Error types for position setup.

use thiserror::Error;

/// Reasons a FEN string could not be turned into a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN is missing the {0} field")]
    MissingField(&'static str),

    #[error("FEN placement has {0} ranks, expected 8")]
    RankCount(usize),

    #[error("FEN rank {rank} describes {files} files, expected 8")]
    RankWidth { rank: u8, files: u32 },

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid castling field '{0}'")]
    Castling(String),

    #[error("invalid en passant square '{0}'")]
    EnPassant(String),
}

pub type FenResult<T> = Result<T, FenError>;
