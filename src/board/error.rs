//! Error types for board-facing string parsing.
//!
//! Nothing in [`crate::board::Board`]'s move API ever returns a `Result` —
//! illegal/malformed moves are reported as `false`/`None` per the engine's
//! error taxonomy. These types exist only for the two places that parse
//! external text: FEN strings and coordinate/algebraic move notation.

use std::fmt;

/// Failure parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the 6 required space-separated fields were present.
    TooFewFields { found: usize },
    /// A rank descriptor did not describe exactly 8 files.
    BadRankDescriptor { rank: usize },
    /// Side-to-move field was not `"w"` or `"b"`.
    BadSideToMove { found: String },
    /// A castling-availability character was not one of `KQkq-`.
    BadCastling { found: char },
    /// The en-passant field was not `"-"` or a valid algebraic square.
    BadEnPassant { found: String },
    /// The halfmove clock or fullmove number was not a valid integer.
    BadCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "FEN must have 6 fields, found {found}")
            }
            FenError::BadRankDescriptor { rank } => {
                write!(f, "rank {rank} does not describe exactly 8 files")
            }
            FenError::BadSideToMove { found } => {
                write!(f, "side to move must be 'w' or 'b', found '{found}'")
            }
            FenError::BadCastling { found } => {
                write!(f, "invalid castling character '{found}'")
            }
            FenError::BadEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::BadCounter { found } => {
                write!(f, "invalid move counter '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Failure parsing a coordinate-style move string (e.g. `"e2e4"`, `"e7e8q"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// The string was not 4 or 5 characters long.
    BadLength { len: usize },
    /// A square component was not valid algebraic notation.
    BadSquare { found: String },
    /// The promotion-piece suffix was not one of `qrbn`.
    BadPromotion { found: char },
    /// The move text is well-formed but does not match any legal move.
    NotLegal,
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::BadLength { len } => {
                write!(f, "move text must be 4-5 characters, found {len}")
            }
            MoveParseError::BadSquare { found } => write!(f, "invalid square '{found}'"),
            MoveParseError::BadPromotion { found } => {
                write!(f, "invalid promotion piece '{found}'")
            }
            MoveParseError::NotLegal => write!(f, "move does not match any legal move"),
        }
    }
}

impl std::error::Error for MoveParseError {}
