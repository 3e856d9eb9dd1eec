//! Bitboard chess engine core: move generation, search and evaluation.

pub mod bitops;
pub mod board;
pub mod engine;
pub mod eval;
pub mod geometry;
pub mod magic;
pub mod movegen;
pub mod san;
pub mod search;
pub mod types;
pub mod zobrist;

pub use board::{Board, START_FEN};
pub use engine::{Engine, EngineConfig};
pub use types::Move;
