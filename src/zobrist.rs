//! Zobrist hashing for chess positions.
//!
//! Provides an incrementally-maintainable 64-bit position hash, used for
//! repetition detection. The key table is generated once, process-wide, from
//! a fixed seed so hashes are reproducible across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::types::{Color, PieceType};

/// One of the four individually-revocable castling rights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleRight {
    WhiteKingside,
    WhiteQueenside,
    BlackKingside,
    BlackQueenside,
}

struct ZobristKeys {
    /// `piece_square[color][piece_type][square]`
    piece_square: [[[u64; 64]; 6]; 2],
    castling: [u64; 4],
    en_passant_file: [u64; 8],
    side_to_move: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed: hashes must be reproducible across runs so that the
        // FEN round-trip property test in `board` can assert equal keys.
        let mut rng = StdRng::seed_from_u64(0x5EED_C0DE_1234_5678);

        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for color in &mut piece_square {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let mut castling = [0u64; 4];
        for key in &mut castling {
            *key = rng.gen();
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.gen();
        }

        let side_to_move = rng.gen();

        ZobristKeys {
            piece_square,
            castling,
            en_passant_file,
            side_to_move,
        }
    }
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Key to XOR in/out when a piece of `color`/`piece_type` sits on `square`.
#[inline]
#[must_use]
pub fn key_for(square: usize, piece_type: PieceType, color: Color) -> u64 {
    KEYS.piece_square[color.index()][piece_type as usize][square]
}

/// The XOR delta for moving a piece of `color`/`piece_type` from `from` to
/// `to` (ignores captures, promotions, etc. — callers XOR those separately).
#[inline]
#[must_use]
pub fn key_for_move(from: usize, to: usize, piece_type: PieceType, color: Color) -> u64 {
    key_for(from, piece_type, color) ^ key_for(to, piece_type, color)
}

#[inline]
#[must_use]
pub fn castling_key(right: CastleRight) -> u64 {
    KEYS.castling[right as usize]
}

#[inline]
#[must_use]
pub fn en_passant_file_key(file: usize) -> u64 {
    KEYS.en_passant_file[file]
}

#[inline]
#[must_use]
pub fn side_to_move_key() -> u64 {
    KEYS.side_to_move
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_reproducible_across_calls() {
        let a = key_for(4, PieceType::Queen, Color::White);
        let b = key_for(4, PieceType::Queen, Color::White);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_inputs_get_distinct_keys() {
        let a = key_for(4, PieceType::Queen, Color::White);
        let b = key_for(4, PieceType::Queen, Color::Black);
        let c = key_for(5, PieceType::Queen, Color::White);
        let d = key_for(4, PieceType::Rook, Color::White);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
