//! Square numbering, file/rank masks and algebraic notation conversion.
//!
//! Squares are numbered 0 = a1 .. 63 = h8, little-endian rank-file: `file =
//! sq % 8`, `rank = sq / 8`. Every other module treats this as the one
//! source of truth for square arithmetic.

use once_cell::sync::Lazy;

/// Single-bit bitboard for each of the 64 squares, `SQUARE_BB[sq] == 1 << sq`.
pub static SQUARE_BB: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut bb = [0u64; 64];
    for (sq, slot) in bb.iter_mut().enumerate() {
        *slot = 1u64 << sq;
    }
    bb
});

/// `RANK_BB[r]` is all eight squares on rank `r` (0 = rank 1 .. 7 = rank 8).
pub static RANK_BB: Lazy<[u64; 8]> = Lazy::new(|| {
    let mut bb = [0u64; 8];
    for (r, slot) in bb.iter_mut().enumerate() {
        *slot = 0xffu64 << (8 * r);
    }
    bb
});

/// `FILE_BB[f]` is all eight squares on file `f` (0 = file a .. 7 = file h).
pub static FILE_BB: Lazy<[u64; 8]> = Lazy::new(|| {
    let mut bb = [0u64; 8];
    for (f, slot) in bb.iter_mut().enumerate() {
        *slot = 0x0101_0101_0101_0101u64 << f;
    }
    bb
});

/// Rank 1: the board edge a white pawn starts two squares away from.
pub const DOWN: u64 = 0x0000_0000_0000_00ff;
/// Rank 8.
pub const UP: u64 = 0xff00_0000_0000_0000;
/// File a.
pub const RIGHT: u64 = 0x0101_0101_0101_0101;
/// File h.
pub const LEFT: u64 = 0x8080_8080_8080_8080;

/// Ranks 1 and 2.
pub const DOWN_DOUBLE: u64 = DOWN | (DOWN << 8);
/// Ranks 7 and 8.
pub const UP_DOUBLE: u64 = UP | (UP >> 8);
/// Files a and b.
pub const RIGHT_DOUBLE: u64 = RIGHT | (RIGHT << 1);
/// Files g and h.
pub const LEFT_DOUBLE: u64 = LEFT | (LEFT >> 1);

/// Returns the file (0..=7) of a square index.
#[inline]
#[must_use]
pub const fn file_of(sq: usize) -> usize {
    sq % 8
}

/// Returns the rank (0..=7) of a square index.
#[inline]
#[must_use]
pub const fn rank_of(sq: usize) -> usize {
    sq / 8
}

/// Builds a square index from a zero-based `(rank, file)` pair.
#[inline]
#[must_use]
pub const fn square_of(rank: usize, file: usize) -> usize {
    rank * 8 + file
}

/// Parses an algebraic square name (`"a1"`..`"h8"`) into `0..=63`, or `-1` on
/// malformed input.
#[must_use]
pub fn algebraic_to_square(s: &str) -> i32 {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return -1;
    }
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return -1;
    }
    let f = (file - b'a') as usize;
    let r = (rank - b'1') as usize;
    square_of(r, f) as i32
}

/// Formats a square index (0..=63) as algebraic notation. Out-of-range
/// indices format as `"-"`.
#[must_use]
pub fn square_to_algebraic(sq: i32) -> String {
    if !(0..64).contains(&sq) {
        return "-".to_string();
    }
    let sq = sq as usize;
    let file = (b'a' + file_of(sq) as u8) as char;
    let rank = (b'1' + rank_of(sq) as u8) as char;
    format!("{file}{rank}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_square() {
        for sq in 0..64i32 {
            let s = square_to_algebraic(sq);
            assert_eq!(algebraic_to_square(&s), sq);
        }
    }

    #[test]
    fn known_squares() {
        assert_eq!(algebraic_to_square("a1"), 0);
        assert_eq!(algebraic_to_square("h1"), 7);
        assert_eq!(algebraic_to_square("a8"), 56);
        assert_eq!(algebraic_to_square("h8"), 63);
    }

    #[test]
    fn malformed_input_is_negative_one() {
        assert_eq!(algebraic_to_square(""), -1);
        assert_eq!(algebraic_to_square("a9"), -1);
        assert_eq!(algebraic_to_square("i1"), -1);
        assert_eq!(algebraic_to_square("aa"), -1);
    }

    #[test]
    fn edge_masks_match_spec_constants() {
        assert_eq!(DOWN, 0x0000_0000_0000_00ff);
        assert_eq!(UP, 0xff00_0000_0000_0000);
        assert_eq!(RIGHT, 0x0101_0101_0101_0101);
        assert_eq!(LEFT, 0x8080_8080_8080_8080);
    }
}
