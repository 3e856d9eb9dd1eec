//! Piece values, piece-square tables and the pawn/king-safety masks the
//! evaluator indexes by square. Everything here is White's-perspective data;
//! callers mirror through `sq ^ 56` for Black.

use once_cell::sync::Lazy;

use crate::geometry::{file_of, rank_of};
use crate::types::{Color, PieceType};

pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

#[must_use]
pub fn piece_value(piece_type: PieceType) -> i32 {
    PIECE_VALUES[piece_type as usize]
}

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_PST: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[rustfmt::skip]
const KING_ENDGAME_PST: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

fn pst_for(piece_type: PieceType, endgame: bool) -> &'static [i32; 64] {
    match piece_type {
        PieceType::Pawn => &PAWN_PST,
        PieceType::Knight => &KNIGHT_PST,
        PieceType::Bishop => &BISHOP_PST,
        PieceType::Rook => &ROOK_PST,
        PieceType::Queen => &QUEEN_PST,
        PieceType::King => {
            if endgame {
                &KING_ENDGAME_PST
            } else {
                &KING_MIDDLEGAME_PST
            }
        }
    }
}

/// Piece-square bonus for a piece of `piece_type`/`color` on `sq`. The black
/// table is the white table mirrored through the rank axis.
#[must_use]
pub fn pst_value(piece_type: PieceType, color: Color, sq: usize, endgame: bool) -> i32 {
    let table = pst_for(piece_type, endgame);
    match color {
        Color::White => table[sq],
        Color::Black => table[sq ^ 56],
    }
}

/// Bonus toward the opposing king, indexed by Chebyshev distance 0..7.
pub const KNIGHT_KING_SAFETY: [i32; 8] = [0, 20, 16, 12, 8, 4, 0, 0];
pub const BISHOP_KING_SAFETY: [i32; 8] = [0, 16, 12, 8, 4, 0, 0, 0];
pub const ROOK_KING_SAFETY: [i32; 8] = [0, 24, 18, 12, 6, 0, 0, 0];
pub const QUEEN_KING_SAFETY: [i32; 8] = [0, 30, 24, 18, 12, 6, 0, 0];
/// Bonus for one's own king standing near one's own pawns, endgame only.
pub const OWN_PAWN_SAFETY: [i32; 8] = [0, 10, 8, 6, 4, 2, 0, 0];
/// Bonus for the opposing king standing far from its own pawns.
pub const OPP_PAWN_SAFETY: [i32; 8] = [10, 8, 6, 4, 2, 0, 0, 0];

#[must_use]
pub fn chebyshev_distance(a: usize, b: usize) -> usize {
    let (ra, fa) = (rank_of(a) as i32, file_of(a) as i32);
    let (rb, fb) = (rank_of(b) as i32, file_of(b) as i32);
    (ra - rb).unsigned_abs().max((fa - fb).unsigned_abs()) as usize
}

pub const BISHOP_PAIR_BONUS: i32 = 50;
pub const PASSED_PAWN_BONUS: i32 = 20;
pub const ISOLATED_PAWN_PENALTY: i32 = -10;
pub const BACKWARD_PAWN_PENALTY: i32 = -8;
pub const DOUBLED_PAWN_PENALTY: i32 = -10;

pub const ROOK_BEHIND_PASSED_PAWN_BONUS: i32 = 20;
pub const ROOK_OPEN_FILE_BONUS: i32 = 20;
pub const ROOK_SHARED_OPEN_FILE_BONUS: i32 = 10;

pub const STRONG_SHIELD_BONUS: i32 = 9;
pub const WEAK_SHIELD_BONUS: i32 = 4;

fn file_span(file: i32, width: i32) -> u64 {
    let mut bb = 0u64;
    for df in -width..=width {
        let f = file + df;
        if (0..8).contains(&f) {
            bb |= crate::geometry::FILE_BB[f as usize];
        }
    }
    bb
}

fn rank_mask_range(color: Color, rank: i32, forward: bool) -> u64 {
    let mut bb = 0u64;
    let ranks: Vec<i32> = match (color, forward) {
        (Color::White, true) => ((rank + 1)..8).collect(),
        (Color::White, false) => (0..rank).collect(),
        (Color::Black, true) => (0..rank).collect(),
        (Color::Black, false) => ((rank + 1)..8).collect(),
    };
    for r in ranks {
        bb |= crate::geometry::RANK_BB[r as usize];
    }
    bb
}

/// `PASSED_MASK[color][sq]`: the three-file cone running from `sq` to the
/// promotion rank, used both for passed-pawn and backward-pawn checks.
pub static PASSED_MASK: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut t = [[0u64; 64]; 2];
    for sq in 0..64 {
        let file = file_of(sq) as i32;
        let rank = rank_of(sq) as i32;
        t[Color::White.index()][sq] = file_span(file, 1) & rank_mask_range(Color::White, rank, true);
        t[Color::Black.index()][sq] = file_span(file, 1) & rank_mask_range(Color::Black, rank, true);
    }
    t
});

/// `BACKWARD_MASK[color][sq]`: the three-file cone running from `sq` back
/// toward that side's own back rank.
pub static BACKWARD_MASK: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut t = [[0u64; 64]; 2];
    for sq in 0..64 {
        let file = file_of(sq) as i32;
        let rank = rank_of(sq) as i32;
        t[Color::White.index()][sq] =
            file_span(file, 1) & rank_mask_range(Color::White, rank, false);
        t[Color::Black.index()][sq] =
            file_span(file, 1) & rank_mask_range(Color::Black, rank, false);
    }
    t
});

/// `ISOLATED_MASK[sq]`: both adjacent files, every rank.
pub static ISOLATED_MASK: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut t = [0u64; 64];
    for sq in 0..64 {
        let file = file_of(sq) as i32;
        let mut bb = 0u64;
        for df in [-1, 1] {
            let f = file + df;
            if (0..8).contains(&f) {
                bb |= crate::geometry::FILE_BB[f as usize];
            }
        }
        t[sq] = bb;
    }
    t
});

fn shield_squares(king_sq: usize, color: Color, ranks_ahead: i32) -> u64 {
    let rank = rank_of(king_sq) as i32;
    let file = file_of(king_sq) as i32;
    let dr = match color {
        Color::White => ranks_ahead,
        Color::Black => -ranks_ahead,
    };
    let mut bb = 0u64;
    for df in [-1, 0, 1] {
        let r = rank + dr;
        let f = file + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            bb |= 1u64 << crate::geometry::square_of(r as usize, f as usize);
        }
    }
    bb
}

/// `STRONG_SHIELD[color][king_sq]`: the rank directly ahead of the king.
pub static STRONG_SHIELD: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut t = [[0u64; 64]; 2];
    for sq in 0..64 {
        t[Color::White.index()][sq] = shield_squares(sq, Color::White, 1);
        t[Color::Black.index()][sq] = shield_squares(sq, Color::Black, 1);
    }
    t
});

/// `WEAK_SHIELD[color][king_sq]`: the strong shield shifted one further rank.
pub static WEAK_SHIELD: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut t = [[0u64; 64]; 2];
    for sq in 0..64 {
        t[Color::White.index()][sq] = shield_squares(sq, Color::White, 2);
        t[Color::Black.index()][sq] = shield_squares(sq, Color::Black, 2);
    }
    t
});
