//! Static position evaluation.

mod tables;

use crate::board::Board;
use crate::types::{Color, PieceType};

pub use tables::piece_value;

/// Pluggable position evaluator, so the searcher can be driven by a
/// lightweight evaluator in tests without depending on the full feature set.
pub trait Evaluator {
    /// Score from the side-to-move's perspective: `i32::MIN + move_number`
    /// on checkmate (so shorter mates score closer to zero and are
    /// preferred), `0` on any draw, otherwise the full heuristic.
    fn eval(&self, board: &mut Board) -> i32;
}

/// The full material/positional/pawn-structure/king-safety evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl Evaluator for StandardEvaluator {
    fn eval(&self, board: &mut Board) -> i32 {
        if board.is_mate() {
            return i32::MIN + board.move_number() as i32;
        }
        if board.is_draw() {
            return 0;
        }

        let endgame = board.is_end_game();
        let white_score = evaluate_white_perspective(board, endgame);

        if board.white_to_move() {
            white_score
        } else {
            -white_score
        }
    }
}

fn evaluate_white_perspective(board: &Board, endgame: bool) -> i32 {
    let mut score = material_and_imbalance(board);
    score += piece_square_tables(board, endgame);
    score += pawn_structure(board);
    score += king_proximity(board, endgame);
    score += bishop_pair(board);
    score += rook_bonuses(board);
    if !endgame {
        score += king_safety(board);
    }
    score
}

fn non_king_piece_count(board: &Board, color: Color) -> u32 {
    PieceType::ALL
        .into_iter()
        .filter(|pt| *pt != PieceType::King)
        .map(|pt| board.pieces_of(color, pt).count_ones())
        .sum()
}

fn material_and_imbalance(board: &Board) -> i32 {
    let white_material: i32 = PieceType::ALL
        .into_iter()
        .filter(|pt| *pt != PieceType::King)
        .map(|pt| tables::piece_value(pt) * board.pieces_of(Color::White, pt).count_ones() as i32)
        .sum();
    let black_material: i32 = PieceType::ALL
        .into_iter()
        .filter(|pt| *pt != PieceType::King)
        .map(|pt| tables::piece_value(pt) * board.pieces_of(Color::Black, pt).count_ones() as i32)
        .sum();

    let wn = non_king_piece_count(board, Color::White) as i32;
    let bn = non_king_piece_count(board, Color::Black) as i32;

    let mut score = white_material - black_material;
    if white_material > black_material {
        score += 45 + 3 * wn - 6 * bn;
    } else if black_material > white_material {
        score -= 45 + 3 * bn - 6 * wn;
    }
    score
}

fn piece_square_tables(board: &Board, endgame: bool) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for piece_type in PieceType::ALL {
            let mut bb = board.pieces_of(color, piece_type);
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                bb &= bb - 1;
                score += sign * tables::pst_value(piece_type, color, sq, endgame);
            }
        }
    }
    score
}

fn pawn_structure(board: &Board) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let enemy = color.opposite();
        let own_pawns = board.pieces_of(color, PieceType::Pawn);
        let enemy_pawns = board.pieces_of(enemy, PieceType::Pawn);

        let mut bb = own_pawns;
        while bb != 0 {
            let sq = bb.trailing_zeros() as usize;
            bb &= bb - 1;

            if tables::PASSED_MASK[color.index()][sq] & enemy_pawns == 0 {
                score += sign * tables::PASSED_PAWN_BONUS;
            }
            if tables::ISOLATED_MASK[sq] & own_pawns == 0 {
                score += sign * tables::ISOLATED_PAWN_PENALTY;
            }
            if tables::BACKWARD_MASK[color.index()][sq] & own_pawns == 0 {
                let stop_sq = match color {
                    Color::White => sq + 8,
                    Color::Black => sq.wrapping_sub(8),
                };
                if stop_sq < 64 && board.is_square_attacked(stop_sq, enemy) {
                    score += sign * tables::BACKWARD_PAWN_PENALTY;
                }
            }
            let file_mask = crate::geometry::FILE_BB[crate::geometry::file_of(sq)];
            if (own_pawns & file_mask & !(1u64 << sq)) != 0 {
                score += sign * tables::DOUBLED_PAWN_PENALTY;
            }
        }
    }
    score
}

fn king_proximity(board: &Board, endgame: bool) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let enemy = color.opposite();
        let enemy_king = board.king_square(enemy);
        let own_king = board.king_square(color);

        for piece_type in [PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen] {
            let table = match piece_type {
                PieceType::Knight => &tables::KNIGHT_KING_SAFETY,
                PieceType::Bishop => &tables::BISHOP_KING_SAFETY,
                PieceType::Rook => &tables::ROOK_KING_SAFETY,
                PieceType::Queen => &tables::QUEEN_KING_SAFETY,
                _ => unreachable!(),
            };
            let mut bb = board.pieces_of(color, piece_type);
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                bb &= bb - 1;
                let dist = tables::chebyshev_distance(sq, enemy_king);
                score += sign * table[dist];
            }
        }

        if endgame {
            let mut bb = board.pieces_of(color, PieceType::Pawn);
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                bb &= bb - 1;
                let dist = tables::chebyshev_distance(sq, own_king);
                score += sign * tables::OWN_PAWN_SAFETY[dist];
            }
        }

        let mut bb = board.pieces_of(enemy, PieceType::Pawn);
        while bb != 0 {
            let sq = bb.trailing_zeros() as usize;
            bb &= bb - 1;
            let dist = tables::chebyshev_distance(sq, enemy_king);
            score += sign * tables::OPP_PAWN_SAFETY[dist];
        }
    }
    score
}

fn bishop_pair(board: &Board) -> i32 {
    let mut score = 0;
    if board.pieces_of(Color::White, PieceType::Bishop).count_ones() >= 2 {
        score += tables::BISHOP_PAIR_BONUS;
    }
    if board.pieces_of(Color::Black, PieceType::Bishop).count_ones() >= 2 {
        score -= tables::BISHOP_PAIR_BONUS;
    }
    score
}

fn rook_bonuses(board: &Board) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let own_pawns = board.pieces_of(color, PieceType::Pawn);
        let enemy_pawns = board.pieces_of(color.opposite(), PieceType::Pawn);
        let own_rooks = board.pieces_of(color, PieceType::Rook);

        let mut bb = own_rooks;
        while bb != 0 {
            let sq = bb.trailing_zeros() as usize;
            bb &= bb - 1;
            let file_mask = crate::geometry::FILE_BB[crate::geometry::file_of(sq)];

            let behind_passed = (file_mask & own_pawns).count_ones() > 0
                && (0..64).any(|pawn_sq| {
                    own_pawns & (1u64 << pawn_sq) != 0
                        && file_mask & (1u64 << pawn_sq) != 0
                        && tables::PASSED_MASK[color.index()][pawn_sq] & enemy_pawns == 0
                        && rook_is_behind(color, sq, pawn_sq)
                });
            if behind_passed {
                score += sign * tables::ROOK_BEHIND_PASSED_PAWN_BONUS;
            }

            if file_mask & enemy_pawns == 0 {
                score += sign * tables::ROOK_OPEN_FILE_BONUS;
                if (file_mask & own_rooks).count_ones() > 1 {
                    score += sign * tables::ROOK_SHARED_OPEN_FILE_BONUS;
                }
            }
        }
    }
    score
}

fn rook_is_behind(color: Color, rook_sq: usize, pawn_sq: usize) -> bool {
    match color {
        Color::White => rook_sq < pawn_sq,
        Color::Black => rook_sq > pawn_sq,
    }
}

fn king_safety(board: &Board) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let king_sq = board.king_square(color);
        let own_pawns = board.pieces_of(color, PieceType::Pawn);

        let strong = tables::STRONG_SHIELD[color.index()][king_sq];
        let weak = tables::WEAK_SHIELD[color.index()][king_sq];
        score += sign * tables::STRONG_SHIELD_BONUS * (strong & own_pawns).count_ones() as i32;
        score += sign * tables::WEAK_SHIELD_BONUS * (weak & own_pawns).count_ones() as i32;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn starting_position_is_symmetric() {
        let mut board = Board::new();
        assert_eq!(StandardEvaluator.eval(&mut board), 0);
    }

    #[test]
    fn extra_queen_favors_mover_side() {
        let mut board =
            Board::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(StandardEvaluator.eval(&mut board) > 0);
    }

    #[test]
    fn checkmate_scores_the_extreme_negative() {
        let mut board = Board::new();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let mv = board.parse_coordinate_move(text).unwrap();
            board.make(mv);
        }
        assert!(StandardEvaluator.eval(&mut board) < -1_000_000);
    }
}
