//! Pseudo-legal and legal move generation.

use crate::board::Board;
use crate::geometry::{file_of, rank_of};
use crate::magic;
use crate::types::{Color, Move, MoveFlag, PieceType};

const PROMOTION_FLAGS: [MoveFlag; 4] = [
    MoveFlag::PromoQ,
    MoveFlag::PromoN,
    MoveFlag::PromoR,
    MoveFlag::PromoB,
];

/// Appends every pseudo-legal move for the side to move, in the fixed order
/// Pawn, Knight, King, Rook, Bishop, Queen.
pub fn generate_pseudo_legal(board: &Board, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    generate_pawn_moves(board, side, out);
    generate_piece_moves(board, side, PieceType::Knight, out);
    generate_king_moves(board, side, out);
    generate_piece_moves(board, side, PieceType::Rook, out);
    generate_piece_moves(board, side, PieceType::Bishop, out);
    generate_piece_moves(board, side, PieceType::Queen, out);
}

/// Pseudo-legal generation filtered to moves that don't leave the mover's
/// own king in check, via trial `make()`/`undo()`.
pub fn generate_legal(board: &mut Board, out: &mut Vec<Move>) {
    out.clear();
    let mut pseudo = Vec::with_capacity(crate::types::MAX_PSEUDO_LEGAL_MOVES);
    generate_pseudo_legal(board, &mut pseudo);
    for mv in pseudo {
        if board.make(mv) {
            board.undo();
            out.push(mv);
        }
    }
}

/// Legal captures and promotions only, used by quiescence search.
pub fn generate_captures_and_promotions(board: &mut Board, out: &mut Vec<Move>) {
    let mut legal = Vec::with_capacity(crate::types::MAX_PSEUDO_LEGAL_MOVES);
    generate_legal(board, &mut legal);
    out.clear();
    out.extend(
        legal
            .into_iter()
            .filter(|m| m.is_capture() || m.flag().is_promotion()),
    );
}

fn reachable_squares(board: &Board, side: Color, piece_type: PieceType, sq: usize) -> u64 {
    let occ = board.all_pieces();
    let raw = match piece_type {
        PieceType::Knight => magic::knight_attacks(sq),
        PieceType::Bishop => magic::bishop_attacks(sq, occ),
        PieceType::Rook => magic::rook_attacks(sq, occ),
        PieceType::Queen => magic::queen_attacks(sq, occ),
        PieceType::King => magic::king_attacks(sq),
        PieceType::Pawn => unreachable!("pawns use generate_pawn_moves"),
    };
    raw & !board.occupancy_of(side)
}

fn generate_piece_moves(board: &Board, side: Color, piece_type: PieceType, out: &mut Vec<Move>) {
    let mut bb = board.pieces_of(side, piece_type);
    while bb != 0 {
        let from = bb.trailing_zeros() as usize;
        bb &= bb - 1;
        let mut targets = reachable_squares(board, side, piece_type, from);
        while targets != 0 {
            let to = targets.trailing_zeros() as usize;
            targets &= targets - 1;
            let is_capture = board.occupancy_of(side.opposite()) & (1u64 << to) != 0;
            out.push(Move::new(
                from as u32,
                to as u32,
                piece_type,
                is_capture,
                MoveFlag::None,
            ));
        }
    }
}

fn generate_king_moves(board: &Board, side: Color, out: &mut Vec<Move>) {
    generate_piece_moves(board, side, PieceType::King, out);
    generate_castling_moves(board, side, out);
}

fn generate_castling_moves(board: &Board, side: Color, out: &mut Vec<Move>) {
    use crate::board::castle_squares::*;

    let enemy = side.opposite();
    let occ = board.all_pieces();
    let (king_from, king_to_k, king_to_q, rook_k_from, rook_q_from) = match side {
        Color::White => (
            WHITE_KING_FROM,
            WHITE_KING_TO_K,
            WHITE_KING_TO_Q,
            WHITE_ROOK_K_FROM,
            WHITE_ROOK_Q_FROM,
        ),
        Color::Black => (
            BLACK_KING_FROM,
            BLACK_KING_TO_K,
            BLACK_KING_TO_Q,
            BLACK_ROOK_K_FROM,
            BLACK_ROOK_Q_FROM,
        ),
    };

    if board.can_castle_kingside(side) {
        let rook_still_there = board.pieces_of(side, PieceType::Rook) & (1u64 << rook_k_from) != 0;
        let between = squares_between(king_from, rook_k_from);
        let transit = king_from + 1;
        if rook_still_there
            && occ & between == 0
            && !board.is_square_attacked(king_from, enemy)
            && !board.is_square_attacked(transit, enemy)
            && !board.is_square_attacked(king_to_k, enemy)
        {
            out.push(Move::new(
                king_from as u32,
                king_to_k as u32,
                PieceType::King,
                false,
                MoveFlag::CastleK,
            ));
        }
    }

    if board.can_castle_queenside(side) {
        let rook_still_there = board.pieces_of(side, PieceType::Rook) & (1u64 << rook_q_from) != 0;
        let between = squares_between(rook_q_from, king_from);
        let transit = king_from - 1;
        if rook_still_there
            && occ & between == 0
            && !board.is_square_attacked(king_from, enemy)
            && !board.is_square_attacked(transit, enemy)
            && !board.is_square_attacked(king_to_q, enemy)
        {
            out.push(Move::new(
                king_from as u32,
                king_to_q as u32,
                PieceType::King,
                false,
                MoveFlag::CastleQ,
            ));
        }
    }
}

fn squares_between(a: usize, b: usize) -> u64 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let mut bb = 0u64;
    for sq in (lo + 1)..hi {
        bb |= 1u64 << sq;
    }
    bb
}

fn generate_pawn_moves(board: &Board, side: Color, out: &mut Vec<Move>) {
    let occ = board.all_pieces();
    let enemy_occ = board.occupancy_of(side.opposite());
    let mut bb = board.pieces_of(side, PieceType::Pawn);

    while bb != 0 {
        let from = bb.trailing_zeros() as usize;
        bb &= bb - 1;
        let from_rank = rank_of(from);
        let from_file = file_of(from);

        let (single, starting_rank, promotion_rank, double) = match side {
            Color::White => (from + 8, 1usize, 7usize, from + 16),
            Color::Black => (from - 8, 6usize, 0usize, from - 16),
        };

        if single < 64 && occ & (1u64 << single) == 0 {
            push_pawn_move(out, from, single, promotion_rank, false);
            if from_rank == starting_rank && occ & (1u64 << double) == 0 {
                out.push(Move::new(
                    from as u32,
                    double as u32,
                    PieceType::Pawn,
                    false,
                    MoveFlag::None,
                ));
            }
        }

        for df in [-1i32, 1] {
            let nf = from_file as i32 + df;
            if !(0..8).contains(&nf) {
                continue;
            }
            let to = match side {
                Color::White => from as i32 + 8 + df,
                Color::Black => from as i32 - 8 + df,
            };
            if !(0..64).contains(&to) {
                continue;
            }
            let to = to as usize;
            if file_of(to) as i32 != nf {
                continue;
            }
            if enemy_occ & (1u64 << to) != 0 {
                push_pawn_move(out, from, to, promotion_rank, true);
            } else if to as i32 == board.en_passant_square() {
                out.push(Move::new(
                    from as u32,
                    to as u32,
                    PieceType::Pawn,
                    true,
                    MoveFlag::EnPassant,
                ));
            }
        }
    }
}

fn push_pawn_move(out: &mut Vec<Move>, from: usize, to: usize, promotion_rank: usize, is_capture: bool) {
    if rank_of(to) == promotion_rank {
        for flag in PROMOTION_FLAGS {
            out.push(Move::new(
                from as u32,
                to as u32,
                PieceType::Pawn,
                is_capture,
                flag,
            ));
        }
    } else {
        out.push(Move::new(
            from as u32,
            to as u32,
            PieceType::Pawn,
            is_capture,
            MoveFlag::None,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn perft(board: &mut Board, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut moves = Vec::new();
        generate_legal(board, &mut moves);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            board.make(mv);
            nodes += perft(board, depth - 1);
            board.undo();
        }
        nodes
    }

    #[test]
    fn perft_depth_three_matches_known_value() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 3), 8902);
    }

    #[test]
    fn perft_depth_four_matches_known_value() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 4), 197_281);
    }

    #[test]
    fn legal_count_matches_pseudo_legal_then_filter() {
        let mut board = Board::new();
        let mut legal = Vec::new();
        generate_legal(&mut board, &mut legal);

        let mut pseudo = Vec::new();
        generate_pseudo_legal(&board, &mut pseudo);
        let mut filtered = 0;
        for mv in pseudo {
            if board.make(mv) {
                board.undo();
                filtered += 1;
            }
        }
        assert_eq!(legal.len(), filtered);
    }

    #[test]
    fn promotions_emit_all_four_flags_in_order() {
        let mut board = Board::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let mut moves = Vec::new();
        generate_legal(&mut board, &mut moves);
        let flags: Vec<_> = moves
            .iter()
            .filter(|m| m.from() == crate::geometry::algebraic_to_square("a7") as u32)
            .map(|m| m.flag())
            .collect();
        assert_eq!(
            flags,
            vec![
                MoveFlag::PromoQ,
                MoveFlag::PromoN,
                MoveFlag::PromoR,
                MoveFlag::PromoB
            ]
        );
    }
}
