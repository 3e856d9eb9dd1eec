//! Standard algebraic notation formatting.

use crate::board::Board;
use crate::geometry::square_to_algebraic;
use crate::movegen;
use crate::types::{Move, MoveFlag, PieceType};

/// Renders `mv` (assumed legal in `board`) as SAN, including disambiguation
/// and a trailing `+`/`#` determined by making the move on a scratch copy.
#[must_use]
pub fn to_san(board: &Board, mv: Move) -> String {
    if mv.flag() == MoveFlag::CastleK {
        return with_check_suffix(board, mv, "O-O".to_string());
    }
    if mv.flag() == MoveFlag::CastleQ {
        return with_check_suffix(board, mv, "O-O-O".to_string());
    }

    let from = mv.from() as usize;
    let to = mv.to() as usize;
    let piece_type = mv.piece_type();

    let mut san = String::new();

    if piece_type == PieceType::Pawn {
        if mv.is_capture() {
            san.push(file_letter(from));
        }
    } else {
        san.push(piece_letter(piece_type));
        san.push_str(&disambiguation(board, mv));
    }

    if mv.is_capture() {
        san.push('x');
    }
    san.push_str(&square_to_algebraic(to as i32));

    if let Some(promoted) = mv.flag().promotion_piece() {
        san.push('=');
        san.push(piece_letter(promoted));
    }

    with_check_suffix(board, mv, san)
}

fn with_check_suffix(board: &Board, mv: Move, mut san: String) -> String {
    let mut scratch = board.clone();
    if scratch.make(mv) {
        if scratch.is_mate() {
            san.push('#');
        } else if scratch.is_check() {
            san.push('+');
        }
        scratch.undo();
    }
    san
}

fn piece_letter(piece_type: PieceType) -> char {
    match piece_type {
        PieceType::Knight => 'N',
        PieceType::Bishop => 'B',
        PieceType::Rook => 'R',
        PieceType::Queen => 'Q',
        PieceType::King => 'K',
        PieceType::Pawn => unreachable!("pawns have no piece letter"),
    }
}

fn file_letter(sq: usize) -> char {
    (b'a' + crate::geometry::file_of(sq) as u8) as char
}

fn rank_letter(sq: usize) -> char {
    (b'1' + crate::geometry::rank_of(sq) as u8) as char
}

/// Disambiguates `mv` against every other legal move of the same piece type
/// (and, for promotions, the same promotion flag) to the same destination.
fn disambiguation(board: &Board, mv: Move) -> String {
    let mut scratch = board.clone();
    let mut legal = Vec::new();
    movegen::generate_legal(&mut scratch, &mut legal);

    let from = mv.from() as usize;
    let mut share_file = false;
    let mut share_rank = false;
    let mut ambiguous = false;

    for other in legal {
        if other.from() == mv.from() || other.to() != mv.to() || other.piece_type() != mv.piece_type() {
            continue;
        }
        if mv.flag().is_promotion() && other.flag() != mv.flag() {
            continue;
        }
        ambiguous = true;
        let other_from = other.from() as usize;
        if crate::geometry::file_of(other_from) == crate::geometry::file_of(from) {
            share_file = true;
        }
        if crate::geometry::rank_of(other_from) == crate::geometry::rank_of(from) {
            share_rank = true;
        }
    }

    if !ambiguous {
        String::new()
    } else if !share_file {
        file_letter(from).to_string()
    } else if !share_rank {
        rank_letter(from).to_string()
    } else {
        square_to_algebraic(from as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn pawn_push_has_no_disambiguation() {
        let board = Board::new();
        let mv = board.clone().parse_coordinate_move("e2e4").unwrap();
        assert_eq!(to_san(&board, mv), "e4");
    }

    #[test]
    fn castling_renders_as_o_o() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = board.clone().parse_coordinate_move("e1g1").unwrap();
        assert_eq!(to_san(&board, mv), "O-O");
    }

    #[test]
    fn fools_mate_final_move_has_hash_suffix() {
        let mut board = Board::new();
        for text in ["f2f3", "e7e5", "g2g4"] {
            let mv = board.parse_coordinate_move(text).unwrap();
            board.make(mv);
        }
        let mv = board.parse_coordinate_move("d8h4").unwrap();
        assert_eq!(to_san(&board, mv), "Qh4#");
    }
}
