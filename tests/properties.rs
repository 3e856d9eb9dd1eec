//! Property tests: random walks through legal positions should never break
//! the invariants that make/undo and incremental Zobrist hashing promise.

use proptest::prelude::*;

use chess_engine::movegen;
use chess_engine::Board;

/// Walks `indices.len()` plies from the starting position, picking the
/// `index % legal_move_count`'th legal move at each step (or stopping early
/// if the position has none), then undoes every move in reverse order.
fn walk_and_undo(indices: &[usize]) -> (Board, Board) {
    let mut board = Board::new();
    let start = board.clone();
    let mut played = 0;

    for &index in indices {
        let mut legal = Vec::new();
        movegen::generate_legal(&mut board, &mut legal);
        if legal.is_empty() {
            break;
        }
        let mv = legal[index % legal.len()];
        assert!(board.make(mv));
        played += 1;
    }

    for _ in 0..played {
        board.undo();
    }

    (start, board)
}

proptest! {
    #[test]
    fn make_undo_round_trip_restores_zobrist_key(indices in prop::collection::vec(0..64usize, 0..16)) {
        let (start, end) = walk_and_undo(&indices);
        prop_assert_eq!(start.zobrist_key(), end.zobrist_key());
        prop_assert_eq!(start.to_fen(), end.to_fen());
    }

    #[test]
    fn incremental_zobrist_matches_a_from_scratch_parse_of_the_same_position(indices in prop::collection::vec(0..64usize, 0..16)) {
        let mut board = Board::new();
        for &index in &indices {
            let mut legal = Vec::new();
            movegen::generate_legal(&mut board, &mut legal);
            if legal.is_empty() {
                break;
            }
            let mv = legal[index % legal.len()];
            board.make(mv);
            let reparsed = Board::from_fen(&board.to_fen()).unwrap();
            prop_assert_eq!(board.zobrist_key(), reparsed.zobrist_key());
        }
    }

    #[test]
    fn aggregate_occupancy_never_overlaps_between_colors(indices in prop::collection::vec(0..64usize, 0..16)) {
        use chess_engine::types::Color;

        let mut board = Board::new();
        for &index in &indices {
            let mut legal = Vec::new();
            movegen::generate_legal(&mut board, &mut legal);
            if legal.is_empty() {
                break;
            }
            let mv = legal[index % legal.len()];
            board.make(mv);
            prop_assert_eq!(board.occupancy_of(Color::White) & board.occupancy_of(Color::Black), 0);
            prop_assert_eq!(
                board.occupancy_of(Color::White) | board.occupancy_of(Color::Black),
                board.all_pieces()
            );
        }
    }

    #[test]
    fn nonnegative_see_captures_never_lose_more_than_the_attacker(
        indices in prop::collection::vec(0..64usize, 0..10),
    ) {
        let mut board = Board::new();
        for &index in &indices {
            let mut legal = Vec::new();
            movegen::generate_legal(&mut board, &mut legal);
            if legal.is_empty() {
                break;
            }
            let mv = legal[index % legal.len()];
            board.make(mv);
        }

        let mut captures = Vec::new();
        movegen::generate_captures_and_promotions(&mut board, &mut captures);
        for mv in captures {
            let see = board.see(mv);
            // SEE is bounded by the value of a king trade never actually
            // happening: it must never exceed winning the opponent's king.
            prop_assert!(see < 999_999);
            prop_assert!(see > -999_999);
        }
    }
}
