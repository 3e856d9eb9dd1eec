//! Integration tests for the engine-facing facade: move application,
//! game-end predicates and move suggestion against the public API surface
//! a UI or CLI collaborator would use.

use chess_engine::geometry::algebraic_to_square;
use chess_engine::types::Move;
use chess_engine::{Board, Engine, EngineConfig};

#[test]
fn engine_search_returns_a_move_at_shallow_depth() {
    let mut engine = Engine::new_engine(Board::new());
    engine.set_config(EngineConfig {
        max_depth: 2,
        ..EngineConfig::default()
    });
    assert_ne!(engine.best_engine_move(), Move::NONE.0);
}

#[test]
fn make_move_rejects_illegal_input() {
    let mut engine = Engine::new_engine(Board::new());
    // e2e5 is not a legal first move for a pawn.
    let from = algebraic_to_square("e2") as u32;
    let to = algebraic_to_square("e5") as u32;
    let bogus = Move::new(from, to, chess_engine::types::PieceType::Pawn, false, chess_engine::types::MoveFlag::None);
    assert!(!engine.make_move(bogus.0));
}

#[test]
fn make_move_applies_a_legal_move_and_flips_side_to_move() {
    let mut engine = Engine::new_engine(Board::new());
    assert!(engine.board().white_to_move());
    let mut scratch = engine.board().clone();
    let mv = scratch.parse_coordinate_move("e2e4").unwrap();
    assert!(engine.make_move(mv.0));
    assert!(!engine.board().white_to_move());
}

#[test]
fn init_board_resets_after_moves_are_made() {
    let mut engine = Engine::new_engine(Board::new());
    let mut scratch = engine.board().clone();
    let mv = scratch.parse_coordinate_move("e2e4").unwrap();
    engine.make_move(mv.0);
    engine.init_board();
    assert_eq!(engine.board().zobrist_key(), Board::new().zobrist_key());
}

#[test]
fn no_engine_move_once_checkmated() {
    let mut engine = Engine::new_engine(Board::new());
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let mut scratch = engine.board().clone();
        let mv = scratch.parse_coordinate_move(text).unwrap();
        engine.make_move(mv.0);
    }
    assert!(engine.black_wins());
    assert_eq!(engine.best_engine_move(), Move::NONE.0);
}

#[test]
fn suggested_moves_are_all_distinct_and_legal() {
    let mut engine = Engine::new_engine(Board::new());
    engine.set_config(EngineConfig {
        max_depth: 2,
        ..EngineConfig::default()
    });
    let suggestions = engine.suggested_moves();
    assert!(!suggestions.is_empty());
    let mut seen = std::collections::HashSet::new();
    for (mv, _san) in &suggestions {
        assert!(seen.insert(*mv), "duplicate move in suggestion list");
    }
}
