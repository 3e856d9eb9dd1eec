use chess_engine::{Board, Engine, EngineConfig};

/// Plays a short self-game against itself and prints each move's SAN, as a
/// smoke-test harness for the library crate. UIs and other front ends are
/// expected to depend on the `chess_engine` library directly rather than
/// this binary.
fn main() {
    let mut engine = Engine::new_engine(Board::new());
    engine.set_config(EngineConfig {
        max_depth: 3,
        ..EngineConfig::default()
    });

    for ply in 1..=10 {
        if engine.is_draw() || engine.white_wins() || engine.black_wins() {
            break;
        }
        let suggestions = engine.suggested_moves();
        let Some((move_int, san)) = suggestions.into_iter().next() else {
            break;
        };
        engine.make_move(move_int);
        println!("{ply}. {san}");
    }
}
