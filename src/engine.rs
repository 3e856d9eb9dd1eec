//! Public engine facade consumed by UI/CLI collaborators.

use rand::Rng;

use crate::board::Board;
use crate::movegen;
use crate::san;
use crate::search::Searcher;
use crate::types::Move;

/// Tunable knobs for an [`Engine`] session, carried separately from
/// [`Searcher`] so a caller can reconfigure search depth without rebuilding
/// the board or losing the history heuristics accumulated so far.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub max_depth: u32,
    pub enable_null_move: bool,
    pub quiescence_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_depth: 4,
            enable_null_move: true,
            quiescence_enabled: true,
        }
    }
}

/// The engine-facing API: a [`Board`] paired with a [`Searcher`], exposing
/// only the operations a UI or CLI collaborator needs. Every move-related
/// method reports failure as `false`/`None`/`0` rather than a `Result` —
/// illegal input never panics and never leaves the board in a half-applied
/// state.
pub struct Engine {
    board: Board,
    searcher: Searcher,
    config: EngineConfig,
}

impl Engine {
    /// Builds an engine session around an existing position.
    #[must_use]
    pub fn new_engine(board: Board) -> Self {
        let mut searcher = Searcher::new();
        let config = EngineConfig::default();
        searcher.set_depth(config.max_depth);
        searcher.set_null_move_enabled(config.enable_null_move);
        searcher.set_quiescence_enabled(config.quiescence_enabled);
        Engine {
            board,
            searcher,
            config,
        }
    }

    /// Resets to the standard starting position.
    pub fn init_board(&mut self) {
        self.board = Board::new();
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.searcher.set_depth(config.max_depth);
        self.searcher.set_null_move_enabled(config.enable_null_move);
        self.searcher.set_quiescence_enabled(config.quiescence_enabled);
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Applies a packed move integer if it is legal, returning `false`
    /// (board unchanged) otherwise.
    pub fn make_move(&mut self, move_int: u32) -> bool {
        let mv = Move(move_int);
        let mut legal = Vec::new();
        movegen::generate_legal(&mut self.board, &mut legal);
        if !legal.contains(&mv) {
            log::warn!("rejected illegal move {mv:?}");
            return false;
        }
        self.board.make(mv)
    }

    /// Applies a move given as on-screen coordinates, where `y = 0` is the
    /// top row. Converts to a square index via `((7 - y) * 8 + x)`, then
    /// matches against the legal move list.
    pub fn make_move_xy(&mut self, fx: i32, fy: i32, tx: i32, ty: i32) -> bool {
        let from = (7 - fy) * 8 + fx;
        let to = (7 - ty) * 8 + tx;
        if !(0..64).contains(&from) || !(0..64).contains(&to) {
            return false;
        }

        let mut legal = Vec::new();
        movegen::generate_legal(&mut self.board, &mut legal);
        let Some(mv) = legal
            .into_iter()
            .find(|m| m.from() as i32 == from && m.to() as i32 == to)
        else {
            return false;
        };
        self.board.make(mv)
    }

    /// `PNBRQK`/`pnbrqk`/space for the piece on `square_index`; space for an
    /// out-of-range index.
    #[must_use]
    pub fn get(&self, square_index: i32) -> char {
        self.board.get_char(square_index)
    }

    #[must_use]
    pub fn white_wins(&mut self) -> bool {
        self.board.is_mate() && !self.board.white_to_move()
    }

    #[must_use]
    pub fn black_wins(&mut self) -> bool {
        self.board.is_mate() && self.board.white_to_move()
    }

    #[must_use]
    pub fn is_draw(&mut self) -> bool {
        self.board.is_draw()
    }

    /// The search's top move, or `0` ([`Move::NONE`]) if none exists.
    pub fn best_engine_move(&mut self) -> u32 {
        self.searcher.best_move(&mut self.board).0
    }

    /// Picks a legal move weighted toward the front of the search's ordered
    /// list: move `i` of `n` has weight `n - i` (first move weight `n`,
    /// last weight `1`).
    pub fn random_engine_move(&mut self) -> u32 {
        let moves = self.searcher.get_move_list(&mut self.board);
        if moves.is_empty() {
            return Move::NONE.0;
        }
        let n = moves.len();
        let total_weight: usize = (1..=n).sum();
        let mut pick = rand::thread_rng().gen_range(0..total_weight);
        for (i, mv) in moves.iter().enumerate() {
            let weight = n - i;
            if pick < weight {
                return mv.0;
            }
            pick -= weight;
        }
        moves[0].0
    }

    /// Runs one search and returns every move considered at the root paired
    /// with its SAN rendering.
    pub fn suggested_moves(&mut self) -> Vec<(u32, String)> {
        let moves = self.searcher.get_move_list(&mut self.board);
        moves
            .into_iter()
            .filter(|m| !m.is_none())
            .map(|m| (m.0, san::to_san(&self.board, m)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_board_resets_to_start_position() {
        let mut engine = Engine::new_engine(Board::new());
        engine.make_move_xy(4, 6, 4, 4);
        engine.init_board();
        assert_eq!(engine.board().zobrist_key(), Board::new().zobrist_key());
    }

    #[test]
    fn make_move_xy_converts_screen_coordinates() {
        let mut engine = Engine::new_engine(Board::new());
        // e2 is (x=4, y=6) with y=0 at the top row; e4 is (x=4, y=4).
        assert!(engine.make_move_xy(4, 6, 4, 4));
        assert_eq!(engine.get(28), 'P');
    }

    #[test]
    fn best_engine_move_is_none_when_checkmated() {
        let mut engine = Engine::new_engine(Board::new());
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let mv = engine.board.parse_coordinate_move(text).unwrap();
            engine.board.make(mv);
        }
        assert_eq!(engine.best_engine_move(), Move::NONE.0);
        assert!(engine.black_wins());
    }

    #[test]
    fn suggested_moves_pair_each_move_with_san() {
        let mut engine = Engine::new_engine(Board::new());
        engine.set_config(EngineConfig {
            max_depth: 2,
            ..EngineConfig::default()
        });
        let suggestions = engine.suggested_moves();
        assert!(!suggestions.is_empty());
    }
}
