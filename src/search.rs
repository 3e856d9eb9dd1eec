//! Iterative-deepening alpha-beta search with PVS, null-move pruning,
//! quiescence search and history-heuristic move ordering.

use crate::board::Board;
use crate::eval::{Evaluator, StandardEvaluator};
use crate::movegen;
use crate::types::{Move, MAX_PLY};

const NULL_MOVE_REDUCTION: i32 = 4;
/// Guards null-move pruning against zugzwang: skip it once the side to move
/// has no more than a minor piece's worth of non-pawn material left.
const NULL_MOVE_MATERIAL_THRESHOLD: i32 = 319;

/// Search state that would otherwise live in module statics: per-side
/// history heuristics, the triangular PV table and the flags that steer
/// move ordering. One context belongs to exactly one `Searcher`, so nested
/// or concurrent searches never share mutable state.
struct SearchContext {
    history: [[[i32; 64]; 64]; 2],
    pv_triangle: Vec<Vec<Move>>,
    pv_length: [usize; MAX_PLY],
    last_pv: Vec<Move>,
    follow_pv: bool,
    allow_null: bool,
    legal_moves: Vec<Move>,
    max_depth: u32,
    enable_null_move: bool,
    quiescence_enabled: bool,
}

impl SearchContext {
    fn new(max_depth: u32, enable_null_move: bool, quiescence_enabled: bool) -> Self {
        SearchContext {
            history: [[[0; 64]; 64]; 2],
            pv_triangle: vec![vec![Move::NONE; MAX_PLY]; MAX_PLY],
            pv_length: [0; MAX_PLY],
            last_pv: Vec::new(),
            follow_pv: false,
            allow_null: true,
            legal_moves: Vec::new(),
            max_depth,
            enable_null_move,
            quiescence_enabled,
        }
    }

    fn reset_pv_triangle(&mut self) {
        for row in &mut self.pv_triangle {
            row.fill(Move::NONE);
        }
        self.pv_length = [0; MAX_PLY];
    }
}

/// Iterative-deepening negamax searcher. Owns a [`SearchContext`] and a
/// pluggable [`Evaluator`], and is reused across positions by calling
/// [`Searcher::best_move`]/[`Searcher::get_move_list`] repeatedly.
pub struct Searcher {
    evaluator: Box<dyn Evaluator>,
    max_depth: u32,
    enable_null_move: bool,
    quiescence_enabled: bool,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Searcher {
            evaluator: Box::new(StandardEvaluator),
            max_depth: 4,
            enable_null_move: true,
            quiescence_enabled: true,
        }
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.max_depth = depth.max(1);
    }

    pub fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluator = evaluator;
    }

    /// Disabling this yields exact alpha-beta semantics (no pruning moves
    /// that null-move search can't refute), at the cost of search speed.
    pub fn set_null_move_enabled(&mut self, enabled: bool) {
        self.enable_null_move = enabled;
    }

    /// Disabling this stops the search at the horizon with a static
    /// evaluation instead of resolving captures in quiescence search.
    pub fn set_quiescence_enabled(&mut self, enabled: bool) {
        self.quiescence_enabled = enabled;
    }

    /// Runs iterative deepening from depth 1 to `max_depth - 1` and returns
    /// the ordered move list captured at the outermost call of the final
    /// iteration (PV move first).
    pub fn get_move_list(&mut self, board: &mut Board) -> Vec<Move> {
        let mut ctx = SearchContext::new(self.max_depth, self.enable_null_move, self.quiescence_enabled);

        for depth in 1..self.max_depth {
            ctx.reset_pv_triangle();
            ctx.follow_pv = !ctx.last_pv.is_empty();
            ctx.allow_null = true;
            self.alpha_beta(
                board,
                &mut ctx,
                i32::MIN + 1,
                i32::MAX - 1,
                depth as i32,
                0,
            );
            ctx.last_pv = ctx.pv_triangle[0][..ctx.pv_length[0]].to_vec();
            log::debug!("depth {depth}: pv {:?}", ctx.last_pv);
        }

        ctx.legal_moves
    }

    /// The first move of [`Searcher::get_move_list`], or [`Move::NONE`] if
    /// the position has none.
    pub fn best_move(&mut self, board: &mut Board) -> Move {
        let moves = self.get_move_list(board);
        moves.first().copied().unwrap_or(Move::NONE)
    }

    fn alpha_beta(
        &self,
        board: &mut Board,
        ctx: &mut SearchContext,
        mut alpha: i32,
        beta: i32,
        depth: i32,
        ply: usize,
    ) -> i32 {
        if ply >= MAX_PLY - 1 {
            return self.evaluator.eval(board);
        }
        ctx.pv_length[ply] = ply;

        if depth <= 0 {
            ctx.follow_pv = false;
            if ctx.quiescence_enabled {
                return self.qsearch(board, ctx, alpha, beta, ply);
            }
            return self.evaluator.eval(board);
        }
        if board.is_end_of_game() {
            ctx.follow_pv = false;
            return self.evaluator.eval(board);
        }

        let side = board.side_to_move();
        let in_check = board.is_check();

        if ctx.enable_null_move
            && ctx.allow_null
            && !ctx.follow_pv
            && board.material_for(side) > NULL_MOVE_MATERIAL_THRESHOLD
            && !in_check
            && ply > 0
        {
            ctx.allow_null = false;
            board.do_null_move();
            let v = -self.alpha_beta(
                board,
                ctx,
                -beta,
                -beta + 1,
                depth - NULL_MOVE_REDUCTION,
                ply + 1,
            );
            board.undo();
            ctx.allow_null = true;
            if v >= beta {
                return v;
            }
        }
        ctx.allow_null = true;

        let mut buf = Vec::with_capacity(crate::types::MAX_PSEUDO_LEGAL_MOVES);
        movegen::generate_pseudo_legal(board, &mut buf);
        let n = buf.len();

        let mut moves_found = 0;
        let mut best_this_ply = Move::NONE;

        for i in 0..n {
            self.promote_best_to_front(ctx, &mut buf, i, depth, ply, side.index());
            if !board.make(buf[i]) {
                continue;
            }

            let v = if moves_found > 0 {
                let mut v = -self.alpha_beta(board, ctx, -alpha - 1, -alpha, depth - 1, ply + 1);
                if alpha < v && v < beta {
                    v = -self.alpha_beta(board, ctx, -beta, -alpha, depth - 1, ply + 1);
                }
                v
            } else {
                -self.alpha_beta(board, ctx, -beta, -alpha, depth - 1, ply + 1)
            };
            board.undo();

            if v >= beta {
                ctx.history[side.index()][buf[i].from() as usize][buf[i].to() as usize] +=
                    depth * depth;
                return beta;
            }
            if v > alpha {
                alpha = v;
                moves_found += 1;
                best_this_ply = buf[i];
                ctx.pv_triangle[ply][ply] = buf[i];
                let (head, tail) = ctx.pv_triangle.split_at_mut(ply + 1);
                let deeper_end = ctx.pv_length[ply + 1];
                if deeper_end > ply + 1 {
                    head[ply][ply + 1..deeper_end].copy_from_slice(&tail[0][ply + 1..deeper_end]);
                }
                ctx.pv_length[ply] = ctx.pv_length[ply + 1];
            }
        }

        if moves_found > 0 && !best_this_ply.is_none() {
            ctx.history[side.index()][best_this_ply.from() as usize]
                [best_this_ply.to() as usize] += depth * depth;
        }

        if ply == 0 && depth == ctx.max_depth as i32 - 1 && n > 0 {
            ctx.legal_moves = buf;
        }

        alpha
    }

    fn qsearch(
        &self,
        board: &mut Board,
        ctx: &mut SearchContext,
        mut alpha: i32,
        beta: i32,
        ply: usize,
    ) -> i32 {
        if ply >= MAX_PLY - 1 {
            return self.evaluator.eval(board);
        }
        ctx.pv_length[ply] = ply;

        if board.is_check() {
            return self.alpha_beta(board, ctx, alpha, beta, 1, ply);
        }

        let stand_pat = self.evaluator.eval(board);
        if stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = Vec::new();
        movegen::generate_captures_and_promotions(board, &mut captures);
        let mut scored: Vec<(i32, Move)> = captures
            .into_iter()
            .map(|m| (board.see(m), m))
            .filter(|(see, _)| *see >= 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, mv) in scored {
            if !board.make(mv) {
                continue;
            }
            let v = -self.qsearch(board, ctx, -beta, -alpha, ply + 1);
            board.undo();
            if v >= beta {
                return v;
            }
            if v > alpha {
                alpha = v;
                ctx.pv_triangle[ply][ply] = mv;
                let (head, tail) = ctx.pv_triangle.split_at_mut(ply + 1);
                let deeper_end = ctx.pv_length[ply + 1];
                if deeper_end > ply + 1 {
                    head[ply][ply + 1..deeper_end].copy_from_slice(&tail[0][ply + 1..deeper_end]);
                }
                ctx.pv_length[ply] = ctx.pv_length[ply + 1];
            }
        }

        alpha
    }

    /// Swaps the best candidate for search order into `buf[next_index]`:
    /// the PV move when following a known principal variation, otherwise
    /// the move with the highest history-heuristic score.
    fn promote_best_to_front(
        &self,
        ctx: &SearchContext,
        buf: &mut [Move],
        next_index: usize,
        depth: i32,
        ply: usize,
        side: usize,
    ) {
        if ctx.follow_pv && depth > 1 && ply < ctx.last_pv.len() {
            let pv_move = ctx.last_pv[ply];
            if let Some(found) = buf[next_index..].iter().position(|&m| m == pv_move) {
                buf.swap(next_index, next_index + found);
                return;
            }
        }

        let mut best_index = next_index;
        let mut best_score = i32::MIN;
        for (offset, mv) in buf[next_index..].iter().enumerate() {
            let score = ctx.history[side][mv.from() as usize][mv.to() as usize];
            if score > best_score {
                best_score = score;
                best_index = next_index + offset;
            }
        }
        buf.swap(next_index, best_index);
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn finds_mate_in_one() {
        let mut board =
            Board::from_fen("6k1/5ppp/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let mut searcher = Searcher::new();
        searcher.set_depth(3);
        let mv = searcher.best_move(&mut board);
        assert!(!mv.is_none());
        let mut scratch = board.clone();
        scratch.make(mv);
        assert!(scratch.is_check() || scratch.is_mate());
    }

    #[test]
    fn returns_no_move_when_checkmated() {
        let mut board = Board::new();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let m = board.parse_coordinate_move(text).unwrap();
            board.make(m);
        }
        let mut searcher = Searcher::new();
        searcher.set_depth(2);
        assert!(searcher.best_move(&mut board).is_none());
    }

    #[test]
    fn disabling_quiescence_stops_at_the_horizon_instead_of_resolving_captures() {
        // A position with a hanging bishop on c4, reachable at the search
        // horizon: with quiescence disabled the search must still terminate
        // cleanly on the static evaluation rather than recurse into qsearch.
        let mut board =
            Board::from_fen("rnbqk1nr/pppp1ppp/8/4p3/1bB1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 0 3")
                .unwrap();

        let mut searcher = Searcher::new();
        searcher.set_depth(2);
        searcher.set_quiescence_enabled(false);
        let mv = searcher.best_move(&mut board);
        assert!(!mv.is_none());

        let mut legal = Vec::new();
        movegen::generate_legal(&mut board, &mut legal);
        assert!(legal.contains(&mv));
    }

    #[test]
    fn disabling_null_move_still_finds_mate_in_one() {
        let mut board =
            Board::from_fen("6k1/5ppp/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let mut searcher = Searcher::new();
        searcher.set_depth(3);
        searcher.set_null_move_enabled(false);
        let mv = searcher.best_move(&mut board);
        assert!(!mv.is_none());
        let mut scratch = board.clone();
        scratch.make(mv);
        assert!(scratch.is_check() || scratch.is_mate());
    }
}
