//! Position state: bitboards, make/unmake, status predicates and SEE.

pub mod error;
mod fen;
mod history;
mod see;

pub use error::{FenError, MoveParseError};
pub use fen::START_FEN;
pub use history::{History, Snapshot};

use crate::geometry::{algebraic_to_square, square_to_algebraic};
use crate::magic;
use crate::types::{Color, Move, MoveFlag, PieceType};
use crate::zobrist;

/// Corner/king squares touched by castling, shared by make() and MoveGen.
pub(crate) mod castle_squares {
    pub const WHITE_KING_FROM: usize = 4;
    pub const WHITE_KING_TO_K: usize = 6;
    pub const WHITE_KING_TO_Q: usize = 2;
    pub const WHITE_ROOK_K_FROM: usize = 7;
    pub const WHITE_ROOK_K_TO: usize = 5;
    pub const WHITE_ROOK_Q_FROM: usize = 0;
    pub const WHITE_ROOK_Q_TO: usize = 3;

    pub const BLACK_KING_FROM: usize = 60;
    pub const BLACK_KING_TO_K: usize = 62;
    pub const BLACK_KING_TO_Q: usize = 58;
    pub const BLACK_ROOK_K_FROM: usize = 63;
    pub const BLACK_ROOK_K_TO: usize = 61;
    pub const BLACK_ROOK_Q_FROM: usize = 56;
    pub const BLACK_ROOK_Q_TO: usize = 59;
}
use castle_squares::*;

/// A chess position: piece placement, derived occupancy caches, game-state
/// scalars and a bounded history ring for make/unmake and repetition
/// detection.
#[derive(Clone)]
pub struct Board {
    pieces: [[u64; 6]; 2],
    white_all: u64,
    black_all: u64,
    all_pieces: u64,

    white_to_move: bool,
    en_passant_square: i32,
    move_number: u32,
    fifty_move_counter: u32,
    castle_wk: bool,
    castle_wq: bool,
    castle_bk: bool,
    castle_bq: bool,
    has_castled_white: bool,
    has_castled_black: bool,
    zobrist_key: u64,

    history: History,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("white_to_move", &self.white_to_move)
            .field("move_number", &self.move_number)
            .field("zobrist_key", &self.zobrist_key)
            .field("fen", &self.to_fen())
            .finish()
    }
}

/// The outcome of checking whether the side to move has any response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl Board {
    /// An empty board with no pieces, white to move, no castling rights.
    /// Only useful as a FEN-parsing scratch value; prefer [`Board::new`].
    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[0; 6]; 2],
            white_all: 0,
            black_all: 0,
            all_pieces: 0,
            white_to_move: true,
            en_passant_square: -1,
            move_number: 0,
            fifty_move_counter: 0,
            castle_wk: false,
            castle_wq: false,
            castle_bk: false,
            castle_bq: false,
            has_castled_white: false,
            has_castled_black: false,
            zobrist_key: 0,
            history: History::new(),
        }
    }

    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Board::from_fen(START_FEN).expect("starting FEN is well-formed")
    }

    pub(crate) fn recompute_aggregates(&mut self) {
        self.white_all = self.pieces[Color::White.index()].iter().fold(0, |a, b| a | b);
        self.black_all = self.pieces[Color::Black.index()].iter().fold(0, |a, b| a | b);
        self.all_pieces = self.white_all | self.black_all;
    }

    /// Writes the current state into `history` at `move_number` so it can be
    /// restored later; called once by [`Board::from_fen`] and before every
    /// mutation in [`Board::make`]/[`Board::do_null_move`].
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pieces: self.pieces,
            white_all: self.white_all,
            black_all: self.black_all,
            all_pieces: self.all_pieces,
            white_to_move: self.white_to_move,
            en_passant_square: self.en_passant_square,
            fifty_move_counter: self.fifty_move_counter,
            castle_wk: self.castle_wk,
            castle_wq: self.castle_wq,
            castle_bk: self.castle_bk,
            castle_bq: self.castle_bq,
            has_castled_white: self.has_castled_white,
            has_castled_black: self.has_castled_black,
            zobrist_key: self.zobrist_key,
        }
    }

    fn restore(&mut self, snap: Snapshot) {
        self.pieces = snap.pieces;
        self.white_all = snap.white_all;
        self.black_all = snap.black_all;
        self.all_pieces = snap.all_pieces;
        self.white_to_move = snap.white_to_move;
        self.en_passant_square = snap.en_passant_square;
        self.fifty_move_counter = snap.fifty_move_counter;
        self.castle_wk = snap.castle_wk;
        self.castle_wq = snap.castle_wq;
        self.castle_bk = snap.castle_bk;
        self.castle_bq = snap.castle_bq;
        self.has_castled_white = snap.has_castled_white;
        self.has_castled_black = snap.has_castled_black;
        self.zobrist_key = snap.zobrist_key;
    }

    /// Records the construction-time state at index 0 so `undo()` has
    /// somewhere to land after a single `make()`/`undo()` pair.
    fn seed_history(&mut self) {
        let snap = self.snapshot();
        self.history.record(self.move_number, snap);
    }

    // --- accessors used by movegen/search/eval, which live outside this module ---

    #[inline]
    #[must_use]
    pub fn pieces_of(&self, color: Color, piece_type: PieceType) -> u64 {
        self.pieces[color.index()][piece_type as usize]
    }

    #[inline]
    #[must_use]
    pub fn occupancy_of(&self, color: Color) -> u64 {
        match color {
            Color::White => self.white_all,
            Color::Black => self.black_all,
        }
    }

    #[inline]
    #[must_use]
    pub fn all_pieces(&self) -> u64 {
        self.all_pieces
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    #[inline]
    #[must_use]
    pub fn en_passant_square(&self) -> i32 {
        self.en_passant_square
    }

    #[inline]
    #[must_use]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    #[inline]
    #[must_use]
    pub fn fifty_move_counter(&self) -> u32 {
        self.fifty_move_counter
    }

    #[inline]
    #[must_use]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    #[inline]
    #[must_use]
    pub fn can_castle_kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.castle_wk,
            Color::Black => self.castle_bk,
        }
    }

    #[inline]
    #[must_use]
    pub fn can_castle_queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.castle_wq,
            Color::Black => self.castle_bq,
        }
    }

    #[inline]
    #[must_use]
    pub fn has_castled(&self, color: Color) -> bool {
        match color {
            Color::White => self.has_castled_white,
            Color::Black => self.has_castled_black,
        }
    }

    /// The piece (if any) occupying `sq`, regardless of color.
    #[must_use]
    pub fn piece_at(&self, sq: usize) -> Option<(Color, PieceType)> {
        let bit = 1u64 << sq;
        for color in [Color::White, Color::Black] {
            for piece_type in PieceType::ALL {
                if self.pieces[color.index()][piece_type as usize] & bit != 0 {
                    return Some((color, piece_type));
                }
            }
        }
        None
    }

    /// `get(square_index)` from the engine-facing API: a FEN-style letter or
    /// a space for an empty square. Out-of-range indices return a space.
    #[must_use]
    pub fn get_char(&self, sq: i32) -> char {
        if !(0..64).contains(&sq) {
            return ' ';
        }
        match self.piece_at(sq as usize) {
            Some((Color::White, pt)) => pt.to_white_char(),
            Some((Color::Black, pt)) => pt.to_black_char(),
            None => ' ',
        }
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> usize {
        self.pieces[color.index()][PieceType::King as usize].trailing_zeros() as usize
    }

    fn attacker_boards_for(&self, attacker: Color) -> magic::AttackerBoards {
        let pawns = self.pieces[attacker.index()][PieceType::Pawn as usize];
        magic::AttackerBoards {
            white_pawns: if attacker == Color::White { pawns } else { 0 },
            black_pawns: if attacker == Color::Black { pawns } else { 0 },
            knights: self.pieces[attacker.index()][PieceType::Knight as usize],
            bishops_queens: self.pieces[attacker.index()][PieceType::Bishop as usize]
                | self.pieces[attacker.index()][PieceType::Queen as usize],
            rooks_queens: self.pieces[attacker.index()][PieceType::Rook as usize]
                | self.pieces[attacker.index()][PieceType::Queen as usize],
            kings: self.pieces[attacker.index()][PieceType::King as usize],
            occupancy: self.all_pieces,
        }
    }

    /// True iff any piece belonging to `by` attacks `sq`.
    #[must_use]
    pub fn is_square_attacked(&self, sq: usize, by: Color) -> bool {
        magic::index_attackers(sq, &self.attacker_boards_for(by)) != 0
    }

    #[must_use]
    pub fn is_check(&self) -> bool {
        let side = self.side_to_move();
        self.is_square_attacked(self.king_square(side), side.opposite())
    }

    /// Generates legal moves once and classifies the position. Shared by
    /// [`Board::is_mate`], [`Board::is_draw`] and the searcher's
    /// end-of-game check so each only pays for one legality pass.
    #[must_use]
    pub fn game_status(&mut self) -> GameStatus {
        if self.fifty_move_counter >= 50 {
            return GameStatus::FiftyMoveRule;
        }
        if self.is_only_kings_remaining() {
            return GameStatus::InsufficientMaterial;
        }
        if self.is_repeated_at_least_twice() {
            return GameStatus::ThreefoldRepetition;
        }

        let mut buf = Vec::with_capacity(crate::types::MAX_PSEUDO_LEGAL_MOVES);
        crate::movegen::generate_legal(self, &mut buf);
        if !buf.is_empty() {
            return GameStatus::Ongoing;
        }
        if self.is_check() {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }

    fn is_only_kings_remaining(&self) -> bool {
        self.all_pieces
            == self.pieces[Color::White.index()][PieceType::King as usize]
                | self.pieces[Color::Black.index()][PieceType::King as usize]
    }

    fn is_repeated_at_least_twice(&self) -> bool {
        if self.move_number < 2 {
            return false;
        }
        let start = self.move_number.saturating_sub(self.fifty_move_counter);
        let end = self.move_number - 2;
        if start > end {
            return false;
        }
        let mut occurrences = 0;
        let mut i = start;
        while i <= end {
            if self.history.key_at(i) == self.zobrist_key {
                occurrences += 1;
            }
            i += 2;
        }
        occurrences >= 2
    }

    #[must_use]
    pub fn is_mate(&mut self) -> bool {
        self.game_status() == GameStatus::Checkmate
    }

    #[must_use]
    pub fn is_draw(&mut self) -> bool {
        matches!(
            self.game_status(),
            GameStatus::Stalemate
                | GameStatus::FiftyMoveRule
                | GameStatus::ThreefoldRepetition
                | GameStatus::InsufficientMaterial
        )
    }

    #[must_use]
    pub fn is_end_of_game(&mut self) -> bool {
        self.game_status().is_over()
    }

    /// Material-balance pattern used by the evaluator to pick between its
    /// middlegame and endgame feature sets.
    #[must_use]
    pub fn is_end_game(&self) -> bool {
        [Color::White, Color::Black]
            .into_iter()
            .all(|color| self.side_is_endgame_material(color))
    }

    fn side_is_endgame_material(&self, color: Color) -> bool {
        let queens = self.pieces[color.index()][PieceType::Queen as usize].count_ones();
        let rooks = self.pieces[color.index()][PieceType::Rook as usize].count_ones();
        let bishops = self.pieces[color.index()][PieceType::Bishop as usize].count_ones();
        let knights = self.pieces[color.index()][PieceType::Knight as usize].count_ones();

        (queens == 0 && rooks <= 1)
            || (queens == 1 && knights == 1 && bishops == 0 && rooks == 0)
            || (queens == 1 && bishops == 1 && knights == 0 && rooks == 0)
    }

    /// Applies `mv`, returning `false` (and leaving the board unchanged) if
    /// it is illegal. Follows the ten-step procedure: snapshot, advance
    /// counters, validate the source square, resolve captures, dispatch by
    /// piece, recompute aggregates, update castling rights, reject
    /// self-check, then flip the side to move.
    pub fn make(&mut self, mv: Move) -> bool {
        let snap = self.snapshot();
        self.history.record(self.move_number, snap);
        self.move_number += 1;
        self.fifty_move_counter += 1;

        let mover = self.side_to_move();
        let from = mv.from() as usize;
        let to = mv.to() as usize;
        let from_bit = 1u64 << from;
        let to_bit = 1u64 << to;

        if self.pieces[mover.index()][mv.piece_type() as usize] & from_bit == 0 {
            self.restore(snap);
            self.move_number -= 1;
            self.fifty_move_counter -= 1;
            return false;
        }

        let enemy = mover.opposite();

        if mv.flag() == MoveFlag::EnPassant {
            let captured_sq = match mover {
                Color::White => to - 8,
                Color::Black => to + 8,
            };
            self.pieces[enemy.index()][PieceType::Pawn as usize] &= !(1u64 << captured_sq);
            self.zobrist_key ^= zobrist::key_for(captured_sq, PieceType::Pawn, enemy);
            self.fifty_move_counter = 0;
        } else if mv.is_capture() {
            for piece_type in PieceType::ALL {
                if self.pieces[enemy.index()][piece_type as usize] & to_bit != 0 {
                    self.pieces[enemy.index()][piece_type as usize] &= !to_bit;
                    self.zobrist_key ^= zobrist::key_for(to, piece_type, enemy);
                    break;
                }
            }
            self.fifty_move_counter = 0;
        }

        if self.en_passant_square >= 0 {
            let file = crate::geometry::file_of(self.en_passant_square as usize);
            self.zobrist_key ^= zobrist::en_passant_file_key(file);
        }
        self.en_passant_square = -1;

        match mv.piece_type() {
            PieceType::Pawn => {
                self.fifty_move_counter = 0;
                let is_double_push = from.abs_diff(to) == 16;
                if is_double_push {
                    let crossed = match mover {
                        Color::White => from + 8,
                        Color::Black => from - 8,
                    };
                    self.en_passant_square = crossed as i32;
                    self.zobrist_key ^=
                        zobrist::en_passant_file_key(crate::geometry::file_of(crossed));
                }
                if let Some(promoted) = mv.flag().promotion_piece() {
                    self.pieces[mover.index()][PieceType::Pawn as usize] &= !from_bit;
                    self.pieces[mover.index()][promoted as usize] |= to_bit;
                    self.zobrist_key ^= zobrist::key_for(from, PieceType::Pawn, mover);
                    self.zobrist_key ^= zobrist::key_for(to, promoted, mover);
                } else {
                    self.pieces[mover.index()][PieceType::Pawn as usize] ^= from_bit | to_bit;
                    self.zobrist_key ^= zobrist::key_for_move(from, to, PieceType::Pawn, mover);
                }
            }
            PieceType::King => {
                match mv.flag() {
                    MoveFlag::CastleK => {
                        let (rook_from, rook_to, rook_pt) = (
                            if mover == Color::White {
                                WHITE_ROOK_K_FROM
                            } else {
                                BLACK_ROOK_K_FROM
                            },
                            if mover == Color::White {
                                WHITE_ROOK_K_TO
                            } else {
                                BLACK_ROOK_K_TO
                            },
                            PieceType::Rook,
                        );
                        self.pieces[mover.index()][rook_pt as usize] ^=
                            (1u64 << rook_from) | (1u64 << rook_to);
                        self.zobrist_key ^=
                            zobrist::key_for_move(rook_from, rook_to, rook_pt, mover);
                        self.set_has_castled(mover);
                    }
                    MoveFlag::CastleQ => {
                        let (rook_from, rook_to) = (
                            if mover == Color::White {
                                WHITE_ROOK_Q_FROM
                            } else {
                                BLACK_ROOK_Q_FROM
                            },
                            if mover == Color::White {
                                WHITE_ROOK_Q_TO
                            } else {
                                BLACK_ROOK_Q_TO
                            },
                        );
                        self.pieces[mover.index()][PieceType::Rook as usize] ^=
                            (1u64 << rook_from) | (1u64 << rook_to);
                        self.zobrist_key ^=
                            zobrist::key_for_move(rook_from, rook_to, PieceType::Rook, mover);
                        self.set_has_castled(mover);
                    }
                    _ => {}
                }
                self.pieces[mover.index()][PieceType::King as usize] ^= from_bit | to_bit;
                self.zobrist_key ^= zobrist::key_for_move(from, to, PieceType::King, mover);
            }
            piece_type => {
                self.pieces[mover.index()][piece_type as usize] ^= from_bit | to_bit;
                self.zobrist_key ^= zobrist::key_for_move(from, to, piece_type, mover);
            }
        }

        self.recompute_aggregates();

        self.update_castling_rights(from, to);

        if self.is_square_attacked(self.king_square(mover), enemy) {
            self.restore(snap);
            self.move_number -= 1;
            self.fifty_move_counter -= 1;
            return false;
        }

        self.white_to_move = !self.white_to_move;
        self.zobrist_key ^= zobrist::side_to_move_key();
        true
    }

    fn set_has_castled(&mut self, color: Color) {
        match color {
            Color::White => self.has_castled_white = true,
            Color::Black => self.has_castled_black = true,
        }
    }

    fn update_castling_rights(&mut self, from: usize, to: usize) {
        let touches = |sq: usize| from == sq || to == sq;
        if self.castle_wk && (touches(WHITE_KING_FROM) || touches(WHITE_ROOK_K_FROM)) {
            self.castle_wk = false;
            self.zobrist_key ^= zobrist::castling_key(zobrist::CastleRight::WhiteKingside);
        }
        if self.castle_wq && (touches(WHITE_KING_FROM) || touches(WHITE_ROOK_Q_FROM)) {
            self.castle_wq = false;
            self.zobrist_key ^= zobrist::castling_key(zobrist::CastleRight::WhiteQueenside);
        }
        if self.castle_bk && (touches(BLACK_KING_FROM) || touches(BLACK_ROOK_K_FROM)) {
            self.castle_bk = false;
            self.zobrist_key ^= zobrist::castling_key(zobrist::CastleRight::BlackKingside);
        }
        if self.castle_bq && (touches(BLACK_KING_FROM) || touches(BLACK_ROOK_Q_FROM)) {
            self.castle_bq = false;
            self.zobrist_key ^= zobrist::castling_key(zobrist::CastleRight::BlackQueenside);
        }
    }

    /// Restores the snapshot recorded before the last `make()`/`do_null_move()`.
    /// A no-op at the initial `move_number`.
    pub fn undo(&mut self) {
        if self.move_number == 0 {
            return;
        }
        self.move_number -= 1;
        let snap = self.history.get(self.move_number);
        self.restore(snap);
    }

    /// Passes the turn without moving a piece, used by the searcher's
    /// null-move pruning. Reverted with the ordinary [`Board::undo`].
    pub fn do_null_move(&mut self) {
        let snap = self.snapshot();
        self.history.record(self.move_number, snap);
        self.move_number += 1;
        if self.en_passant_square >= 0 {
            let file = crate::geometry::file_of(self.en_passant_square as usize);
            self.zobrist_key ^= zobrist::en_passant_file_key(file);
            self.en_passant_square = -1;
        }
        self.white_to_move = !self.white_to_move;
        self.zobrist_key ^= zobrist::side_to_move_key();
    }

    /// Total material (in [`see::piece_value`] units, kings excluded) owned
    /// by `color` — used by the searcher's null-move zugzwang guard.
    #[must_use]
    pub fn material_for(&self, color: Color) -> i32 {
        PieceType::ALL
            .into_iter()
            .filter(|pt| *pt != PieceType::King)
            .map(|pt| {
                see::piece_value(pt) * self.pieces[color.index()][pt as usize].count_ones() as i32
            })
            .sum()
    }

    /// Parses a 4-5 character coordinate move (e.g. `"e2e4"`, `"e7e8q"`)
    /// against the legal moves in this position.
    pub fn parse_coordinate_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        if text.len() < 4 || text.len() > 5 {
            return Err(MoveParseError::BadLength { len: text.len() });
        }
        let from = algebraic_to_square(&text[0..2]);
        let to = algebraic_to_square(&text[2..4]);
        if from < 0 {
            return Err(MoveParseError::BadSquare {
                found: text[0..2].to_string(),
            });
        }
        if to < 0 {
            return Err(MoveParseError::BadSquare {
                found: text[2..4].to_string(),
            });
        }
        let promotion = if text.len() == 5 {
            let c = text.as_bytes()[4] as char;
            Some(match c.to_ascii_lowercase() {
                'q' => PieceType::Queen,
                'r' => PieceType::Rook,
                'b' => PieceType::Bishop,
                'n' => PieceType::Knight,
                _ => return Err(MoveParseError::BadPromotion { found: c }),
            })
        } else {
            None
        };

        let mut buf = Vec::with_capacity(crate::types::MAX_PSEUDO_LEGAL_MOVES);
        crate::movegen::generate_legal(self, &mut buf);
        buf.into_iter()
            .find(|m| {
                m.from() as i32 == from
                    && m.to() as i32 == to
                    && promotion.map_or(true, |p| m.flag().promotion_piece() == Some(p))
            })
            .ok_or(MoveParseError::NotLegal)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen;

    #[test]
    fn make_undo_round_trips_every_field() {
        let mut board = Board::new();
        let mut buf = Vec::new();
        movegen::generate_legal(&mut board, &mut buf);
        let before = board.snapshot();
        for mv in buf {
            assert!(board.make(mv));
            board.undo();
            let after = board.snapshot();
            assert_eq!(before.pieces, after.pieces);
            assert_eq!(before.zobrist_key, after.zobrist_key);
            assert_eq!(before.white_to_move, after.white_to_move);
        }
    }

    #[test]
    fn zobrist_key_matches_from_scratch_recomputation_after_make() {
        let mut board = Board::new();
        let mut buf = Vec::new();
        movegen::generate_legal(&mut board, &mut buf);
        let mv = buf[0];
        assert!(board.make(mv));
        assert_eq!(board.zobrist_key, board.compute_zobrist_from_scratch());
    }

    #[test]
    fn aggregates_stay_consistent_with_constituent_boards() {
        let board = Board::new();
        assert_eq!(
            board.white_all,
            board.pieces[Color::White.index()].iter().fold(0, |a, b| a | b)
        );
        assert_eq!(board.all_pieces, board.white_all | board.black_all);
        assert_eq!(board.white_all & board.black_all, 0);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::new();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let mv = board.parse_coordinate_move(text).unwrap();
            assert!(board.make(mv));
        }
        assert!(board.is_mate());
    }

    #[test]
    fn castling_clears_both_rights_and_moves_rook() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = board.parse_coordinate_move("e1g1").unwrap();
        assert_eq!(mv.flag(), MoveFlag::CastleK);
        assert!(board.make(mv));
        assert!(!board.can_castle_kingside(Color::White));
        assert!(!board.can_castle_queenside(Color::White));
        assert_eq!(board.piece_at(5), Some((Color::White, PieceType::Rook)));
        assert_eq!(board.piece_at(6), Some((Color::White, PieceType::King)));
    }

    #[test]
    fn en_passant_capture_removes_pawn_and_clears_square() {
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let mv = board.parse_coordinate_move("e5f6").unwrap();
        assert_eq!(mv.flag(), MoveFlag::EnPassant);
        assert!(board.make(mv));
        assert_eq!(board.piece_at(algebraic_to_square("f5") as usize), None);
        assert_eq!(board.en_passant_square, -1);
    }

    #[test]
    fn threefold_repetition_is_detected() {
        let mut board = Board::new();
        for text in [
            "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
        ] {
            let mv = board.parse_coordinate_move(text).unwrap();
            assert!(board.make(mv));
        }
        assert!(board.is_draw());
    }
}
