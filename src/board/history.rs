//! Array-indexed position history.
//!
//! The maximum game length is bounded ([`crate::types::MAX_GAME_LENGTH`]), so
//! the history is a fixed-size ring indexed directly by `move_number` rather
//! than a growable stack of snapshots. This gives O(1) undo with no heap
//! traffic on the hot make/unmake path, at the cost of a single fixed
//! allocation made once up front.

use crate::types::MAX_GAME_LENGTH;

/// Every field of [`crate::board::Board`] that make/unmake needs to restore.
/// Snapshots are written *before* a move is applied, so index `n` holds the
/// state as of move number `n`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snapshot {
    pub pieces: [[u64; 6]; 2],
    pub white_all: u64,
    pub black_all: u64,
    pub all_pieces: u64,
    pub white_to_move: bool,
    pub en_passant_square: i32,
    pub fifty_move_counter: u32,
    pub castle_wk: bool,
    pub castle_wq: bool,
    pub castle_bk: bool,
    pub castle_bq: bool,
    pub has_castled_white: bool,
    pub has_castled_black: bool,
    pub zobrist_key: u64,
}

pub struct History {
    snapshots: Box<[Snapshot; MAX_GAME_LENGTH]>,
}

impl History {
    pub fn new() -> Self {
        History {
            snapshots: Box::new([Snapshot::default(); MAX_GAME_LENGTH]),
        }
    }

    /// Writes `snapshot` at `move_number`, wrapping if a game somehow runs
    /// past `MAX_GAME_LENGTH` plies (a debug assertion catches the overrun
    /// in debug builds; see spec §5).
    pub fn record(&mut self, move_number: u32, snapshot: Snapshot) {
        debug_assert!(
            (move_number as usize) < MAX_GAME_LENGTH,
            "game exceeded MAX_GAME_LENGTH plies"
        );
        self.snapshots[move_number as usize % MAX_GAME_LENGTH] = snapshot;
    }

    pub fn get(&self, move_number: u32) -> Snapshot {
        self.snapshots[move_number as usize % MAX_GAME_LENGTH]
    }

    /// The `zobrist_key` recorded at `move_number`, used by threefold
    /// repetition scanning without copying a whole snapshot.
    pub fn key_at(&self, move_number: u32) -> u64 {
        self.snapshots[move_number as usize % MAX_GAME_LENGTH].zobrist_key
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for History {
    fn clone(&self) -> Self {
        History {
            snapshots: self.snapshots.clone(),
        }
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History").finish_non_exhaustive()
    }
}
