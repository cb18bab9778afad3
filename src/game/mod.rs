//! Game session: owned move history with snapshots, apply/undo, and
//! terminal-state detection.
//!
//! A [`GameSession`] is the only mutable object in the crate. It owns the
//! initial [`Position`], an ordered list of `(Move, resulting Position)`
//! pairs, and a repetition table keyed by position hash. Position snapshots
//! are retained for the life of the session, which is what makes undo O(1)
//! and threefold counting a table lookup. Mutation is single-writer by
//! `&mut self`; callers serialize concurrent use.

mod status;

use std::collections::HashMap;
use std::fmt;

use crate::position::{Move, Position, SanError, UciParseError};

pub use status::GameStatus;

/// Session-level move errors, returned by apply/undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Input parsed as neither SAN nor UCI
    Parse { notation: String },
    /// Syntactically valid move that is not legal in the current position
    Illegal { notation: String },
    /// SAN pattern matching more than one legal move
    Ambiguous { notation: String },
    /// Undo requested with no moves played
    NoHistory,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Parse { notation } => {
                write!(f, "'{notation}' is neither SAN nor UCI move text")
            }
            MoveError::Illegal { notation } => {
                write!(f, "Move '{notation}' is not legal in this position")
            }
            MoveError::Ambiguous { notation } => {
                write!(f, "Move '{notation}' matches more than one legal move")
            }
            MoveError::NoHistory => write!(f, "No moves to undo"),
        }
    }
}

impl std::error::Error for MoveError {}

/// One played ply: the move and the position it produced.
#[derive(Clone, Debug)]
pub struct PlyRecord {
    mv: Move,
    position: Position,
}

impl PlyRecord {
    #[must_use]
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }
}

/// Occurrence counts of position hashes across the session's snapshots.
#[derive(Clone, Debug, Default)]
struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    fn increment(&mut self, hash: u64) {
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    fn decrement(&mut self, hash: u64) {
        if let Some(count) = self.counts.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&hash);
            }
        }
    }
}

/// A two-player game in progress.
#[derive(Debug)]
pub struct GameSession {
    initial: Position,
    history: Vec<PlyRecord>,
    repetitions: RepetitionTable,
}

impl GameSession {
    /// Start a new game from the standard initial position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    /// Start a game from an arbitrary initial position.
    #[must_use]
    pub fn from_position(initial: Position) -> Self {
        let mut repetitions = RepetitionTable::default();
        repetitions.increment(initial.hash());
        GameSession {
            initial,
            history: Vec::new(),
            repetitions,
        }
    }

    /// The current position (read-only snapshot for rendering).
    #[must_use]
    pub fn current(&self) -> &Position {
        self.history.last().map_or(&self.initial, |r| &r.position)
    }

    /// The position the session started from.
    #[must_use]
    pub fn initial(&self) -> &Position {
        &self.initial
    }

    /// Played plies in order.
    #[must_use]
    pub fn history(&self) -> &[PlyRecord] {
        &self.history
    }

    /// Played moves in order.
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.history.iter().map(PlyRecord::mv)
    }

    #[must_use]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Apply a move that must come from `current().legal_moves()`.
    ///
    /// On a precondition violation the session is left unchanged and
    /// `MoveError::Illegal` is returned.
    pub fn apply(&mut self, mv: Move) -> Result<&Position, MoveError> {
        if !self.current().legal_moves().contains(&mv) {
            return Err(MoveError::Illegal {
                notation: mv.to_string(),
            });
        }

        let next = self.current().apply(&mv);
        log::debug!("applied {mv}, now {} to move", next.side_to_move());
        self.repetitions.increment(next.hash());
        self.history.push(PlyRecord { mv, position: next });
        Ok(self.current())
    }

    /// Apply a move given as text, trying SAN first and then UCI.
    ///
    /// This is an ordered fallback with tagged results, not an exception
    /// cascade: SAN ambiguity is surfaced immediately, a move that parses in
    /// either notation but is not legal reports `Illegal`, and text that
    /// parses as neither reports `Parse`.
    pub fn apply_text(&mut self, text: &str) -> Result<&Position, MoveError> {
        let san_err = match self.current().parse_san(text) {
            Ok(mv) => return self.apply(mv),
            Err(SanError::AmbiguousMove { .. }) => {
                return Err(MoveError::Ambiguous {
                    notation: text.to_string(),
                })
            }
            Err(err) => err,
        };

        match self.current().find_uci_move(text) {
            Ok(mv) => self.apply(mv),
            Err(UciParseError::IllegalMove { .. }) => Err(MoveError::Illegal {
                notation: text.to_string(),
            }),
            Err(_) => {
                // Neither notation parsed; if the SAN syntax was fine the
                // input named a move that simply is not available.
                if matches!(san_err, SanError::NoMatchingMove { .. }) {
                    Err(MoveError::Illegal {
                        notation: text.to_string(),
                    })
                } else {
                    Err(MoveError::Parse {
                        notation: text.to_string(),
                    })
                }
            }
        }
    }

    /// Undo the last ply, restoring the prior position snapshot in O(1).
    ///
    /// Exact inverse of [`GameSession::apply`]: the repetition table entry
    /// added by the move is removed along with the snapshot.
    pub fn undo(&mut self) -> Result<&Position, MoveError> {
        let record = self.history.pop().ok_or(MoveError::NoHistory)?;
        self.repetitions.decrement(record.position.hash());
        log::debug!("undid {}", record.mv);
        Ok(self.current())
    }

    /// How many times the current position has occurred in this session.
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(self.current().hash())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new()
    }
}
