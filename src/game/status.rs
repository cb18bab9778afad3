//! Game outcome classification.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::Color;

use super::GameSession;

/// Classification of a session's current state.
///
/// Only checkmate, stalemate, and insufficient material are automatic
/// terminal states. The fifty-move and threefold statuses are *claims*
/// available to the players, matching over-the-board rules; the engine never
/// ends a game on them by itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    DrawInsufficientMaterial,
    FiftyMoveClaimable,
    ThreefoldClaimable,
}

impl GameStatus {
    /// True for states that end the game outright.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate { .. }
                | GameStatus::Stalemate
                | GameStatus::DrawInsufficientMaterial
        )
    }

    /// The PGN result token for this state (`*` while the game runs,
    /// including claimable-draw states).
    #[must_use]
    pub fn result_token(self) -> &'static str {
        match self {
            GameStatus::Checkmate {
                winner: Color::White,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "0-1",
            GameStatus::Stalemate | GameStatus::DrawInsufficientMaterial => "1/2-1/2",
            GameStatus::Ongoing
            | GameStatus::FiftyMoveClaimable
            | GameStatus::ThreefoldClaimable => "*",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DrawInsufficientMaterial => write!(f, "draw by insufficient material"),
            GameStatus::FiftyMoveClaimable => write!(f, "draw claimable (fifty-move rule)"),
            GameStatus::ThreefoldClaimable => write!(f, "draw claimable (threefold repetition)"),
        }
    }
}

impl GameSession {
    /// Classify the current state from the position and its legal moves.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let position = self.current();
        let side = position.side_to_move();

        if position.legal_moves().is_empty() {
            return if position.is_in_check(side) {
                GameStatus::Checkmate {
                    winner: side.opponent(),
                }
            } else {
                GameStatus::Stalemate
            };
        }

        if position.is_insufficient_material() {
            return GameStatus::DrawInsufficientMaterial;
        }

        if position.halfmove_clock() >= 100 {
            return GameStatus::FiftyMoveClaimable;
        }

        if self.repetition_count() >= 3 {
            return GameStatus::ThreefoldClaimable;
        }

        GameStatus::Ongoing
    }
}
