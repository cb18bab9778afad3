//! UCI long-algebraic move notation (`e2e4`, `e7e8q`).
//!
//! [`parse_uci`] is syntax-only; resolving the parsed text to a concrete
//! [`Move`] happens against a position's legal moves via
//! [`Position::find_uci_move`]. Encoding is the `Display` impl on [`Move`].

use super::error::UciParseError;
use super::{file_to_index, rank_to_index, Move, Piece, Position, Square};

/// A syntactically valid UCI move, not yet checked for legality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

/// Parse UCI move text. Checks syntax only: four square characters plus an
/// optional promotion letter.
pub fn parse_uci(uci: &str) -> Result<UciMove, UciParseError> {
    let chars: Vec<char> = uci.chars().collect();
    if chars.len() < 4 || chars.len() > 5 {
        return Err(UciParseError::InvalidLength { len: chars.len() });
    }

    if !('a'..='h').contains(&chars[0])
        || !('1'..='8').contains(&chars[1])
        || !('a'..='h').contains(&chars[2])
        || !('1'..='8').contains(&chars[3])
    {
        return Err(UciParseError::InvalidSquare {
            notation: uci.to_string(),
        });
    }

    let from = Square(rank_to_index(chars[1]), file_to_index(chars[0]));
    let to = Square(rank_to_index(chars[3]), file_to_index(chars[2]));

    let promotion = if chars.len() == 5 {
        let piece = Piece::from_char(chars[4])
            .ok_or(UciParseError::InvalidPromotion { char: chars[4] })?;
        if matches!(piece, Piece::Pawn | Piece::King) {
            return Err(UciParseError::InvalidPromotion { char: chars[4] });
        }
        Some(piece)
    } else {
        None
    };

    Ok(UciMove {
        from,
        to,
        promotion,
    })
}

impl Position {
    /// Resolve UCI move text against this position's legal moves.
    ///
    /// A promotion written without its trailing letter (`a7a8`) resolves to
    /// the queen promotion.
    pub fn find_uci_move(&self, uci: &str) -> Result<Move, UciParseError> {
        let parsed = parse_uci(uci)?;
        let legal_moves = self.legal_moves();

        for m in legal_moves.iter() {
            if m.from() == parsed.from && m.to() == parsed.to && m.promotion() == parsed.promotion
            {
                return Ok(*m);
            }
        }

        if parsed.promotion.is_none() {
            for m in legal_moves.iter() {
                if m.from() == parsed.from
                    && m.to() == parsed.to
                    && m.promotion() == Some(Piece::Queen)
                {
                    return Ok(*m);
                }
            }
        }

        Err(UciParseError::IllegalMove {
            notation: uci.to_string(),
        })
    }
}
