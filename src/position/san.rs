//! Standard Algebraic Notation (SAN) support.
//!
//! SAN is the standard human-readable chess notation used in scoresheets,
//! books, and PGN movetext. Examples: "e4", "Nf3", "Bxc6+", "O-O", "e8=Q#"
//!
//! # Examples
//! ```
//! use chess_core::position::Position;
//!
//! let position = Position::new();
//! let mv = position.parse_san("e4").unwrap();
//! assert_eq!(position.to_san(&mv), "e4");
//! ```

use super::error::SanError;
use super::{file_to_index, rank_to_index, Move, Piece, Position, Square};

/// Parsed SAN constraints, not yet resolved against legal moves.
struct SanComponents {
    piece: Piece,
    dest: Square,
    disambig_file: Option<usize>,
    disambig_rank: Option<usize>,
    promotion: Option<Piece>,
}

impl Position {
    /// Format a move in Standard Algebraic Notation.
    ///
    /// Returns notation like "e4", "Nf3", "Bxc6+", "O-O-O", "e8=Q#".
    /// Disambiguation is minimal: source file, then source rank, then both,
    /// only as far as other legal moves force it.
    #[must_use]
    pub fn to_san(&self, mv: &Move) -> String {
        let mut san = String::new();

        if mv.is_castling() {
            if mv.is_castle_kingside() {
                san.push_str("O-O");
            } else {
                san.push_str("O-O-O");
            }
        } else {
            let piece = self.piece_on(mv.from());

            if let Some(p) = piece {
                if p != Piece::Pawn {
                    san.push(p.to_char().to_ascii_uppercase());

                    let (needs_file, needs_rank) = self.needs_disambiguation(mv, p);
                    if needs_file {
                        san.push((b'a' + mv.from().file() as u8) as char);
                    }
                    if needs_rank {
                        san.push((b'1' + mv.from().rank() as u8) as char);
                    }
                } else if mv.is_capture() {
                    // Pawn captures include the source file
                    san.push((b'a' + mv.from().file() as u8) as char);
                }
            }

            if mv.is_capture() {
                san.push('x');
            }

            san.push_str(&mv.to().to_string());

            if let Some(promo) = mv.promotion() {
                san.push('=');
                san.push(promo.to_char().to_ascii_uppercase());
            }
        }

        // Check/checkmate suffix comes from the resulting position
        let next = self.apply(mv);
        if next.is_checkmate() {
            san.push('#');
        } else if next.is_in_check(next.side_to_move()) {
            san.push('+');
        }

        san
    }

    /// Determine if disambiguation is needed for a piece move.
    /// Returns (`needs_file`, `needs_rank`).
    fn needs_disambiguation(&self, mv: &Move, piece: Piece) -> (bool, bool) {
        let moves = self.legal_moves();
        let rivals: Vec<&Move> = moves
            .iter()
            .filter(|m| {
                m.to() == mv.to()
                    && self.piece_on(m.from()) == Some(piece)
                    && m.from() != mv.from()
            })
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }

        let shares_file = rivals.iter().any(|m| m.from().file() == mv.from().file());
        let shares_rank = rivals.iter().any(|m| m.from().rank() == mv.from().rank());

        match (shares_file, shares_rank) {
            (false, _) => (true, false),    // File disambiguates
            (true, false) => (false, true), // Rank disambiguates
            (true, true) => (true, true),   // Need both
        }
    }

    /// Parse a move in Standard Algebraic Notation.
    ///
    /// Accepts notation like "e4", "Nf3", "Bxc6", "O-O", "e8=Q" with
    /// optional check indicators (+, #). The unique legal move matching all
    /// given constraints is returned; an under-specified pattern matching
    /// several moves is an error, never an arbitrary pick.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let full = san.trim();
        if full.is_empty() {
            return Err(SanError::Empty);
        }

        // Remove check/checkmate indicators
        let body = full.trim_end_matches(['+', '#']);

        if body == "O-O" || body == "0-0" {
            return self.find_castling_move(true, full);
        }
        if body == "O-O-O" || body == "0-0-0" {
            return self.find_castling_move(false, full);
        }

        let components = parse_san_components(body, full)?;
        self.find_san_move(&components, full)
    }

    /// Find the castling move of the requested wing.
    fn find_castling_move(&self, kingside: bool, san: &str) -> Result<Move, SanError> {
        for mv in self.legal_moves().iter() {
            if kingside && mv.is_castle_kingside() {
                return Ok(*mv);
            }
            if !kingside && mv.is_castle_queenside() {
                return Ok(*mv);
            }
        }
        Err(SanError::NoMatchingMove {
            san: san.to_string(),
        })
    }

    /// Find the unique legal move matching the parsed SAN components.
    fn find_san_move(&self, c: &SanComponents, san: &str) -> Result<Move, SanError> {
        let moves = self.legal_moves();
        let candidates: Vec<Move> = moves
            .iter()
            .filter(|m| {
                m.to() == c.dest
                    && self.piece_on(m.from()) == Some(c.piece)
                    && c.disambig_file.map_or(true, |f| m.from().file() == f)
                    && c.disambig_rank.map_or(true, |r| m.from().rank() == r)
                    // Pawn captures are always written with their source
                    // file, so "d3" never means an en-passant or diagonal
                    // capture into d3.
                    && !(c.piece == Piece::Pawn && m.is_capture() && c.disambig_file.is_none())
            })
            .copied()
            .collect();

        let matching: Vec<Move> = candidates
            .iter()
            .filter(|m| m.promotion() == c.promotion)
            .copied()
            .collect();

        match matching.len() {
            1 => Ok(matching[0]),
            0 => {
                // A promotion written without its piece defaults to queen
                if c.promotion.is_none() {
                    if let Some(m) = candidates
                        .iter()
                        .find(|m| m.promotion() == Some(Piece::Queen))
                    {
                        return Ok(*m);
                    }
                }
                Err(SanError::NoMatchingMove {
                    san: san.to_string(),
                })
            }
            _ => Err(SanError::AmbiguousMove {
                san: san.to_string(),
            }),
        }
    }
}

/// Split SAN text (check suffix already removed) into its components:
/// `[piece][disambig file][disambig rank][x]<dest>[=promotion]`.
/// Anchored on the destination square at the end, which keeps full
/// file+rank disambiguation ("Qh4e1") unambiguous to parse.
fn parse_san_components(body: &str, full: &str) -> Result<SanComponents, SanError> {
    let chars: Vec<char> = body.chars().collect();
    if chars.is_empty() {
        return Err(SanError::Empty);
    }

    let (piece, rest) = if chars[0].is_ascii_uppercase() {
        let p = Piece::from_char(chars[0]).ok_or(SanError::InvalidPiece { char: chars[0] })?;
        (p, &chars[1..])
    } else {
        (Piece::Pawn, &chars[..])
    };

    // Promotion suffix
    let (rest, promotion) = match rest.iter().position(|&ch| ch == '=') {
        Some(eq_idx) => {
            if eq_idx + 2 != rest.len() {
                return Err(SanError::InvalidSquare {
                    notation: full.to_string(),
                });
            }
            let promo_char = rest[eq_idx + 1];
            let promo =
                Piece::from_char(promo_char).ok_or(SanError::InvalidPromotion { char: promo_char })?;
            if matches!(promo, Piece::Pawn | Piece::King) {
                return Err(SanError::InvalidPromotion { char: promo_char });
            }
            (&rest[..eq_idx], Some(promo))
        }
        None => (rest, None),
    };

    // Destination square is the final two characters
    if rest.len() < 2 {
        return Err(SanError::InvalidSquare {
            notation: full.to_string(),
        });
    }
    let (prefix, dest_chars) = rest.split_at(rest.len() - 2);
    if !('a'..='h').contains(&dest_chars[0]) || !('1'..='8').contains(&dest_chars[1]) {
        return Err(SanError::InvalidSquare {
            notation: full.to_string(),
        });
    }
    let dest = Square(rank_to_index(dest_chars[1]), file_to_index(dest_chars[0]));

    // Prefix: optional disambiguation, then an optional capture marker
    let prefix = match prefix.last() {
        Some(&'x') => &prefix[..prefix.len() - 1],
        _ => prefix,
    };

    let mut disambig_file = None;
    let mut disambig_rank = None;
    for &ch in prefix {
        match ch {
            'a'..='h' if disambig_file.is_none() && disambig_rank.is_none() => {
                disambig_file = Some(file_to_index(ch));
            }
            '1'..='8' if disambig_rank.is_none() => {
                disambig_rank = Some(rank_to_index(ch));
            }
            _ => {
                return Err(SanError::InvalidSquare {
                    notation: full.to_string(),
                })
            }
        }
    }

    Ok(SanComponents {
        piece,
        dest,
        disambig_file,
        disambig_rank,
        promotion,
    })
}
