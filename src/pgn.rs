//! PGN (Portable Game Notation) serialization of game sessions.
//!
//! The format is the seven-tag-roster subset used for casual games: an
//! `[Event ..] [Date ..] [White ..] [Black ..] [Result ..]` header block, a
//! blank line, then move-number-prefixed SAN movetext ending with the result
//! token. Mainline only; variations and comments are neither produced nor
//! modeled (embedded `{}`/`()` text is stripped on read).

use std::fmt;

use crate::game::GameSession;
use crate::position::{Color, SanError};

/// The recognized header fields, emitted in roster order.
///
/// `Result` is not stored here: it is derived from the session's status at
/// encode time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PgnHeaders {
    pub event: String,
    pub date: String,
    pub white: String,
    pub black: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        PgnHeaders {
            event: "Casual Game".to_string(),
            date: chrono::Local::now().format("%Y.%m.%d").to_string(),
            white: "White".to_string(),
            black: "Black".to_string(),
        }
    }
}

/// Error type for PGN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    /// A header line that is not a well-formed `[Key "Value"]` tag
    InvalidHeader { line: String },
    /// A mainline token that does not decode to a legal move.
    /// `ply` is 1-based: the first mainline move is ply 1.
    InvalidMove {
        ply: usize,
        token: String,
        source: SanError,
    },
}

impl fmt::Display for PgnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgnError::InvalidHeader { line } => {
                write!(f, "Invalid PGN header line: {line}")
            }
            PgnError::InvalidMove { ply, token, source } => {
                write!(f, "Invalid move '{token}' at ply {ply}: {source}")
            }
        }
    }
}

impl std::error::Error for PgnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PgnError::InvalidMove { source, .. } => Some(source),
            PgnError::InvalidHeader { .. } => None,
        }
    }
}

const LINE_WIDTH: usize = 80;

/// Serialize a session's mainline to PGN text.
///
/// The movetext is produced by re-encoding each played move as SAN against
/// the position it was played from (the session keeps every snapshot, so no
/// replay is needed). The result token comes from the session's status;
/// claimable draws are still `*`.
#[must_use]
pub fn write_pgn(session: &GameSession, headers: &PgnHeaders) -> String {
    let result = session.status().result_token();

    let mut out = String::new();
    for (key, value) in [
        ("Event", headers.event.as_str()),
        ("Date", headers.date.as_str()),
        ("White", headers.white.as_str()),
        ("Black", headers.black.as_str()),
        ("Result", result),
    ] {
        out.push_str(&format!("[{key} \"{}\"]\n", escape_header_value(value)));
    }
    out.push('\n');

    let mut tokens: Vec<String> = Vec::with_capacity(session.ply_count() + 1);
    let mut position = session.initial();
    for (ply, record) in session.history().iter().enumerate() {
        let san = position.to_san(record.mv());
        let token = if position.side_to_move() == Color::White {
            format!("{}. {san}", position.fullmove_number())
        } else if ply == 0 {
            format!("{}... {san}", position.fullmove_number())
        } else {
            san
        };
        tokens.push(token);
        position = record.position();
    }
    tokens.push(result.to_string());

    let mut line_len = 0;
    for token in &tokens {
        if line_len == 0 {
            out.push_str(token);
            line_len = token.len();
        } else if line_len + 1 + token.len() > LINE_WIDTH {
            out.push('\n');
            out.push_str(token);
            line_len = token.len();
        } else {
            out.push(' ');
            out.push_str(token);
            line_len += 1 + token.len();
        }
    }
    out.push('\n');

    out
}

/// Parse PGN text into a fresh session (standard initial position) plus the
/// recognized headers.
///
/// Move numbers and the result token are skipped; every other movetext token
/// must decode as SAN against the replayed position, or the whole parse
/// fails with the offending ply. No partial session is ever returned.
pub fn read_pgn(text: &str) -> Result<(GameSession, PgnHeaders), PgnError> {
    let mut headers = PgnHeaders::default();
    let mut movetext_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (key, value) = parse_header_line(trimmed)?;
            match key {
                "Event" => headers.event = value,
                "Date" => headers.date = value,
                "White" => headers.white = value,
                "Black" => headers.black = value,
                // Result is re-derived from the replayed game; other tags
                // (Site, Round, ...) are not modeled.
                _ => {}
            }
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let mut session = GameSession::new();
    let movetext = strip_comments_and_variations(&movetext_lines.join(" "));

    for raw_token in movetext.split_whitespace() {
        let token = strip_move_number(raw_token);
        if token.is_empty() || token.starts_with('$') {
            continue;
        }
        if is_result_token(token) {
            break;
        }

        let cleaned = token.trim_end_matches(['!', '?']);
        let ply = session.ply_count() + 1;
        let mv = session
            .current()
            .parse_san(cleaned)
            .map_err(|source| PgnError::InvalidMove {
                ply,
                token: raw_token.to_string(),
                source,
            })?;
        session
            .apply(mv)
            .expect("SAN decode only returns legal moves");
    }

    log::debug!("read PGN game with {} plies", session.ply_count());
    Ok((session, headers))
}

fn parse_header_line(line: &str) -> Result<(&str, String), PgnError> {
    let invalid = || PgnError::InvalidHeader {
        line: line.to_string(),
    };

    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(invalid());
    }
    let inner = &line[1..line.len() - 1];
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value_raw = value_raw.trim();

    if !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(invalid());
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.trim(), value))
}

/// Drop `{...}` comments and `(...)` variations, keeping the mainline.
fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// Strip a leading move number like `1.`, `12.`, or `3...`, which may be
/// glued to the move itself (`1.e4`).
fn strip_move_number(token: &str) -> &str {
    let digits = token.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return token;
    }
    let rest = &token[digits..];
    if !rest.starts_with('.') {
        return token;
    }
    rest.trim_start_matches('.')
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_header_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
