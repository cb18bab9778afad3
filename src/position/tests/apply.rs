//! Move application correctness.

use crate::position::{Color, Move, Piece, Position, Square};

fn find_move(position: &Position, from: Square, to: Square, promotion: Option<Piece>) -> Move {
    for m in position.legal_moves().iter() {
        if m.from() == from && m.to() == to && m.promotion() == promotion {
            return *m;
        }
    }
    panic!("Expected move {from}{to} not found");
}

#[test]
fn test_simple_move_relocates_the_piece() {
    let position = Position::new();
    let mv = find_move(&position, Square(1, 4), Square(3, 4), None);
    let next = position.apply(&mv);

    assert!(next.piece_at(Square(1, 4)).is_none());
    assert_eq!(next.piece_at(Square(3, 4)), Some((Color::White, Piece::Pawn)));
    assert_eq!(next.side_to_move(), Color::Black);
    // The original value is untouched
    assert_eq!(position.piece_at(Square(1, 4)), Some((Color::White, Piece::Pawn)));
}

#[test]
fn test_capture_removes_the_target() {
    let position =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
    let mv = find_move(&position, Square(3, 4), Square(4, 3), None);
    assert!(mv.is_capture());

    let next = position.apply(&mv);
    assert_eq!(next.piece_at(Square(4, 3)), Some((Color::White, Piece::Pawn)));
    assert_eq!(next.occupied[Color::Black.index()].popcount(), 15);
}

#[test]
fn test_en_passant_removes_the_passed_pawn() {
    // White pawn e5, black just played d7d5
    let position = Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    let mv = find_move(&position, Square(4, 4), Square(5, 3), None);
    assert!(mv.is_en_passant());

    let next = position.apply(&mv);
    assert_eq!(next.piece_at(Square(5, 3)), Some((Color::White, Piece::Pawn)));
    // The captured pawn sat on d5, not on the destination square
    assert!(next.piece_at(Square(4, 3)).is_none());
}

#[test]
fn test_kingside_castling_moves_both_pieces() {
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = find_move(&position, Square(0, 4), Square(0, 6), None);
    assert!(mv.is_castle_kingside());

    let next = position.apply(&mv);
    assert_eq!(next.piece_at(Square(0, 6)), Some((Color::White, Piece::King)));
    assert_eq!(next.piece_at(Square(0, 5)), Some((Color::White, Piece::Rook)));
    assert!(next.piece_at(Square(0, 4)).is_none());
    assert!(next.piece_at(Square(0, 7)).is_none());
    assert!(!next.castling_rights().has(Color::White, true));
    assert!(!next.castling_rights().has(Color::White, false));
    assert!(next.castling_rights().has(Color::Black, true));
}

#[test]
fn test_queenside_castling_moves_both_pieces() {
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let mv = find_move(&position, Square(7, 4), Square(7, 2), None);
    assert!(mv.is_castle_queenside());

    let next = position.apply(&mv);
    assert_eq!(next.piece_at(Square(7, 2)), Some((Color::Black, Piece::King)));
    assert_eq!(next.piece_at(Square(7, 3)), Some((Color::Black, Piece::Rook)));
    assert!(next.piece_at(Square(7, 0)).is_none());
}

#[test]
fn test_promotion_replaces_the_pawn() {
    let position = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let mv = find_move(&position, Square(6, 0), Square(7, 0), Some(Piece::Knight));

    let next = position.apply(&mv);
    assert_eq!(next.piece_at(Square(7, 0)), Some((Color::White, Piece::Knight)));
    assert!(next.pieces[Color::White.index()][Piece::Pawn.index()].is_empty());
}

#[test]
fn test_all_four_promotion_pieces_are_reachable() {
    let position = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let promotions: Vec<Option<Piece>> = position
        .legal_moves()
        .iter()
        .filter(|m| m.to() == Square(7, 0))
        .map(|m| m.promotion())
        .collect();
    assert_eq!(promotions.len(), 4);
    for piece in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
        assert!(promotions.contains(&Some(piece)));
    }
}

#[test]
fn test_king_move_forfeits_both_wings() {
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = find_move(&position, Square(0, 4), Square(1, 4), None);
    let next = position.apply(&mv);
    assert!(!next.castling_rights().has(Color::White, true));
    assert!(!next.castling_rights().has(Color::White, false));
}

#[test]
fn test_rook_move_forfeits_one_wing() {
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = find_move(&position, Square(0, 0), Square(1, 0), None);
    let next = position.apply(&mv);
    assert!(!next.castling_rights().has(Color::White, false));
    assert!(next.castling_rights().has(Color::White, true));
}

#[test]
fn test_rook_captured_on_origin_forfeits_that_wing() {
    // White rook takes the a8 rook
    let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = find_move(&position, Square(0, 0), Square(7, 0), None);
    let next = position.apply(&mv);
    assert!(!next.castling_rights().has(Color::Black, false));
    assert!(next.castling_rights().has(Color::Black, true));
}

#[test]
fn test_halfmove_clock_counts_quiet_moves_and_resets() {
    let position = Position::from_fen("k7/7r/8/8/8/8/R6P/K7 w - - 10 1");
    // Quiet rook move increments
    let next = position.apply(&find_move(&position, Square(1, 0), Square(1, 3), None));
    assert_eq!(next.halfmove_clock(), 11);

    // Pawn move resets
    let next = position.apply(&find_move(&position, Square(1, 7), Square(2, 7), None));
    assert_eq!(next.halfmove_clock(), 0);
}

#[test]
fn test_fullmove_number_increments_after_black() {
    let position = Position::new();
    let after_white = position.apply(&find_move(&position, Square(1, 4), Square(3, 4), None));
    assert_eq!(after_white.fullmove_number(), 1);
    let after_black =
        after_white.apply(&find_move(&after_white, Square(6, 4), Square(4, 4), None));
    assert_eq!(after_black.fullmove_number(), 2);
}

#[test]
fn test_en_passant_target_is_set_and_cleared() {
    let position = Position::new();
    let next = position.apply(&find_move(&position, Square(1, 4), Square(3, 4), None));
    assert_eq!(next.en_passant_target(), Some(Square(2, 4)));

    let after_reply = next.apply(&find_move(&next, Square(7, 6), Square(5, 5), None));
    assert_eq!(after_reply.en_passant_target(), None);
}

#[test]
fn test_incremental_hash_matches_recomputation() {
    let mut position = Position::new();
    for uci in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "g8f6", "e1g1", "f6e4"] {
        let mv = position.find_uci_move(uci).unwrap();
        position = position.apply(&mv);
        assert_eq!(position.hash(), position.calculate_hash(), "after {uci}");
    }
}
