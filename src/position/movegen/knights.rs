use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Bitboard, MoveList, Position, Square};

impl Position {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut MoveList) {
        let own_occ = self.occupied[self.side_to_move().index()].0;
        let targets = Bitboard(KNIGHT_ATTACKS[from.as_index()] & !own_occ);

        for to_sq in targets.iter() {
            moves.push(self.create_move(from, to_sq, None, false, false));
        }
    }
}
