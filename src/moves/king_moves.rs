use crate::game_state::chess_types::Square;
use crate::moves::move_offsets::ALL_DIRECTIONS;

/// The eight adjacent squares; castling is added by the legality filter.
pub fn king_destinations(from: Square, out: &mut Vec<Square>) {
    out.extend(ALL_DIRECTIONS.iter().filter_map(|&direction| from.step(direction)));
}

#[cfg(test)]
mod tests {
    use super::king_destinations;
    use crate::utils::algebraic::sq;

    #[test]
    fn king_counts_by_square() {
        let mut out = Vec::new();
        king_destinations(sq("h8"), &mut out);
        assert_eq!(out.len(), 3);

        out.clear();
        king_destinations(sq("e4"), &mut out);
        assert_eq!(out.len(), 8);
    }
}
