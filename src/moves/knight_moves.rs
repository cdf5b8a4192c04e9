use crate::game_state::chess_types::Square;
use crate::moves::move_offsets::KNIGHT_OFFSETS;

pub fn knight_destinations(from: Square, out: &mut Vec<Square>) {
    out.extend(KNIGHT_OFFSETS.iter().filter_map(|&offset| from.step(offset)));
}
