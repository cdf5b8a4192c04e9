//! Direction and offset tables per piece kind.

use crate::game_state::chess_types::{Direction, PieceKind};

pub const ORTHOGONAL_DIRECTIONS: [Direction; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const ALL_DIRECTIONS: [Direction; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Rays a sliding kind walks; empty for non-sliders.
pub const fn slider_directions(kind: PieceKind) -> &'static [Direction] {
    match kind {
        PieceKind::Rook => &ORTHOGONAL_DIRECTIONS,
        PieceKind::Bishop => &DIAGONAL_DIRECTIONS,
        PieceKind::Queen => &ALL_DIRECTIONS,
        _ => &[],
    }
}

#[inline]
pub const fn is_slider(kind: PieceKind) -> bool {
    matches!(kind, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
}

/// Whether a slider of `kind` moves along `direction`.
#[inline]
pub const fn slides_along(kind: PieceKind, direction: Direction) -> bool {
    let orthogonal = direction.0 == 0 || direction.1 == 0;
    match kind {
        PieceKind::Rook => orthogonal,
        PieceKind::Bishop => !orthogonal,
        PieceKind::Queen => true,
        _ => false,
    }
}
