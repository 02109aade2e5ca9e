//! Tetromino shapes
//!
//! Each shape is four mino offsets inside a 4x4 frame whose top-left corner is
//! the piece origin. Rotation kicks are a short fixed list rather than SRS.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece origin
pub type MinoOffset = (i8, i8);

/// Four mino offsets
pub type PieceShape = [MinoOffset; 4];

/// Offsets tried, in order, when a rotation collides
pub const KICKS: [MinoOffset; 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    use Rotation::{East, North, South, West};
    match (kind, rotation) {
        (PieceKind::I, North) => [(0, 1), (1, 1), (2, 1), (3, 1)],
        (PieceKind::I, East) => [(2, 0), (2, 1), (2, 2), (2, 3)],
        (PieceKind::I, South) => [(0, 2), (1, 2), (2, 2), (3, 2)],
        (PieceKind::I, West) => [(1, 0), (1, 1), (1, 2), (1, 3)],

        (PieceKind::O, _) => [(1, 0), (2, 0), (1, 1), (2, 1)],

        (PieceKind::T, North) => [(1, 0), (0, 1), (1, 1), (2, 1)],
        (PieceKind::T, East) => [(1, 0), (1, 1), (2, 1), (1, 2)],
        (PieceKind::T, South) => [(0, 1), (1, 1), (2, 1), (1, 2)],
        (PieceKind::T, West) => [(1, 0), (0, 1), (1, 1), (1, 2)],

        (PieceKind::S, North) => [(1, 0), (2, 0), (0, 1), (1, 1)],
        (PieceKind::S, East) => [(1, 0), (1, 1), (2, 1), (2, 2)],
        (PieceKind::S, South) => [(1, 1), (2, 1), (0, 2), (1, 2)],
        (PieceKind::S, West) => [(0, 0), (0, 1), (1, 1), (1, 2)],

        (PieceKind::Z, North) => [(0, 0), (1, 0), (1, 1), (2, 1)],
        (PieceKind::Z, East) => [(2, 0), (1, 1), (2, 1), (1, 2)],
        (PieceKind::Z, South) => [(0, 1), (1, 1), (1, 2), (2, 2)],
        (PieceKind::Z, West) => [(1, 0), (0, 1), (1, 1), (0, 2)],

        (PieceKind::J, North) => [(0, 0), (0, 1), (1, 1), (2, 1)],
        (PieceKind::J, East) => [(1, 0), (2, 0), (1, 1), (1, 2)],
        (PieceKind::J, South) => [(0, 1), (1, 1), (2, 1), (2, 2)],
        (PieceKind::J, West) => [(1, 0), (1, 1), (0, 2), (1, 2)],

        (PieceKind::L, North) => [(2, 0), (0, 1), (1, 1), (2, 1)],
        (PieceKind::L, East) => [(1, 0), (1, 1), (1, 2), (2, 2)],
        (PieceKind::L, South) => [(0, 1), (1, 1), (2, 1), (0, 2)],
        (PieceKind::L, West) => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}
