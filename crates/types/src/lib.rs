//! Shared types - piece ids, commands and fixed dimensions
//!
//! Pure data with no behaviour beyond conversions, usable by the engine,
//! the environment adapter, the interactive loop and the renderer alike.
//!
//! # Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_WIDTH` | 10 | Columns visible to the agent |
//! | `BOARD_HEIGHT` | 20 | Rows visible to the agent |
//! | `HIDDEN_ROWS` | 2 | Spawn rows above the visible field |
//! | `QUEUE_LEN` | 6 | Length of the observation queue |
//! | `PIECE_NONE` | 7 | Sentinel id for "no piece" |
//!
//! # Piece ids
//!
//! Pieces are identified by a small integer in the order `I J L O S T Z`
//! (`0..=6`). The same ids appear in observations and in the renderer's label
//! table.
//!
//! # Examples
//!
//! ```
//! use tetris_gym_types::{Command, PieceKind, Primitive, Rotation};
//!
//! assert_eq!(PieceKind::from_id(5), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.id(), 5);
//! assert_eq!(PieceKind::from_id(7), None);
//!
//! let place = Command::Place { column: 3, rotation: Rotation::East };
//! assert!(!place.use_hold());
//! assert_eq!(place.column(), Some(3));
//!
//! assert!(Command::Hold.use_hold());
//! assert_eq!(Command::Primitive(Primitive::MoveLeft).column(), None);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Spawn rows above the visible field, never observed
pub const HIDDEN_ROWS: usize = 2;

/// Observation queue length (both profiles)
pub const QUEUE_LEN: usize = 6;

/// Number of distinct pieces
pub const PIECE_COUNT: u8 = 7;

/// Piece id used when a slot holds no piece
pub const PIECE_NONE: u8 = 7;

/// Delay before the interactive loop injects a no-op (1 second)
pub const IDLE_DELAY_MS: u64 = 1000;

/// Interactive loop polling interval (10ms)
pub const POLL_INTERVAL_MS: u64 = 10;

/// Default step budget for the primitive profile
pub const DEFAULT_MAX_STEPS: u32 = 2000;

/// The seven tetromino piece kinds, in id order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Numeric id used in observations (`0..=6`)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PieceKind::id`]; `None` for anything outside `0..=6`
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Id of an optional piece, mapping absence to [`PIECE_NONE`]
    pub fn id_or_none(kind: Option<Self>) -> u8 {
        kind.map_or(PIECE_NONE, Self::id)
    }

    /// Single-letter label
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Rotation states
///
/// - **North**: Spawn orientation
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 90° counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Clockwise quarter turns from North (`0..=3`)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Rotation for a quarter-turn count; `None` outside `0..=3`
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use tetris_gym_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        self.turn(1)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(self) -> Self {
        self.turn(3)
    }

    /// Rotate 180°
    pub fn flip(self) -> Self {
        self.turn(2)
    }

    fn turn(self, quarter_turns: u8) -> Self {
        match (self.index() + quarter_turns) % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Atomic per-frame game commands
///
/// The discriminant is the action code of the primitive encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Primitive {
    /// Let the frame pass
    NoOp,
    /// Swap the active piece into the hold slot
    Hold,
    /// Drop to the floor without locking
    SoftDrop,
    /// Drop to the floor and lock
    HardDrop,
    /// Move one column left
    MoveLeft,
    /// Move one column right
    MoveRight,
    /// Rotate 90° counter-clockwise
    RotateLeft,
    /// Rotate 90° clockwise
    RotateRight,
    /// Rotate 180°
    RotateDown,
}

impl Primitive {
    /// All primitives in code order
    pub const ALL: [Primitive; 9] = [
        Primitive::NoOp,
        Primitive::Hold,
        Primitive::SoftDrop,
        Primitive::HardDrop,
        Primitive::MoveLeft,
        Primitive::MoveRight,
        Primitive::RotateLeft,
        Primitive::RotateRight,
        Primitive::RotateDown,
    ];

    /// Action code under the primitive encoding
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Kebab-case name, used by the renderer and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::NoOp => "no-op",
            Primitive::Hold => "hold",
            Primitive::SoftDrop => "soft-drop",
            Primitive::HardDrop => "hard-drop",
            Primitive::MoveLeft => "move-left",
            Primitive::MoveRight => "move-right",
            Primitive::RotateLeft => "rotate-left",
            Primitive::RotateRight => "rotate-right",
            Primitive::RotateDown => "rotate-down",
        }
    }
}

/// Structured command accepted by the engine
///
/// A placement either banks the active piece (`Hold`) or drops it at a column
/// with a rotation (`Place`). Per-frame play uses `Primitive` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    /// Bank the active piece; no column or rotation
    Hold,
    /// Drop the active piece with its 4x4 frame's left edge at `column`
    Place { column: i8, rotation: Rotation },
    /// One per-frame primitive
    Primitive(Primitive),
}

impl Command {
    pub fn use_hold(&self) -> bool {
        matches!(self, Command::Hold)
    }

    pub fn column(&self) -> Option<i8> {
        match self {
            Command::Place { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub fn rotation(&self) -> Option<Rotation> {
        match self {
            Command::Place { rotation, .. } => Some(*rotation),
            _ => None,
        }
    }
}
