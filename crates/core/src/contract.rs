//! Engine contract - what the environment adapter consumes
//!
//! An engine is anything that can be reset, stepped with a [`Command`] and
//! asked for a [`RawGameState`] snapshot. The adapter never mutates the
//! snapshot and never reaches into the engine otherwise.

use thiserror::Error;

use crate::types::{Command, PieceKind};

/// Free-form per-step metadata
pub type Info = serde_json::Map<String, serde_json::Value>;

/// Errors raised by an engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine does not understand this kind of command.
    #[error("command {command:?} is not supported by this engine")]
    UnsupportedCommand { command: Command },

    /// Stepped without an active piece (e.g. after game over, before reset).
    #[error("no active piece; reset the engine first")]
    NoActivePiece,
}

/// Declared engine dimensions, checked once by the adapter at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineDims {
    pub board_width: usize,
    pub board_height: usize,
    pub queue_len: usize,
}

/// Snapshot of the engine's observable state
///
/// `board` is column-major: cell `(x, y)` lives at `x * height + y`, with
/// `y = 0` the top visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGameState {
    pub width: usize,
    pub height: usize,
    pub board: Vec<u8>,
    /// Upcoming pieces, next first.
    pub queue: Vec<PieceKind>,
    /// Piece currently in play.
    pub active: Option<PieceKind>,
    /// Banked piece.
    pub held: Option<PieceKind>,
}

impl RawGameState {
    /// Cell at `(x, y)`; `None` outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.board.get(x * self.height + y).copied()
    }
}

/// Result of one engine step
#[derive(Debug, Clone, PartialEq)]
pub struct EngineStep {
    pub reward: f64,
    pub done: bool,
    pub info: Info,
}

/// The game engine collaborator
pub trait GameEngine {
    /// Board and queue dimensions this engine reports in [`RawGameState`].
    fn dimensions(&self) -> EngineDims;

    /// Start a fresh game.
    fn reset(&mut self) -> Result<(), EngineError>;

    /// Re-seed piece generation; takes effect from the next reset.
    fn reseed(&mut self, _seed: u64) {}

    /// Apply one command.
    fn step(&mut self, command: Command) -> Result<EngineStep, EngineError>;

    /// Snapshot the observable state.
    fn state(&self) -> RawGameState;
}

impl<E: GameEngine + ?Sized> GameEngine for Box<E> {
    fn dimensions(&self) -> EngineDims {
        (**self).dimensions()
    }

    fn reset(&mut self) -> Result<(), EngineError> {
        (**self).reset()
    }

    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed);
    }

    fn step(&mut self, command: Command) -> Result<EngineStep, EngineError> {
        (**self).step(command)
    }

    fn state(&self) -> RawGameState {
        (**self).state()
    }
}
