//! Game engine collaborator
//!
//! Two things live here:
//!
//! - [`contract`]: the narrow interface the environment adapter consumes
//!   ([`GameEngine`], [`RawGameState`], [`EngineStep`]).
//! - A reference implementation, [`Game`], so the adapter can be driven
//!   end-to-end by the interactive and rollout binaries.
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid (2 hidden spawn rows) with line clearing
//! - [`pieces`]: tetromino shapes and rotation kicks
//! - [`rng`]: seeded 7-bag piece generation
//! - [`game`]: the reference engine
//!
//! # Example
//!
//! ```
//! use tetris_gym_core::{Game, GameEngine};
//! use tetris_gym_types::{Command, Rotation};
//!
//! let mut game = Game::new(12345).with_queue_len(5);
//! let step = game
//!     .step(Command::Place { column: 3, rotation: Rotation::North })
//!     .unwrap();
//! assert!(step.reward > 0.0);
//! assert_eq!(game.state().queue.len(), 5);
//! ```

pub mod board;
pub mod contract;
pub mod game;
pub mod pieces;
pub mod rng;

pub use tetris_gym_types as types;

pub use board::Board;
pub use contract::{EngineDims, EngineError, EngineStep, GameEngine, Info, RawGameState};
pub use game::Game;
pub use rng::{PieceBag, SimpleRng};
