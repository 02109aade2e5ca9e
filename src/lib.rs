//! Tetris gym (workspace facade crate).
//!
//! Re-exports the member crates under short names and holds the argument
//! handling shared by the binaries. The implementation lives in `crates/`.

pub mod cli;

pub use tetris_gym_adapter as adapter;
pub use tetris_gym_core as core;
pub use tetris_gym_input as input;
pub use tetris_gym_term as term;
pub use tetris_gym_types as types;
