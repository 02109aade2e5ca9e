//! Text rendering for observations.
//!
//! The frame is plain text so it works the same in a pipe, a log file and a
//! raw-mode terminal:
//!
//! ```text
//! Tetris Board:
//! |                    |
//! |    ████            |
//! ...
//!
//! Hold: T
//! Queue: I J L O S Z
//! Next move: column 3, rotation 1
//! ```
//!
//! - [`text`]: formatting into a byte buffer, no I/O
//! - [`renderer`]: a [`adapter::RenderSink`] writing frames out, and the
//!   alternate-screen guard used by interactive play

pub mod renderer;
pub mod text;

pub use tetris_gym_adapter as adapter;
pub use tetris_gym_types as types;

pub use renderer::{TerminalScreen, TextRenderer};
pub use text::{describe_command, encode_frame_into, piece_label, LineEnding, PIECE_LABELS};
