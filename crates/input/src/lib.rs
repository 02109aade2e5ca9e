//! Terminal input for interactive play.
//!
//! Maps `crossterm` key events onto [`types::Primitive`]s and drives a
//! [`adapter::TetrisEnv`] from the keyboard, injecting a no-op whenever the
//! operator stays idle for a full delay.

pub mod clock;
pub mod interactive;
pub mod map;
pub mod session;
pub mod signal;

pub use tetris_gym_adapter as adapter;
pub use tetris_gym_types as types;

pub use clock::{Clock, IdleTimer, ManualClock, SystemClock};
pub use interactive::{InteractiveLoop, LoopConfig, LoopError, LoopExit, LoopOutcome, LoopStats};
pub use map::{classify, handle_key_event, is_interrupt, should_quit, KeyAction};
pub use session::{InputSession, KeySource, ScriptedKeys, TerminalKeys};
pub use signal::install_interrupt_handler;
