//! Shared test doubles.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use tetris_gym::core::{EngineDims, EngineError, EngineStep, GameEngine, Info, RawGameState};
use tetris_gym::types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Engine that records every command and ends the episode on request.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub queue_len: usize,
    pub commands: Vec<Command>,
    pub resets: u32,
    /// Report `done` on this step of an episode (1-based)
    pub done_on: Option<usize>,
    /// Fail every step after this many commands
    pub fail_after: Option<usize>,
    pub board_height: usize,
    episode_steps: usize,
}

impl RecordingEngine {
    pub fn new(queue_len: usize) -> Self {
        Self {
            queue_len,
            board_height: BOARD_HEIGHT,
            ..Self::default()
        }
    }

    pub fn done_on(mut self, step: usize) -> Self {
        self.done_on = Some(step);
        self
    }
}

impl GameEngine for RecordingEngine {
    fn dimensions(&self) -> EngineDims {
        EngineDims {
            board_width: BOARD_WIDTH,
            board_height: self.board_height,
            queue_len: self.queue_len,
        }
    }

    fn reset(&mut self) -> Result<(), EngineError> {
        self.resets += 1;
        self.episode_steps = 0;
        Ok(())
    }

    fn step(&mut self, command: Command) -> Result<EngineStep, EngineError> {
        if self.fail_after.is_some_and(|n| self.commands.len() >= n) {
            return Err(EngineError::NoActivePiece);
        }
        self.commands.push(command);
        self.episode_steps += 1;
        let mut info = Info::new();
        info.insert("engine".into(), "recording".into());
        Ok(EngineStep {
            reward: 0.5,
            done: self.done_on == Some(self.episode_steps),
            info,
        })
    }

    fn state(&self) -> RawGameState {
        let mut board = vec![0; BOARD_WIDTH * self.board_height];
        if let Some(cell) = board.get_mut(self.episode_steps % (BOARD_WIDTH * self.board_height)) {
            *cell = 1;
        }
        RawGameState {
            width: BOARD_WIDTH,
            height: self.board_height,
            board,
            queue: PieceKind::ALL.iter().copied().cycle().take(self.queue_len).collect(),
            active: Some(PieceKind::S),
            held: None,
        }
    }
}

/// `Write` into a buffer the test keeps a handle to.
#[derive(Debug, Clone, Default)]
pub struct SharedBuf(pub Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
