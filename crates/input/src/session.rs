//! Scoped terminal input
//!
//! [`KeySource`] is the seam between the loop and the terminal: the real
//! implementation switches the tty into raw mode and polls crossterm without
//! blocking, tests replay a script. [`InputSession`] acquires a source and
//! releases it on every exit path, including unwinding.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal;
use log::warn;

/// Non-blocking keystroke supplier
pub trait KeySource {
    /// Switch to unbuffered, unechoed input.
    fn acquire(&mut self) -> io::Result<()>;

    /// Restore the previous input mode.
    fn release(&mut self) -> io::Result<()>;

    /// Next buffered key press, or `None` right away if there is none.
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// The process terminal, via crossterm raw mode
#[derive(Debug, Default)]
pub struct TerminalKeys {
    raw: bool,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeySource for TerminalKeys {
    fn acquire(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        if self.raw {
            self.raw = false;
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        // Drain non-key events (resize, focus, key release) without waiting.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

/// Replays a fixed key script
///
/// Each entry is one poll: `Some(key)` delivers a key, `None` is an empty poll.
/// Polling past the end is an error so a loop that never quits still stops.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    script: VecDeque<Option<KeyEvent>>,
    acquired: bool,
    acquisitions: u32,
    releases: u32,
    polls: u64,
}

impl ScriptedKeys {
    pub fn new(script: impl IntoIterator<Item = Option<KeyEvent>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Script of plain character presses, no empty polls
    pub fn from_chars(chars: &str) -> Self {
        Self::new(chars.chars().map(|c| Some(KeyEvent::from(event::KeyCode::Char(c)))))
    }

    /// `n` empty polls followed by `key`
    pub fn idle_then(n: usize, key: KeyEvent) -> Self {
        Self::new(std::iter::repeat(None).take(n).chain([Some(key)]))
    }

    /// Acquired and not yet released
    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    pub fn acquisitions(&self) -> u32 {
        self.acquisitions
    }

    pub fn releases(&self) -> u32 {
        self.releases
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl KeySource for ScriptedKeys {
    fn acquire(&mut self) -> io::Result<()> {
        self.acquired = true;
        self.acquisitions += 1;
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        self.acquired = false;
        self.releases += 1;
        Ok(())
    }

    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        self.polls += 1;
        self.script.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted")
        })
    }
}

/// Exclusive hold on a [`KeySource`] for the lifetime of the loop
///
/// Dropping the session releases the source; [`InputSession::close`] does the
/// same but reports a failed release.
pub struct InputSession<'a, K: KeySource> {
    source: &'a mut K,
    active: bool,
}

impl<'a, K: KeySource> InputSession<'a, K> {
    pub fn acquire(source: &'a mut K) -> io::Result<Self> {
        source.acquire()?;
        Ok(Self {
            source,
            active: true,
        })
    }

    pub fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        self.source.poll_key()
    }

    pub fn close(mut self) -> io::Result<()> {
        self.release()
    }

    fn release(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.source.release()
    }
}

impl<K: KeySource> Drop for InputSession<'_, K> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!("failed to restore terminal input mode: {}", err);
        }
    }
}
