//! Frame output.
//!
//! [`TextRenderer`] is the environment's render sink: it encodes a frame into
//! an internal buffer and writes it in one go. [`TerminalScreen`] switches to
//! the alternate screen for interactive play and back.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{cursor, terminal, QueueableCommand};

use crate::adapter::{Observation, RenderSink};
use crate::text::{encode_frame_into, LineEnding};
use crate::types::Command;

pub struct TextRenderer<W: Write> {
    out: W,
    buf: Vec<u8>,
    line_ending: LineEnding,
    clear_screen: bool,
    footer: Vec<String>,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(4 * 1024),
            line_ending: LineEnding::default(),
            clear_screen: false,
            footer: Vec::new(),
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Clear the screen and home the cursor before every frame.
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Text drawn under every frame, one output line per input line.
    pub fn with_footer(mut self, footer: &str) -> Self {
        self.footer = footer.lines().map(str::to_string).collect();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn draw(&mut self, obs: &Observation, pending: Option<&Command>) -> io::Result<()> {
        self.buf.clear();
        if self.clear_screen {
            self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
            self.buf.queue(cursor::MoveTo(0, 0))?;
        }
        encode_frame_into(obs, pending, self.line_ending, &mut self.buf)?;
        if !self.footer.is_empty() {
            let nl = self.line_ending.as_str();
            self.buf.extend_from_slice(nl.as_bytes());
            for line in &self.footer {
                self.buf.extend_from_slice(line.as_bytes());
                self.buf.extend_from_slice(nl.as_bytes());
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TextRenderer<W> {
    fn render(&mut self, observation: &Observation, pending: Option<&Command>) -> io::Result<()> {
        self.draw(observation, pending)
    }
}

/// Alternate screen with the cursor hidden
///
/// Raw mode belongs to the input session, not to the screen.
pub struct TerminalScreen {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(64),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::core::RawGameState;
    use crate::adapter::Profile;
    use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

    fn empty_observation() -> Observation {
        let raw = RawGameState {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: vec![0; BOARD_WIDTH * BOARD_HEIGHT],
            queue: vec![PieceKind::I; 6],
            active: None,
            held: None,
        };
        Profile::Primitive.observation_builder().build(&raw).unwrap()
    }

    #[test]
    fn clear_screen_prefix_comes_before_the_header() {
        let mut renderer = TextRenderer::new(Vec::new()).with_clear_screen(true);
        renderer.draw(&empty_observation(), None).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.starts_with('\u{1b}'));
        assert!(out.contains("Tetris Board:\n"));
    }

    #[test]
    fn crlf_frames_have_no_bare_newlines() {
        let mut renderer = TextRenderer::new(Vec::new()).with_line_ending(LineEnding::CrLf);
        renderer.render(&empty_observation(), None).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    }

    #[test]
    fn footer_follows_each_frame() {
        let mut renderer = TextRenderer::new(Vec::new())
            .with_line_ending(LineEnding::CrLf)
            .with_footer("Controls:\nq - Quit\n");
        renderer.draw(&empty_observation(), None).unwrap();
        renderer.draw(&empty_observation(), None).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        assert_eq!(out.matches("Controls:\r\nq - Quit\r\n").count(), 2);
        let queue = out.find("Queue:").unwrap();
        assert!(out.find("Controls:").unwrap() > queue);
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    }
}
