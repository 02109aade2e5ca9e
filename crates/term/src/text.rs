//! Frame formatting.

use std::io::{self, Write};

use crate::adapter::Observation;
use crate::types::Command;

/// Label per piece id; index 7 is the empty sentinel
pub const PIECE_LABELS: [&str; 8] = ["I", "J", "L", "O", "S", "T", "Z", "None"];

const FILLED: &str = "██";
const EMPTY: &str = "  ";

/// Line terminator; raw mode needs `\r\n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Label for a piece id, blank when the id is out of range
pub fn piece_label(id: u8) -> &'static str {
    PIECE_LABELS.get(usize::from(id)).copied().unwrap_or("")
}

pub fn describe_command(command: &Command) -> String {
    match command {
        Command::Hold => "hold".to_string(),
        Command::Place { column, rotation } => {
            format!("column {}, rotation {}", column, rotation.index())
        }
        Command::Primitive(p) => p.as_str().to_string(),
    }
}

/// Encode one frame into `out`.
///
/// The board is drawn row by row, top row first, two characters per cell.
pub fn encode_frame_into(
    obs: &Observation,
    pending: Option<&Command>,
    line_ending: LineEnding,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let nl = line_ending.as_str();

    write!(out, "Tetris Board:{}", nl)?;
    for y in 0..obs.height() {
        out.push(b'|');
        for x in 0..obs.width() {
            let glyph = match obs.cell(x, y) {
                Some(0) | None => EMPTY,
                Some(_) => FILLED,
            };
            out.extend_from_slice(glyph.as_bytes());
        }
        write!(out, "|{}", nl)?;
    }

    let hold = obs.hold().first().map_or("", |&id| piece_label(id));
    write!(out, "{}Hold: {}{}", nl, hold, nl)?;

    let queue: Vec<&str> = obs
        .queue()
        .iter()
        .map(|&id| piece_label(id))
        .filter(|label| !label.is_empty())
        .collect();
    write!(out, "Queue: {}{}", queue.join(" "), nl)?;

    if let Some(command) = pending {
        write!(out, "Next move: {}{}", describe_command(command), nl)?;
    }
    Ok(())
}
