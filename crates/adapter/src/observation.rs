//! Observation builder - raw engine state to fixed-shape arrays
//!
//! Built fresh on every reset/step/render; nothing is cached between calls.
//!
//! - `board`: copied as-is (column-major, width x height), clamped to the
//!   declared range. The engine's grid must already have the declared shape.
//! - `queue`: the upcoming pieces, optionally preceded by the piece in play.
//! - `hold`: the banked piece id, or [`crate::types::PIECE_NONE`].

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::core::RawGameState;
use crate::error::EnvError;
use crate::space::ObservationSpace;
use crate::types::{PieceKind, QUEUE_LEN};

/// What the observation queue is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueSource {
    /// Upcoming pieces only
    Upcoming,
    /// The active piece, then upcoming pieces
    ActiveThenUpcoming,
}

impl QueueSource {
    /// Raw queue length needed to fill `queue_len` observation slots
    pub fn raw_len(self, queue_len: usize) -> usize {
        match self {
            QueueSource::Upcoming => queue_len,
            QueueSource::ActiveThenUpcoming => queue_len.saturating_sub(1),
        }
    }
}

/// Immutable, fixed-shape view of one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    board: Vec<u8>,
    width: usize,
    height: usize,
    queue: ArrayVec<u8, QUEUE_LEN>,
    hold: [u8; 1],
}

impl Observation {
    /// Column-major board, `width * height` cells
    pub fn board(&self) -> &[u8] {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y` (row 0 on top)
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.board.get(x * self.height + y).copied()
    }

    pub fn queue(&self) -> &[u8] {
        &self.queue
    }

    pub fn hold(&self) -> &[u8] {
        &self.hold
    }
}

#[derive(Debug, Clone)]
pub struct ObservationBuilder {
    space: ObservationSpace,
    source: QueueSource,
}

impl ObservationBuilder {
    pub fn new(space: ObservationSpace, source: QueueSource) -> Self {
        Self { space, source }
    }

    pub fn space(&self) -> &ObservationSpace {
        &self.space
    }

    pub fn source(&self) -> QueueSource {
        self.source
    }

    /// Project a raw snapshot into an [`Observation`]
    ///
    /// Fails with [`EnvError::ShapeMismatch`] when the snapshot does not have
    /// the declared shape; nothing is resized or padded.
    pub fn build(&self, raw: &RawGameState) -> Result<Observation, EnvError> {
        let board_shape = &self.space.board.shape;
        let actual = vec![raw.width, raw.height];
        if *board_shape != actual || raw.board.len() != self.space.board.len() {
            return Err(EnvError::ShapeMismatch {
                field: "board",
                expected: board_shape.clone(),
                actual: vec![raw.width, raw.height, raw.board.len()],
            });
        }
        let board = raw.board.iter().map(|&c| self.space.board.clamp(c)).collect();

        let queue_len = self.space.queue.len();
        let active = match self.source {
            QueueSource::Upcoming => None,
            QueueSource::ActiveThenUpcoming => Some(PieceKind::id_or_none(raw.active)),
        };
        let mut queue = ArrayVec::<u8, QUEUE_LEN>::new();
        for id in active
            .into_iter()
            .chain(raw.queue.iter().map(|k| k.id()))
            .take(queue_len)
        {
            if queue.try_push(self.space.queue.clamp(id)).is_err() {
                break;
            }
        }
        if queue.len() != queue_len {
            return Err(EnvError::ShapeMismatch {
                field: "queue",
                expected: vec![queue_len],
                actual: vec![queue.len()],
            });
        }

        let hold = [self.space.hold.clamp(PieceKind::id_or_none(raw.held))];

        Ok(Observation {
            board,
            width: raw.width,
            height: raw.height,
            queue,
            hold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, PIECE_NONE};

    fn raw(queue_len: usize) -> RawGameState {
        let mut board = vec![0u8; BOARD_WIDTH * BOARD_HEIGHT];
        board[3 * BOARD_HEIGHT + 19] = 1;
        RawGameState {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board,
            queue: PieceKind::ALL.iter().copied().cycle().take(queue_len).collect(),
            active: Some(PieceKind::T),
            held: None,
        }
    }

    #[test]
    fn primitive_queue_is_the_raw_queue() {
        let builder = Profile::Primitive.observation_builder();
        let obs = builder.build(&raw(6)).unwrap();
        assert_eq!(obs.queue(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(obs.hold(), &[PIECE_NONE]);
        assert_eq!(obs.cell(3, 19), Some(1));
        assert!(builder.space().contains(&obs));
    }

    #[test]
    fn placement_queue_starts_with_active_piece() {
        let builder = Profile::Placement.observation_builder();
        let mut state = raw(5);
        state.held = Some(PieceKind::O);
        let obs = builder.build(&state).unwrap();
        assert_eq!(obs.queue(), &[PieceKind::T.id(), 0, 1, 2, 3, 4]);
        assert_eq!(obs.hold(), &[PieceKind::O.id()]);
        assert!(builder.space().contains(&obs));
    }

    #[test]
    fn placement_queue_marks_missing_active_piece() {
        let builder = Profile::Placement.observation_builder();
        let mut state = raw(5);
        state.active = None;
        let obs = builder.build(&state).unwrap();
        assert_eq!(obs.queue()[0], PIECE_NONE);
    }

    #[test]
    fn board_values_are_clamped() {
        let builder = Profile::Primitive.observation_builder();
        let mut state = raw(6);
        state.board[0] = 5;
        let obs = builder.build(&state).unwrap();
        assert_eq!(obs.cell(0, 0), Some(1));
    }

    #[test]
    fn wrong_board_shape_is_rejected_not_resized() {
        let builder = Profile::Primitive.observation_builder();
        let mut state = raw(6);
        state.height = 22;
        state.board.resize(BOARD_WIDTH * 22, 0);
        assert!(matches!(
            builder.build(&state),
            Err(EnvError::ShapeMismatch { field: "board", .. })
        ));
    }

    #[test]
    fn short_queue_is_rejected() {
        let builder = Profile::Primitive.observation_builder();
        assert!(matches!(
            builder.build(&raw(4)),
            Err(EnvError::ShapeMismatch { field: "queue", .. })
        ));
    }
}
