//! Configuration profiles
//!
//! A profile fixes the action encoding, the declared observation space, the
//! queue layout and whether a step budget applies. The two profiles never
//! share an environment instance.
//!
//! | Profile | Actions | Queue | Step budget |
//! |---------|---------|-------|-------------|
//! | `placement` | 41 | active + 5 upcoming | none |
//! | `primitive` | 9 | 6 upcoming | `max_steps` |

use std::str::FromStr;

use crate::codec::ActionCodec;
use crate::error::ParseNameError;
use crate::observation::{ObservationBuilder, QueueSource};
use crate::space::{BoxSpace, Discrete, ObservationSpace};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, PIECE_COUNT, PIECE_NONE, QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// One action places a whole piece.
    Placement,
    /// One action is one frame.
    #[default]
    Primitive,
}

impl FromStr for Profile {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "placement" | "place" | "41" => Ok(Profile::Placement),
            "primitive" | "action" | "9" => Ok(Profile::Primitive),
            _ => Err(ParseNameError {
                kind: "profile",
                value: s.to_string(),
            }),
        }
    }
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Placement => "placement",
            Profile::Primitive => "primitive",
        }
    }

    pub fn codec(self) -> ActionCodec {
        match self {
            Profile::Placement => ActionCodec::Placement,
            Profile::Primitive => ActionCodec::Primitive,
        }
    }

    pub fn action_space(self) -> Discrete {
        Discrete {
            n: self.codec().size(),
        }
    }

    pub fn queue_source(self) -> QueueSource {
        match self {
            Profile::Placement => QueueSource::ActiveThenUpcoming,
            Profile::Primitive => QueueSource::Upcoming,
        }
    }

    pub fn observation_space(self) -> ObservationSpace {
        // The first placement slot is the active piece, which is absent after game over.
        let queue_high = match self {
            Profile::Placement => PIECE_NONE,
            Profile::Primitive => PIECE_COUNT - 1,
        };
        ObservationSpace {
            board: BoxSpace::new(&[BOARD_WIDTH, BOARD_HEIGHT], 0, 1),
            queue: BoxSpace::new(&[QUEUE_LEN], 0, queue_high),
            hold: BoxSpace::new(&[1], 0, PIECE_NONE),
        }
    }

    pub fn observation_builder(self) -> ObservationBuilder {
        ObservationBuilder::new(self.observation_space(), self.queue_source())
    }

    /// Upcoming pieces the engine must report
    pub fn engine_queue_len(self) -> usize {
        self.queue_source().raw_len(QUEUE_LEN)
    }

    /// Step budget for an episode; placements are never truncated
    pub fn step_budget(self, max_steps: u32) -> Option<u32> {
        match self {
            Profile::Placement => None,
            Profile::Primitive => Some(max_steps),
        }
    }
}
