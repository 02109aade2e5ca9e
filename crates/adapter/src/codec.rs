//! Action codec - integer action codes to structured commands
//!
//! Two encodings, never mixed within an environment:
//!
//! - **Placement** (41 codes): `0..=39` pick a rotation and a column,
//!   `rotation = code / 10`, `column = code % 10 - 1`; `40` holds.
//! - **Primitive** (9 codes): one code per [`Primitive`], in declaration order.
//!
//! Columns are not re-validated beyond the arithmetic; an engine that refuses
//! an off-board column is expected to say so itself.

use crate::error::EnvError;
use crate::types::{Command, Primitive, Rotation};

/// Integer action as issued by a policy
pub type ActionCode = i64;

/// Size of the placement action space
pub const PLACEMENT_ACTIONS: usize = 41;

/// Size of the primitive action space
pub const PRIMITIVE_ACTIONS: usize = 9;

/// Placement code meaning "hold"
pub const HOLD_CODE: ActionCode = 40;

const COLUMNS_PER_ROTATION: ActionCode = 10;

/// Lowest and highest column a placement code can express
pub const MIN_COLUMN: i8 = -1;
pub const MAX_COLUMN: i8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCodec {
    Placement,
    Primitive,
}

impl ActionCodec {
    /// Number of valid codes, `N`; valid codes are `0..N`
    pub fn size(self) -> usize {
        match self {
            ActionCodec::Placement => PLACEMENT_ACTIONS,
            ActionCodec::Primitive => PRIMITIVE_ACTIONS,
        }
    }

    /// Decode an action code
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_gym_adapter::ActionCodec;
    /// use tetris_gym_types::{Command, Primitive, Rotation};
    ///
    /// let cmd = ActionCodec::Placement.decode(23).unwrap();
    /// assert_eq!(cmd, Command::Place { column: 2, rotation: Rotation::South });
    ///
    /// assert_eq!(ActionCodec::Placement.decode(40).unwrap(), Command::Hold);
    /// assert_eq!(
    ///     ActionCodec::Primitive.decode(4).unwrap(),
    ///     Command::Primitive(Primitive::MoveLeft)
    /// );
    /// assert!(ActionCodec::Primitive.decode(9).is_err());
    /// ```
    pub fn decode(self, code: ActionCode) -> Result<Command, EnvError> {
        let size = self.size();
        if code < 0 || code >= size as ActionCode {
            return Err(EnvError::ActionOutOfRange { code, size });
        }

        match self {
            ActionCodec::Placement if code == HOLD_CODE => Ok(Command::Hold),
            ActionCodec::Placement => {
                let rotation = Rotation::from_index((code / COLUMNS_PER_ROTATION) as u8)
                    .ok_or(EnvError::ActionOutOfRange { code, size })?;
                let column = (code % COLUMNS_PER_ROTATION) as i8 - 1;
                Ok(Command::Place { column, rotation })
            }
            ActionCodec::Primitive => Primitive::ALL
                .get(code as usize)
                .map(|&p| Command::Primitive(p))
                .ok_or(EnvError::ActionOutOfRange { code, size }),
        }
    }

    /// Inverse of [`ActionCodec::decode`]
    ///
    /// `None` for commands this encoding cannot express: primitives under
    /// placement, placements under primitive, or a column outside
    /// `MIN_COLUMN..=MAX_COLUMN`.
    pub fn encode(self, command: &Command) -> Option<ActionCode> {
        match (self, command) {
            (ActionCodec::Placement, Command::Hold) => Some(HOLD_CODE),
            (ActionCodec::Placement, Command::Place { column, rotation }) => {
                encode_placement(*rotation, *column)
            }
            (ActionCodec::Primitive, Command::Primitive(p)) => Some(ActionCode::from(p.code())),
            _ => None,
        }
    }
}

/// `rotation * 10 + (column + 1)`; `None` when the column has no code
pub fn encode_placement(rotation: Rotation, column: i8) -> Option<ActionCode> {
    if !(MIN_COLUMN..=MAX_COLUMN).contains(&column) {
        return None;
    }
    Some(ActionCode::from(rotation.index()) * COLUMNS_PER_ROTATION + ActionCode::from(column) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_arithmetic_for_every_code() {
        for code in 0..40 {
            let cmd = ActionCodec::Placement.decode(code).unwrap();
            assert!(!cmd.use_hold());
            assert_eq!(cmd.rotation().map(|r| ActionCode::from(r.index())), Some(code / 10));
            assert_eq!(cmd.column().map(ActionCode::from), Some(code % 10 - 1));
        }
        assert_eq!(ActionCodec::Placement.decode(HOLD_CODE).unwrap(), Command::Hold);
    }

    #[test]
    fn test_placement_round_trip() {
        for r in 0..4 {
            let rotation = Rotation::from_index(r).unwrap();
            for column in MIN_COLUMN..=MAX_COLUMN {
                let code = encode_placement(rotation, column).unwrap();
                assert_eq!(
                    ActionCodec::Placement.decode(code).unwrap(),
                    Command::Place { column, rotation }
                );
            }
        }
        assert_eq!(ActionCodec::Placement.encode(&Command::Hold), Some(HOLD_CODE));
    }

    #[test]
    fn test_out_of_range_codes_fail_for_both_encodings() {
        for codec in [ActionCodec::Placement, ActionCodec::Primitive] {
            let n = codec.size() as ActionCode;
            for code in [-1, -100, n, n + 1, ActionCode::MAX, ActionCode::MIN] {
                match codec.decode(code) {
                    Err(EnvError::ActionOutOfRange { code: c, size }) => {
                        assert_eq!(c, code);
                        assert_eq!(size, codec.size());
                    }
                    other => panic!("{codec:?} decoded {code} to {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_primitive_codes_follow_declaration_order() {
        let expected = [
            Primitive::NoOp,
            Primitive::Hold,
            Primitive::SoftDrop,
            Primitive::HardDrop,
            Primitive::MoveLeft,
            Primitive::MoveRight,
            Primitive::RotateLeft,
            Primitive::RotateRight,
            Primitive::RotateDown,
        ];
        for (code, p) in expected.into_iter().enumerate() {
            let cmd = ActionCodec::Primitive.decode(code as ActionCode).unwrap();
            assert_eq!(cmd, Command::Primitive(p));
            assert_eq!(ActionCodec::Primitive.encode(&cmd), Some(code as ActionCode));
        }
    }

    #[test]
    fn test_encodings_do_not_cross() {
        assert_eq!(
            ActionCodec::Placement.encode(&Command::Primitive(Primitive::NoOp)),
            None
        );
        assert_eq!(ActionCodec::Primitive.encode(&Command::Hold), None);
        assert_eq!(encode_placement(Rotation::North, 9), None);
        assert_eq!(encode_placement(Rotation::North, -2), None);
    }
}
