//! Action codec properties over the whole code range.

use tetris_gym::adapter::codec::{HOLD_CODE, MAX_COLUMN, MIN_COLUMN};
use tetris_gym::adapter::{encode_placement, ActionCodec, EnvError};
use tetris_gym::types::{Command, Primitive, Rotation};

#[test]
fn placement_codes_split_into_rotation_and_column() {
    for code in 0..40i64 {
        let cmd = ActionCodec::Placement.decode(code).unwrap();
        assert_eq!(
            i64::from(cmd.rotation().unwrap().index()),
            code / 10,
            "rotation of code {}",
            code
        );
        assert_eq!(i64::from(cmd.column().unwrap()), code % 10 - 1, "column of code {}", code);
        assert!(!cmd.use_hold());
    }
    let hold = ActionCodec::Placement.decode(HOLD_CODE).unwrap();
    assert_eq!(hold, Command::Hold);
    assert!(hold.use_hold());
    assert_eq!(hold.column(), None);
    assert_eq!(hold.rotation(), None);
}

#[test]
fn placement_encode_inverts_decode() {
    for index in 0..4u8 {
        let rotation = Rotation::from_index(index).unwrap();
        for column in MIN_COLUMN..=MAX_COLUMN {
            let code = encode_placement(rotation, column).unwrap();
            assert_eq!(
                ActionCodec::Placement.decode(code).unwrap(),
                Command::Place { column, rotation }
            );
        }
    }
    assert_eq!(ActionCodec::Placement.encode(&Command::Hold), Some(40));
    assert_eq!(encode_placement(Rotation::North, 9), None);
}

#[test]
fn primitive_codes_follow_declaration_order() {
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
    for (code, primitive) in expected.iter().enumerate() {
        assert_eq!(
            ActionCodec::Primitive.decode(code as i64).unwrap(),
            Command::Primitive(*primitive)
        );
    }
}

#[test]
fn codes_outside_the_space_are_rejected_not_clamped() {
    for codec in [ActionCodec::Placement, ActionCodec::Primitive] {
        let n = codec.size() as i64;
        for code in [-1, n, n + 1, i64::MIN, i64::MAX] {
            match codec.decode(code) {
                Err(EnvError::ActionOutOfRange { code: c, size }) => {
                    assert_eq!(c, code);
                    assert_eq!(size as i64, n);
                }
                other => panic!("code {} under {:?} gave {:?}", code, codec, other),
            }
        }
    }
}

#[test]
fn encodings_do_not_mix() {
    assert_eq!(
        ActionCodec::Primitive.encode(&Command::Place {
            column: 0,
            rotation: Rotation::North
        }),
        None
    );
    assert_eq!(
        ActionCodec::Placement.encode(&Command::Primitive(Primitive::HardDrop)),
        None
    );
}
