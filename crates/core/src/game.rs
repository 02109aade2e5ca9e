//! Reference engine
//!
//! A small, deterministic game that satisfies [`GameEngine`] for both command
//! styles: whole-piece placements (`Command::Hold` / `Command::Place`) and
//! per-frame primitives (`Command::Primitive`). Rules are deliberately plain:
//! 7-bag, one hold per piece, simple kicks, line clears with a combo bonus.

use log::debug;

use crate::board::Board;
use crate::contract::{EngineDims, EngineError, EngineStep, GameEngine, Info, RawGameState};
use crate::pieces::{get_shape, KICKS};
use crate::rng::{PieceBag, SimpleRng};
use crate::types::{
    Command, PieceKind, Primitive, Rotation, BOARD_HEIGHT, BOARD_WIDTH, QUEUE_LEN,
};

/// Spawn origin (left edge of the 4x4 frame, top hidden row)
const SPAWN_X: i8 = 3;
const SPAWN_Y: i8 = 0;

/// Frames between automatic one-row drops
pub const GRAVITY_FRAMES: u32 = 5;
/// Grounded frames before a piece locks
pub const LOCK_DELAY_FRAMES: u32 = 5;
/// Moves/rotations that may reset the lock timer
pub const LOCK_RESET_LIMIT: u32 = 15;

/// Reward for a placement that does not fit
pub const INVALID_PLACEMENT_REWARD: f64 = -2000.0;
/// Reward for asking to hold twice on one piece
pub const REFUSED_HOLD_REWARD: f64 = -1000.0;

/// Base points for clearing 0..=4 lines
const LINE_SCORES: [i64; 5] = [0, 100, 300, 500, 800];
const COMBO_BASE: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Active {
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
}

impl Active {
    fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    bag: PieceBag,
    seeder: SimpleRng,
    queue_len: usize,
    active: Option<Active>,
    held: Option<PieceKind>,
    used_hold: bool,
    frame: u32,
    lock_timer: u32,
    lock_moves: u32,
    score: i64,
    combo: i64,
    lines: u32,
    pieces_locked: u32,
    game_over: bool,
}

impl Game {
    /// New game exposing [`QUEUE_LEN`] upcoming pieces
    pub fn new(seed: u64) -> Self {
        let mut seeder = SimpleRng::from_u64(seed);
        let bag = PieceBag::new(u64::from(seeder.next_u32()));
        let mut game = Self {
            board: Board::new(),
            bag,
            seeder,
            queue_len: QUEUE_LEN,
            active: None,
            held: None,
            used_hold: false,
            frame: 0,
            lock_timer: 0,
            lock_moves: 0,
            score: 0,
            combo: -1,
            lines: 0,
            pieces_locked: 0,
            game_over: false,
        };
        game.spawn_next();
        game
    }

    /// Number of upcoming pieces reported in [`RawGameState::queue`]
    pub fn with_queue_len(mut self, queue_len: usize) -> Self {
        self.queue_len = queue_len;
        self
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn spawn_next(&mut self) {
        let kind = self.bag.draw();
        self.spawn(kind);
    }

    fn spawn(&mut self, kind: PieceKind) {
        let piece = Active::spawn(kind);
        self.frame = 0;
        self.lock_timer = 0;
        self.lock_moves = 0;
        if self.board.fits(&get_shape(kind, piece.rotation), piece.x, piece.y) {
            self.active = Some(piece);
        } else {
            self.active = None;
            self.game_over = true;
        }
    }

    fn fits(&self, piece: &Active) -> bool {
        self.board
            .fits(&get_shape(piece.kind, piece.rotation), piece.x, piece.y)
    }

    /// Rows the active piece can fall before resting
    fn drop_distance(&self, piece: &Active) -> i8 {
        let mut landing = *piece;
        while self.fits(&Active { y: landing.y + 1, ..landing }) {
            landing.y += 1;
        }
        landing.y - piece.y
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let moved = Active {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        };
        if self.fits(&moved) {
            self.active = Some(moved);
            true
        } else {
            false
        }
    }

    fn try_rotate(&mut self, target: impl Fn(Rotation) -> Rotation) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let rotated = Active {
            rotation: target(piece.rotation),
            ..piece
        };
        for (kx, ky) in KICKS {
            let candidate = Active {
                x: rotated.x + kx,
                y: rotated.y + ky,
                ..rotated
            };
            if self.fits(&candidate) {
                self.active = Some(candidate);
                return true;
            }
        }
        false
    }

    /// Bank the active piece. Returns false when hold was already used.
    fn hold(&mut self) -> bool {
        if self.used_hold {
            return false;
        }
        let Some(piece) = self.active.take() else {
            return false;
        };
        if let Some(banked) = self.held.replace(piece.kind) {
            self.bag.push_front(banked);
        }
        self.used_hold = true;
        self.spawn_next();
        true
    }

    fn lock(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let shape = get_shape(piece.kind, piece.rotation);
        self.board.lock_piece(&shape, piece.x, piece.y, piece.kind);
        self.pieces_locked += 1;
        self.used_hold = false;

        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            self.combo = -1;
        } else {
            self.combo += 1;
            self.lines += cleared as u32;
            self.score += LINE_SCORES[cleared] + self.combo * COMBO_BASE;
        }

        if self.board.hidden_rows_occupied() {
            debug!("game over after {} pieces", self.pieces_locked);
            self.game_over = true;
            return;
        }
        self.spawn_next();
    }

    fn hard_drop(&mut self) {
        if let Some(piece) = self.active {
            let rows = self.drop_distance(&piece);
            self.active = Some(Active {
                y: piece.y + rows,
                ..piece
            });
            self.score += 2 * i64::from(rows);
            self.lock();
        }
    }

    fn soft_drop(&mut self) {
        if let Some(piece) = self.active {
            let rows = self.drop_distance(&piece);
            self.active = Some(Active {
                y: piece.y + rows,
                ..piece
            });
            self.score += i64::from(rows);
        }
    }

    fn place(&mut self, column: i8, rotation: Rotation) -> f64 {
        let Some(piece) = self.active else {
            return 0.0;
        };
        let target = Active {
            rotation,
            x: column,
            y: SPAWN_Y,
            ..piece
        };
        if !self.fits(&target) {
            return INVALID_PLACEMENT_REWARD;
        }
        let before = self.score;
        self.active = Some(target);
        self.hard_drop();
        (self.score - before) as f64
    }

    fn frame(&mut self, primitive: Primitive) -> f64 {
        let before = self.score;

        if let Some(piece) = self.active {
            if self.drop_distance(&piece) == 0 {
                self.lock_timer += 1;
                if self.lock_moves >= LOCK_RESET_LIMIT || self.lock_timer > LOCK_DELAY_FRAMES {
                    self.lock();
                }
            } else {
                self.lock_timer = 0;
            }
        }

        self.frame += 1;
        if self.frame >= GRAVITY_FRAMES {
            self.frame -= GRAVITY_FRAMES;
            self.try_shift(0, 1);
        }

        let moved = match primitive {
            Primitive::NoOp => false,
            Primitive::Hold => {
                self.hold();
                false
            }
            Primitive::SoftDrop => {
                self.soft_drop();
                false
            }
            Primitive::HardDrop => {
                self.hard_drop();
                false
            }
            Primitive::MoveLeft => self.try_shift(-1, 0),
            Primitive::MoveRight => self.try_shift(1, 0),
            Primitive::RotateLeft => self.try_rotate(Rotation::rotate_ccw),
            Primitive::RotateRight => self.try_rotate(Rotation::rotate_cw),
            Primitive::RotateDown => self.try_rotate(Rotation::flip),
        };
        if moved {
            self.lock_moves += 1;
            self.lock_timer = 0;
        }

        (self.score - before) as f64
    }

    fn info(&self) -> Info {
        let mut info = Info::new();
        info.insert("score".into(), self.score.into());
        info.insert("lines".into(), self.lines.into());
        info.insert("pieces".into(), self.pieces_locked.into());
        info
    }
}

impl GameEngine for Game {
    fn dimensions(&self) -> EngineDims {
        EngineDims {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            queue_len: self.queue_len,
        }
    }

    fn reset(&mut self) -> Result<(), EngineError> {
        self.board.clear();
        self.bag = PieceBag::new(u64::from(self.seeder.next_u32()));
        self.held = None;
        self.used_hold = false;
        self.score = 0;
        self.combo = -1;
        self.lines = 0;
        self.pieces_locked = 0;
        self.game_over = false;
        self.spawn_next();
        Ok(())
    }

    fn reseed(&mut self, seed: u64) {
        self.seeder = SimpleRng::from_u64(seed);
    }

    fn step(&mut self, command: Command) -> Result<EngineStep, EngineError> {
        if self.game_over || self.active.is_none() {
            return Err(EngineError::NoActivePiece);
        }

        let reward = match command {
            Command::Hold => {
                if self.hold() {
                    0.0
                } else {
                    REFUSED_HOLD_REWARD
                }
            }
            Command::Place { column, rotation } => self.place(column, rotation),
            Command::Primitive(primitive) => self.frame(primitive),
        };

        Ok(EngineStep {
            reward,
            done: self.game_over,
            info: self.info(),
        })
    }

    fn state(&self) -> RawGameState {
        RawGameState {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: self.board.visible_occupancy(),
            queue: self.bag.peek(self.queue_len).collect(),
            active: self.active.map(|piece| piece.kind),
            held: self.held,
        }
    }
}
