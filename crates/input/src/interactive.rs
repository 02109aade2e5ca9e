//! Interactive input loop
//!
//! Polls the keyboard without blocking and feeds each mapped key, or a no-op
//! after [`LoopConfig::idle_delay`] without input, into
//! [`TetrisEnv::step`]. An episode that ends is reset on the spot.
//! `q` stops the loop; Ctrl-C stops it too with [`LoopExit::Interrupted`],
//! as does a raised interrupt flag (see [`crate::signal`]).
//! The input session is released on every way out.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::adapter::core::GameEngine;
use crate::adapter::{ActionCode, EnvError, Profile, TetrisEnv};
use crate::clock::{Clock, IdleTimer};
use crate::map::{classify, KeyAction};
use crate::session::{InputSession, KeySource};
use crate::types::{Primitive, IDLE_DELAY_MS, POLL_INTERVAL_MS};

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("keyboard input failed")]
    Input(#[from] io::Error),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("interactive play needs the primitive profile, got {0:?}")]
    UnsupportedProfile(Profile),
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Inactivity before a no-op is injected
    pub idle_delay: Duration,
    /// Sleep between polls
    pub poll_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            idle_delay: Duration::from_millis(IDLE_DELAY_MS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

impl LoopConfig {
    /// Reads `TETRIS_GYM_IDLE_MS` and `TETRIS_GYM_POLL_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let millis = |name: &str| {
            std::env::var(name)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };
        Self {
            idle_delay: millis("TETRIS_GYM_IDLE_MS").unwrap_or(defaults.idle_delay),
            poll_interval: millis("TETRIS_GYM_POLL_MS").unwrap_or(defaults.poll_interval),
        }
    }
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub polls: u64,
    /// Steps from mapped keys
    pub key_steps: u64,
    /// Steps from the idle timer
    pub idle_steps: u64,
    pub ignored_keys: u64,
    /// Episodes that ended and were reset
    pub resets: u64,
}

impl LoopStats {
    pub fn steps(&self) -> u64 {
        self.key_steps + self.idle_steps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOutcome {
    pub exit: LoopExit,
    pub stats: LoopStats,
}

pub struct InteractiveLoop<K, C> {
    keys: K,
    clock: C,
    config: LoopConfig,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<K: KeySource, C: Clock> InteractiveLoop<K, C> {
    pub fn new(keys: K, clock: C) -> Self {
        Self {
            keys,
            clock,
            config: LoopConfig::default(),
            interrupt: None,
        }
    }

    pub fn with_config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Stop with [`LoopExit::Interrupted`] once `flag` is raised. Checked
    /// before every poll.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run until quit, interrupt or failure
    ///
    /// `env` must already be reset. The key source is acquired for the
    /// duration of the call and released before returning, whatever the
    /// outcome; a failed release is reported only when the loop itself
    /// succeeded.
    pub fn run<E: GameEngine>(&mut self, env: &mut TetrisEnv<E>) -> Result<LoopOutcome, LoopError> {
        if env.profile() != Profile::Primitive {
            return Err(LoopError::UnsupportedProfile(env.profile()));
        }

        let mut session = InputSession::acquire(&mut self.keys)?;
        let result = drive(
            &mut session,
            &mut self.clock,
            &self.config,
            self.interrupt.as_deref(),
            env,
        );
        let closed = session.close();

        let outcome = result?;
        closed?;
        info!(
            "interactive loop stopped: {:?} after {} steps ({} idle), {} resets",
            outcome.exit,
            outcome.stats.steps(),
            outcome.stats.idle_steps,
            outcome.stats.resets
        );
        Ok(outcome)
    }
}

fn drive<K: KeySource, C: Clock, E: GameEngine>(
    session: &mut InputSession<'_, K>,
    clock: &mut C,
    config: &LoopConfig,
    interrupt: Option<&AtomicBool>,
    env: &mut TetrisEnv<E>,
) -> Result<LoopOutcome, LoopError> {
    let mut stats = LoopStats::default();
    let mut idle = IdleTimer::new(config.idle_delay, clock.now());

    loop {
        if interrupt.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            debug!("interrupt flag raised");
            return Ok(LoopOutcome {
                exit: LoopExit::Interrupted,
                stats,
            });
        }

        let now = clock.now();
        stats.polls += 1;

        let action = match session.poll_key()? {
            Some(key) => {
                idle.touch(now);
                match classify(key) {
                    KeyAction::Quit => return Ok(LoopOutcome { exit: LoopExit::Quit, stats }),
                    KeyAction::Interrupt => {
                        return Ok(LoopOutcome {
                            exit: LoopExit::Interrupted,
                            stats,
                        })
                    }
                    KeyAction::Ignore => {
                        stats.ignored_keys += 1;
                        None
                    }
                    KeyAction::Act(primitive) => {
                        stats.key_steps += 1;
                        Some(primitive)
                    }
                }
            }
            None if idle.fire(now) => {
                stats.idle_steps += 1;
                Some(Primitive::NoOp)
            }
            None => None,
        };

        if let Some(primitive) = action {
            let result = env.step(primitive_code(primitive))?;
            if result.is_over() {
                debug!("episode over after {} steps, resetting", env.episode().step_count());
                env.reset(None, None)?;
                stats.resets += 1;
            }
        }

        clock.sleep(config.poll_interval);
    }
}

/// Primitive codes are the primitive's discriminant.
fn primitive_code(primitive: Primitive) -> ActionCode {
    ActionCode::from(primitive.code())
}
