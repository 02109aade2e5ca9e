//! Episode controller - the environment a training loop drives
//!
//! Wraps one engine behind the standard episodic protocol:
//!
//! - `reset(seed, options) -> (Observation, Info)`
//! - `step(code) -> StepResult { observation, reward, done, truncated, info }`
//!
//! Each step decodes the action code, forwards the command, and augments the
//! engine's info with `episode_length` (always) and `final_episode_length`
//! (when the episode ends). Truncation only applies when the profile has a
//! step budget. The controller never resets on its own.

use log::{debug, info};
use serde::Serialize;

use crate::codec::{ActionCode, ActionCodec};
use crate::config::{EnvConfig, RenderMode};
use crate::core::{GameEngine, Info};
use crate::error::EnvError;
use crate::observation::{Observation, ObservationBuilder};
use crate::profile::Profile;
use crate::space::{Discrete, ObservationSpace};
use crate::types::Command;

/// Info key carrying the step count, present on every step.
pub const EPISODE_LENGTH_KEY: &str = "episode_length";

/// Info key carrying the step count on the step that ends an episode.
pub const FINAL_EPISODE_LENGTH_KEY: &str = "final_episode_length";

/// Somewhere to show frames
pub trait RenderSink {
    fn render(
        &mut self,
        observation: &Observation,
        pending: Option<&Command>,
    ) -> std::io::Result<()>;
}

/// Step counter and budget for the current episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeState {
    step_count: u32,
    max_steps: Option<u32>,
}

impl EpisodeState {
    pub fn new(max_steps: Option<u32>) -> Self {
        Self {
            step_count: 0,
            max_steps,
        }
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn max_steps(&self) -> Option<u32> {
        self.max_steps
    }

    fn begin(&mut self) {
        self.step_count = 0;
    }

    fn advance(&mut self) -> u32 {
        self.step_count = self.step_count.saturating_add(1);
        self.step_count
    }

    /// Budget reached; always false without a budget
    pub fn is_truncated(&self) -> bool {
        self.max_steps.is_some_and(|max| self.step_count >= max)
    }
}

/// Outcome of one [`TetrisEnv::step`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub truncated: bool,
    pub info: Info,
}

impl StepResult {
    /// `done || truncated`; the caller must reset before stepping again
    pub fn is_over(&self) -> bool {
        self.done || self.truncated
    }
}

pub struct TetrisEnv<E> {
    engine: E,
    profile: Profile,
    codec: ActionCodec,
    builder: ObservationBuilder,
    episode: EpisodeState,
    render_mode: RenderMode,
    sink: Option<Box<dyn RenderSink>>,
    pending_seed: Option<u64>,
    episode_return: f64,
}

impl<E: GameEngine> TetrisEnv<E> {
    /// Wrap `engine` under `config`
    ///
    /// Fails with [`EnvError::ShapeMismatch`] when the engine's declared board
    /// or queue dimensions disagree with the profile's observation space.
    pub fn new(engine: E, config: &EnvConfig) -> Result<Self, EnvError> {
        let profile = config.profile;
        let builder = profile.observation_builder();
        let space = builder.space();
        let dims = engine.dimensions();

        let actual_board = vec![dims.board_width, dims.board_height];
        if space.board.shape != actual_board {
            return Err(EnvError::ShapeMismatch {
                field: "board",
                expected: space.board.shape.clone(),
                actual: actual_board,
            });
        }
        let expected_queue = profile.engine_queue_len();
        if dims.queue_len != expected_queue {
            return Err(EnvError::ShapeMismatch {
                field: "queue",
                expected: vec![expected_queue],
                actual: vec![dims.queue_len],
            });
        }

        debug!(
            "environment ready: profile={} actions={} budget={:?}",
            profile.as_str(),
            profile.codec().size(),
            config.step_budget()
        );

        Ok(Self {
            engine,
            profile,
            codec: profile.codec(),
            builder,
            episode: EpisodeState::new(config.step_budget()),
            render_mode: config.render_mode,
            sink: None,
            pending_seed: config.seed,
            episode_return: 0.0,
        })
    }

    /// Where frames go when rendering
    pub fn with_render_sink(mut self, sink: impl RenderSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn codec(&self) -> ActionCodec {
        self.codec
    }

    pub fn action_space(&self) -> Discrete {
        self.profile.action_space()
    }

    pub fn observation_space(&self) -> &ObservationSpace {
        self.builder.space()
    }

    pub fn episode(&self) -> &EpisodeState {
        &self.episode
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Give the engine back
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Start a new episode
    ///
    /// A `seed` (or the configured seed, on the first reset) re-seeds the
    /// engine before it resets. `options` is accepted for protocol
    /// compatibility and currently unused.
    pub fn reset(
        &mut self,
        seed: Option<u64>,
        _options: Option<&Info>,
    ) -> Result<(Observation, Info), EnvError> {
        if let Some(seed) = seed.or(self.pending_seed.take()) {
            self.engine.reseed(seed);
        }
        self.episode.begin();
        self.episode_return = 0.0;
        self.engine.reset()?;
        debug!("episode reset");

        let observation = self.observe()?;
        if self.render_mode == RenderMode::Human {
            self.emit(&observation, None)?;
        }
        Ok((observation, Info::new()))
    }

    /// Advance one step
    ///
    /// Only steps the engine accepted count towards the episode length: an
    /// out-of-range code fails before anything else happens, and an engine
    /// error leaves the count untouched.
    pub fn step(&mut self, code: ActionCode) -> Result<StepResult, EnvError> {
        let command = self.codec.decode(code)?;
        let outcome = self.engine.step(command)?;
        let step_count = self.episode.advance();
        let truncated = self.episode.is_truncated();
        let mut info = outcome.info;
        info.insert(EPISODE_LENGTH_KEY.into(), step_count.into());
        if outcome.done || truncated {
            info.insert(FINAL_EPISODE_LENGTH_KEY.into(), step_count.into());
        }

        self.episode_return += outcome.reward;
        if outcome.done || truncated {
            info!(
                "episode finished: length={} return={} truncated={}",
                step_count, self.episode_return, truncated
            );
        }

        let observation = self.observe()?;
        if self.render_mode == RenderMode::Human {
            self.emit(&observation, None)?;
        }

        Ok(StepResult {
            observation,
            reward: outcome.reward,
            done: outcome.done,
            truncated,
            info,
        })
    }

    /// Fresh observation of the current frame
    pub fn observe(&self) -> Result<Observation, EnvError> {
        self.builder.build(&self.engine.state())
    }

    /// Render the current frame, optionally with the command about to run
    ///
    /// Fails with [`EnvError::NoRenderSink`] when no sink is attached; so do
    /// `reset` and `step` in [`RenderMode::Human`].
    pub fn render(&mut self, pending: Option<&Command>) -> Result<(), EnvError> {
        let observation = self.observe()?;
        self.emit(&observation, pending)
    }

    fn emit(&mut self, observation: &Observation, pending: Option<&Command>) -> Result<(), EnvError> {
        match self.sink.as_mut() {
            Some(sink) => sink.render(observation, pending).map_err(EnvError::Render),
            None => Err(EnvError::NoRenderSink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineDims, EngineError, EngineStep, RawGameState};
    use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

    /// Never ends on its own; records commands.
    struct StubEngine {
        queue_len: usize,
        commands: Vec<Command>,
        done_after: Option<usize>,
        fail_next: bool,
    }

    impl StubEngine {
        fn new(queue_len: usize) -> Self {
            Self {
                queue_len,
                commands: Vec::new(),
                done_after: None,
                fail_next: false,
            }
        }
    }

    impl GameEngine for StubEngine {
        fn dimensions(&self) -> EngineDims {
            EngineDims {
                board_width: BOARD_WIDTH,
                board_height: BOARD_HEIGHT,
                queue_len: self.queue_len,
            }
        }

        fn reset(&mut self) -> Result<(), EngineError> {
            self.commands.clear();
            Ok(())
        }

        fn step(&mut self, command: Command) -> Result<EngineStep, EngineError> {
            if std::mem::take(&mut self.fail_next) {
                return Err(EngineError::NoActivePiece);
            }
            self.commands.push(command);
            Ok(EngineStep {
                reward: 1.0,
                done: self.done_after == Some(self.commands.len()),
                info: Info::new(),
            })
        }

        fn state(&self) -> RawGameState {
            RawGameState {
                width: BOARD_WIDTH,
                height: BOARD_HEIGHT,
                board: vec![0; BOARD_WIDTH * BOARD_HEIGHT],
                queue: vec![PieceKind::I; self.queue_len],
                active: Some(PieceKind::T),
                held: None,
            }
        }
    }

    #[test]
    fn step_budget_truncates_on_the_last_step() {
        let config = EnvConfig::default().with_max_steps(5);
        let mut env = TetrisEnv::new(StubEngine::new(6), &config).unwrap();
        env.reset(None, None).unwrap();

        for i in 1..=5u32 {
            let result = env.step(0).unwrap();
            assert_eq!(result.info[EPISODE_LENGTH_KEY], i);
            if i < 5 {
                assert!(!result.truncated);
                assert!(!result.info.contains_key(FINAL_EPISODE_LENGTH_KEY));
            } else {
                assert!(result.truncated);
                assert!(!result.done);
                assert_eq!(result.info[FINAL_EPISODE_LENGTH_KEY], 5);
            }
        }
    }

    #[test]
    fn placement_profile_never_truncates() {
        let config = EnvConfig::default()
            .with_profile(Profile::Placement)
            .with_max_steps(2);
        let mut env = TetrisEnv::new(StubEngine::new(5), &config).unwrap();
        env.reset(None, None).unwrap();
        for _ in 0..10 {
            let result = env.step(12).unwrap();
            assert!(!result.truncated);
        }
        assert_eq!(env.episode().step_count(), 10);
    }

    #[test]
    fn done_from_engine_reports_final_length() {
        let mut engine = StubEngine::new(6);
        engine.done_after = Some(3);
        let mut env = TetrisEnv::new(engine, &EnvConfig::default()).unwrap();
        env.reset(None, None).unwrap();
        env.step(1).unwrap();
        env.step(2).unwrap();
        let last = env.step(3).unwrap();
        assert!(last.done);
        assert!(!last.truncated);
        assert!(last.is_over());
        assert_eq!(last.info[FINAL_EPISODE_LENGTH_KEY], 3);
    }

    #[test]
    fn reset_restarts_step_count() {
        let mut env = TetrisEnv::new(StubEngine::new(6), &EnvConfig::default()).unwrap();
        env.reset(None, None).unwrap();
        env.step(0).unwrap();
        env.step(0).unwrap();
        let (_, info) = env.reset(None, None).unwrap();
        assert!(info.is_empty());
        assert_eq!(env.episode().step_count(), 0);
        assert_eq!(env.step(0).unwrap().info[EPISODE_LENGTH_KEY], 1);
    }

    #[test]
    fn out_of_range_code_is_not_counted_or_forwarded() {
        let mut env = TetrisEnv::new(StubEngine::new(6), &EnvConfig::default()).unwrap();
        env.reset(None, None).unwrap();
        assert!(matches!(
            env.step(9),
            Err(EnvError::ActionOutOfRange { code: 9, size: 9 })
        ));
        assert_eq!(env.episode().step_count(), 0);
        assert!(env.engine().commands.is_empty());
    }

    #[test]
    fn decoded_command_reaches_the_engine() {
        let config = EnvConfig::default().with_profile(Profile::Placement);
        let mut env = TetrisEnv::new(StubEngine::new(5), &config).unwrap();
        env.reset(None, None).unwrap();
        env.step(40).unwrap();
        env.step(0).unwrap();
        assert_eq!(
            env.engine().commands,
            vec![
                Command::Hold,
                Command::Place {
                    column: -1,
                    rotation: crate::types::Rotation::North
                }
            ]
        );
    }

    #[test]
    fn render_without_a_sink_is_an_error() {
        let mut env = TetrisEnv::new(StubEngine::new(6), &EnvConfig::default()).unwrap();
        env.reset(None, None).unwrap();
        assert!(matches!(env.render(None), Err(EnvError::NoRenderSink)));

        let human = EnvConfig::default().with_render_mode(RenderMode::Human);
        let mut env = TetrisEnv::new(StubEngine::new(6), &human).unwrap();
        assert!(matches!(env.reset(None, None), Err(EnvError::NoRenderSink)));
    }

    #[test]
    fn engine_error_does_not_use_up_the_budget() {
        let config = EnvConfig::default().with_max_steps(2);
        let mut engine = StubEngine::new(6);
        engine.fail_next = true;
        let mut env = TetrisEnv::new(engine, &config).unwrap();
        env.reset(None, None).unwrap();
        assert!(matches!(
            env.step(0),
            Err(EnvError::Engine(EngineError::NoActivePiece))
        ));
        assert_eq!(env.episode().step_count(), 0);
        assert!(!env.step(0).unwrap().truncated);
        assert!(env.step(0).unwrap().truncated);
    }

    #[test]
    fn mismatched_queue_is_a_construction_error() {
        let err = TetrisEnv::new(StubEngine::new(6), &EnvConfig::default().with_profile(Profile::Placement))
            .err()
            .unwrap();
        assert!(matches!(err, EnvError::ShapeMismatch { field: "queue", .. }));
    }
}
