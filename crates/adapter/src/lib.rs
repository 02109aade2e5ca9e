//! Environment adapter - the episodic interface a learning agent drives
//!
//! Wraps a [`core::GameEngine`] behind the standard reset/step protocol with
//! fixed, declared action and observation spaces.
//!
//! # Module Structure
//!
//! - [`codec`]: integer action codes to [`types::Command`]s
//! - [`observation`]: raw engine state to fixed-shape arrays
//! - [`space`]: declared action and observation spaces
//! - [`profile`]: the two configuration profiles (placement, primitive)
//! - [`config`]: environment configuration, including `from_env`
//! - [`env`]: the episode controller, [`TetrisEnv`]
//! - [`error`]: [`EnvError`]
//!
//! # Example
//!
//! ```
//! use tetris_gym_adapter::{EnvConfig, TetrisEnv};
//! use tetris_gym_adapter::core::Game;
//!
//! let config = EnvConfig::default().with_max_steps(3).with_seed(7);
//! let engine = Game::new(0).with_queue_len(config.profile.engine_queue_len());
//! let mut env = TetrisEnv::new(engine, &config).unwrap();
//!
//! let (obs, _info) = env.reset(None, None).unwrap();
//! assert!(env.observation_space().contains(&obs));
//!
//! let mut last = env.step(0).unwrap();
//! while !last.is_over() {
//!     last = env.step(0).unwrap();
//! }
//! assert!(last.truncated);
//! assert_eq!(last.info["final_episode_length"], 3);
//! ```

pub mod codec;
pub mod config;
pub mod env;
pub mod error;
pub mod observation;
pub mod profile;
pub mod space;

pub use tetris_gym_core as core;
pub use tetris_gym_types as types;

pub use codec::{encode_placement, ActionCode, ActionCodec};
pub use config::{EnvConfig, RenderMode};
pub use env::{EpisodeState, RenderSink, StepResult, TetrisEnv};
pub use error::{EnvError, ParseNameError};
pub use observation::{Observation, ObservationBuilder, QueueSource};
pub use profile::Profile;
pub use space::{BoxSpace, Discrete, ObservationSpace};
