//! Environment configuration.
//!
//! Defaults match the primitive profile with a 2000-step budget and no
//! rendering. `EnvConfig::from_env` reads:
//!
//! - `TETRIS_GYM_PROFILE`: `placement` | `primitive`
//! - `TETRIS_GYM_MAX_STEPS`: step budget (primitive profile only)
//! - `TETRIS_GYM_SEED`: seed for the first reset
//! - `TETRIS_GYM_RENDER`: `human` | `none`
//!
//! Unparseable values fall back to the default.

use std::str::FromStr;

use crate::error::ParseNameError;
use crate::profile::Profile;
use crate::types::DEFAULT_MAX_STEPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Never render on its own
    #[default]
    None,
    /// Render after every reset and step
    Human,
}

impl FromStr for RenderMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(RenderMode::Human),
            "none" | "" => Ok(RenderMode::None),
            _ => Err(ParseNameError {
                kind: "render mode",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub profile: Profile,
    pub max_steps: u32,
    pub seed: Option<u64>,
    pub render_mode: RenderMode,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            max_steps: DEFAULT_MAX_STEPS,
            seed: None,
            render_mode: RenderMode::default(),
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let profile = env::var("TETRIS_GYM_PROFILE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.profile);

        let max_steps = env::var("TETRIS_GYM_MAX_STEPS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_steps);

        let seed = env::var("TETRIS_GYM_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let render_mode = env::var("TETRIS_GYM_RENDER")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.render_mode);

        Self {
            profile,
            max_steps,
            seed,
            render_mode,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Effective step budget under the configured profile
    pub fn step_budget(&self) -> Option<u32> {
        self.profile.step_budget(self.max_steps)
    }
}
