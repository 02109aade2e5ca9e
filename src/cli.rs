//! Command-line flags shared by the binaries.
//!
//! Flags override the environment (`EnvConfig::from_env`), which overrides
//! the defaults.
//!
//! ```text
//! --profile <placement|primitive>
//! --max-steps <n>
//! --seed <n>
//! --episodes <n>      (rollout only)
//! --render
//! --json              (rollout only)
//! ```

use anyhow::{anyhow, bail, Context, Result};

use crate::adapter::{EnvConfig, Profile, RenderMode};

pub const DEFAULT_EPISODES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub profile: Option<Profile>,
    pub max_steps: Option<u32>,
    pub seed: Option<u64>,
    pub episodes: u32,
    pub render: bool,
    pub json: bool,
    pub help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            profile: None,
            max_steps: None,
            seed: None,
            episodes: DEFAULT_EPISODES,
            render: false,
            json: false,
            help: false,
        }
    }
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };
            let mut value = |name: &str| -> Result<String> {
                inline
                    .clone()
                    .or_else(|| args.next())
                    .ok_or_else(|| anyhow!("{} needs a value", name))
            };

            match flag.as_str() {
                "--profile" => {
                    let v = value("--profile")?;
                    parsed.profile = Some(v.parse::<Profile>()?);
                }
                "--max-steps" => {
                    let v = value("--max-steps")?;
                    parsed.max_steps =
                        Some(v.parse().with_context(|| format!("bad --max-steps: {}", v))?);
                }
                "--seed" => {
                    let v = value("--seed")?;
                    parsed.seed = Some(v.parse().with_context(|| format!("bad --seed: {}", v))?);
                }
                "--episodes" => {
                    let v = value("--episodes")?;
                    parsed.episodes = v.parse().with_context(|| format!("bad --episodes: {}", v))?;
                }
                "--render" => parsed.render = true,
                "--json" => parsed.json = true,
                "-h" | "--help" => parsed.help = true,
                other => bail!("unknown argument: {}", other),
            }
        }

        Ok(parsed)
    }

    /// Layer the flags over `base`
    pub fn apply(&self, base: EnvConfig) -> EnvConfig {
        let mut config = base;
        if let Some(profile) = self.profile {
            config = config.with_profile(profile);
        }
        if let Some(max_steps) = self.max_steps {
            config = config.with_max_steps(max_steps);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.render {
            config = config.with_render_mode(RenderMode::Human);
        }
        config
    }
}

/// Seed from the wall clock, for runs without `--seed`
pub fn seed_from_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
