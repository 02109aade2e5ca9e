//! Headless rollouts with a uniformly random policy.
//!
//! Exercises the training protocol end to end (`reset`, then `step` until the
//! episode is over) and prints one summary per episode.

use anyhow::Result;
use env_logger::Env;
use log::debug;
use serde::Serialize;

use tetris_gym::adapter::{EnvConfig, RenderMode, TetrisEnv};
use tetris_gym::cli::{seed_from_time, CliArgs};
use tetris_gym::core::{Game, SimpleRng};
use tetris_gym::term::TextRenderer;

const USAGE: &str = "usage: tetris-gym-rollout [--profile placement|primitive] [--max-steps N] \
                     [--seed N] [--episodes N] [--render] [--json]";

/// Hard stop for profiles without a step budget
const STEP_CAP: u32 = 100_000;

#[derive(Debug, Serialize)]
struct EpisodeSummary {
    episode: u32,
    length: u32,
    #[serde(rename = "return")]
    episode_return: f64,
    done: bool,
    truncated: bool,
    capped: bool,
    score: Option<i64>,
    lines: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = args.apply(EnvConfig::from_env());
    let seed = config.seed.unwrap_or_else(seed_from_time);
    let config = config.with_seed(seed);
    let render = config.render_mode == RenderMode::Human;
    // Frames are drawn explicitly below, with the chosen command.
    let config = config.with_render_mode(RenderMode::None);

    let engine = Game::new(seed).with_queue_len(config.profile.engine_queue_len());
    let mut env = TetrisEnv::new(engine, &config)?;
    if render {
        env = env.with_render_sink(TextRenderer::stdout());
    }

    let actions = env.action_space().n as u32;
    let mut policy = SimpleRng::from_u64(seed.rotate_left(32));
    debug!(
        "rollout: profile={} seed={} episodes={}",
        config.profile.as_str(),
        seed,
        args.episodes
    );

    for episode in 0..args.episodes {
        env.reset(None, None)?;
        let mut summary = EpisodeSummary {
            episode,
            length: 0,
            episode_return: 0.0,
            done: false,
            truncated: false,
            capped: false,
            score: None,
            lines: None,
        };

        loop {
            let code = i64::from(policy.next_range(actions));
            if render {
                let command = env.codec().decode(code)?;
                env.render(Some(&command))?;
            }

            let result = env.step(code)?;
            summary.length = env.episode().step_count();
            summary.episode_return += result.reward;
            summary.score = result.info.get("score").and_then(|v| v.as_i64());
            summary.lines = result.info.get("lines").and_then(|v| v.as_u64());

            if result.is_over() {
                summary.done = result.done;
                summary.truncated = result.truncated;
                break;
            }
            if summary.length >= STEP_CAP {
                summary.capped = true;
                break;
            }
        }

        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!(
                "episode {}: length {} return {:.1} score {} lines {}{}",
                summary.episode,
                summary.length,
                summary.episode_return,
                summary.score.unwrap_or(0),
                summary.lines.unwrap_or(0),
                if summary.truncated {
                    " (truncated)"
                } else if summary.capped {
                    " (capped)"
                } else {
                    ""
                }
            );
        }
    }

    Ok(())
}
