//! Interactive terminal play (default binary).
//!
//! Drives the primitive-profile environment from the keyboard. Without input
//! for a second the piece keeps falling through injected no-ops. The key
//! bindings are drawn under every frame.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{bail, Result};
use env_logger::Env;
use log::warn;

use tetris_gym::adapter::{EnvConfig, Profile, RenderMode, TetrisEnv};
use tetris_gym::cli::{seed_from_time, CliArgs};
use tetris_gym::core::Game;
use tetris_gym::input::{
    install_interrupt_handler, InteractiveLoop, LoopConfig, LoopExit, SystemClock, TerminalKeys,
};
use tetris_gym::term::{LineEnding, TerminalScreen, TextRenderer};

const USAGE: &str = "usage: tetris-gym [--max-steps N] [--seed N]";

const CONTROLS: &str = "Controls:
h/l   - Move Left/Right
j     - Soft Drop
k     - Rotate Right
z     - Rotate Left
a     - Rotate Down
c     - Hold
space - Hard Drop
q     - Quit";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = args
        .apply(EnvConfig::from_env())
        .with_render_mode(RenderMode::Human);
    if config.profile != Profile::Primitive {
        bail!("interactive play uses the primitive profile");
    }

    let seed = config.seed.unwrap_or_else(seed_from_time);
    let engine = Game::new(seed).with_queue_len(config.profile.engine_queue_len());
    let renderer = TextRenderer::stdout()
        .with_line_ending(LineEnding::CrLf)
        .with_clear_screen(true)
        .with_footer(CONTROLS);
    let mut env = TetrisEnv::new(engine, &config)?.with_render_sink(renderer);

    let interrupt = match install_interrupt_handler() {
        Ok(flag) => flag,
        Err(e) => {
            warn!("SIGINT handler not installed: {}", e);
            Arc::new(AtomicBool::new(false))
        }
    };

    let mut screen = TerminalScreen::new();
    screen.enter()?;

    let result = run(&mut env, interrupt);

    // Always try to restore terminal state.
    let _ = screen.exit();

    if result? == LoopExit::Interrupted {
        println!("\nExiting game...");
    }
    Ok(())
}

fn run(env: &mut TetrisEnv<Game>, interrupt: Arc<AtomicBool>) -> Result<LoopExit> {
    env.reset(None, None)?;
    let mut game = InteractiveLoop::new(TerminalKeys::new(), SystemClock::new())
        .with_config(LoopConfig::from_env())
        .with_interrupt(interrupt);
    Ok(game.run(env)?.exit)
}
