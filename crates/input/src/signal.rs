//! SIGINT from outside the terminal.
//!
//! In raw mode Ctrl-C arrives as a key event, but a signal sent with `kill`
//! still needs to stop the loop cleanly so the terminal gets restored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

/// Install a process-wide SIGINT handler that raises the returned flag.
///
/// Only one handler can be installed per process; a second call fails.
pub fn install_interrupt_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let flag = Arc::new(AtomicBool::new(false));
    let raised = Arc::clone(&flag);
    ctrlc::set_handler(move || {
        raised.store(true, Ordering::SeqCst);
    })?;
    debug!("SIGINT handler installed");
    Ok(flag)
}
