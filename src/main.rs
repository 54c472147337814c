//! Solo: run a command only if it is not already running.
//!
//! Wraps a command invocation in a host-wide advisory file lock: the wrapped
//! command runs only when no other instance holding the same lock file is
//! alive. Intended for autostarted or cron-triggered programs where a second
//! concurrent instance is unsafe or wasteful.
//!
//! Control flow: resolve the lock path, install termination handlers,
//! acquire the lock, fork/exec the command, wait, shut down. Every exit path
//! after acquisition funnels through `shutdown`, which removes the lock file
//! before closing its handle.

mod cli;
mod error;
mod exit_codes;
mod lock;
mod lockpath;
mod shutdown;
mod signals;
mod supervisor;

use cli::Cli;
use error::SoloError;
use shutdown::shutdown;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // The command vector is non-empty (clap enforces it); its first element
    // names the program and seeds the derived lock path.
    let lock_path = match lockpath::resolve(cli.lockfile.clone(), &cli.command[0]) {
        Ok(path) => path,
        Err(err) => return fail_before_lock(err),
    };

    // Handlers go in before the lock file exists: a termination signal
    // arriving at any point afterwards must be able to reach cleanup.
    if let Err(err) = signals::install() {
        return fail_before_lock(err);
    }

    let lock = match lock::acquire(&lock_path, &cli.command) {
        Ok(lock) => lock,
        Err(err) => {
            // A failed acquire registers nothing, so this shutdown removes
            // nothing; it is still the single exit funnel.
            eprintln!("solo: {err}");
            shutdown(err.exit_code());
        }
    };

    match supervisor::run(&lock, &cli.command) {
        Ok(()) => shutdown(exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("solo: {err}");
            shutdown(err.exit_code());
        }
    }
}

/// Report an error from before the lock exists; nothing to clean up.
fn fail_before_lock(err: SoloError) -> ExitCode {
    eprintln!("solo: {err}");
    ExitCode::from(err.exit_code() as u8)
}
