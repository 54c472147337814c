//! CLI argument parsing for solo.
//!
//! Uses clap derive macros. The surface is deliberately tiny:
//! `solo COMMAND [ARGS...]` or `solo -l LOCKFILE COMMAND [ARGS...]`.

use crate::exit_codes;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Solo implements a shell singleton.
///
/// By wrapping a command invocation with solo, the command is guaranteed to
/// be the only one holding its lock file that is running at a given time.
/// Useful for autostarted or cron-triggered programs where a second
/// concurrent instance is unsafe or wasteful.
#[derive(Parser, Debug)]
#[command(name = "solo")]
#[command(author, version, about)]
pub struct Cli {
    /// Lock file to use instead of the derived <scratch-dir>/solo-lock-<name>
    ///
    /// Recognized only before COMMAND. A -l/--lockfile appearing after the
    /// command word belongs to the wrapped command and is passed through.
    #[arg(short = 'l', long = "lockfile", value_name = "LOCKFILE")]
    pub lockfile: Option<PathBuf>,

    /// Command to run, followed by its arguments (passed through unmodified)
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

impl Cli {
    /// Parse command line arguments.
    ///
    /// Malformed or insufficient arguments print the usage text and exit
    /// with the usage code; --help and --version exit successfully.
    pub fn parse_args() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => {
                let code = if err.use_stderr() {
                    exit_codes::USAGE
                } else {
                    exit_codes::SUCCESS
                };
                let _ = err.print();
                std::process::exit(code);
            }
        }
    }
}
