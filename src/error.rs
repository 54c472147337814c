//! Error types for the solo CLI.
//!
//! Uses thiserror for derive macros. Every variant knows the exit code the
//! process should terminate with, so `main` and the cleanup path never have
//! to re-derive it.

use crate::exit_codes;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for solo operations.
///
/// The busy case gets its own variant: "somebody else holds the lock" is the
/// expected outcome of a singleton guard and is reported succinctly, while
/// every other acquisition failure carries full system-error detail.
#[derive(Error, Debug)]
pub enum SoloError {
    /// The command's first argument has no usable base name to derive a
    /// lock-file name from.
    #[error("invalid program name '{0}'")]
    InvalidProgramName(String),

    /// A path or argument contains an interior NUL byte and cannot be
    /// handed to the C ABI.
    #[error("argument contains an interior NUL byte")]
    NulInArgument,

    /// Probing a scratch-directory candidate failed for a reason other than
    /// the directory being absent.
    #[error("cannot probe lock directory '{path}': {source}")]
    ScratchDirProbe { path: PathBuf, source: io::Error },

    /// Another holder currently owns the lock.
    #[error("another instance is already running")]
    LockBusy,

    /// Creating, opening, or locking the lock file failed.
    #[error("cannot acquire lock file '{path}': {source}")]
    LockIo { path: PathBuf, source: io::Error },

    /// A termination-signal handler could not be installed.
    #[error("cannot install handler for {signal}: {source}")]
    SignalInstall { signal: Signal, source: Errno },

    /// Forking the child process failed.
    #[error("failed to fork: {0}")]
    Spawn(Errno),

    /// Reaping the child process failed.
    #[error("failed to wait for child {pid}: {source}")]
    Wait { pid: i32, source: Errno },
}

impl SoloError {
    /// Returns the process exit code for this error.
    ///
    /// System failures map to their errno, like the classic lock wrappers
    /// they imitate; errors with no errno fall back to the usage code.
    pub fn exit_code(&self) -> i32 {
        match self {
            SoloError::InvalidProgramName(_) | SoloError::NulInArgument => exit_codes::USAGE,
            SoloError::ScratchDirProbe { source, .. } | SoloError::LockIo { source, .. } => {
                source.raw_os_error().unwrap_or(exit_codes::USAGE)
            }
            SoloError::LockBusy => libc::EAGAIN,
            SoloError::SignalInstall { source, .. }
            | SoloError::Spawn(source)
            | SoloError::Wait { source, .. } => *source as i32,
        }
    }
}

/// Result type alias for solo operations.
pub type Result<T> = std::result::Result<T, SoloError>;
