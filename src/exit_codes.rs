//! Exit code constants for the solo CLI.
//!
//! Fixed codes:
//! - 0: Success (full run, child reaped)
//! - 1: Usage error (bad arguments, unresolvable lock path)
//! - 2: Interrupted (teardown triggered by SIGHUP/SIGINT/SIGTERM)
//!
//! System-level failures (lock I/O, fork, wait, handler installation) exit
//! with the underlying errno instead of a fixed code; in particular a busy
//! lock exits with `EAGAIN`.

/// Successful execution.
///
/// The wrapper reports success once the child has been reaped, regardless of
/// the child's own exit status. The lock guards *whether* the command runs,
/// not whether it succeeded.
pub const SUCCESS: i32 = 0;

/// Usage error: insufficient arguments or an invalid derived program name.
pub const USAGE: i32 = 1;

/// Torn down by a recognized termination signal.
pub const INTERRUPTED: i32 = 2;
