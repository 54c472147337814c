//! Termination-signal handling.
//!
//! SIGHUP, SIGINT and SIGTERM all route to the shared teardown routine so that
//! an interrupted wrapper never leaves its lock file behind. The handlers
//! are installed before the lock file is created; if any installation
//! fails, startup aborts, because the cleanup guarantee would otherwise be
//! unreliable.

use crate::error::{Result, SoloError};
use crate::exit_codes;
use crate::shutdown::shutdown;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

/// Signals that trigger lock teardown. The child's own signal disposition
/// is untouched; these only cover the wrapper.
const TERMINATION_SIGNALS: [Signal; 3] = [Signal::SIGHUP, Signal::SIGINT, Signal::SIGTERM];

extern "C" fn on_termination(_signal: libc::c_int) {
    // Only async-signal-safe work from here on.
    shutdown(exit_codes::INTERRUPTED);
}

/// Install the teardown handler for all recognized termination signals.
pub fn install() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(on_termination),
        SaFlags::empty(),
        SigSet::empty(),
    );
    for signal in TERMINATION_SIGNALS {
        unsafe { sigaction(signal, &action) }
            .map_err(|source| SoloError::SignalInstall { signal, source })?;
    }
    Ok(())
}
