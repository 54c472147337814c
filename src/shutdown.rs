//! Process teardown: the single exit routine.
//!
//! Both the normal control flow and the termination-signal handler end the
//! process here, so the teardown ordering lives in exactly one place
//! instead of two maintained copies.

use crate::lock;

/// Release the registered lock and terminate the process with `status`.
///
/// Callable from asynchronous signal delivery: the release performs only
/// atomic swaps plus `unlink`/`close`, and `_exit` skips the atexit
/// machinery and stream flushing that would not be reentrant-safe.
/// Diagnostics must already be on stderr before this is called.
pub fn shutdown(status: i32) -> ! {
    lock::release_registered();
    unsafe { libc::_exit(status) }
}
