//! Locking subsystem for solo.
//!
//! The singleton guarantee comes from a kernel advisory lock (`lockf`) on an
//! open handle, not from the lock file's existence: the file is created
//! unconditionally and mutual exclusion is decided by the non-blocking
//! whole-file lock request. The file's contents are irrelevant to the
//! protocol; a JSON diagnostic record is written for humans inspecting a
//! held lock.
//!
//! Release ordering is the one hard invariant here: the path is unlinked
//! *before* the handle is closed. A lock request succeeds on a path even
//! when the file backing it has been replaced, so closing first would open
//! a window where a new holder creates-and-locks the same path and our late
//! unlink deletes their lock file out from under them.

mod metadata;

#[cfg(test)]
mod tests;

pub use metadata::LockMetadata;

use crate::error::{Result, SoloError};
use std::ffi::{CString, OsString};
use std::fs::OpenOptions;
use std::os::fd::{AsRawFd, IntoRawFd, RawFd};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::ptr;
use std::sync::atomic::{AtomicI32, AtomicPtr, Ordering};

/// Process-wide registered lock state, readable from the signal handler.
///
/// Written once, after a successful acquisition; consumed by
/// [`release_registered`]. Plain atomics rather than a mutex because the
/// consumer may be running inside asynchronous signal delivery.
static REGISTERED_PATH: AtomicPtr<libc::c_char> = AtomicPtr::new(ptr::null_mut());
static REGISTERED_FD: AtomicI32 = AtomicI32::new(-1);

/// An acquired singleton lock.
///
/// Ownership of the underlying handle lives in the process-wide slot, so the
/// cleanup path has exactly one close site. This value carries the raw fd
/// for the one other party that needs it: the forked child, which closes its
/// inherited copy before exec.
#[derive(Debug)]
pub struct Lock {
    path: PathBuf,
    fd: RawFd,
}

impl Lock {
    /// Path of the held lock file.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw handle of the held lock file.
    pub fn raw_fd(&self) -> RawFd {
        self.fd
    }
}

/// Acquire the singleton lock at `path`.
///
/// Creates the file if absent (owner-write-only), opens a handle, and makes
/// a non-blocking whole-file lock request on it. `EACCES` and `EAGAIN` both
/// mean a live holder and map to [`SoloError::LockBusy`]; every other
/// failure creating, opening, or locking the file is [`SoloError::LockIo`].
///
/// On success the path and handle are registered for the cleanup path. On
/// *any* failure nothing is registered: the file at `path` may already be
/// locked by a racing acquirer even if this call created it, and unlinking
/// it during our teardown would break their guarantee.
pub fn acquire(path: &Path, command: &[OsString]) -> Result<Lock> {
    let path_c = CString::new(path.as_os_str().as_bytes()).map_err(|_| SoloError::NulInArgument)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .mode(0o200)
        .open(path)
        .map_err(|source| SoloError::LockIo {
            path: path.to_path_buf(),
            source,
        })?;

    if unsafe { libc::lockf(file.as_raw_fd(), libc::F_TLOCK, 0) } != 0 {
        let err = std::io::Error::last_os_error();
        return Err(match err.raw_os_error() {
            // POSIX allows either errno for "already locked".
            Some(libc::EACCES) | Some(libc::EAGAIN) => SoloError::LockBusy,
            _ => SoloError::LockIo {
                path: path.to_path_buf(),
                source: err,
            },
        });
    }

    // Diagnostic only: the lock lives in the kernel, not in the contents.
    let _ = LockMetadata::new(command).write_to(&mut file);

    let fd = file.into_raw_fd();
    register(path_c, fd);

    Ok(Lock {
        path: path.to_path_buf(),
        fd,
    })
}

/// Publish the acquired lock for the cleanup path.
///
/// The path goes in first: if a signal lands between the two stores, the
/// handler still unlinks the file, and the not-yet-registered fd is closed
/// by process exit, which happens after the unlink and so preserves the
/// release ordering.
fn register(path: CString, fd: RawFd) {
    REGISTERED_PATH.store(path.into_raw(), Ordering::SeqCst);
    REGISTERED_FD.store(fd, Ordering::SeqCst);
}

/// Release the registered lock: unlink the path, then close the handle.
///
/// Idempotent and async-signal-safe. Each half of the slot is consumed with
/// an atomic swap, so re-entry (main flow and a signal both reaching
/// teardown) releases at most once; only `unlink` and `close` are invoked;
/// and the path buffer is leaked rather than freed, since the allocator is
/// off-limits during signal delivery and the process is about to exit.
/// With nothing registered this is a no-op.
pub fn release_registered() {
    let path = REGISTERED_PATH.swap(ptr::null_mut(), Ordering::SeqCst);
    if !path.is_null() {
        unsafe { libc::unlink(path) };
    }
    let fd = REGISTERED_FD.swap(-1, Ordering::SeqCst);
    if fd != -1 {
        unsafe { libc::close(fd) };
    }
}
