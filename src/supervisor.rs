//! Child process execution: fork, exec the wrapped command, reap it.

use crate::error::{Result, SoloError};
use crate::lock::Lock;
use nix::sys::wait::waitpid;
use nix::unistd::{ForkResult, execvp, fork};
use std::ffi::{CString, OsString};
use std::os::unix::ffi::OsStrExt;

/// Run the wrapped command while `lock` is held, blocking until it exits.
///
/// The child closes its inherited copy of the lock handle before replacing
/// its image; the lock stays with the parent, which is the only party that
/// may clean it up. An exec failure terminates the child with that
/// failure's errno, deliberately bypassing the parent-owned cleanup path.
///
/// A successful wait returns `Ok(())` without inspecting the child's own
/// termination status; see `exit_codes::SUCCESS`.
pub fn run(lock: &Lock, command: &[OsString]) -> Result<()> {
    let argv: Vec<CString> = command
        .iter()
        .map(|arg| CString::new(arg.as_bytes()).map_err(|_| SoloError::NulInArgument))
        .collect::<Result<_>>()?;
    let program = match argv.first() {
        Some(program) => program.clone(),
        None => return Err(SoloError::InvalidProgramName(String::new())),
    };

    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            unsafe { libc::close(lock.raw_fd()) };
            if let Err(err) = execvp(&program, &argv) {
                eprintln!(
                    "solo: failed to exec {}: {}",
                    program.to_string_lossy(),
                    err
                );
                unsafe { libc::_exit(err as i32) }
            }
            unreachable!("execvp returned without an error");
        }
        Ok(ForkResult::Parent { child }) => {
            waitpid(child, None).map_err(|source| SoloError::Wait {
                pid: child.as_raw(),
                source,
            })?;
            Ok(())
        }
        Err(source) => Err(SoloError::Spawn(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock;
    use serial_test::serial;
    use std::os::unix::ffi::OsStringExt;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn argv_with_interior_nul_is_rejected_before_forking() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cmd.lock");
        let held = lock::acquire(&path, &[OsString::from("true")]).unwrap();

        let command = vec![OsString::from_vec(b"tr\0ue".to_vec())];
        let err = run(&held, &command).unwrap_err();
        assert!(matches!(err, SoloError::NulInArgument));

        // Nothing was forked, so the lock file is still ours to release.
        assert!(path.exists());
        lock::release_registered();
        assert!(!path.exists());
    }
}
