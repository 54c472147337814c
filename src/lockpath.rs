//! Lock-file path resolution.
//!
//! Produces the single filesystem path used as the lock file: either the
//! explicit `-l` path, or `<scratch-dir>/solo-lock-<program-base-name>`
//! derived from the command.

use crate::error::{Result, SoloError};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Scratch-directory candidates, probed in order.
const SCRATCH_DIR_CANDIDATES: [&str; 2] = ["/var/lock", "/tmp"];

/// Resolve the lock-file path for a command.
///
/// An explicit path bypasses derivation entirely; otherwise the path is
/// derived deterministically from the program's base name and the first
/// usable scratch directory.
pub fn resolve(explicit: Option<PathBuf>, program: &OsStr) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => derived_in(&scratch_dir()?, program),
    }
}

/// First scratch-directory candidate that exists and is a directory, falling
/// back to the current working directory when none qualifies.
fn scratch_dir() -> Result<PathBuf> {
    scratch_dir_from(&SCRATCH_DIR_CANDIDATES.map(|candidate| Path::new(candidate)))
}

/// Probe `candidates` in order for a usable scratch directory.
///
/// A missing candidate is skipped, as is one that exists but is not a
/// directory. A probe that fails for any other reason (permissions, I/O)
/// is reported instead of silently skipped: picking a different lock
/// directory than a sibling invocation would break the singleton guarantee.
fn scratch_dir_from(candidates: &[&Path]) -> Result<PathBuf> {
    for candidate in candidates {
        match fs::metadata(candidate) {
            Ok(meta) if meta.is_dir() => return Ok(candidate.to_path_buf()),
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(SoloError::ScratchDirProbe {
                    path: candidate.to_path_buf(),
                    source: err,
                });
            }
        }
    }
    Ok(PathBuf::from("."))
}

/// Compose `<dir>/solo-lock-<base>` from the program's base name.
///
/// Directory components are stripped so `/usr/bin/foo` and `foo` share a
/// lock; a program name with no usable base (empty, `/`, trailing `..`) is
/// rejected.
fn derived_in(dir: &Path, program: &OsStr) -> Result<PathBuf> {
    let base = Path::new(program)
        .file_name()
        .ok_or_else(|| SoloError::InvalidProgramName(program.to_string_lossy().into_owned()))?;

    let mut name = OsString::from("solo-lock-");
    name.push(base);
    Ok(dir.join(name))
}
