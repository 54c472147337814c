//! Lock-file diagnostic metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

/// Diagnostic record written into a held lock file.
///
/// The singleton protocol never reads this back; it exists so that a human
/// staring at a stray `solo-lock-*` file can see who held it and for what.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockMetadata {
    /// Owner of the lock (`user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder.
    pub pid: u32,

    /// Timestamp when the lock was acquired (RFC3339).
    pub acquired_at: DateTime<Utc>,

    /// The wrapped command line.
    pub command: String,
}

impl LockMetadata {
    /// Create metadata for the current process and command.
    pub fn new(command: &[OsString]) -> Self {
        Self {
            owner: owner_string(),
            pid: std::process::id(),
            acquired_at: Utc::now(),
            command: command
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Replace the contents of `file` with this record as pretty JSON.
    pub fn write_to(&self, file: &mut File) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()
    }
}

/// Get the owner string for lock metadata.
fn owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
