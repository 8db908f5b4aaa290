use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
    process,
};

use anyhow::{anyhow, bail, Result};
use fs2::FileExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("another daemon instance is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Holds the exclusive advisory lock on the PID file.
///
/// The lock is tied to the open file handle, so it is released when the
/// guard is dropped or when the process exits. The file's content is only
/// informational, the lock itself is the source of truth for "is running".
pub struct InstanceGuard {
    // Held, not read: dropping it closes the descriptor and frees the lock
    _lock_file: File,
    pid_file: PathBuf,
}

impl InstanceGuard {
    pub fn acquire(pid_file: &Path) -> Result<Self, AcquireError> {
        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .mode(0o600)
            .open(pid_file)?;

        match lock_file.try_lock_exclusive() {
            Ok(()) => {}
            Err(err) if err.kind() == fs2::lock_contended_error().kind() => {
                return Err(AcquireError::AlreadyRunning)
            }
            Err(err) => return Err(err.into()),
        }

        lock_file.set_len(0)?;
        writeln!(lock_file, "{}", process::id())?;
        lock_file.flush()?;

        Ok(Self {
            _lock_file: lock_file,
            pid_file: pid_file.to_owned(),
        })
    }

    pub fn release(&self) -> io::Result<()> {
        fs::remove_file(&self.pid_file)
    }
}

/// Reads the running daemon's PID from the PID file.
///
/// A missing file or an unparsable content both mean the daemon is not
/// running (e.g. it was never started, or it crashed before writing).
pub fn resolve_running_pid(pid_file: &Path) -> Result<i32> {
    let raw = fs::read_to_string(pid_file).map_err(|_| anyhow!("Daemon is not running."))?;

    match raw.trim().parse::<i32>() {
        Ok(pid) if pid > 0 => Ok(pid),
        _ => bail!("Daemon is not running."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_writes_own_pid() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("daemon.pid");

        let _guard = InstanceGuard::acquire(&pid_file).unwrap();

        assert_eq!(
            resolve_running_pid(&pid_file).unwrap(),
            process::id() as i32
        );
    }

    #[test]
    fn second_acquire_fails_while_lock_is_held() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("daemon.pid");

        let guard = InstanceGuard::acquire(&pid_file).unwrap();

        assert!(matches!(
            InstanceGuard::acquire(&pid_file),
            Err(AcquireError::AlreadyRunning)
        ));

        drop(guard);

        // Dropping the holder releases the lock, so acquisition works again
        let _guard = InstanceGuard::acquire(&pid_file).unwrap();
    }

    #[test]
    fn release_deletes_the_pid_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("daemon.pid");

        let guard = InstanceGuard::acquire(&pid_file).unwrap();
        guard.release().unwrap();

        assert!(!pid_file.exists());
    }

    #[test]
    fn resolve_fails_on_missing_or_garbled_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("daemon.pid");

        assert!(resolve_running_pid(&pid_file).is_err());

        fs::write(&pid_file, "not a pid\n").unwrap();
        assert!(resolve_running_pid(&pid_file).is_err());

        fs::write(&pid_file, "-4\n").unwrap();
        assert!(resolve_running_pid(&pid_file).is_err());
    }
}
