use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    os::fd::AsRawFd,
    process,
};

use anyhow::{Context, Result};
use nix::{
    sys::stat::{umask, Mode},
    unistd::{chdir, dup2, fork, setsid, ForkResult},
};

use crate::success;

/// Turns the current process into a session-leader background process.
///
/// The parent exits immediately with a success status, so only the child
/// ever returns from this function. The child resets its umask, starts a
/// new session (detaching from the controlling terminal), pins its working
/// directory to the filesystem root, and redirects its standard streams:
/// stdin to /dev/null, stdout and stderr to the daemon's log files.
pub fn detach(stdout_log: File, stderr_log: File) -> Result<()> {
    match unsafe { fork() }.context("Failed to fork the daemon process")? {
        ForkResult::Parent { child } => {
            success!(
                "Successfully started the daemon with PID {}!",
                child.to_string().bright_yellow()
            );

            io::stdout()
                .flush()
                .context("Failed to flush STDOUT")
                .unwrap();

            process::exit(0);
        }

        ForkResult::Child => {}
    }

    umask(Mode::empty());

    setsid().context("Failed to create a new session")?;

    chdir("/").context("Failed to change the working directory to the filesystem root")?;

    let dev_null = OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/null")
        .context("Failed to open the null device")?;

    dup2(dev_null.as_raw_fd(), io::stdin().as_raw_fd())
        .context("Failed to redirect STDIN to the null device")?;

    dup2(stdout_log.as_raw_fd(), io::stdout().as_raw_fd())
        .context("Failed to redirect STDOUT to the daemon's log file")?;

    dup2(stderr_log.as_raw_fd(), io::stderr().as_raw_fd())
        .context("Failed to redirect STDERR to the daemon's log file")?;

    Ok(())
}
