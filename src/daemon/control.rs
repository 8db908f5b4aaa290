use std::{
    fs,
    path::PathBuf,
    process,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
};

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGTERM},
    iterator::Signals,
};

use crate::{error, info, warn};

use super::lock::InstanceGuard;

/// The daemon's control actions, shared between the signal-handling thread
/// and the command dispatcher so that an OS signal and a socket command
/// converge on the same code path.
pub struct Controller {
    guard: InstanceGuard,
    socket_file: PathBuf,
    reloads: AtomicUsize,
}

impl Controller {
    pub fn new(guard: InstanceGuard, socket_file: PathBuf) -> Self {
        Self {
            guard,
            socket_file,
            reloads: AtomicUsize::new(0),
        }
    }

    /// Nothing is actually reloaded in this minimal daemon, the
    /// notification itself is the whole action.
    pub fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        info!("Reloading configuration.");
    }

    pub fn shutdown(&self) -> ! {
        self.cleanup();
        process::exit(0);
    }

    /// Removes the socket file and the PID file. The PID file lock itself
    /// is released by process exit.
    pub fn cleanup(&self) {
        if let Err(err) = fs::remove_file(&self.socket_file) {
            error!("Failed to remove the socket file: {err}");
        }

        if let Err(err) = self.guard.release() {
            error!("Failed to remove the PID file: {err}");
        }
    }

    #[cfg(test)]
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn socket_file(&self) -> &std::path::Path {
        &self.socket_file
    }
}

/// Consumes delivered signals on a dedicated thread, turning them into
/// ordinary control actions on the shared [`Controller`].
pub fn install_signal_handlers(controller: Arc<Controller>) -> Result<()> {
    let mut signals =
        Signals::new([SIGHUP, SIGTERM]).context("Failed to register the signal handlers")?;

    thread::spawn(move || {
        for signal in signals.forever() {
            match signal {
                SIGHUP => {
                    info!("Received SIGHUP signal, reloading configuration.");
                    controller.reload();
                }

                SIGTERM => {
                    info!("Received SIGTERM signal, exiting.");
                    controller.shutdown();
                }

                other => warn!("Received unexpected signal {other}."),
            }
        }
    });

    Ok(())
}
