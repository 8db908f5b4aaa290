use std::{
    fs::OpenOptions,
    sync::{atomic::Ordering, Arc},
};

use anyhow::{Context, Result};

use crate::{
    daemon::{
        control::{install_signal_handlers, Controller},
        detach::detach,
        dispatch::dispatch,
        lock::InstanceGuard,
    },
    info,
    ipc::{create_socket, serve_on_socket},
    paths::Paths,
    utils::{datetime::get_now, logging::PRINT_MESSAGES_DATETIME},
};

/// Becomes the daemon: detaches from the terminal, takes the single-instance
/// lock, installs the signal handlers and serves commands forever. Only the
/// launching parent process ever returns from this function (by exiting
/// inside [`detach`]); any error past the fork is reported through the log
/// files and a non-zero exit.
pub fn start_daemon(paths: &Paths) -> Result<()> {
    let stdout_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.stdout_log_file)
        .context("Failed to open the daemon's STDOUT log file")?;

    let stderr_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.stderr_log_file)
        .context("Failed to open the daemon's STDERR log file")?;

    detach(stdout_file, stderr_file)?;

    // From here on we are the detached child and log lines land in the log
    // files, so prefix them with a timestamp
    PRINT_MESSAGES_DATETIME.store(true, Ordering::SeqCst);

    info!("Successfully started the daemon on {}", get_now());

    let guard =
        InstanceGuard::acquire(&paths.pid_file).context("Failed to lock the PID file")?;

    let controller = Arc::new(Controller::new(guard, paths.socket_file.clone()));

    install_signal_handlers(Arc::clone(&controller))?;

    info!("Setting up the socket...");

    let socket = create_socket(&paths.socket_file)?;

    serve_on_socket(socket, move |command| dispatch(command, &controller))
}
