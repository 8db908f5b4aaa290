#![forbid(unused_must_use)]

mod cmd;
mod daemon;
mod ipc;
mod paths;
mod utils;

use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use clap::Parser;
use nix::{
    sys::signal::{kill, Signal},
    unistd::Pid,
};

use crate::{
    cmd::{Action, Cmd, SendArgs},
    daemon::{lock::resolve_running_pid, start::start_daemon},
    ipc::SocketClient,
    paths::construct_data_dir_paths,
    utils::logging::PRINT_DEBUG_MESSAGES,
};

fn main() {
    if let Err(err) = inner_main() {
        error_anyhow!(err);
        std::process::exit(1);
    }
}

fn inner_main() -> Result<()> {
    let cmd = Cmd::parse();

    if cmd.verbose {
        PRINT_DEBUG_MESSAGES.store(true, Ordering::SeqCst);
    }

    let paths = construct_data_dir_paths(cmd.data_dir)?;

    debug!("Using data directory at {}", paths.data_dir.display());

    match cmd.action {
        None => start_daemon(&paths),

        Some(Action::Reload) => {
            let pid = resolve_running_pid(&paths.pid_file)?;
            send_signal(pid, Signal::SIGHUP)?;
            success!("Sent SIGHUP to daemon for reload.");
            Ok(())
        }

        Some(Action::Kill) => {
            let pid = resolve_running_pid(&paths.pid_file)?;
            send_signal(pid, Signal::SIGTERM)?;
            success!("Sent SIGTERM to daemon to kill it.");
            Ok(())
        }

        Some(Action::Status) => {
            let client = SocketClient::connect(&paths.socket_file)?;

            match client.send_command("status")? {
                Some(response) => print!("{response}"),
                None => warn!("Daemon closed the connection without a response."),
            }

            Ok(())
        }

        Some(Action::Send(SendArgs { command })) => {
            let client = SocketClient::connect(&paths.socket_file)?;

            match client.send_command(&command)? {
                Some(response) => print!("{response}"),
                None => warn!("Daemon closed the connection without a response."),
            }

            Ok(())
        }
    }
}

fn send_signal(pid: i32, signal: Signal) -> Result<()> {
    kill(Pid::from_raw(pid), signal).context("Failed to send the signal to the daemon")
}
