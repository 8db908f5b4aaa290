use std::{
    fs,
    io::{Read, Write},
    os::unix::net::{UnixListener, UnixStream},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{debug, error, info};

use super::MAX_MESSAGE_LEN;

pub fn create_socket(socket_path: &Path) -> Result<UnixListener> {
    // A previous daemon may have crashed without cleaning up its socket
    if socket_path.exists() {
        fs::remove_file(socket_path).context("Failed to remove the stale socket file")?;
    }

    UnixListener::bind(socket_path).context("Failed to create socket with the provided path")
}

/// The daemon's accept loop: strictly sequential, one client at a time,
/// one command per connection. Accept failures are logged and skipped,
/// they are never fatal. Loops until the process exits.
pub fn serve_on_socket(listener: UnixListener, process: impl Fn(&str) -> &'static str) -> ! {
    info!("Daemon is running and listening on socket.");

    for client in listener.incoming() {
        let client = match client {
            Ok(client) => client,
            Err(err) => {
                error!("Failed to accept client connection: {err}");
                continue;
            }
        };

        serve_client(client, &process);
    }

    unreachable!()
}

/// Serves a single request/response exchange, then drops the connection.
/// A client that disconnects before sending anything gets no response.
pub fn serve_client(mut client: UnixStream, process: impl Fn(&str) -> &'static str) {
    let mut buf = [0; MAX_MESSAGE_LEN];

    let received = match client.read(&mut buf) {
        Ok(received) => received,
        Err(err) => {
            error!("Failed to read from client: {err}");
            return;
        }
    };

    if received == 0 {
        debug!("Client disconnected before sending a command.");
        return;
    }

    let command = String::from_utf8_lossy(&buf[..received]);

    info!("Received command: {command}");

    let response = process(&command);

    if let Err(err) = client.write_all(response.as_bytes()) {
        error!("Failed to transmit response to client: {err}");
    }
}
