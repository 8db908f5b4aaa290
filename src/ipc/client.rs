use std::{
    io::{ErrorKind, Read, Write},
    net::Shutdown,
    os::unix::net::UnixStream,
    path::Path,
};

use anyhow::{bail, Context, Result};

use super::MAX_MESSAGE_LEN;

/// A protocol consumer: connects to the daemon's socket, sends exactly one
/// command and reads back at most [`MAX_MESSAGE_LEN`] bytes of response.
pub struct SocketClient {
    stream: UnixStream,
}

impl SocketClient {
    pub fn connect(socket_path: &Path) -> Result<Self> {
        if !socket_path.exists() {
            bail!("Daemon is not running.");
        }

        match UnixStream::connect(socket_path) {
            Ok(stream) => Ok(Self { stream }),

            Err(err) => match err.kind() {
                ErrorKind::ConnectionRefused => bail!("Daemon is not running."),
                err => bail!("Failed to handle the socket file: {}", err),
            },
        }
    }

    /// Performs the single request/response exchange the connection is
    /// scoped to. An empty read means the daemon chose not to respond
    /// (which it does for empty payloads), reported here as `None`.
    pub fn send_command(mut self, command: &str) -> Result<Option<String>> {
        self.stream
            .write_all(command.as_bytes())
            .context("Failed to transmit the command to the daemon")?;

        self.stream
            .flush()
            .context("Failed to flush the daemon's stream")?;

        // Signals end-of-command, since the protocol has no framing
        self.stream
            .shutdown(Shutdown::Write)
            .context("Failed to close the sending half of the connection")?;

        let mut response = String::new();

        (&self.stream)
            .take(MAX_MESSAGE_LEN as u64)
            .read_to_string(&mut response)
            .context("Failed to read the daemon's response")?;

        if response.is_empty() {
            Ok(None)
        } else {
            Ok(Some(response))
        }
    }
}
