mod client;
mod server;

pub use client::SocketClient;
pub use server::{create_socket, serve_on_socket};

/// Commands and responses are capped to this size on both sides of the
/// protocol, matching the client contract of "read up to 255 bytes".
pub const MAX_MESSAGE_LEN: usize = 255;
