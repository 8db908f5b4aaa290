use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(
    author,
    version,
    about = "A minimal background daemon driven by signals and a local control socket"
)]
pub struct Cmd {
    #[clap(short, long, help = "Path to the data directory")]
    pub data_dir: Option<PathBuf>,

    #[clap(short, long, help = "Display debug messages")]
    pub verbose: bool,

    // No action = become the daemon
    #[clap(subcommand)]
    pub action: Option<Action>,
}

#[derive(Subcommand)]
pub enum Action {
    #[clap(about = "Ask the running daemon to reload its configuration")]
    Reload,

    #[clap(about = "Terminate the running daemon")]
    Kill,

    #[clap(about = "Check that the daemon is running and responding to commands")]
    Status,

    #[clap(about = "Send a raw command to the daemon and print its response")]
    Send(SendArgs),
}

#[derive(Args)]
pub struct SendArgs {
    #[clap(help = "The command to send")]
    pub command: String,
}
