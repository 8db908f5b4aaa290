use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use dirs::runtime_dir;

pub struct Paths {
    pub pid_file: PathBuf,
    pub socket_file: PathBuf,
    pub stdout_log_file: PathBuf,
    pub stderr_log_file: PathBuf,
    pub data_dir: PathBuf,
}

impl Paths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            pid_file: data_dir.join("daemon.pid"),
            socket_file: data_dir.join("daemon.sock"),
            stdout_log_file: data_dir.join("daemon.stdout.log"),
            stderr_log_file: data_dir.join("daemon.stderr.log"),
            data_dir,
        }
    }
}

pub fn construct_data_dir_paths(custom_data_dir: Option<PathBuf>) -> Result<Paths> {
    let default_data_dir = runtime_dir().unwrap_or_else(env::temp_dir).join("warden");

    let data_dir = custom_data_dir.unwrap_or(default_data_dir);

    if !data_dir.is_dir() {
        fs::create_dir_all(&data_dir).context("Failed to create the data directory")?;
    }

    Ok(Paths::new(data_dir))
}
