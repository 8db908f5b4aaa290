use std::{
    fs,
    io::{Read, Write},
    net::Shutdown,
    os::unix::net::UnixStream,
    path::Path,
    process::{Command, Output},
    thread,
    time::{Duration, Instant},
};

fn warden(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_warden"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .unwrap()
}

fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);

    while Instant::now() < deadline {
        if condition() {
            return true;
        }

        thread::sleep(Duration::from_millis(20));
    }

    false
}

fn send_command(socket_file: &Path, command: &str) -> String {
    let mut stream = UnixStream::connect(socket_file).unwrap();

    stream.write_all(command.as_bytes()).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();

    response
}

/// Terminates the daemon even when an assertion fails mid-test, so a
/// broken run does not leave a detached process behind.
struct KillOnDrop<'a> {
    data_dir: &'a Path,
}

impl Drop for KillOnDrop<'_> {
    fn drop(&mut self) {
        let _ = warden(self.data_dir, &["kill"]);
    }
}

#[test]
fn status_then_kill_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path();

    let start = warden(data_dir, &[]);
    assert!(start.status.success());

    let _kill_guard = KillOnDrop { data_dir };

    let pid_file = data_dir.join("daemon.pid");
    let socket_file = data_dir.join("daemon.sock");

    assert!(wait_for(|| pid_file.exists() && socket_file.exists()));

    assert_eq!(send_command(&socket_file, "status"), "Daemon is running\n");
    assert_eq!(
        send_command(&socket_file, "reload"),
        "Daemon configuration reloaded\n"
    );
    assert_eq!(send_command(&socket_file, "nonsense"), "Unknown command\n");

    let kill = warden(data_dir, &["kill"]);
    assert!(kill.status.success());

    // Graceful termination removes both the PID file and the socket
    assert!(wait_for(|| !pid_file.exists() && !socket_file.exists()));
}

#[test]
fn double_start_leaves_the_first_instance_running() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path();

    let start = warden(data_dir, &[]);
    assert!(start.status.success());

    let _kill_guard = KillOnDrop { data_dir };

    let pid_file = data_dir.join("daemon.pid");
    let socket_file = data_dir.join("daemon.sock");

    assert!(wait_for(|| pid_file.exists() && socket_file.exists()));

    let first_pid = fs::read_to_string(&pid_file).unwrap();

    // The second start detaches too, so its launcher exits successfully;
    // the failure to take the lock lands in the shared stderr log file
    let second_start = warden(data_dir, &[]);
    assert!(second_start.status.success());

    let stderr_log = data_dir.join("daemon.stderr.log");

    assert!(wait_for(|| {
        fs::read_to_string(&stderr_log)
            .map(|log| log.contains("Failed to lock the PID file"))
            .unwrap_or(false)
    }));

    // The first instance is unaffected: same PID, still responding
    assert_eq!(fs::read_to_string(&pid_file).unwrap(), first_pid);
    assert_eq!(send_command(&socket_file, "status"), "Daemon is running\n");
}
