use crate::warn;

use super::control::Controller;

/// Maps a received command to its response.
///
/// The command set is a closed, fixed vocabulary with case-sensitive,
/// full-line matching. Unknown commands are answered explicitly, they are
/// not a fault. The `reload` command triggers the same control action as
/// a SIGHUP delivery, so both paths behave identically.
pub fn dispatch(command: &str, controller: &Controller) -> &'static str {
    match command {
        "status" => "Daemon is running\n",

        "reload" => {
            controller.reload();
            "Daemon configuration reloaded\n"
        }

        _ => {
            warn!("Received unknown command: {command}");
            "Unknown command\n"
        }
    }
}
