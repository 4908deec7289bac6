//! Production synthesizer spawner: real child processes via `tokio::process`.
//!
//! The worker owns the [`SynthChild`] wait half and is the only reaper.
//! Cancellation goes through the PID-based [`ProcessControl`] half, which
//! sends signals without waiting for exit, so a concurrent `cancel()`
//! never blocks behind a dying process.

use std::io;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::debug;

use outloud_core::ports::{ProcessControl, SynthChild, SynthSpawner};

/// Spawns the rendered argv as a child process, no shell in between.
///
/// The child inherits the driver's standard streams so the synthesizer
/// talks to the audio stack and terminal exactly as if run by hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandSpawner;

impl SynthSpawner for CommandSpawner {
    fn spawn(&self, argv: &[String]) -> io::Result<Box<dyn SynthChild>> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "rendered command is empty")
        })?;

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        debug!(program = %program, pid = ?child.id(), "spawned synthesizer");

        let control = Arc::new(PidControl { pid: child.id() });
        Ok(Box::new(SpawnedSynth { child, control }))
    }
}

struct SpawnedSynth {
    child: Child,
    control: Arc<PidControl>,
}

#[async_trait]
impl SynthChild for SpawnedSynth {
    fn control(&self) -> Arc<dyn ProcessControl> {
        Arc::clone(&self.control) as Arc<dyn ProcessControl>
    }

    async fn wait(&mut self) -> io::Result<()> {
        let status = self.child.wait().await?;
        debug!(%status, "synthesizer exited");
        Ok(())
    }
}

/// Signal-based control over a child identified by PID.
struct PidControl {
    pid: Option<u32>,
}

impl ProcessControl for PidControl {
    fn id(&self) -> Option<u32> {
        self.pid
    }

    fn terminate(&self) -> io::Result<()> {
        self.signal(TermSignal::Graceful)
    }

    fn kill(&self) -> io::Result<()> {
        self.signal(TermSignal::Forceful)
    }
}

enum TermSignal {
    Graceful,
    Forceful,
}

impl PidControl {
    #[cfg(unix)]
    fn signal(&self, which: TermSignal) -> io::Result<()> {
        use nix::errno::Errno;
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        let Some(pid) = self.pid else {
            return Ok(());
        };

        let signal = match which {
            TermSignal::Graceful => Signal::SIGTERM,
            TermSignal::Forceful => Signal::SIGKILL,
        };

        #[expect(clippy::cast_possible_wrap, reason = "unix pids fit in i32")]
        let nix_pid = Pid::from_raw(pid as i32);

        match signal::kill(nix_pid, signal) {
            Ok(()) => Ok(()),
            // Already exited; nothing left to stop.
            Err(Errno::ESRCH) => Ok(()),
            Err(e) => Err(io::Error::other(e)),
        }
    }

    #[cfg(not(unix))]
    fn signal(&self, _which: TermSignal) -> io::Result<()> {
        // No signal surface to reach a process we do not own the handle
        // of; the worker's wait still reaps it when it exits on its own.
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "terminating a running synthesizer is not supported on this platform",
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn empty_argv_is_rejected() {
        let result = CommandSpawner.spawn(&[]);
        assert!(result.is_err());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn spawn_and_wait_reaps_a_short_process() {
        let mut child = CommandSpawner
            .spawn(&argv(&["echo", "test"]))
            .expect("failed to spawn echo");
        assert!(child.wait().await.is_ok());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn terminate_stops_a_long_running_process() {
        let mut child = CommandSpawner
            .spawn(&argv(&["sleep", "30"]))
            .expect("failed to spawn sleep");

        let control = child.control();
        control.terminate().expect("SIGTERM failed");

        // The wait must observe the termination promptly.
        timeout(Duration::from_secs(5), child.wait())
            .await
            .expect("sleep did not exit after SIGTERM")
            .expect("wait failed");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn kill_stops_a_long_running_process() {
        let mut child = CommandSpawner
            .spawn(&argv(&["sleep", "30"]))
            .expect("failed to spawn sleep");

        let control = child.control();
        control.kill().expect("SIGKILL failed");

        timeout(Duration::from_secs(5), child.wait())
            .await
            .expect("sleep did not exit after SIGKILL")
            .expect("wait failed");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn signaling_an_exited_process_is_tolerated() {
        let mut child = CommandSpawner
            .spawn(&argv(&["echo", "done"]))
            .expect("failed to spawn echo");
        let control = child.control();
        child.wait().await.expect("wait failed");

        // The PID is stale now; ESRCH maps to success.
        assert!(control.terminate().is_ok());
        assert!(control.kill().is_ok());
    }
}
