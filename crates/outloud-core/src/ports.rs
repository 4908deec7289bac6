//! Process ports the driver is composed against.
//!
//! The worker never touches `tokio::process` directly; it spawns through
//! [`SynthSpawner`] so the composition root decides what actually runs.
//! Production injects a real child-process spawner, tests inject a
//! recording fake.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;

/// Control half of a spawned synthesizer process.
///
/// Shared with cancellation callers while the worker waits. Both requests
/// are fire-and-forget: they must return without blocking on process
/// exit. The worker remains the only reaper.
pub trait ProcessControl: Send + Sync {
    /// OS process identifier, if one is known.
    fn id(&self) -> Option<u32>;

    /// Request graceful termination.
    fn terminate(&self) -> io::Result<()>;

    /// Forcefully kill the process.
    fn kill(&self) -> io::Result<()>;
}

/// Wait half of a spawned synthesizer process, owned by the worker.
#[async_trait]
pub trait SynthChild: Send {
    /// A control handle usable concurrently with [`wait`](Self::wait).
    fn control(&self) -> Arc<dyn ProcessControl>;

    /// Wait until the process exits, reaping it.
    async fn wait(&mut self) -> io::Result<()>;
}

/// Port for launching synthesizer processes.
///
/// `argv[0]` is the program; the remaining elements are passed as literal
/// arguments with no shell in between. Spawning is synchronous so callers
/// can hold a lock across spawn-and-record.
pub trait SynthSpawner: Send + Sync {
    fn spawn(&self, argv: &[String]) -> io::Result<Box<dyn SynthChild>>;
}
