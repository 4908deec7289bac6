//! The background worker: pops utterances and supervises one child at a
//! time.

use std::sync::Arc;

use tracing::{debug, warn};

use outloud_core::QueueItem;

use crate::driver::DriverShared;

/// Worker loop. Runs until the shutdown sentinel is dequeued.
pub(crate) async fn run(shared: Arc<DriverShared>) {
    loop {
        match shared.queue.pop().await {
            QueueItem::Shutdown => break,
            QueueItem::Speak(utterance) => {
                // No text means nothing to speak.
                if !utterance.is_speakable() {
                    debug!("dropping utterance with empty text");
                    continue;
                }
                let argv = shared.template.render(&utterance);
                speak_one(&shared, &argv).await;
            }
        }
    }
    debug!("speech worker stopped");
}

/// Render one utterance: spawn, record the control handle, wait, clear.
///
/// The handle slot lock is held across spawn-and-record so a concurrent
/// cancel can never observe a spawned-but-unrecorded child, and released
/// before the wait so cancel can always reach the process.
async fn speak_one(shared: &DriverShared, argv: &[String]) {
    let mut child = {
        let mut active = shared
            .active
            .lock()
            .expect("active process lock poisoned");
        match shared.spawner.spawn(argv) {
            Ok(child) => {
                *active = Some(child.control());
                child
            }
            Err(e) => {
                // Fire-and-forget: a bad command drops the utterance,
                // never the worker.
                warn!(error = %e, program = %argv[0], "failed to spawn synthesizer");
                return;
            }
        }
    };

    if let Err(e) = child.wait().await {
        debug!(error = %e, "waiting on synthesizer failed");
    }

    *shared
        .active
        .lock()
        .expect("active process lock poisoned") = None;
}
