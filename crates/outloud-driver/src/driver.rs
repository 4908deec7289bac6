//! The speech driver: configuration state, the queue, and the worker's
//! lifecycle under concurrent control calls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use outloud_core::ports::{ProcessControl, SynthSpawner};
use outloud_core::{CommandTemplate, DriverConfig, QueueItem, ScaleBounds, SpeechError, VoiceSettings};

use crate::queue::UtteranceQueue;
use crate::worker;

/// Completion callback signature kept for interface parity with richer
/// speech servers. This driver never invokes it.
pub type SpeechCallback = Box<dyn FnOnce() + Send + 'static>;

/// State shared between the driver handle and the worker task.
pub(crate) struct DriverShared {
    pub(crate) queue: UtteranceQueue,
    pub(crate) template: CommandTemplate,
    pub(crate) spawner: Arc<dyn SynthSpawner>,
    /// Control handle of the in-flight child, if any. The lock's critical
    /// sections are record/clear (plus the spawn itself) and never span
    /// the worker's wait.
    pub(crate) active: Mutex<Option<Arc<dyn ProcessControl>>>,
}

/// Sequential speech playback over an external synthesizer.
///
/// Construction starts the background worker; `speak`, `cancel`,
/// `clear_buffer`, and the setters are synchronous and never block on the
/// synthesizer. [`shutdown`](Self::shutdown) and
/// [`finish`](Self::finish) terminate the instance; afterwards every
/// operation is a no-op.
pub struct SpeechDriver {
    shared: Arc<DriverShared>,
    settings: Mutex<VoiceSettings>,
    volume_bounds: ScaleBounds,
    pitch_bounds: ScaleBounds,
    rate_bounds: ScaleBounds,
    worker: Mutex<Option<JoinHandle<()>>>,
    running: AtomicBool,
}

impl SpeechDriver {
    /// Parse the command template, seed settings from the configured
    /// defaults, and start the worker task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        config: &DriverConfig,
        spawner: Arc<dyn SynthSpawner>,
    ) -> Result<Self, SpeechError> {
        let template = CommandTemplate::parse(config.command_or_default())?;

        let shared = Arc::new(DriverShared {
            queue: UtteranceQueue::new(),
            template,
            spawner,
            active: Mutex::new(None),
        });

        let handle = tokio::spawn(worker::run(Arc::clone(&shared)));

        Ok(Self {
            shared,
            settings: Mutex::new(config.initial_settings()),
            volume_bounds: config.volume_bounds(),
            pitch_bounds: config.pitch_bounds(),
            rate_bounds: config.rate_bounds(),
            worker: Mutex::new(Some(handle)),
            running: AtomicBool::new(true),
        })
    }

    /// Queue text for playback.
    ///
    /// With `queueable` false the cancel protocol runs first, so this
    /// utterance preempts everything pending and in flight. Empty text is
    /// accepted here and dropped by the worker.
    pub fn speak(&self, text: impl Into<String>, queueable: bool) {
        if !self.is_running() {
            return;
        }
        if !queueable {
            self.cancel();
        }
        let utterance = self
            .settings
            .lock()
            .expect("voice settings lock poisoned")
            .snapshot(text);
        self.shared.queue.push(QueueItem::Speak(utterance));
    }

    /// Interrupt playback: drop everything pending and stop the in-flight
    /// child.
    ///
    /// Termination is requested gracefully, escalating to a forceful kill
    /// only if the graceful request errors. Does not wait for the child
    /// to exit; the worker reaps it. Safe no-op while idle.
    pub fn cancel(&self) {
        if !self.is_running() {
            return;
        }
        self.cancel_playback();
    }

    fn cancel_playback(&self) {
        self.shared.queue.clear();

        let mut active = self
            .shared
            .active
            .lock()
            .expect("active process lock poisoned");
        if let Some(control) = active.take() {
            if let Err(e) = control.terminate() {
                warn!(error = %e, pid = ?control.id(), "graceful termination failed, killing");
                if let Err(e) = control.kill() {
                    // The handle is dropped regardless so later cancels
                    // never act on a stale process.
                    warn!(error = %e, pid = ?control.id(), "failed to kill synthesizer, abandoning it");
                }
            }
        }
    }

    /// Drop all pending utterances without touching the in-flight child.
    pub fn clear_buffer(&self) {
        if !self.is_running() {
            return;
        }
        self.shared.queue.clear();
    }

    /// Cancel playback, stop the worker, and wait for it to finish.
    ///
    /// Terminal: the driver accepts no further work afterwards. Safe to
    /// call more than once.
    pub async fn shutdown(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            self.cancel_playback();
            self.shared.queue.push(QueueItem::Shutdown);
        }
        self.join_worker().await;
    }

    /// Let the worker drain everything already queued, then stop it and
    /// wait for it to finish.
    ///
    /// Terminal like [`shutdown`](Self::shutdown), but nothing queued is
    /// lost.
    pub async fn finish(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            self.shared.queue.push(QueueItem::Shutdown);
        }
        self.join_worker().await;
    }

    async fn join_worker(&self) {
        let handle = self
            .worker
            .lock()
            .expect("worker handle lock poisoned")
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "speech worker task failed");
            }
        }
    }

    /// Map a unit volume onto the configured range and make it current.
    ///
    /// The mapping is linear and unclamped; see [`ScaleBounds::apply`].
    pub fn set_volume(&self, volume: f64) {
        if !self.is_running() {
            return;
        }
        self.settings
            .lock()
            .expect("voice settings lock poisoned")
            .volume = self.volume_bounds.apply_str(volume);
    }

    /// Map a unit pitch onto the configured range and make it current.
    pub fn set_pitch(&self, pitch: f64) {
        if !self.is_running() {
            return;
        }
        self.settings
            .lock()
            .expect("voice settings lock poisoned")
            .pitch = self.pitch_bounds.apply_str(pitch);
    }

    /// Map a unit rate onto the configured range and make it current.
    pub fn set_rate(&self, rate: f64) {
        if !self.is_running() {
            return;
        }
        self.settings
            .lock()
            .expect("voice settings lock poisoned")
            .rate = self.rate_bounds.apply_str(rate);
    }

    /// Make a voice identifier current, verbatim.
    pub fn set_voice(&self, voice: impl Into<String>) {
        if !self.is_running() {
            return;
        }
        self.settings
            .lock()
            .expect("voice settings lock poisoned")
            .voice = voice.into();
    }

    /// Make a language identifier current, verbatim.
    pub fn set_language(&self, language: impl Into<String>) {
        if !self.is_running() {
            return;
        }
        self.settings
            .lock()
            .expect("voice settings lock poisoned")
            .language = language.into();
    }

    /// Make a synthesizer module identifier current, verbatim.
    pub fn set_module(&self, module: impl Into<String>) {
        if !self.is_running() {
            return;
        }
        self.settings
            .lock()
            .expect("voice settings lock poisoned")
            .module = module.into();
    }

    /// Register a completion callback. Diagnostic no-op: this driver has
    /// no progress reporting, the callback is logged and dropped.
    pub fn set_callback(&self, _callback: SpeechCallback) {
        debug!("speech callbacks are not supported by this driver");
    }

    /// Whether a synthesizer child is currently in flight.
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.shared
            .active
            .lock()
            .expect("active process lock poisoned")
            .is_some()
    }

    /// A copy of the current voice settings.
    #[must_use]
    pub fn current_settings(&self) -> VoiceSettings {
        self.settings
            .lock()
            .expect("voice settings lock poisoned")
            .clone()
    }

    /// Number of utterances waiting in the queue.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for SpeechDriver {
    fn drop(&mut self) {
        // Best effort: stop any child and unblock the worker so the task
        // does not outlive the driver. Callers wanting an orderly stop
        // use shutdown() or finish().
        if self.running.swap(false, Ordering::SeqCst) {
            self.cancel_playback();
            self.shared.queue.push(QueueItem::Shutdown);
        }
    }
}
