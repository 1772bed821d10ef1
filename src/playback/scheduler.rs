//! Frame pull scheduler
//!
//! Owns the play/stop state and drives the fetch → encode → show cycle in
//! a single task. The loop is pull-based: the next request is never issued
//! until the previous one has finished and the inter-cycle delay has
//! passed, so a slow endpoint cannot build a backlog of outstanding
//! requests. Effective cadence is `network_latency + delay`, not a fixed
//! wall-clock rate.

use crate::codec;
use crate::display::DisplaySink;
use crate::fetch::FrameSource;
use crate::playback::health::FeedHealth;
use crate::playback::state::PlaybackState;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Control state behind the scheduler's mutex.
///
/// The lock is only ever held for pointer-sized bookkeeping, never across
/// an await point.
struct Inner {
    state: PlaybackState,
    cancel: Option<CancellationToken>,
    /// Current or still-draining loop task. A restarted loop chains on it
    /// so fetches never overlap across a stop/start pair.
    task: Option<JoinHandle<()>>,
}

/// Drives the single-flight pull loop between a [`FrameSource`] and a
/// [`DisplaySink`].
///
/// At most one fetch is in flight at any instant, including across rapid
/// toggle sequences. Stopping is cooperative: an in-flight fetch completes
/// and its frame is rendered once, then no further fetch is scheduled.
pub struct FrameScheduler {
    source: Arc<dyn FrameSource>,
    sink: Arc<dyn DisplaySink>,
    delay: Duration,
    health: Arc<FeedHealth>,
    inner: Mutex<Inner>,
}

impl FrameScheduler {
    /// Create a scheduler in the `Stopped` state.
    ///
    /// `delay` is the pause between a completed cycle and the next
    /// request, measured from request completion.
    pub fn new(source: Arc<dyn FrameSource>, sink: Arc<dyn DisplaySink>, delay: Duration) -> Self {
        Self {
            source,
            sink,
            delay,
            health: Arc::new(FeedHealth::new()),
            inner: Mutex::new(Inner {
                state: PlaybackState::Stopped,
                cancel: None,
                task: None,
            }),
        }
    }

    /// Get the feed health counters.
    pub fn health(&self) -> Arc<FeedHealth> {
        Arc::clone(&self.health)
    }

    /// Get the current playback state.
    pub fn status(&self) -> PlaybackState {
        self.inner.lock().unwrap().state
    }

    /// Label for the external toggle control.
    pub fn label(&self) -> &'static str {
        self.status().label()
    }

    /// Flip between `Stopped` and `Playing`, returning the new state.
    pub fn toggle(&self) -> PlaybackState {
        let mut inner = self.inner.lock().unwrap();
        match inner.state.toggled() {
            PlaybackState::Playing => self.start_locked(&mut inner),
            PlaybackState::Stopped => Self::stop_locked(&mut inner),
        }
        inner.state
    }

    /// Enter `Playing` and begin pulling frames. No-op if already playing.
    pub fn start(&self) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.state.is_playing() {
            self.start_locked(&mut inner);
        }
    }

    /// Enter `Stopped`. No-op if already stopped.
    ///
    /// Cooperative: a fetch already in flight completes and its frame is
    /// rendered once; the loop exits at its next decision point.
    pub fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state.is_playing() {
            Self::stop_locked(&mut inner);
        }
    }

    /// Stop and wait for the loop to drain its final cycle.
    pub async fn shutdown(&self) {
        let task = {
            let mut inner = self.inner.lock().unwrap();
            if inner.state.is_playing() {
                Self::stop_locked(&mut inner);
            }
            inner.task.take()
        };

        if let Some(task) = task {
            let _ = task.await;
        }
    }

    fn start_locked(&self, inner: &mut Inner) {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let previous = inner.task.take();
        let source = Arc::clone(&self.source);
        let sink = Arc::clone(&self.sink);
        let health = Arc::clone(&self.health);
        let delay = self.delay;

        inner.state = PlaybackState::Playing;
        inner.cancel = Some(cancel);
        inner.task = Some(tokio::spawn(async move {
            // A restarted loop waits for the previous one to drain, so at
            // most one fetch is in flight even across rapid toggles.
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            pull_loop(source, sink, delay, health, token).await;
        }));

        info!("playback started");
    }

    fn stop_locked(inner: &mut Inner) {
        inner.state = PlaybackState::Stopped;
        if let Some(cancel) = inner.cancel.take() {
            cancel.cancel();
        }
        info!("playback stopping");
    }
}

/// Fetch → encode → show, then a fixed delay measured from request
/// completion.
///
/// Cancellation is observed only at the loop's decision points, never
/// mid-request. A transport failure skips the render for that cycle and
/// the loop continues after the normal delay.
async fn pull_loop(
    source: Arc<dyn FrameSource>,
    sink: Arc<dyn DisplaySink>,
    delay: Duration,
    health: Arc<FeedHealth>,
    cancel: CancellationToken,
) {
    let mut rendered = 0u64;

    loop {
        match source.fetch().await {
            Ok(frame) => {
                health.record_frame(frame.len());
                let encoded = codec::encode(&frame);
                sink.show(&encoded).await;

                rendered += 1;
                if rendered == 1 {
                    debug!("first frame rendered ({} bytes)", frame.len());
                }
            }
            Err(e) => {
                health.record_transport_error();
                warn!("frame fetch failed: {}", e);
            }
        }

        // A stop issued during the fetch takes effect here, after the
        // completed frame (if any) was rendered once.
        if cancel.is_cancelled() {
            break;
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    info!("pull loop ended after {} rendered frames", rendered);
}
