//! Scroll orchestrator.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sidescroll_protocols::{
    RemoteTarget, ResponseStatus, TabNotification, TabRequest, TargetResolver,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::error::ScrollError;
use crate::retry::{send_with_recovery, RetryPolicy};
use crate::session::{ScrollSession, SessionSnapshot};
use crate::status::ScrollStatus;

/// Orchestrator settings.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Wait inserted before every scroll except the first.
    pub settle_delay: Duration,
    /// Recovery policy for scroll commands.
    pub retry: RetryPolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1500),
            retry: RetryPolicy::default(),
        }
    }
}

/// How a run ended, when it did not end in an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A session was already active or the count was zero.
    Ignored,
    Completed,
    /// Stopped by `stop()` or by the page navigating away.
    Interrupted,
    /// The page handler answered `stopped`.
    StoppedByTarget,
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: u32,
    pub scrolled: u32,
    pub outcome: RunOutcome,
}

impl RunSummary {
    fn ignored(requested: u32) -> Self {
        Self {
            requested,
            scrolled: 0,
            outcome: RunOutcome::Ignored,
        }
    }
}

/// How the iteration loop exited.
enum LoopExit {
    Completed,
    Interrupted,
    StoppedByTarget,
    Failed(ScrollError),
}

/// State shared between the running loop and the stop entry points.
struct Shared {
    session: Mutex<ScrollSession>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    status_tx: watch::Sender<ScrollStatus>,
}

impl Shared {
    /// Mutate the session under its lock and publish the new snapshot.
    fn update<R>(&self, f: impl FnOnce(&mut ScrollSession) -> R) -> R {
        let (result, snapshot) = {
            let mut session = self.session.lock();
            let result = f(&mut session);
            (result, session.snapshot())
        };
        self.snapshot_tx.send_replace(snapshot);
        result
    }

    fn is_running(&self) -> bool {
        self.session.lock().is_running()
    }

    fn publish(&self, status: ScrollStatus) {
        debug!(%status, "status");
        self.status_tx.send_replace(status);
    }

    fn stop(&self) -> bool {
        let stopped = self.update(|s| s.request_stop());
        if stopped {
            info!("stop requested");
        }
        stopped
    }

    fn handle_notification(&self, notification: &TabNotification) {
        match notification {
            TabNotification::PageLoaded { url } => debug!(%url, "page loaded"),
            n if n.is_interruption() => {
                info!(?n, "page is going away");
                self.stop();
            }
            n => debug!(?n, "ignoring notification"),
        }
    }
}

/// Drives scroll sessions against the active tab.
///
/// Cloning yields another handle to the same orchestrator, which is how the
/// stop entry points reach a session running on another task.
#[derive(Clone)]
pub struct ScrollOrchestrator {
    resolver: Arc<dyn TargetResolver>,
    config: OrchestratorConfig,
    shared: Arc<Shared>,
}

impl ScrollOrchestrator {
    pub fn new(resolver: Arc<dyn TargetResolver>, config: OrchestratorConfig) -> Self {
        let session = ScrollSession::new();
        let (snapshot_tx, _) = watch::channel(session.snapshot());
        let (status_tx, _) = watch::channel(ScrollStatus::Ready);
        Self {
            resolver,
            config,
            shared: Arc::new(Shared {
                session: Mutex::new(session),
                snapshot_tx,
                status_tx,
            }),
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run a session of `count` scrolls with the overlay shown.
    ///
    /// Does nothing and returns [`RunOutcome::Ignored`] when a session is
    /// already active or `count` is zero.
    pub async fn start(&self, count: u32) -> Result<RunSummary, ScrollError> {
        self.run(count, true).await
    }

    /// Scroll to the bottom once, without the overlay.
    pub async fn scroll_once(&self) -> Result<RunSummary, ScrollError> {
        self.run(1, false).await
    }

    /// Ask the running session to stop at its next iteration boundary.
    pub fn stop(&self) {
        if !self.shared.stop() {
            debug!("stop ignored: no running session");
        }
    }

    /// React to a notification raised by the page.
    ///
    /// `pageRefresh` and `pageUnloaded` stop the running session.
    pub fn handle_notification(&self, notification: &TabNotification) {
        self.shared.handle_notification(notification);
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.session.lock().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    pub fn status(&self) -> ScrollStatus {
        self.shared.status_tx.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ScrollStatus> {
        self.shared.status_tx.subscribe()
    }

    async fn run(&self, count: u32, with_overlay: bool) -> Result<RunSummary, ScrollError> {
        let Some(session_id) = self.shared.update(|s| s.try_begin(count)) else {
            debug!(count, "start ignored: session already active or count is zero");
            return Ok(RunSummary::ignored(count));
        };

        let span = info_span!("scroll_session", id = %session_id, count);
        async move {
            info!(with_overlay, "session started");
            self.shared.publish(ScrollStatus::Scrolling { current: 0, total: count });

            let target = match self.resolver.resolve().await {
                Ok(target) => target,
                Err(e) => {
                    self.finish(None).await;
                    let err = ScrollError::from(e);
                    self.shared.publish(ScrollStatus::Failed { message: err.to_string() });
                    warn!("no target: {}", err);
                    return Err(err);
                }
            };
            debug!(target = target.id(), "resolved target");

            let watcher = self.watch_notifications(target.as_ref());
            let exit = self.drive(target.as_ref(), count, with_overlay).await;
            if let Some(watcher) = watcher {
                watcher.abort();
            }
            let scrolled = self.finish(Some(target.as_ref())).await;

            let outcome = match exit {
                LoopExit::Completed => RunOutcome::Completed,
                LoopExit::Interrupted => RunOutcome::Interrupted,
                LoopExit::StoppedByTarget => RunOutcome::StoppedByTarget,
                LoopExit::Failed(err) => {
                    warn!(scrolled, "session failed: {}", err);
                    self.shared.publish(ScrollStatus::Failed { message: err.to_string() });
                    return Err(err);
                }
            };

            self.shared.publish(match outcome {
                RunOutcome::Completed => ScrollStatus::Completed { scrolled },
                _ => ScrollStatus::Stopped { scrolled },
            });
            info!(scrolled, ?outcome, "session finished");
            Ok(RunSummary {
                requested: count,
                scrolled,
                outcome,
            })
        }
        .instrument(span)
        .await
    }

    /// The iteration loop. Never touches the overlay teardown.
    async fn drive(&self, target: &dyn RemoteTarget, count: u32, with_overlay: bool) -> LoopExit {
        // A stop may land while the target is being resolved.
        if !self.shared.is_running() {
            return LoopExit::Interrupted;
        }

        if with_overlay {
            if let Err(e) = self.show_overlay(target).await {
                return LoopExit::Failed(e);
            }
        } else if let Err(e) = target.ensure_handler().await {
            return LoopExit::Failed(ScrollError::ScrollFailed {
                completed: 0,
                reason: e.to_string(),
            });
        }

        for iteration in 1..=count {
            if !self.shared.is_running() {
                return LoopExit::Interrupted;
            }
            if iteration > 1 {
                tokio::time::sleep(self.config.settle_delay).await;
                if !self.shared.is_running() {
                    return LoopExit::Interrupted;
                }
            }

            match send_with_recovery(target, TabRequest::ScrollToBottom, self.config.retry).await {
                Ok(resp) if resp.status == ResponseStatus::Stopped => {
                    info!(iteration, "page handler stopped the session");
                    return LoopExit::StoppedByTarget;
                }
                Ok(_) => {
                    let current = self.shared.update(|s| s.advance());
                    debug!(iteration, current, "scrolled");
                    self.shared.publish(ScrollStatus::Scrolling { current, total: count });
                }
                Err(e) => {
                    let completed = self.shared.session.lock().current_index();
                    return LoopExit::Failed(ScrollError::ScrollFailed {
                        completed,
                        reason: e.to_string(),
                    });
                }
            }
        }

        LoopExit::Completed
    }

    /// Load the page handler and show the overlay. No retry.
    async fn show_overlay(&self, target: &dyn RemoteTarget) -> Result<(), ScrollError> {
        target
            .ensure_handler()
            .await
            .map_err(|e| ScrollError::Overlay(e.to_string()))?;

        let resp = target
            .send(TabRequest::CreateOverlay)
            .await
            .map_err(|e| ScrollError::Overlay(e.to_string()))?;
        if !resp.overlay_shown() {
            return Err(ScrollError::Overlay(
                resp.message
                    .unwrap_or_else(|| "overlay was not created".to_string()),
            ));
        }

        self.shared.update(|s| s.mark_overlay());
        debug!("overlay shown");
        Ok(())
    }

    /// Return the session to idle and remove the overlay if it is up.
    ///
    /// This is the only place the overlay is removed. Removal is best-effort.
    async fn finish(&self, target: Option<&dyn RemoteTarget>) -> u32 {
        let (scrolled, overlay_was_active) = self.shared.update(|s| s.finish());
        if overlay_was_active {
            if let Some(target) = target {
                match target.send(TabRequest::RemoveOverlay).await {
                    Ok(_) => debug!("overlay removed"),
                    Err(e) => warn!("failed to remove overlay: {}", e),
                }
            }
        }
        scrolled
    }

    /// Forward the target's notifications to the stop entry point for the
    /// lifetime of the session.
    fn watch_notifications(&self, target: &dyn RemoteTarget) -> Option<JoinHandle<()>> {
        let mut rx = target.take_notifications()?;
        let shared = self.shared.clone();
        Some(tokio::spawn(
            async move {
                while let Some(notification) = rx.recv().await {
                    shared.handle_notification(&notification);
                }
            }
            .in_current_span(),
        ))
    }
}
