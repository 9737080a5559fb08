//! Scroll session state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    /// Stop was requested; the loop has not exited yet.
    Stopping,
}

/// State of the current scroll session.
///
/// A new session can only begin from [`SessionPhase::Idle`], so a session
/// that was told to stop still blocks new starts until its loop has exited.
#[derive(Debug, Default)]
pub struct ScrollSession {
    id: Option<Uuid>,
    phase: SessionPhase,
    target_count: u32,
    current_index: u32,
    overlay_active: bool,
    started_at: Option<DateTime<Utc>>,
}

/// Read-only copy of a [`ScrollSession`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub id: Option<Uuid>,
    pub phase: SessionPhase,
    pub running: bool,
    pub target_count: u32,
    pub current_index: u32,
    pub overlay_active: bool,
    pub started_at: Option<DateTime<Utc>>,
}

impl ScrollSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session of `count` iterations.
    ///
    /// Returns `None` without touching any state when a session is already
    /// active or `count` is zero.
    pub fn try_begin(&mut self, count: u32) -> Option<Uuid> {
        if self.phase != SessionPhase::Idle || count == 0 {
            return None;
        }
        let id = Uuid::new_v4();
        self.id = Some(id);
        self.phase = SessionPhase::Running;
        self.target_count = count;
        self.current_index = 0;
        self.overlay_active = false;
        self.started_at = Some(Utc::now());
        Some(id)
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay_active
    }

    /// Record that the overlay is on screen.
    pub fn mark_overlay(&mut self) {
        if self.phase != SessionPhase::Idle {
            self.overlay_active = true;
        }
    }

    /// Count one successful iteration. Returns the new progress.
    pub fn advance(&mut self) -> u32 {
        if self.current_index < self.target_count {
            self.current_index += 1;
        }
        self.current_index
    }

    /// Clear the running flag. Returns `true` if a running session was told
    /// to stop.
    pub fn request_stop(&mut self) -> bool {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Stopping;
            true
        } else {
            false
        }
    }

    /// Return to idle.
    ///
    /// Yields the progress reached and whether the overlay was still active.
    /// The overlay flag is taken, so only the first call after a session can
    /// observe `true`.
    pub fn finish(&mut self) -> (u32, bool) {
        let scrolled = self.current_index;
        let overlay_was_active = std::mem::take(&mut self.overlay_active);
        self.phase = SessionPhase::Idle;
        self.current_index = 0;
        (scrolled, overlay_was_active)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            phase: self.phase,
            running: self.is_running(),
            target_count: self.target_count,
            current_index: self.current_index,
            overlay_active: self.overlay_active,
            started_at: self.started_at,
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
