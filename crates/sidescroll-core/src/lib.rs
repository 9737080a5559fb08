//! # SideScroll Core
//!
//! Drives a bounded number of "scroll to bottom" commands against a browser
//! tab while a blocking overlay is shown on the page.
//!
//! ## Session lifecycle
//!
//! ```text
//!            start(n)                     loop exits
//!   Idle ───────────────► Running ───────────────────────► Idle
//!                            │                               ▲
//!                            │ stop() / page refresh         │ loop exits
//!                            ▼                               │
//!                         Stopping ──────────────────────────┘
//! ```
//!
//! Only one session runs at a time. Cancellation is cooperative: a stop is
//! seen at the next iteration boundary, never in the middle of a command.
//! The overlay is removed exactly once, when the session returns to idle.

mod error;
mod orchestrator;
mod retry;
mod session;
mod status;

pub use error::ScrollError;
pub use orchestrator::{OrchestratorConfig, RunOutcome, RunSummary, ScrollOrchestrator};
pub use retry::{send_with_recovery, RetryPolicy};
pub use session::{ScrollSession, SessionPhase, SessionSnapshot};
pub use status::ScrollStatus;
