//! Chrome tab backend for SideScroll.
//!
//! Implements [`RemoteTarget`](sidescroll_protocols::RemoteTarget) on top of
//! the Chrome DevTools Protocol. A small page handler is injected into the
//! tab with `Runtime.evaluate`; commands are delivered by calling into it,
//! and the page talks back through a `Runtime.addBinding` binding.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │   SideScroll    │ ◄──────────────► │   Chrome/Edge    │
//! │  (this crate)   │       CDP        │  (user's browser)│
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! ## Setup
//!
//! Start Chrome with remote debugging enabled:
//!
//! ```bash
//! # macOS
//! /Applications/Google\ Chrome.app/Contents/MacOS/Google\ Chrome --remote-debugging-port=9222
//!
//! # Linux
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! Existing tabs, with their logins, stay usable: the resolver attaches to
//! the most recently focused tab instead of opening a new one.

pub mod cdp;
mod events;
pub mod handler;
mod resolver;
mod target;

pub use cdp::{CdpClient, CdpError, PageInfo, PageSession};
pub use resolver::CdpTargetResolver;
pub use target::CdpTarget;
