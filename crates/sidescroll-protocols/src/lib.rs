//! # SideScroll Protocols
//!
//! Interface definitions shared by the scroll orchestrator and the backends
//! that drive a browser tab. Contains no implementations.
//!
//! ## Core Types
//!
//! - [`TabRequest`] / [`TabResponse`] - commands sent to the page handler and its replies
//! - [`TabNotification`] - unsolicited messages raised by the page
//! - [`RemoteTarget`] - a tab that can receive commands and have its handler injected
//! - [`TargetResolver`] - finds the tab the user is currently looking at

pub mod error;
pub mod message;
pub mod target;

pub use error::TargetError;
pub use message::{ResponseStatus, TabNotification, TabRequest, TabResponse};
pub use target::{RemoteTarget, TargetResolver};
