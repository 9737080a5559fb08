//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Connects to Chrome via WebSocket and speaks the CDP JSON-RPC protocol.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222", Duration::from_secs(30)).await?;
//! let pages = client.list_pages().await?;
//! let session = client.attach_page(&pages[0].id).await?;
//! let title = session.evaluate("document.title").await?;
//! ```

mod client;
mod discovery;
mod error;
mod protocol;
mod session;
mod transport;

pub use client::CdpClient;
pub use discovery::{fetch_version, list_pages};
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
