//! Upstream access subsystem.
//!
//! # Data Flow
//! ```text
//! RequestSpec (scheme, method, upstream-relative path, headers, body)
//!     → client.rs (resolve against configured host, send, buffer body)
//!     → Ok(Bytes)            on 200
//!     → Err(Status{..})      on any other status
//!     → Err(Transport(..))   on connect/reset/timeout
//! ```
//!
//! # Design Decisions
//! - Host is configuration, never caller input
//! - No retries; callers decide what a failure means
//! - Bodies stay undecoded here; decoding belongs to the caller

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{RequestSpec, Scheme, UpstreamError, UpstreamResult};
