//! Heroes proxy library.
//!
//! Republishes an upstream heroes catalog over HTTP and, for callers with
//! valid credentials, enriches every hero with its private profile.

pub mod config;
pub mod error;
pub mod heroes;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
