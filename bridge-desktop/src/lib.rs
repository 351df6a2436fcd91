//! # Desktop Bridge Implementations
//!
//! Default implementations of the host bridges for desktop builds
//! (macOS, Windows, Linux), used by the CLI tooling and integration tests.
//!
//! - `HttpClient` using `reqwest`, with retry and backoff
//! - `NetworkMonitor` using a TCP reachability probe
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopNetworkMonitor, ReqwestHttpClient};
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::new()?);
//! let network = Arc::new(DesktopNetworkMonitor::new());
//! // Hand both to CoreConfigBuilder.
//! ```

mod http;
mod network;

pub use http::ReqwestHttpClient;
pub use network::{DesktopNetworkMonitor, ProbeConfig};
