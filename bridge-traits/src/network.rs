//! Network Monitoring Abstraction
//!
//! Provides network connectivity and status information. The feed reconciler
//! treats this as its connectivity signal: one boolean, observed over time.

use crate::error::Result;

/// Network connection type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkType {
    /// Cellular/mobile data connection
    Cellular,
    /// WiFi connection
    WiFi,
    /// Ethernet connection
    Ethernet,
    /// Other or unknown connection type
    Other,
}

/// Network connection status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    /// Connected to network
    Connected,
    /// Not connected to any network
    Disconnected,
    /// Connection status unknown or indeterminate
    Indeterminate,
}

/// Network information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub status: NetworkStatus,
    pub network_type: Option<NetworkType>,
    /// Whether the connection is metered (has data limits/costs)
    pub is_metered: bool,
}

impl NetworkInfo {
    /// Info for a reachable network of the given type.
    pub fn connected(network_type: NetworkType) -> Self {
        Self {
            status: NetworkStatus::Connected,
            network_type: Some(network_type),
            is_metered: matches!(network_type, NetworkType::Cellular),
        }
    }

    /// Info for an unreachable network.
    pub fn disconnected() -> Self {
        Self {
            status: NetworkStatus::Disconnected,
            network_type: None,
            is_metered: false,
        }
    }

    /// Whether the network is reachable. `Indeterminate` counts as offline.
    pub fn is_online(&self) -> bool {
        self.status == NetworkStatus::Connected
    }
}

/// Network monitor trait
///
/// # Platform Support
///
/// - **Android**: ConnectivityManager network callbacks
/// - **iOS**: NWPathMonitor
/// - **Desktop**: reachability probe (`bridge-desktop`)
///
/// # Example
///
/// ```ignore
/// use bridge_traits::network::NetworkMonitor;
///
/// async fn watch(monitor: &dyn NetworkMonitor) -> Result<()> {
///     let mut changes = monitor.subscribe_changes().await?;
///     while let Some(info) = changes.next().await {
///         println!("online: {}", info.is_online());
///     }
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait NetworkMonitor: Send + Sync {
    /// Get current network information
    async fn get_network_info(&self) -> Result<NetworkInfo>;

    /// Check if currently connected to any network
    async fn is_connected(&self) -> bool {
        self.get_network_info()
            .await
            .map(|info| info.is_online())
            .unwrap_or(false)
    }

    /// Subscribe to network status changes
    ///
    /// Implementations emit whenever the status changes. The first item may
    /// repeat the current status; consumers must tolerate duplicates.
    async fn subscribe_changes(&self) -> Result<Box<dyn NetworkChangeStream>>;
}

/// Stream of network status changes
#[async_trait::async_trait]
pub trait NetworkChangeStream: Send {
    /// Get the next network info update
    ///
    /// Returns `None` when the stream is closed.
    async fn next(&mut self) -> Option<NetworkInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_info() {
        let info = NetworkInfo::connected(NetworkType::WiFi);

        assert_eq!(info.status, NetworkStatus::Connected);
        assert_eq!(info.network_type, Some(NetworkType::WiFi));
        assert!(!info.is_metered);
        assert!(info.is_online());

        assert!(NetworkInfo::connected(NetworkType::Cellular).is_metered);
        assert!(!NetworkInfo::disconnected().is_online());
    }

    #[test]
    fn test_indeterminate_is_offline() {
        let info = NetworkInfo {
            status: NetworkStatus::Indeterminate,
            network_type: None,
            is_metered: false,
        };
        assert!(!info.is_online());
    }
}
