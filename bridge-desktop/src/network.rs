//! Network Monitoring Implementation

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    network::{NetworkChangeStream, NetworkInfo, NetworkMonitor, NetworkStatus, NetworkType},
};
use core_async::time::{sleep, timeout, Duration};
use tokio::net::TcpStream;
use tracing::debug;

/// Reachability probe settings.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// `host:port` to open a TCP connection to.
    pub address: String,
    /// How long a connection attempt may take before counting as offline.
    pub connect_timeout: Duration,
    /// Delay between probes in a change stream.
    pub poll_interval: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            address: "8.8.8.8:53".to_string(),
            connect_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Desktop network monitor implementation
///
/// Desktop has no connectivity callback we can rely on everywhere, so
/// reachability is a TCP connect to a well-known address.
#[derive(Debug, Clone, Default)]
pub struct DesktopNetworkMonitor {
    probe: ProbeConfig,
}

impl DesktopNetworkMonitor {
    /// Create a monitor using the default probe
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a monitor with a custom probe
    pub fn with_probe(probe: ProbeConfig) -> Self {
        Self { probe }
    }

    async fn check_connectivity(&self) -> NetworkStatus {
        match timeout(
            self.probe.connect_timeout,
            TcpStream::connect(self.probe.address.as_str()),
        )
        .await
        {
            Ok(Ok(_)) => NetworkStatus::Connected,
            Ok(Err(_)) | Err(_) => NetworkStatus::Disconnected,
        }
    }
}

#[async_trait]
impl NetworkMonitor for DesktopNetworkMonitor {
    async fn get_network_info(&self) -> Result<NetworkInfo> {
        let status = self.check_connectivity().await;
        debug!(status = ?status, probe = %self.probe.address, "Network probe finished");

        Ok(match status {
            // Desktop can't tell WiFi from Ethernet without platform APIs
            NetworkStatus::Connected => NetworkInfo::connected(NetworkType::Other),
            _ => NetworkInfo::disconnected(),
        })
    }

    async fn subscribe_changes(&self) -> Result<Box<dyn NetworkChangeStream>> {
        Ok(Box::new(DesktopNetworkChangeStream {
            monitor: self.clone(),
            last_status: None,
        }))
    }
}

/// Polling change stream; yields the first probe result, then only changes.
struct DesktopNetworkChangeStream {
    monitor: DesktopNetworkMonitor,
    last_status: Option<NetworkStatus>,
}

#[async_trait]
impl NetworkChangeStream for DesktopNetworkChangeStream {
    async fn next(&mut self) -> Option<NetworkInfo> {
        loop {
            if self.last_status.is_some() {
                sleep(self.monitor.probe.poll_interval).await;
            }

            if let Ok(info) = self.monitor.get_network_info().await {
                if self.last_status != Some(info.status) {
                    self.last_status = Some(info.status);
                    return Some(info);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn probe(address: String) -> ProbeConfig {
        ProbeConfig {
            address,
            connect_timeout: Duration::from_millis(500),
            poll_interval: Duration::from_millis(20),
        }
    }

    async fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);
        address
    }

    #[tokio::test]
    async fn test_reachable_probe_reports_connected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let monitor =
            DesktopNetworkMonitor::with_probe(probe(listener.local_addr().unwrap().to_string()));

        let info = monitor.get_network_info().await.unwrap();
        assert_eq!(info.status, NetworkStatus::Connected);
        assert!(monitor.is_connected().await);
    }

    #[tokio::test]
    async fn test_refused_probe_reports_disconnected() {
        let monitor = DesktopNetworkMonitor::with_probe(probe(closed_port().await));

        let info = monitor.get_network_info().await.unwrap();
        assert_eq!(info, NetworkInfo::disconnected());
        assert!(!monitor.is_connected().await);
    }

    #[tokio::test]
    async fn test_change_stream_emits_initial_status_then_changes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let monitor = DesktopNetworkMonitor::with_probe(probe(address));

        let mut changes = monitor.subscribe_changes().await.unwrap();
        let first = changes.next().await.unwrap();
        assert!(first.is_online());

        drop(listener);
        let second = timeout(Duration::from_secs(5), changes.next())
            .await
            .unwrap()
            .unwrap();
        assert!(!second.is_online());
    }
}
