//! Error types for the feed provider

use thiserror::Error;

/// Feed provider errors
#[derive(Error, Debug)]
pub enum FeedError {
    /// Server answered with a non-success status
    #[error("Feed request failed with HTTP status {status}")]
    Http { status: u16 },

    /// Body was not a JSON array of videos
    #[error("Malformed feed response: {0}")]
    Parse(String),

    #[error(transparent)]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

pub type Result<T> = std::result::Result<T, FeedError>;

impl From<FeedError> for bridge_traits::error::BridgeError {
    fn from(error: FeedError) -> Self {
        match error {
            FeedError::Bridge(inner) => inner,
            other => bridge_traits::error::BridgeError::OperationFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::BridgeError;

    #[test]
    fn test_http_error_maps_to_operation_failed() {
        let bridged: BridgeError = FeedError::Http { status: 503 }.into();
        match bridged {
            BridgeError::OperationFailed(msg) => assert!(msg.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bridge_error_passes_through() {
        let bridged: BridgeError = FeedError::Bridge(BridgeError::Timeout(30_000)).into();
        assert!(matches!(bridged, BridgeError::Timeout(30_000)));
    }
}
