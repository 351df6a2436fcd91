use bridge_traits::error::BridgeError;
use core_library::LibraryError;
use std::time::Duration;
use thiserror::Error;

/// Refresh failures.
///
/// `Fetch` and `Timeout` display text is shown to the user as-is when no
/// cached data is available, so it carries no internal prefixes.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{0}")]
    Fetch(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cache error: {0}")]
    Library(#[from] LibraryError),
}

impl SyncError {
    /// Whether retrying the same refresh can plausibly succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SyncError::Fetch(_) | SyncError::Timeout(_))
    }
}

impl From<BridgeError> for SyncError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::OperationFailed(msg) | BridgeError::NotAvailable(msg) => {
                SyncError::Fetch(msg)
            }
            BridgeError::Timeout(ms) => SyncError::Timeout(Duration::from_millis(ms)),
            BridgeError::Io(e) => SyncError::Fetch(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
