//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(#[from] rfpad_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] rfpad_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] rfpad_types::Error),

    #[error("Reader not open")]
    NotOpen,

    #[error("Invalid poller state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Check if the polling loop can recover by simply polling again
    ///
    /// Protocol and transport failures are per-cycle conditions: the next
    /// inventory retries them. State misuse is not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Protocol(_) | Self::Transport(_))
    }

    /// The device-reported scan status, when that is what failed
    pub fn scan_status(&self) -> Option<rfpad_core::ScanStatus> {
        match self {
            Self::Protocol(e) => e.scan_status(),
            _ => None,
        }
    }
}
