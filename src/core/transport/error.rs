//! Errors raised while bringing up or running a transport.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The TCP listener could not take its address.
    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The client left or misbehaved before the MCP handshake completed.
    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    /// The session task panicked or was aborted.
    #[error("MCP session task failed: {0}")]
    Session(#[from] tokio::task::JoinError),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn handshake(reason: impl ToString) -> Self {
        Self::Handshake(reason.to_string())
    }
}
