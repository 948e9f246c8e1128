use std::net::SocketAddr;

/// Errors that can occur in channel transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to bind to the specified endpoint.
    #[error("failed to bind to {endpoint}: {source}")]
    Bind {
        endpoint: SocketAddr,
        source: std::io::Error,
    },

    /// An I/O error occurred on the channel socket.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel has already been closed.
    #[error("channel closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, TransportError>;
