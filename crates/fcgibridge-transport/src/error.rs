/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to connect to the remote peer.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    /// The configured host did not resolve to any socket address.
    #[error("no address found for {addr}")]
    Resolve { addr: String },

    /// The local pipe handle could not be opened.
    #[error("failed to open pipe endpoint: {0}")]
    Pipe(std::io::Error),

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
