/// Errors that end a relay session abnormally.
///
/// End of stream is not among them: it closes the relay with `Ok`.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Dialing the peer failed.
    #[error("transport error: {0}")]
    Transport(#[from] fcgibridge_transport::TransportError),

    /// Reading or writing a record failed.
    #[error("frame error: {0}")]
    Frame(#[from] fcgibridge_frame::FrameError),

    /// A send failed in a way that a new connection would not fix.
    #[error("send to peer failed: {0}")]
    Send(std::io::Error),

    /// The single resend on a fresh connection failed as well.
    #[error("resend after reconnect failed: {0}")]
    Resend(std::io::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
