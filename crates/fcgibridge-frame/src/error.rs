/// Errors that can occur while reading or writing records.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream ended before a complete header or body was read.
    ///
    /// This is the normal way for a relay session to finish.
    #[error("end of stream ({received} of {expected} bytes)")]
    EndOfStream { expected: usize, received: usize },

    /// The declared body does not fit the configured bound.
    #[error("record body too large ({size} bytes, max {max})")]
    BodyTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing records.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// True when the error marks the end of the stream rather than a fault.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, FrameError::EndOfStream { .. })
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
