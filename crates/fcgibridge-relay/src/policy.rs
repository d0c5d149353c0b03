use std::io::{self, ErrorKind};

use fcgibridge_frame::{Header, ABORT_REQUEST};

/// What the outbound phase does with `ABORT_REQUEST` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutboundPolicy {
    /// Drop `ABORT_REQUEST` records instead of forwarding them.
    #[default]
    Filter,
    /// Forward every record.
    Forward,
}

impl OutboundPolicy {
    /// Whether a record with this header goes to the peer.
    pub fn admits(self, header: &Header) -> bool {
        match self {
            OutboundPolicy::Filter => header.record_type() != ABORT_REQUEST,
            OutboundPolicy::Forward => true,
        }
    }
}

/// Send errors that a fresh connection can recover from.
pub fn is_connection_fault(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::BrokenPipe
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::WriteZero
            | ErrorKind::UnexpectedEof
            | ErrorKind::TimedOut
    )
}
