use std::fmt;

use fcgibridge_frame::{Header, END_REQUEST, STDIN};

/// Relay state.
///
/// ```text
///            STDIN, empty body
///   Outbound ─────────────────▶ Inbound
///      ▲                           │
///      └───────────────────────────┘
///               END_REQUEST
///
///   end of stream on the phase's source ──▶ Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Forwarding pipe records to the peer.
    #[default]
    Outbound,
    /// Copying peer records back to the pipe.
    Inbound,
    /// One side reached end of stream. Terminal.
    Closed,
}

impl Phase {
    /// The phase that follows relaying a record with `header` in this phase.
    pub fn after(self, header: &Header) -> Phase {
        match (self, header.record_type(), header.body_len()) {
            (Phase::Outbound, STDIN, 0) => Phase::Inbound,
            (Phase::Inbound, END_REQUEST, _) => Phase::Outbound,
            (phase, _, _) => phase,
        }
    }

    pub fn is_closed(self) -> bool {
        self == Phase::Closed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Outbound => "outbound",
            Phase::Inbound => "inbound",
            Phase::Closed => "closed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
