/// Counters for one relay session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Records sent from the pipe to the peer.
    pub frames_out: u64,
    /// Body bytes sent to the peer.
    pub bytes_out: u64,
    /// Records dropped by the outbound policy.
    pub frames_dropped: u64,
    /// Records copied from the peer to the pipe.
    pub frames_in: u64,
    /// Body bytes copied to the pipe.
    pub bytes_in: u64,
    /// Connections dialed after a failed send.
    pub reconnects: u64,
    /// Outbound/inbound switches (either direction).
    pub phase_switches: u64,
}
