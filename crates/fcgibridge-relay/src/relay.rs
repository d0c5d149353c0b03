use std::io::{Read, Write};

use fcgibridge_frame::{record_type_name, Frame, FrameError, FrameReader, FrameWriter};
use fcgibridge_transport::Transport;
use tracing::{debug, info};

use crate::error::{RelayError, Result};
use crate::phase::Phase;
use crate::policy::{is_connection_fault, OutboundPolicy};
use crate::stats::RelayStats;

/// Relay configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayConfig {
    /// Handling of `ABORT_REQUEST` records on the way out.
    pub policy: OutboundPolicy,
}

/// The relay between a local pipe and a peer reached through `T`.
///
/// Owns the single live peer connection. The connection is replaced only when
/// an outbound send fails; reads never trigger a reconnect.
pub struct Relay<R, W, T: Transport> {
    pipe_in: FrameReader<R>,
    pipe_out: FrameWriter<W>,
    transport: T,
    conn: FrameWriter<T::Connection>,
    phase: Phase,
    config: RelayConfig,
    stats: RelayStats,
}

impl<R, W, T> Relay<R, W, T>
where
    R: Read,
    W: Write,
    T: Transport,
{
    /// Dial the first connection and start in the outbound phase.
    pub fn connect(
        pipe_in: R,
        pipe_out: W,
        mut transport: T,
        config: RelayConfig,
    ) -> Result<Self> {
        let conn = transport.connect()?;
        debug!(peer = %transport.describe(), policy = ?config.policy, "relay connected");

        Ok(Self {
            pipe_in: FrameReader::new(pipe_in),
            pipe_out: FrameWriter::new(pipe_out),
            transport,
            conn: FrameWriter::new(conn),
            phase: Phase::Outbound,
            config,
            stats: RelayStats::default(),
        })
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Counters so far.
    pub fn stats(&self) -> &RelayStats {
        &self.stats
    }

    /// Relay records until either side reaches end of stream.
    pub fn run(mut self) -> Result<RelayStats> {
        while !self.step()?.is_closed() {}

        info!(
            frames_out = self.stats.frames_out,
            frames_in = self.stats.frames_in,
            reconnects = self.stats.reconnects,
            "relay closed"
        );
        Ok(self.stats)
    }

    /// Relay one record in the current phase and return the phase after it.
    pub fn step(&mut self) -> Result<Phase> {
        let next = match self.phase {
            Phase::Outbound => self.outbound()?,
            Phase::Inbound => self.inbound()?,
            Phase::Closed => Phase::Closed,
        };

        if next != self.phase {
            debug!(from = %self.phase, to = %next, "phase switch");
            if !next.is_closed() {
                self.stats.phase_switches += 1;
            }
        }
        self.phase = next;
        Ok(next)
    }

    fn outbound(&mut self) -> Result<Phase> {
        let frame = match self.pipe_in.read_frame() {
            Ok(frame) => frame,
            Err(err) if err.is_end_of_stream() => {
                debug!(%err, "pipe reached end of stream");
                return Ok(Phase::Closed);
            }
            Err(err) => return Err(err.into()),
        };

        if !self.config.policy.admits(&frame.header) {
            debug!(
                record_type = record_type_name(frame.record_type()),
                len = frame.body.len(),
                "dropping record"
            );
            self.stats.frames_dropped += 1;
            return Ok(Phase::Outbound);
        }

        debug!(
            record_type = record_type_name(frame.record_type()),
            len = frame.body.len(),
            "pipe -> peer"
        );
        self.send(&frame)?;
        self.stats.frames_out += 1;
        self.stats.bytes_out += frame.body.len() as u64;

        Ok(Phase::Outbound.after(&frame.header))
    }

    fn inbound(&mut self) -> Result<Phase> {
        let frame = match FrameReader::new(self.conn.get_mut()).read_frame() {
            Ok(frame) => frame,
            Err(err) if err.is_end_of_stream() => {
                debug!(%err, "peer reached end of stream");
                return Ok(Phase::Closed);
            }
            Err(err) => return Err(err.into()),
        };

        debug!(
            record_type = record_type_name(frame.record_type()),
            len = frame.body.len(),
            "peer -> pipe"
        );
        self.pipe_out.write_frame(&frame)?;
        self.stats.frames_in += 1;
        self.stats.bytes_in += frame.body.len() as u64;

        Ok(Phase::Inbound.after(&frame.header))
    }

    /// Send one record, redialing and resending once on a connection fault.
    fn send(&mut self, frame: &Frame) -> Result<()> {
        let err = match self.conn.write_frame(frame) {
            Ok(()) => return Ok(()),
            Err(FrameError::Io(err)) if is_connection_fault(&err) => err,
            Err(FrameError::Io(err)) => return Err(RelayError::Send(err)),
            Err(other) => return Err(other.into()),
        };

        info!(error = %err, peer = %self.transport.describe(), "send failed, reconnecting");
        self.conn = FrameWriter::new(self.transport.connect()?);
        self.stats.reconnects += 1;

        match self.conn.write_frame(frame) {
            Ok(()) => Ok(()),
            Err(FrameError::Io(err)) => Err(RelayError::Resend(err)),
            Err(other) => Err(other.into()),
        }
    }
}
