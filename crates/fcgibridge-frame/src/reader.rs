use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::codec::{Frame, Header, HEADER_SIZE};
use crate::error::{FrameError, Result};

/// Reads records from any `Read` stream, one exact-length read at a time.
///
/// There is no read-ahead buffer: after a record has been returned the inner
/// stream is positioned at the first byte of the next one. The relay depends
/// on this when it hands the same stream back and forth between phases.
pub struct FrameReader<T> {
    inner: T,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Read exactly one 8-byte header.
    ///
    /// Returns `Err(FrameError::EndOfStream)` when the stream ends first.
    pub fn read_header(&mut self) -> Result<Header> {
        let mut raw = [0u8; HEADER_SIZE];
        fill(&mut self.inner, &mut raw)?;
        Ok(Header::new(raw))
    }

    /// Read exactly `len` body bytes.
    ///
    /// A zero-length body performs no I/O.
    pub fn read_body(&mut self, len: u16) -> Result<Bytes> {
        if len == 0 {
            return Ok(Bytes::new());
        }

        let mut body = BytesMut::zeroed(len as usize);
        fill(&mut self.inner, &mut body)?;
        Ok(body.freeze())
    }

    /// Read the next complete record (header, then body).
    pub fn read_frame(&mut self) -> Result<Frame> {
        let header = self.read_header()?;
        let body = self.read_body(header.body_len())?;
        Ok(Frame { header, body })
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

/// Fill `buf` completely or report how far the stream got before ending.
fn fill<R: Read + ?Sized>(src: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => {
                trace!(expected = buf.len(), received = filled, "end of stream");
                return Err(FrameError::EndOfStream {
                    expected: buf.len(),
                    received: filled,
                });
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
    Ok(())
}
