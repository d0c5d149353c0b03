//! `tokio_util::codec` adapter for the record format.
//!
//! Lets async callers drive the same wire layout through `Framed`,
//! `FramedRead` and `FramedWrite`. Unlike [`FrameReader`](crate::FrameReader)
//! this codec buffers ahead, so it is meant for streams that a single owner
//! consumes end to end.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_frame, encode_frame, Frame, Header, HEADER_SIZE, MAX_BODY_LEN};
use crate::error::FrameError;

/// Decoder/encoder for FastCGI records.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    max_body: usize,
}

impl RecordCodec {
    /// Codec accepting any body a header can declare.
    pub fn new() -> Self {
        Self {
            max_body: MAX_BODY_LEN,
        }
    }

    /// Codec rejecting bodies above `max_body` bytes.
    pub fn with_max_body(max_body: usize) -> Self {
        Self { max_body }
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RecordCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, FrameError> {
        if src.len() < HEADER_SIZE {
            src.reserve(HEADER_SIZE - src.len());
            return Ok(None);
        }

        let mut raw = [0u8; HEADER_SIZE];
        raw.copy_from_slice(&src[..HEADER_SIZE]);
        let body_len = Header::new(raw).body_len() as usize;
        if body_len > self.max_body {
            return Err(FrameError::BodyTooLarge {
                size: body_len,
                max: self.max_body,
            });
        }

        match decode_frame(src) {
            Some(frame) => Ok(Some(frame)),
            None => {
                src.reserve(HEADER_SIZE + body_len - src.len());
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, FrameError> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => Err(FrameError::EndOfStream {
                expected: expected_len(src),
                received: src.len(),
            }),
        }
    }
}

impl Encoder<Frame> for RecordCodec {
    type Error = FrameError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<(), FrameError> {
        <Self as Encoder<&Frame>>::encode(self, &frame, dst)
    }
}

impl Encoder<&Frame> for RecordCodec {
    type Error = FrameError;

    fn encode(&mut self, frame: &Frame, dst: &mut BytesMut) -> Result<(), FrameError> {
        if frame.body.len() > self.max_body {
            return Err(FrameError::BodyTooLarge {
                size: frame.body.len(),
                max: self.max_body,
            });
        }
        encode_frame(frame, dst);
        Ok(())
    }
}

fn expected_len(src: &BytesMut) -> usize {
    if src.len() < HEADER_SIZE {
        return HEADER_SIZE;
    }
    let mut raw = [0u8; HEADER_SIZE];
    raw.copy_from_slice(&src[..HEADER_SIZE]);
    HEADER_SIZE + Header::new(raw).body_len() as usize
}
