use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Record header length in bytes.
pub const HEADER_SIZE: usize = 8;

/// Offset of the record type byte.
pub const TYPE_OFFSET: usize = 1;

/// Offset of the big-endian body length (two bytes).
pub const CONTENT_LENGTH_OFFSET: usize = 4;

/// Largest body a header can declare.
pub const MAX_BODY_LEN: usize = u16::MAX as usize;

/// Body length declared by a header: `256 * header[4] + header[5]`.
pub fn body_length(header: &[u8; HEADER_SIZE]) -> u16 {
    u16::from_be_bytes([
        header[CONTENT_LENGTH_OFFSET],
        header[CONTENT_LENGTH_OFFSET + 1],
    ])
}

/// An 8-byte record header.
///
/// Only the type and length fields are interpreted; the remaining bytes are
/// carried verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header([u8; HEADER_SIZE]);

impl Header {
    /// Wrap raw header bytes.
    pub const fn new(bytes: [u8; HEADER_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a version-1 header with the given type and body length.
    ///
    /// Request id and padding are zero.
    pub fn with_type(record_type: u8, body_len: u16) -> Self {
        let [hi, lo] = body_len.to_be_bytes();
        Self([1, record_type, 0, 0, hi, lo, 0, 0])
    }

    /// The record type byte.
    pub fn record_type(&self) -> u8 {
        self.0[TYPE_OFFSET]
    }

    /// Declared body length.
    pub fn body_len(&self) -> u16 {
        body_length(&self.0)
    }

    /// Raw header bytes.
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.0
    }
}

impl From<[u8; HEADER_SIZE]> for Header {
    fn from(bytes: [u8; HEADER_SIZE]) -> Self {
        Self(bytes)
    }
}

/// A complete record: header plus exactly `header.body_len()` body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub body: Bytes,
}

impl Frame {
    /// Create a new frame.
    ///
    /// The header is stored as given; callers are responsible for making the
    /// declared length match the body.
    pub fn new(header: impl Into<Header>, body: impl Into<Bytes>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
        }
    }

    /// The record type byte.
    pub fn record_type(&self) -> u8 {
        self.header.record_type()
    }

    /// The total wire size of this frame (header + body).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.body.len()
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌─────────┬──────┬──────────┬─────────────┬─────────┬──────────┬───────────────┐
/// │ Version │ Type │ ReqId    │ Length      │ Padding │ Reserved │ Body          │
/// │ (1B)    │ (1B) │ (2B BE)  │ (2B BE)     │ (1B)    │ (1B)     │ (Length B)    │
/// └─────────┴──────┴──────────┴─────────────┴─────────┴──────────┴───────────────┘
/// ```
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) {
    dst.reserve(frame.wire_size());
    dst.put_slice(frame.header.as_bytes());
    dst.put_slice(&frame.body);
}

/// Decode a frame from a buffer.
///
/// Returns `None` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut) -> Option<Frame> {
    if src.len() < HEADER_SIZE {
        return None;
    }

    let mut raw = [0u8; HEADER_SIZE];
    raw.copy_from_slice(&src[..HEADER_SIZE]);
    let header = Header::new(raw);

    let total = HEADER_SIZE + header.body_len() as usize;
    if src.len() < total {
        return None;
    }

    src.advance(HEADER_SIZE);
    let body = src.split_to(header.body_len() as usize).freeze();

    Some(Frame { header, body })
}
