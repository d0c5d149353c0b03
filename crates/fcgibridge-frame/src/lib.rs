//! FastCGI record framing for the relay.
//!
//! Every record on the wire is an 8-byte header followed by a body:
//! - byte 1 carries the record type
//! - bytes 4 and 5 carry the body length, big-endian
//!
//! All other header bytes and every body byte are opaque and forwarded as-is.
//! Readers never consume past the end of the current record.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod error;
pub mod reader;
pub mod record_type;
pub mod writer;

#[cfg(feature = "async")]
pub use async_codec::RecordCodec;
pub use codec::{
    body_length, decode_frame, encode_frame, Frame, Header, CONTENT_LENGTH_OFFSET, HEADER_SIZE,
    MAX_BODY_LEN, TYPE_OFFSET,
};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use record_type::{record_type_name, ABORT_REQUEST, END_REQUEST, STDIN};
pub use writer::FrameWriter;
