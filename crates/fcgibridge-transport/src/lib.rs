//! Transport collaborators for fcgibridge.
//!
//! Two endpoints meet in the relay:
//! - the remote peer, reached over TCP through a [`Transport`] that can be
//!   re-dialed whenever the current connection breaks
//! - the local pipe, a raw byte stream inherited from the parent process
//!
//! This is the lowest layer of fcgibridge. Nothing here knows about frames.

pub mod error;
pub mod pipe;
pub mod tcp;
pub mod traits;

pub use error::{Result, TransportError};
pub use pipe::{PipeEndpoint, PipeReader, PipeWriter};
pub use tcp::{PeerStream, TcpConfig, TcpTransport, DEFAULT_HOST, DEFAULT_PORT};
pub use traits::Transport;
