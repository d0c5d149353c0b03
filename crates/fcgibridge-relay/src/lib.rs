//! Half-duplex relay between a local FastCGI pipe and a TCP peer.
//!
//! The relay alternates between two phases. Outbound, it forwards every
//! record the local process writes until an empty `STDIN` record says the
//! request is complete. Inbound, it copies the peer's records back to the pipe
//! until an `END_REQUEST` arrives. End of stream on either side closes the
//! relay. A failed send is retried once on a freshly dialed connection.

pub mod error;
pub mod phase;
pub mod policy;
pub mod relay;
pub mod stats;

pub use error::{RelayError, Result};
pub use phase::Phase;
pub use policy::{is_connection_fault, OutboundPolicy};
pub use relay::{Relay, RelayConfig};
pub use stats::RelayStats;
