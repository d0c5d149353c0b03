//! Relay FastCGI records between a local pipe and a TCP peer.
//!
//! A web server hands the FastCGI application a pipe; fcgibridge sits on that
//! pipe and forwards each request to an application listening on TCP, then
//! copies the response back.
//!
//! # Crate Structure
//!
//! - [`transport`] — TCP peer transport and the local pipe endpoint
//! - [`frame`] — 8-byte record headers and exact-length record I/O
//! - [`relay`] — The outbound/inbound relay state machine

/// Re-export transport types.
pub mod transport {
    pub use fcgibridge_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use fcgibridge_frame::*;
}

/// Re-export relay types.
pub mod relay {
    pub use fcgibridge_relay::*;
}
