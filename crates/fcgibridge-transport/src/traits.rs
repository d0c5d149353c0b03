use std::io::{Read, Write};

use crate::error::Result;

/// Dials connections to the remote peer.
///
/// The relay owns exactly one connection at a time and asks the transport for
/// a fresh one when a send on the current connection fails. Implementations
/// must be able to connect repeatedly.
pub trait Transport {
    /// The connected byte stream handed to the relay.
    type Connection: Read + Write;

    /// Establish a new connection to the peer (blocking).
    fn connect(&mut self) -> Result<Self::Connection>;

    /// Human-readable peer description for diagnostics.
    fn describe(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Connection = T::Connection;

    fn connect(&mut self) -> Result<Self::Connection> {
        (**self).connect()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
