use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::Transport;

/// Default peer host: the relay always talks to the local machine.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default peer port.
pub const DEFAULT_PORT: u16 = 37320;

/// Configuration for [`TcpTransport`].
#[derive(Debug, Clone)]
pub struct TcpConfig {
    /// Host name or address of the peer. Default: `127.0.0.1`.
    pub host: String,
    /// TCP port of the peer. Default: 37320.
    pub port: u16,
    /// Timeout applied to each connection attempt. `None` blocks until the
    /// operating system gives up.
    pub connect_timeout: Option<Duration>,
    /// Disable Nagle's algorithm on every connection. Default: `true`.
    pub nodelay: bool,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: None,
            nodelay: true,
        }
    }
}

impl TcpConfig {
    /// Default configuration targeting `port` on the local machine.
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// `host:port` as shown in diagnostics.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TCP transport to the remote peer.
///
/// Every call to [`Transport::connect`] resolves the configured host again and
/// tries each resolved address in order until one accepts.
#[derive(Debug, Clone, Default)]
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a transport with explicit configuration.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Current transport configuration.
    pub fn config(&self) -> &TcpConfig {
        &self.config
    }

    fn resolve(&self) -> Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.config.host.as_str(), self.config.port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Connect {
                addr: self.config.addr(),
                source,
            })?
            .collect();

        if addrs.is_empty() {
            return Err(TransportError::Resolve {
                addr: self.config.addr(),
            });
        }
        Ok(addrs)
    }

    fn dial(&self, addr: &SocketAddr) -> std::io::Result<TcpStream> {
        match self.config.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(addr, timeout),
            None => TcpStream::connect(addr),
        }
    }
}

impl Transport for TcpTransport {
    type Connection = PeerStream;

    fn connect(&mut self) -> Result<PeerStream> {
        let mut last_err = None;

        for addr in self.resolve()? {
            match self.dial(&addr) {
                Ok(stream) => {
                    stream.set_nodelay(self.config.nodelay)?;
                    debug!(%addr, "connected to peer");
                    return Ok(PeerStream::from_tcp(stream));
                }
                Err(err) => {
                    debug!(%addr, error = %err, "connect attempt failed");
                    last_err = Some(err);
                }
            }
        }

        Err(TransportError::Connect {
            addr: self.config.addr(),
            source: last_err.unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "no address attempted")
            }),
        })
    }

    fn describe(&self) -> String {
        format!("tcp://{}", self.config.addr())
    }
}

/// A connected TCP stream to the peer — implements Read + Write.
pub struct PeerStream {
    inner: TcpStream,
}

impl PeerStream {
    pub(crate) fn from_tcp(inner: TcpStream) -> Self {
        Self { inner }
    }

    /// Address of the connected peer.
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        self.inner.peer_addr().map_err(Into::into)
    }
}

impl Read for PeerStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for PeerStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for PeerStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeerStream")
            .field("peer", &self.inner.peer_addr().ok())
            .finish()
    }
}
