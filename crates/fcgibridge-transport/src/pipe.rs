use std::fs::File;
use std::io::{Read, Write};

use tracing::debug;

use crate::error::{Result, TransportError};

/// Owned read half of a [`PipeEndpoint`].
pub type PipeReader = Box<dyn Read + Send>;
/// Owned write half of a [`PipeEndpoint`].
pub type PipeWriter = Box<dyn Write + Send>;

/// The local byte-stream endpoint.
///
/// Bytes pass through untouched: Rust's standard handles perform no newline
/// translation or text decoding, on any platform. The endpoint is opened once
/// and never reconnected.
pub struct PipeEndpoint {
    reader: PipeReader,
    writer: PipeWriter,
    kind: &'static str,
}

impl PipeEndpoint {
    /// Read from standard input, write to standard output.
    pub fn stdio() -> Self {
        Self {
            reader: Box::new(std::io::stdin()),
            writer: Box::new(std::io::stdout()),
            kind: "stdio",
        }
    }

    /// Read and write the single handle inherited as standard input.
    ///
    /// This is the layout used by web servers that hand a FastCGI application a
    /// bidirectional pipe on stdin (IIS named pipes, socketpairs on Unix).
    pub fn duplex_stdin() -> Result<Self> {
        let file = stdin_file().map_err(TransportError::Pipe)?;
        let writer = file.try_clone().map_err(TransportError::Pipe)?;
        debug!("opened duplex pipe on standard input");
        Ok(Self {
            reader: Box::new(file),
            writer: Box::new(writer),
            kind: "duplex-stdin",
        })
    }

    /// Build an endpoint from arbitrary halves.
    pub fn from_parts(
        reader: impl Read + Send + 'static,
        writer: impl Write + Send + 'static,
    ) -> Self {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
            kind: "custom",
        }
    }

    /// Split into independently owned read and write halves.
    pub fn into_split(self) -> (PipeReader, PipeWriter) {
        (self.reader, self.writer)
    }

    /// Endpoint name for diagnostics.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

#[cfg(unix)]
fn stdin_file() -> std::io::Result<File> {
    use std::os::fd::AsFd;

    let fd = std::io::stdin().as_fd().try_clone_to_owned()?;
    Ok(File::from(fd))
}

#[cfg(windows)]
fn stdin_file() -> std::io::Result<File> {
    use std::os::windows::io::AsHandle;

    let handle = std::io::stdin().as_handle().try_clone_to_owned()?;
    Ok(File::from(handle))
}

#[cfg(not(any(unix, windows)))]
fn stdin_file() -> std::io::Result<File> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "duplex stdin is not supported on this platform",
    ))
}

impl Read for PipeEndpoint {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for PipeEndpoint {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl std::fmt::Debug for PipeEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipeEndpoint")
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn from_parts_passes_bytes_through() {
        let sink = SharedSink::default();
        let mut pipe =
            PipeEndpoint::from_parts(Cursor::new(vec![0x00, 0x0d, 0x0a, 0xff]), sink.clone());

        let mut buf = [0u8; 4];
        pipe.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x0d, 0x0a, 0xff]);

        pipe.write_all(b"\r\n\x00").unwrap();
        pipe.flush().unwrap();
        assert_eq!(sink.0.lock().unwrap().as_slice(), b"\r\n\x00");
        assert_eq!(pipe.kind(), "custom");
    }

    #[test]
    fn split_halves_are_independent() {
        let sink = SharedSink::default();
        let pipe = PipeEndpoint::from_parts(Cursor::new(b"abc".to_vec()), sink.clone());
        let (mut reader, mut writer) = pipe.into_split();

        writer.write_all(b"xyz").unwrap();
        let mut read = Vec::new();
        reader.read_to_end(&mut read).unwrap();

        assert_eq!(read, b"abc");
        assert_eq!(sink.0.lock().unwrap().as_slice(), b"xyz");
    }

    #[test]
    fn stdio_endpoint_kind() {
        assert_eq!(PipeEndpoint::stdio().kind(), "stdio");
    }
}
