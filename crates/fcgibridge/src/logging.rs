use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Verbosity of the bridge's diagnostics. The default (`warn`) keeps a
/// healthy session silent; `off` also hides failures, which are still
/// reported on exit as a single `error:` line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the process-wide subscriber.
///
/// Stdout may be the record pipe, so logs only ever go to stderr.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let _ = tracing::dispatcher::set_global_default(dispatch(format, level, std::io::stderr));
}

fn dispatch<W>(format: LogFormat, level: LogLevel, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(LevelFilter::from(level))
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Text => Dispatch::new(builder.finish()),
        LogFormat::Json => Dispatch::new(builder.json().finish()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(format: LogFormat, level: LogLevel, emit: impl FnOnce()) -> String {
        let sink = Captured::default();
        let writer = sink.clone();
        let dispatch = dispatch(format, level, move || writer.clone());
        tracing::dispatcher::with_default(&dispatch, emit);
        sink.text()
    }

    #[test]
    fn levels_map_to_filters() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::OFF);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
    }

    #[test]
    fn warn_level_hides_session_chatter() {
        let out = capture(LogFormat::Text, LogLevel::Warn, || {
            tracing::info!("relay closed");
            tracing::debug!("record relayed");
            tracing::warn!("peer misbehaved");
        });
        assert!(!out.contains("relay closed"), "output: {out}");
        assert!(!out.contains("record relayed"), "output: {out}");
        assert!(out.contains("peer misbehaved"), "output: {out}");
    }

    #[test]
    fn off_level_writes_nothing() {
        let out = capture(LogFormat::Text, LogLevel::Off, || {
            tracing::error!("connect failed");
        });
        assert!(out.is_empty(), "output: {out}");
    }

    #[test]
    fn json_format_emits_one_object_per_event() {
        let out = capture(LogFormat::Json, LogLevel::Info, || {
            tracing::info!(records = 2, "relay closed");
        });
        let line = out.lines().next().expect("one event");
        assert!(line.starts_with('{') && line.ends_with('}'), "line: {line}");
        assert!(line.contains("\"relay closed\""), "line: {line}");
        assert!(line.contains("\"records\":2"), "line: {line}");
    }
}
