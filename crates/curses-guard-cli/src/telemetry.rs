use std::io::{self, IsTerminal};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
    /// Nowhere: curses owns the terminal and stderr would draw over it.
    Discard,
}

impl LogSink {
    /// A named file always wins. Without one, logs go to stderr unless a
    /// real terminal session is about to share it.
    pub fn select(log_file: Option<PathBuf>, owns_terminal: bool) -> Self {
        match log_file {
            Some(path) => LogSink::File(path),
            None if owns_terminal => LogSink::Discard,
            None => LogSink::Stderr,
        }
    }
}

/// Keeps the log writer alive; drop it before exiting so buffered lines are flushed.
#[derive(Debug)]
pub struct TelemetryGuard {
    _guard: Option<WorkerGuard>,
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// Fails only when the log file cannot be opened.
pub fn init_tracing(default_level: &str, sink: &LogSink) -> io::Result<TelemetryGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard) = match sink {
        LogSink::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        LogSink::Stderr => (BoxMakeWriter::new(io::stderr), None),
        LogSink::Discard => (BoxMakeWriter::new(io::sink), None),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(*sink == LogSink::Stderr && io::stderr().is_terminal())
        .with_writer(writer)
        .try_init()
        .is_ok();

    // A subscriber installed earlier keeps receiving events; ours is dropped.
    Ok(TelemetryGuard {
        _guard: guard.filter(|_| installed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_wins_over_terminal() {
        let path = PathBuf::from("/tmp/curses-guard.log");
        assert_eq!(
            LogSink::select(Some(path.clone()), true),
            LogSink::File(path)
        );
    }

    #[test]
    fn test_terminal_session_discards_logs() {
        assert_eq!(LogSink::select(None, true), LogSink::Discard);
        assert_eq!(LogSink::select(None, false), LogSink::Stderr);
    }

    #[test]
    fn test_unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::File(dir.path().join("missing").join("log"));
        assert!(init_tracing("off", &sink).is_err());
    }
}
