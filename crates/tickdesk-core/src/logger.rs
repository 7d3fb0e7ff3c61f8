use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Log severity, ordered `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Parses a configured level name. Unknown names fall back to `Debug`,
    /// the most permissive setting.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Debug,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for formatted log lines.
///
/// The console implementation is the production sink; tests substitute a
/// recording sink to assert on emitted lines.
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, line: &str);
}

/// Writes debug/info lines to stdout and warn/error lines to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Debug | LogLevel::Info => println!("{line}"),
            LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
        }
    }
}

/// Leveled logger with a threshold fixed at construction.
///
/// Events below the threshold produce no sink output. Emission never fails:
/// a context payload that cannot be serialized is dropped and the message is
/// logged without it.
pub struct Logger {
    threshold: LogLevel,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(threshold: LogLevel) -> Self {
        Self::with_sink(threshold, Arc::new(ConsoleSink))
    }

    pub fn with_sink(threshold: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self { threshold, sink }
    }

    pub const fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn debug(&self, message: &str, context: Option<&Value>) {
        self.emit(LogLevel::Debug, message, context);
    }

    pub fn info(&self, message: &str, context: Option<&Value>) {
        self.emit(LogLevel::Info, message, context);
    }

    pub fn warn(&self, message: &str, context: Option<&Value>) {
        self.emit(LogLevel::Warn, message, context);
    }

    pub fn error(&self, message: &str, context: Option<&Value>) {
        self.emit(LogLevel::Error, message, context);
    }

    fn emit(&self, level: LogLevel, message: &str, context: Option<&Value>) {
        if level.rank() < self.threshold.rank() {
            return;
        }

        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>"));

        let line = match context.map(serde_json::to_string) {
            Some(Ok(payload)) => format!("[{timestamp}] {level}: {message} {payload}"),
            // Unserializable context degrades to the bare message.
            Some(Err(_)) | None => format!("[{timestamp}] {level}: {message}"),
        };

        self.sink.write(level, &line);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<(LogLevel, String)>>,
    }

    impl RecordingSink {
        fn lines(&self) -> Vec<(LogLevel, String)> {
            self.lines
                .lock()
                .expect("recording sink lock is not poisoned")
                .clone()
        }
    }

    impl LogSink for RecordingSink {
        fn write(&self, level: LogLevel, line: &str) {
            self.lines
                .lock()
                .expect("recording sink lock is not poisoned")
                .push((level, line.to_owned()));
        }
    }

    #[test]
    fn suppresses_events_below_threshold() {
        let sink = Arc::new(RecordingSink::default());
        let logger = Logger::with_sink(LogLevel::Warn, sink.clone());

        logger.debug("hidden", None);
        logger.info("hidden", None);
        logger.warn("visible", None);
        logger.error("visible", None);

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, LogLevel::Warn);
        assert_eq!(lines[1].0, LogLevel::Error);
    }

    #[test]
    fn formats_uppercase_level_message_and_context() {
        let sink = Arc::new(RecordingSink::default());
        let logger = Logger::with_sink(LogLevel::Debug, sink.clone());

        logger.info("stocks fetched", Some(&json!({ "count": 3 })));

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let line = &lines[0].1;
        assert!(line.contains("INFO: stocks fetched"));
        assert!(line.contains("{\"count\":3}"));
        assert!(line.starts_with('['), "line should begin with a timestamp");
    }

    #[test]
    fn omits_context_when_absent() {
        let sink = Arc::new(RecordingSink::default());
        let logger = Logger::with_sink(LogLevel::Debug, sink.clone());

        logger.debug("bare message", None);

        let line = &sink.lines()[0].1;
        assert!(line.ends_with("DEBUG: bare message"));
    }

    #[test]
    fn unknown_level_names_fall_back_to_debug() {
        assert_eq!(LogLevel::parse("verbose"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::parse(" info "), LogLevel::Info);
        assert_eq!(LogLevel::parse("error"), LogLevel::Error);
    }

    #[test]
    fn rank_order_matches_severity() {
        assert!(LogLevel::Debug.rank() < LogLevel::Info.rank());
        assert!(LogLevel::Info.rank() < LogLevel::Warn.rank());
        assert!(LogLevel::Warn.rank() < LogLevel::Error.rank());
    }
}
