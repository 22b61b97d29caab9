//! Named loggers shared by every service of the crate.
//!
//! Each module owns a static [`Logger`] (for example `@restate/database`). Output goes
//! through the default handler unless a user handler is installed with
//! [`set_user_log_handler`], which is how applications forward records into their own
//! logging pipeline.

use chrono::{SecondsFormat, Utc};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, LazyLock, Mutex, RwLock, Weak};

static GLOBAL_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INSTANCES: LazyLock<Mutex<Vec<Weak<LoggerInner>>>> =
    LazyLock::new(|| Mutex::new(Vec::new()));
static USER_HANDLER: LazyLock<RwLock<Option<LogCallback>>> = LazyLock::new(|| RwLock::new(None));

/// Callback receiving every record emitted at or above the logger's level.
pub type LogCallback = Arc<dyn Fn(&LogRecord) + Send + Sync + 'static>;

#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: String,
    log_level: AtomicU8,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        let inner = Arc::new(LoggerInner {
            name: name.into(),
            log_level: AtomicU8::new(GLOBAL_LOG_LEVEL.load(Ordering::SeqCst)),
        });
        track_instance(&inner);
        Self { inner }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.inner.log_level.load(Ordering::SeqCst))
    }

    pub fn set_log_level(&self, level: LogLevel) {
        self.inner.log_level.store(level as u8, Ordering::SeqCst);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Debug, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Warn, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Error, message.into());
    }

    fn dispatch(&self, level: LogLevel, message: String) {
        if level == LogLevel::Silent || level < self.log_level() {
            return;
        }
        let record = LogRecord {
            level,
            logger: self.name().to_string(),
            message,
        };
        let handler = USER_HANDLER
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(None);
        match handler {
            Some(handler) => handler(&record),
            None => default_log_handler(&record),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("level", &self.log_level())
            .finish()
    }
}

/// A single emitted log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub logger: String,
    pub message: String,
}

fn track_instance(inner: &Arc<LoggerInner>) {
    if let Ok(mut instances) = INSTANCES.lock() {
        instances.push(Arc::downgrade(inner));
    }
}

fn default_log_handler(record: &LogRecord) {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let line = format!("[{}]  {}: {}", now, record.logger, record.message);
    match record.level {
        LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Silent = 4,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            _ => LogLevel::Silent,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" => Ok(LogLevel::Silent),
            other => Err(LogError::InvalidLogLevel(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogError {
    InvalidLogLevel(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::InvalidLogLevel(level) => {
                write!(f, "Invalid value \"{level}\" assigned to `log_level`")
            }
        }
    }
}

impl std::error::Error for LogError {}

/// Sets the level of every live logger and of loggers created afterwards.
pub fn set_log_level(level: LogLevel) {
    GLOBAL_LOG_LEVEL.store(level as u8, Ordering::SeqCst);
    let Ok(mut instances) = INSTANCES.lock() else {
        return;
    };
    instances.retain(|weak| match weak.upgrade() {
        Some(inner) => {
            inner.log_level.store(level as u8, Ordering::SeqCst);
            true
        }
        None => false,
    });
}

/// Parses `level` (e.g. `"warn"`) and applies it globally.
pub fn set_log_level_str(level: &str) -> Result<(), LogError> {
    set_log_level(level.parse()?);
    Ok(())
}

/// Installs or clears the handler that replaces the default stdout/stderr output.
pub fn set_user_log_handler(handler: Option<LogCallback>) {
    if let Ok(mut guard) = USER_HANDLER.write() {
        *guard = handler;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn levels_order_from_debug_to_silent() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::Silent);
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }

    #[test]
    fn user_handler_receives_records_at_or_above_level() {
        let logs = crate::test_support::capture_logs();
        let logger = Logger::new("@restate/test-handler");
        logger.set_log_level(LogLevel::Warn);

        logger.info("suppressed");
        logger.warn("disk almost full");
        logger.error("disk full");

        let records = logs.from_logger("@restate/test-handler");
        assert_eq!(
            records,
            vec![
                LogRecord {
                    level: LogLevel::Warn,
                    logger: "@restate/test-handler".into(),
                    message: "disk almost full".into(),
                },
                LogRecord {
                    level: LogLevel::Error,
                    logger: "@restate/test-handler".into(),
                    message: "disk full".into(),
                },
            ]
        );
    }

    #[test]
    fn global_level_applies_to_live_and_new_loggers() {
        let logs = crate::test_support::capture_logs();
        let existing = Logger::new("@restate/test-global");

        set_log_level(LogLevel::Error);
        assert_eq!(existing.log_level(), LogLevel::Error);
        assert_eq!(Logger::new("@restate/test-later").log_level(), LogLevel::Error);
        existing.warn("hidden");

        set_log_level_str("debug").unwrap();
        assert_eq!(existing.log_level(), LogLevel::Debug);
        existing.debug("visible");

        assert!(set_log_level_str("loud").is_err());
        assert_eq!(existing.log_level(), LogLevel::Debug);
        set_log_level(LogLevel::Info);

        let messages: Vec<String> = logs
            .from_logger("@restate/test-global")
            .into_iter()
            .map(|record| record.message)
            .collect();
        assert_eq!(messages, vec!["visible".to_string()]);
    }

    #[test]
    fn per_logger_level_overrides_global() {
        let _logs = crate::test_support::capture_logs();
        let logger = Logger::new("@restate/test-level");
        logger.set_log_level(LogLevel::Error);
        assert_eq!(logger.log_level(), LogLevel::Error);
        assert_eq!(logger.name(), "@restate/test-level");
    }
}
