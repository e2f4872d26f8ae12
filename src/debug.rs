use parking_lot::Mutex;
/// Debug logging for valuelens
///
/// Controlled by DEBUG_LEVEL environment variable:
/// - 0 or unset: No debugging
/// - 1: Errors only
/// - 2: Info level (settings loaded/saved, theme changes)
/// - 3: Debug level (renderer selection, skipped records)
/// - 4: Trace level (every rendered segment)
///
/// All output goes to /tmp/valuelens_debug.log on Unix/macOS,
/// or %TEMP%\valuelens_debug.log on Windows, so that a host UI writing to
/// stdout is never disturbed.
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::parse(&val).unwrap_or(DebugLevel::Off),
            Err(_) => DebugLevel::Off,
        }
    }

    /// Parse a numeric (`0`-`4`) or named (`error`, `info`, ...) level.
    pub fn parse(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "0" | "off" => Some(DebugLevel::Off),
            "1" | "error" => Some(DebugLevel::Error),
            "2" | "info" => Some(DebugLevel::Info),
            "3" | "debug" => Some(DebugLevel::Debug),
            "4" | "trace" => Some(DebugLevel::Trace),
            _ => None,
        }
    }

    fn to_log_filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Error,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }

    fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => DebugLevel::Error,
            log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        }
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new() -> Self {
        Self::with_level(DebugLevel::from_env())
    }

    fn with_level(level: DebugLevel) -> Self {
        if level == DebugLevel::Off {
            return DebugLogger { level, file: None };
        }

        #[cfg(unix)]
        let log_path = std::path::PathBuf::from("/tmp/valuelens_debug.log");
        #[cfg(windows)]
        let log_path = std::env::temp_dir().join("valuelens_debug.log");

        match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&log_path)
        {
            Ok(f) => {
                let mut logger = DebugLogger {
                    level,
                    file: Some(f),
                };
                logger.write_raw(&format!(
                    "\n{}\nvaluelens debug session started at {} (level={:?})\n{}\n",
                    "=".repeat(80),
                    get_timestamp(),
                    level,
                    "=".repeat(80)
                ));
                logger
            }
            // Silently fail if the log file can't be opened; the host UI
            // must never see logger noise.
            Err(_e) => DebugLogger { level, file: None },
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level {
            let timestamp = get_timestamp();
            let level_str = match level {
                DebugLevel::Error => "ERROR",
                DebugLevel::Info => "INFO ",
                DebugLevel::Debug => "DEBUG",
                DebugLevel::Trace => "TRACE",
                DebugLevel::Off => return,
            };
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                timestamp, level_str, category, msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// Forwards `log` crate records (emitted by `valuelens-config`) into the
/// debug log file, using the record target as the category.
struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        is_enabled(DebugLevel::from_log_level(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = DebugLevel::from_log_level(record.level());
        if is_enabled(level) {
            log(level, record.target(), &record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOG_BRIDGE: LogBridge = LogBridge;

/// Initialize the logger, optionally overriding `DEBUG_LEVEL`, and install
/// the `log` facade bridge. Safe to call more than once; only the first call
/// takes effect.
pub fn init_log_bridge(level_override: Option<DebugLevel>) {
    let logger = get_logger_with(level_override);
    let level = logger.lock().level;
    if log::set_logger(&LOG_BRIDGE).is_ok() {
        log::set_max_level(level.to_log_filter());
    }
}

fn get_logger_with(level_override: Option<DebugLevel>) -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| match level_override {
        Some(level) => Mutex::new(DebugLogger::with_level(level)),
        None => Mutex::new(DebugLogger::new()),
    })
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
