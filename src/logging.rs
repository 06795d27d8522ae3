use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct AirconLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl AirconLogger {
    // Debug and trace records must match a filter topic when filters are set
    fn passes_filter(&self, metadata: &Metadata) -> bool {
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }
}

impl log::Log for AirconLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.passes_filter(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        // Logs go to stderr so PRINT output on stdout stays clean
        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: OnceLock<AirconLogger> = OnceLock::new();

/// Parse a log level name, falling back to `Info` for anything unrecognised
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn parse_filters(filter_str: &str) -> HashSet<String> {
    filter_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| AirconLogger {
        level,
        debug_filters: debug_filter.as_deref().map(parse_filters),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_vm {
    ($($arg:tt)*) => {
        log::debug!(target: "vm", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_env {
    ($($arg:tt)*) => {
        log::debug!(target: "env", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_instructions {
    ([$step:expr, $pc:expr] $($arg:tt)*) => {
        log::debug!(target: "instructions", "[S{:05}][PC{:03}] {}", $step, $pc, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "instructions", "{}", format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, MetadataBuilder};

    fn metadata(level: Level, target: &str) -> Metadata<'_> {
        MetadataBuilder::new().level(level).target(target).build()
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), LevelFilter::Trace);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_debug_filter_limits_topics() {
        let logger = AirconLogger {
            level: LevelFilter::Trace,
            debug_filters: Some(parse_filters("env, vm")),
        };
        assert!(logger.enabled(&metadata(Level::Debug, "env")));
        assert!(logger.enabled(&metadata(Level::Debug, "vm")));
        assert!(!logger.enabled(&metadata(Level::Debug, "instructions")));
        // Filters never hide info and above
        assert!(logger.enabled(&metadata(Level::Info, "instructions")));
    }

    #[test]
    fn test_level_gate() {
        let logger = AirconLogger {
            level: LevelFilter::Warn,
            debug_filters: None,
        };
        assert!(logger.enabled(&metadata(Level::Error, "vm")));
        assert!(!logger.enabled(&metadata(Level::Info, "vm")));
    }
}
