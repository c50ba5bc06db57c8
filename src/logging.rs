// Logging for foottheme
//
// A small `log::Log` backend with text or JSON lines, written to stderr, a
// file, or both. Console and file each carry their own level so a log file can
// capture debug output while the terminal only shows warnings.
//
// ```
// let config = LogConfig {
//     console_level: LevelFilter::Warn,
//     file_level: Some(LevelFilter::Debug),
//     format: LogFormat::Json,
//     destination: LogDestination::Both(PathBuf::from("foottheme.log")),
// };
// init_logger(config)?;
// ```

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

/// Log destination options
#[derive(Debug, Clone, PartialEq)]
pub enum LogDestination {
    Console,
    File(PathBuf),
    Both(PathBuf),
}

/// JSON log line
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    pub file_level: Option<LevelFilter>,
    pub format: LogFormat,
    pub destination: LogDestination,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Info,
            file_level: None,
            format: LogFormat::Text,
            destination: LogDestination::Console,
        }
    }
}

pub struct FootthemeLogger {
    config: LogConfig,
}

impl FootthemeLogger {
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    fn format_timestamp() -> String {
        let now: DateTime<Local> = Local::now();
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn format_text_message(&self, level: Level, message: &str) -> String {
        format!("{} [{}] {}", Self::format_timestamp(), level.to_string().to_uppercase(), message)
    }

    /// Records from outside this crate keep their target in `detail`
    fn format_json_message(&self, level: Level, target: &str, message: &str) -> Result<String> {
        let detail = if target.starts_with(env!("CARGO_CRATE_NAME")) {
            None
        } else {
            Some(serde_json::json!({ "target": target }))
        };

        let entry = JsonLogEntry {
            timestamp: Self::format_timestamp(),
            level: level.to_string().to_uppercase(),
            message: message.to_string(),
            detail,
        };

        serde_json::to_string(&entry).context("Failed to serialize log entry to JSON")
    }

    fn console_enabled(&self, level: Level) -> bool {
        match self.config.destination {
            LogDestination::File(_) => false,
            _ => level <= self.config.console_level,
        }
    }

    fn file_path(&self, level: Level) -> Option<&Path> {
        let path = match &self.config.destination {
            LogDestination::Console => return None,
            LogDestination::File(path) | LogDestination::Both(path) => path,
        };
        match self.config.file_level {
            Some(file_level) if level <= file_level => Some(path.as_path()),
            _ => None,
        }
    }

    fn write_to_console(&self, line: &str) -> Result<()> {
        writeln!(io::stderr(), "{}", line).context("Failed to write to console")
    }

    fn write_to_file(&self, line: &str, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        writeln!(file, "{}", line).context("Failed to write to log file")
    }
}

impl log::Log for FootthemeLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.console_enabled(metadata.level()) || self.file_path(metadata.level()).is_some()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let message = record.args().to_string();

        let line = match self.config.format {
            LogFormat::Text => self.format_text_message(level, &message),
            LogFormat::Json => self
                .format_json_message(level, record.target(), &message)
                .unwrap_or_else(|e| {
                    eprintln!("JSON formatting error: {}. Falling back to text format.", e);
                    self.format_text_message(level, &message)
                }),
        };

        if self.console_enabled(level) {
            if let Err(e) = self.write_to_console(&line) {
                eprintln!("Console logging error: {}", e);
            }
        }

        if let Some(path) = self.file_path(level) {
            if let Err(e) = self.write_to_file(&line, path) {
                // File-only logging would otherwise lose the line entirely
                if matches!(self.config.destination, LogDestination::File(_)) {
                    eprintln!("File logging error: {}. Falling back to console.", e);
                    let _ = self.write_to_console(&line);
                } else {
                    eprintln!("File logging error: {}", e);
                }
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Install the logger as the global `log` backend
pub fn init_logger(config: LogConfig) -> Result<()> {
    let max_level = match config.file_level {
        Some(file_level) => file_level.max(config.console_level),
        None => config.console_level,
    };

    log::set_boxed_logger(Box::new(FootthemeLogger::new(config)))
        .context("Failed to set global logger")?;
    log::set_max_level(max_level);

    Ok(())
}

/// Convert string to LevelFilter
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        "off" => Ok(LevelFilter::Off),
        _ => Err(anyhow::anyhow!(
            "Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off",
            level_str
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use tempfile::tempdir;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.as_str(), "json");
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("warn").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level("TRACE").unwrap(), LevelFilter::Trace);
        assert_eq!(parse_log_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_timestamp_format() {
        let timestamp = FootthemeLogger::format_timestamp();
        assert_eq!(timestamp.len(), 19);
        assert_eq!(timestamp.chars().nth(4), Some('-'));
        assert_eq!(timestamp.chars().nth(10), Some(' '));
        assert_eq!(timestamp.chars().nth(16), Some(':'));
    }

    #[test]
    fn test_text_message_formatting() {
        let logger = FootthemeLogger::new(LogConfig::default());

        let line = logger.format_text_message(Level::Warn, "palette slot empty");
        assert!(line.ends_with("[WARN] palette slot empty"));
    }

    #[test]
    fn test_json_detail_only_for_foreign_targets() {
        let logger = FootthemeLogger::new(LogConfig::default());

        let own = logger
            .format_json_message(Level::Info, "foottheme::theme::applier", "applied")
            .unwrap();
        assert!(own.contains(r#""message":"applied""#));
        assert!(!own.contains(r#""detail""#));

        let foreign = logger
            .format_json_message(Level::Debug, "tokio::process", "spawned")
            .unwrap();
        assert!(foreign.contains(r#""detail":{"target":"tokio::process"}"#));
    }

    #[test]
    fn test_destination_levels() {
        let logger = FootthemeLogger::new(LogConfig {
            console_level: LevelFilter::Warn,
            file_level: Some(LevelFilter::Debug),
            format: LogFormat::Text,
            destination: LogDestination::Both(PathBuf::from("/tmp/foottheme.log")),
        });

        assert!(logger.console_enabled(Level::Error));
        assert!(!logger.console_enabled(Level::Info));
        assert!(logger.file_path(Level::Debug).is_some());
        assert!(logger.file_path(Level::Trace).is_none());

        let file_only = FootthemeLogger::new(LogConfig {
            console_level: LevelFilter::Trace,
            file_level: Some(LevelFilter::Info),
            format: LogFormat::Text,
            destination: LogDestination::File(PathBuf::from("/tmp/foottheme.log")),
        });
        assert!(!file_only.console_enabled(Level::Error));
    }

    #[test]
    fn test_file_destination_receives_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foottheme.log");
        let logger = FootthemeLogger::new(LogConfig {
            console_level: LevelFilter::Off,
            file_level: Some(LevelFilter::Info),
            format: LogFormat::Json,
            destination: LogDestination::File(path.clone()),
        });

        logger.log(
            &log::Record::builder()
                .level(Level::Info)
                .target("foottheme")
                .args(format_args!("wrote foot.ini"))
                .build(),
        );

        let content = std::fs::read_to_string(&path).unwrap();
        let entry: JsonLogEntry = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(entry.level, "INFO");
        assert_eq!(entry.message, "wrote foot.ini");
    }
}
