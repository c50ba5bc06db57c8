//! Reload signal delivery
//!
//! foot re-reads its config on SIGUSR1. Terminals are addressed by exact
//! process name through `pkill -x`, invoked with an argument vector. An
//! unanchored pattern would also match `foottheme` itself.

use std::fmt;
use std::process::Stdio;
use std::str::FromStr;

use async_trait::async_trait;
use log::{debug, trace};
use tokio::process::Command;

use super::error::{ThemeError, ThemeResult};

/// Signals accepted as a reload request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadSignal {
    #[default]
    Usr1,
    Usr2,
    Hup,
}

impl ReloadSignal {
    /// Option passed to pkill
    pub fn pkill_flag(self) -> &'static str {
        match self {
            ReloadSignal::Usr1 => "-USR1",
            ReloadSignal::Usr2 => "-USR2",
            ReloadSignal::Hup => "-HUP",
        }
    }

    /// Lowercase name as used in config files
    pub fn config_name(self) -> &'static str {
        match self {
            ReloadSignal::Usr1 => "usr1",
            ReloadSignal::Usr2 => "usr2",
            ReloadSignal::Hup => "hup",
        }
    }
}

impl fmt::Display for ReloadSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIG{}", self.config_name().to_uppercase())
    }
}

impl FromStr for ReloadSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.strip_prefix("sig").unwrap_or(&lower) {
            "usr1" => Ok(ReloadSignal::Usr1),
            "usr2" => Ok(ReloadSignal::Usr2),
            "hup" => Ok(ReloadSignal::Hup),
            _ => Err(format!("Invalid reload signal: {}. Valid options: usr1, usr2, hup", s)),
        }
    }
}

/// Result of a reload request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// At least one process received the signal
    Delivered,
    /// No process matched; nothing to reload
    NoProcess,
    /// Reload was disabled by configuration
    Skipped,
}

/// Sends a reload signal to processes by name
#[async_trait]
pub trait ReloadSignaler: Send + Sync {
    async fn signal(&self, process_name: &str, signal: ReloadSignal) -> ThemeResult<ReloadOutcome>;
}

/// [`ReloadSignaler`] backed by the `pkill` utility
#[derive(Debug, Clone)]
pub struct PkillSignaler {
    program: String,
}

impl Default for PkillSignaler {
    fn default() -> Self {
        Self {
            program: "pkill".to_string(),
        }
    }
}

impl PkillSignaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different pkill binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ReloadSignaler for PkillSignaler {
    async fn signal(&self, process_name: &str, signal: ReloadSignal) -> ThemeResult<ReloadOutcome> {
        debug!("Sending {} to processes named '{}'", signal, process_name);

        let output = Command::new(&self.program)
            .args(pkill_args(signal, process_name))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                ThemeError::signal_delivery(process_name, format!("could not run {}: {}", self.program, e))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        trace!("{} exited with {:?}", self.program, output.status.code());
        classify_exit(process_name, output.status.code(), stderr.trim())
    }
}

/// Argument vector for pkill: exact name match, `--` guards names starting with `-`
fn pkill_args(signal: ReloadSignal, process_name: &str) -> [&str; 4] {
    [signal.pkill_flag(), "-x", "--", process_name]
}

/// Map pkill's exit status: 0 signalled, 1 nothing matched, anything else failed
fn classify_exit(process_name: &str, code: Option<i32>, stderr: &str) -> ThemeResult<ReloadOutcome> {
    match code {
        Some(0) => Ok(ReloadOutcome::Delivered),
        Some(1) => {
            debug!("No running process matches '{}'", process_name);
            Ok(ReloadOutcome::NoProcess)
        }
        Some(status) if stderr.is_empty() => Err(ThemeError::signal_delivery(
            process_name,
            format!("pkill exited with status {}", status),
        )),
        Some(status) => Err(ThemeError::signal_delivery(
            process_name,
            format!("pkill exited with status {}: {}", status, stderr),
        )),
        None => Err(ThemeError::signal_delivery(process_name, "pkill was terminated by a signal")),
    }
}
