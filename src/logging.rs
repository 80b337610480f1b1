//! Operator diagnostics
//!
//! While the TUI owns the terminal, diagnostics are written to a file. When no
//! file has been set up (simple mode, tests) the macros forward to `tracing`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use lazy_static::lazy_static;
use chrono::Local;

lazy_static! {
    static ref LOG_FILE: Mutex<Option<(PathBuf, File)>> = Mutex::new(None);
}

/// Open the diagnostics file for appending
pub fn init_logger(log_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let _ = writeln!(file, "\n=== pronoun-chat session started at {} ===\n", timestamp);

    let mut log_file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
    *log_file = Some((log_path.to_path_buf(), file));

    Ok(())
}

/// Log a message to the diagnostics file, or to `tracing` if there is none
pub fn log(level: &str, message: &str) {
    let mut log_file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some((_, ref mut f)) = *log_file {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(f, "[{}] {}: {}", timestamp, level, message);
        let _ = f.flush();
        return;
    }
    drop(log_file);

    match level {
        "ERROR" => tracing::error!("{}", message),
        "WARN" => tracing::warn!("{}", message),
        "DEBUG" => tracing::debug!("{}", message),
        _ => tracing::info!("{}", message),
    }
}

/// Macros for easier logging
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log("INFO", &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log("DEBUG", &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::log("WARN", &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log("ERROR", &format!($($arg)*));
    };
}

/// Current diagnostics file path for display, if file logging is active
pub fn log_path_display() -> Option<String> {
    let log_file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
    log_file.as_ref().map(|(path, _)| path.display().to_string())
}
