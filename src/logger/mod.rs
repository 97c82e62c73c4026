//! Logger module
//!
//! Provides logging utilities for the mission service including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Mission and scheduler events
//! - Error and warning logging, optionally to files

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        LogLevel::parse(&config.logging.level),
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info log (shares the access log target)
fn write_info(level: LogLevel, message: &str) {
    if let Some(writer) = writer::get() {
        writer.write_info(level, message);
    } else if level >= LogLevel::Info {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(level: LogLevel, message: &str) {
    if let Some(writer) = writer::get() {
        writer.write_error(level, message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if let Some(writer) = writer::get() {
        writer.write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, persistent: bool) {
    write_info(LogLevel::Info, "======================================");
    write_info(LogLevel::Info, "Daily mission server started");
    write_info(LogLevel::Info, &format!("Listening on: http://{addr}"));
    write_info(
        LogLevel::Info,
        &format!("Log level: {}", config.logging.level),
    );
    if let Some(workers) = config.server.workers {
        write_info(LogLevel::Info, &format!("Worker threads: {workers}"));
    }
    if persistent {
        write_info(
            LogLevel::Info,
            &format!(
                "Storage: sqlite {} (table {})",
                config.storage.path, config.storage.table
            ),
        );
    } else {
        write_info(LogLevel::Info, "Storage: in-memory (not persisted)");
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(LogLevel::Info, &format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(LogLevel::Info, &format!("Error log: {path}"));
    }
    write_info(LogLevel::Info, "Routes:");
    write_info(LogLevel::Info, "  - *    /message");
    write_info(LogLevel::Info, "  - *    /random");
    write_info(LogLevel::Info, "  - POST /add/mission   (form field: name)");
    write_info(LogLevel::Info, "  - GET  /list/mission");
    write_info(LogLevel::Info, "======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(
        LogLevel::Debug,
        &format!("[Connection] Accepted from: {peer_addr}"),
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(
        LogLevel::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, &format!("[WARN] {message}"));
}

pub fn log_debug(message: &str) {
    write_info(LogLevel::Debug, &format!("[DEBUG] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_mission_added(id: i64, name: &str, time: i64) {
    write_info(
        LogLevel::Info,
        &format!("[Mission] Added #{id} '{name}' at {time}"),
    );
}

pub fn log_scheduler_start(window: &str) {
    write_info(LogLevel::Info, &format!("[Scheduler] Stretch reminder {window}"));
}

pub fn log_scheduler_disabled() {
    write_info(LogLevel::Info, "[Scheduler] Disabled by configuration");
}

pub fn log_scheduler_next(next: &str) {
    write_info(LogLevel::Debug, &format!("[Scheduler] Next trigger at {next}"));
}

pub fn log_scheduler_triggered(timestamp: &str) {
    write_info(
        LogLevel::Info,
        &format!("[Scheduler] Cron job triggered at: {timestamp}"),
    );
}

pub fn log_scheduler_inserted(id: i64, time: i64, timestamp: &str) {
    write_info(
        LogLevel::Info,
        &format!(
            "[Scheduler] Stretch reminder added successfully: id={id} time={time} timestamp={timestamp}"
        ),
    );
}

pub fn log_scheduler_error(message: &str) {
    write_error(
        LogLevel::Error,
        &format!("[Scheduler ERROR] Error in cron job: {message}"),
    );
}

pub fn log_shutdown(reason: &str) {
    write_info(LogLevel::Info, &format!("\n[Shutdown] {reason}"));
}
