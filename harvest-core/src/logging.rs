//! Logging initialization: console output plus a non-blocking log file.
//!
//! Built from an explicit [`LoggingConfig`] rather than ambient globals. The
//! size policy runs at startup: an oversized log file is rotated to a
//! timestamped backup, and old backups beyond the configured count are
//! pruned.

use crate::config::LoggingConfig;
use crate::error::{ConfigError, HarvestError};
use chrono::Utc;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber. The returned guard must be kept alive for
/// the duration of the process so buffered file output is flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard, HarvestError> {
    fs::create_dir_all(&config.directory)?;
    rotate_oversized_log(config)?;
    prune_old_backups(config)?;

    let filter = EnvFilter::try_new(&config.level).map_err(|_| ConfigError::InvalidLogLevel {
        level: config.level.clone(),
    })?;

    let file_appender = tracing_appender::rolling::never(&config.directory, &config.file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    Registry::default()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    info!(
        "Logging initialized: level={}, file={}",
        config.level,
        config.directory.join(&config.file_name).display()
    );

    Ok(guard)
}

fn file_stem(file_name: &str) -> &str {
    file_name.strip_suffix(".log").unwrap_or(file_name)
}

/// Rename the active log file to `<stem>.<timestamp>.log` once it exceeds
/// the configured size.
fn rotate_oversized_log(config: &LoggingConfig) -> Result<(), HarvestError> {
    let log_path = config.directory.join(&config.file_name);
    if !log_path.exists() {
        return Ok(());
    }

    let size = fs::metadata(&log_path)?.len();
    if size <= config.max_file_size_bytes() {
        return Ok(());
    }

    let backup_name = format!(
        "{}.{}.log",
        file_stem(&config.file_name),
        Utc::now().format("%Y%m%dT%H%M%S")
    );
    fs::rename(&log_path, config.directory.join(&backup_name))?;
    Ok(())
}

/// Delete the oldest backups once more than `max_backups` exist. Backup
/// names carry a sortable timestamp, so lexicographic order is age order.
fn prune_old_backups(config: &LoggingConfig) -> Result<(), HarvestError> {
    let mut backups = list_backups(&config.directory, &config.file_name)?;
    backups.sort();

    while backups.len() > config.max_backups {
        let oldest = backups.remove(0);
        fs::remove_file(config.directory.join(&oldest))?;
    }
    Ok(())
}

fn list_backups(directory: &Path, file_name: &str) -> Result<Vec<String>, HarvestError> {
    let prefix = format!("{}.", file_stem(file_name));
    let mut backups = Vec::new();

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name != file_name && name.starts_with(&prefix) && name.ends_with(".log") {
            backups.push(name);
        }
    }
    Ok(backups)
}
