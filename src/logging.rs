//! Tracing subscriber setup for the CLI

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::log_path;

/// Where and how logs are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Filter directives (e.g. `debug`, `version_menu=trace`); `RUST_LOG` when unset
    pub level: Option<String>,
    /// Log file; stderr when unset
    pub file: Option<PathBuf>,
    pub json: bool,
}

impl LogOptions {
    /// Write to `file`, or to the default log file under the data directory
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = Some(file.unwrap_or_else(log_path));
        self
    }
}

/// Build the filter from explicit directives, falling back to `RUST_LOG`, then `info`
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    match level {
        Some(directives) => builder.parse_lossy(directives),
        None => builder.from_env_lossy(),
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file on drop and must be kept alive
/// for the lifetime of the program.
pub fn init_tracing(options: &LogOptions) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = build_filter(options.level.as_deref());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let Some(path) = &options.file else {
        let builder = builder.with_writer(std::io::stderr);
        if options.json {
            builder.json().try_init().map_err(anyhow::Error::msg)?;
        } else {
            builder.compact().try_init().map_err(anyhow::Error::msg)?;
        }
        return Ok(None);
    };

    let (directory, file_name) = split_log_path(path)?;
    fs::create_dir_all(&directory)?;
    let appender = tracing_appender::rolling::never(&directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let builder = builder.with_writer(writer).with_ansi(false);
    if options.json {
        builder.json().try_init().map_err(anyhow::Error::msg)?;
    } else {
        builder.try_init().map_err(anyhow::Error::msg)?;
    }

    Ok(Some(guard))
}

fn split_log_path(path: &Path) -> anyhow::Result<(PathBuf, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {:?}", path))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, file_name))
}
