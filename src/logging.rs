use std::path::PathBuf;

use anyhow::Context;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::config;

// stdout carries the embedding, so nothing here may ever write to it.
// The returned handle must outlive the run so file output gets flushed.
pub fn init_logging() -> anyhow::Result<LoggerHandle> {
    let handle = match log_dir()? {
        Some(dir) => Logger::try_with_env_or_str(config::logging::FILE_LEVEL)?
            .log_to_file(FileSpec::default().directory(dir).basename(config::logging::LOG_FILE_NAME))
            .rotate(
                Criterion::Size(config::logging::LOG_ROTATE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(config::logging::LOG_ROTATE_KEEP_FILES),
            )
            .duplicate_to_stderr(Duplicate::Warn)
            .format(flexi_logger::detailed_format)
            .start()
            .context("failed to start logger")?,
        None => Logger::try_with_env_or_str(config::logging::DEFAULT_LEVEL)?
            .log_to_stderr()
            .start()
            .context("failed to start logger")?,
    };

    log::debug!("mdembed {} starting on {}", config::VERSION, std::env::consts::OS);
    Ok(handle)
}

fn log_dir() -> anyhow::Result<Option<PathBuf>> {
    let dir = match std::env::var(config::logging::LOG_DIR_ENV) {
        Ok(v) if !v.is_empty() => PathBuf::from(v),
        _ => return Ok(None),
    };
    std::fs::create_dir_all(&dir).with_context(|| format!("failed creating log dir {}", dir.display()))?;
    Ok(Some(dir))
}
