use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::KanaflashError;

const DEFAULT_FILTER: &str = "kanaflash=debug";
const LOG_FILE_NAME: &str = "kanaflash.log";

/// Where `--log-file` writes when no path is given
pub fn default_log_path() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let state_dir = PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("kanaflash");
        Some(state_dir.join(LOG_FILE_NAME))
    } else {
        ProjectDirs::from("", "", "kanaflash")
            .map(|proj_dirs| proj_dirs.data_local_dir().join(LOG_FILE_NAME))
    }
}

/// Install a global subscriber writing to `path`.
///
/// The terminal belongs to the TUI, so events only ever go to the file. Keep
/// the returned guard alive until exit or buffered lines are lost. `RUST_LOG`
/// overrides the default filter.
pub fn init_logging(path: &Path) -> Result<WorkerGuard, KanaflashError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| KanaflashError::Logging(format!("not a file path: {}", path.display())))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .try_init()
        .map_err(|e| KanaflashError::Logging(e.to_string()))?;

    Ok(guard)
}
