//! Diagnostic log.
//!
//! The operator sees notices through [`crate::terminal`]. The log keeps what
//! sits behind them: URLs tried, statuses, byte counts and catalog sizes.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const FILE_FILTER: &str = "info,logofetch=debug,logofetch_core=debug";

/// Quieter default for stderr, which shares the screen with the prompts.
const STDERR_FILTER: &str = "warn";

/// `~/.local/state/logofetch/logofetch.log`
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("logofetch")?;
    Ok(xdg_dirs.get_state_home().join("logofetch").join("logofetch.log"))
}

/// `RUST_LOG` when set and valid, `default` otherwise.
fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))
}

/// Sends tracing output to the log file and returns its path.
///
/// Errors leave no subscriber installed, so the caller can still use
/// [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = open_append(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_or(FILE_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging: {}", e))?;

    tracing::info!("logofetch {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(path)
}

/// Fallback when the log file is unusable: warnings and errors on stderr.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or(STDERR_FILTER))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_created_with_parents_and_appended() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("logofetch").join("logofetch.log");

        writeln!(open_append(&path).unwrap(), "first").unwrap();
        writeln!(open_append(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn unopenable_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("state");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = open_append(&blocker.join("logofetch.log")).unwrap_err();
        assert!(format!("{:#}", err).contains("state"));
    }
}
