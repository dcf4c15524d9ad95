use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;
use crate::config::Settings;

/// Log file for this run: the one given on the command line, otherwise the
/// per-user state directory.
pub fn log_path(settings: &Settings) -> Option<PathBuf> {
    settings.log_file.clone().or_else(AppDirs::log_path)
}

pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `RUST_LOG` wins; otherwise the crate logs at the level picked by `-v`.
pub fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("klok={}", settings.log_level())))
}

/// Installs the global subscriber. The terminal belongs to the UI, so logs
/// only ever go to a file. Returns the file in use, if any.
pub fn init(settings: &Settings) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = log_path(settings) else {
        return Ok(None);
    };
    let file = open_log_file(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("cannot install logger: {e}"))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_log_file_wins() {
        let settings = Settings {
            log_file: Some(PathBuf::from("/tmp/custom.log")),
            ..Settings::default()
        };
        assert_eq!(log_path(&settings), Some(PathBuf::from("/tmp/custom.log")));
    }

    #[test]
    fn open_log_file_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("klok.log");
        let file = open_log_file(&path);
        assert!(file.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn init_writes_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("klok.log");
        let settings = Settings {
            log_file: Some(path.clone()),
            verbose: true,
            ..Settings::default()
        };

        let used = init(&settings).unwrap();
        assert_eq!(used, Some(path.clone()));
        tracing::info!("logger installed");

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("logger installed") || std::env::var("RUST_LOG").is_ok());
    }
}
