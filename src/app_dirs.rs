use directories::ProjectDirs;
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "klok.log";

/// Per-user directories klok writes to.
pub struct AppDirs;

impl AppDirs {
    /// State directory where the platform has one (`~/.local/state/klok` on
    /// Linux), local data directory otherwise.
    pub fn log_dir() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "klok")?;
        let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
        Some(dir.to_path_buf())
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::log_dir().map(|dir| dir.join(LOG_FILE_NAME))
    }
}
