use crate::utils::app_paths::AppPaths;
use crate::utils::logging::LogEntry;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// Global file logger instance
static DUAL_LOGGER: OnceLock<Option<DualLogger>> = OnceLock::new();

/// File half of the dual logging setup; the ring buffer half lives in
/// `logging`
pub struct DualLogger {
    log_file: Mutex<File>,
    log_path: PathBuf,
}

impl DualLogger {
    /// Open a timestamped log file in `log_dir`
    pub fn create_in(log_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(log_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("sort-stepper_{}.log", timestamp));

        #[cfg(unix)]
        {
            let latest_path = log_dir.join("latest.log");
            let _ = std::fs::remove_file(&latest_path);
            let _ = std::os::unix::fs::symlink(&log_path, &latest_path);
        }

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            log_file: Mutex::new(log_file),
            log_path,
        })
    }

    pub fn write_entry(&self, entry: &LogEntry) {
        if let Ok(mut file) = self.log_file.lock() {
            let _ = writeln!(file, "{}", entry.format_for_display());
        }
    }

    /// Get the log file path
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn flush(&self) {
        if let Ok(mut file) = self.log_file.lock() {
            let _ = file.flush();
        }
    }
}

/// Initialize the global file logger, `None` if no log file could be opened
pub fn init_dual_logger() -> Option<&'static DualLogger> {
    DUAL_LOGGER
        .get_or_init(|| {
            let dir = AppPaths::log_dir().ok()?;
            DualLogger::create_in(&dir).ok()
        })
        .as_ref()
}

/// Get the global file logger
pub fn get_dual_logger() -> Option<&'static DualLogger> {
    DUAL_LOGGER.get().and_then(Option::as_ref)
}
