use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::project_data_dir;

/// Logger setup.
///
/// A running prompt owns stderr, so anything logged while it is on screen
/// should go to a file (`with_file`) rather than the default stderr target.
#[derive(Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: None,
            debug_mode: false,
        }
    }

    /// Log to `file_name` inside the project data directory.
    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Enable debug mode for verbose logging of prompt transitions.
    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    fn level(&self) -> LevelFilter {
        if self.debug_mode {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();
        b.filter_level(self.level());
        // RUST_LOG, when set, refines the level chosen above.
        b.parse_default_env();

        if let Some(file_name) = &self.file_name {
            let log_file = log_file_path(&project_data_dir()?, file_name);

            let fd = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_file)
                .with_context(|| format!("Unable to open {} for writing", log_file.display()))?;

            b.target(Target::Pipe(Box::new(fd)));
        }

        b.try_init().context("Logger already initialized")?;

        Ok(())
    }
}

/// Resolves the log file inside `data_dir`. Absolute names are kept as is.
fn log_file_path(data_dir: &Path, file_name: &Path) -> PathBuf {
    data_dir.join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_default_debug_mode_disabled() {
        let logging = Logging::new();
        assert!(!logging.debug_mode, "Debug mode should be disabled by default");
        assert_eq!(logging.level(), LevelFilter::Info);
    }

    #[test]
    fn test_logging_with_debug_mode_enabled() {
        let logging = Logging::new().with_debug_mode(true);
        assert_eq!(logging.level(), LevelFilter::Debug);
    }

    #[test]
    fn test_logging_with_debug_mode_disabled() {
        let logging = Logging::new().with_debug_mode(true).with_debug_mode(false);
        assert!(!logging.debug_mode);
    }

    #[test]
    fn test_logging_builder_chaining() {
        let logging = Logging::new().with_file("app.log").with_debug_mode(true);

        assert!(logging.debug_mode);
        assert_eq!(
            logging.file_name.unwrap().to_string_lossy(),
            "app.log"
        );
    }

    #[test]
    fn test_log_file_path_is_inside_data_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = log_file_path(temp_dir.path(), Path::new("bubblewrap.log"));

        assert_eq!(path.parent(), Some(temp_dir.path()));
        assert_eq!(
            path.file_name().map(|f| f.to_string_lossy().into_owned()),
            Some("bubblewrap.log".to_owned())
        );
    }
}
