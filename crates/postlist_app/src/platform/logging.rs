//! Logger setup for the terminal host.
//!
//! Stdout belongs to the rendered list, so log lines go to a file in the
//! state directory, to stderr, or both. Only records from the `postlist_*`
//! crates are kept; the HTTP stack is quiet unless it errors.

use std::fs::{File, OpenOptions};
use std::path::Path;

use log::LevelFilter;
use postlist_logging::level_from_env;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const LOG_FILE: &str = "postlist.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogDestination {
    /// Append to `postlist.log` in the state directory.
    #[default]
    File,
    /// Stderr.
    Terminal,
    Both,
}

impl LogDestination {
    fn to_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn to_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

/// Installs the global logger. The level defaults to info and can be
/// changed through `POSTLIST_LOG`.
pub fn initialize(destination: LogDestination, state_dir: &Path) {
    let level = level_from_env(LevelFilter::Info);
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match open_log_file(state_dir) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: logging disabled, {err}"),
        }
    }
    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str("postlist")
        .build()
}

/// Appends so that earlier sessions stay readable after a restart.
fn open_log_file(state_dir: &Path) -> Result<File, String> {
    let path = state_dir.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| format!("cannot open {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn destinations_pick_their_sinks() {
        assert!(LogDestination::File.to_file());
        assert!(!LogDestination::File.to_terminal());
        assert!(LogDestination::Terminal.to_terminal());
        assert!(LogDestination::Both.to_file() && LogDestination::Both.to_terminal());
    }

    #[test]
    fn log_file_is_appended_to() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(LOG_FILE), "earlier session\n").unwrap();

        let mut file = open_log_file(temp.path()).unwrap();
        std::io::Write::write_all(&mut file, b"next session\n").unwrap();

        let content = fs::read_to_string(temp.path().join(LOG_FILE)).unwrap();
        assert_eq!(content, "earlier session\nnext session\n");
    }

    #[test]
    fn missing_state_dir_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = open_log_file(&temp.path().join("absent")).unwrap_err();
        assert!(err.contains("postlist.log"));
    }
}
