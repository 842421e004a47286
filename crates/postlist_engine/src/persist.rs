use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use {dir:?} as state directory: {source}")]
    StateDir { dir: PathBuf, source: io::Error },
    #[error("{0:?} exists but is not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot access state file {path:?}: {source}")]
    File { path: PathBuf, source: io::Error },
}

/// Creates the state directory and any missing parents.
pub fn ensure_state_dir(dir: &Path) -> Result<(), PersistError> {
    if let Err(source) = fs::create_dir_all(dir) {
        return Err(if dir.exists() && !dir.is_dir() {
            PersistError::NotADirectory(dir.to_path_buf())
        } else {
            PersistError::StateDir { dir: dir.to_path_buf(), source }
        });
    }
    Ok(())
}

/// One small text file of host state, such as the stored query parameters.
///
/// Writes go through a sibling temp file that is renamed over the target,
/// so a reader sees either the old content or the new one.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(dir: &Path, name: &str) -> Self {
        Self { path: dir.join(name) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been stored yet.
    pub fn read(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.file_error(source)),
        }
    }

    pub fn replace(&self, content: &str) -> Result<(), PersistError> {
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        ensure_state_dir(dir)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.file_error(e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file_mut().sync_all())
            .map_err(|e| self.file_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.file_error(e.error))?;
        Ok(())
    }

    fn file_error(&self, source: io::Error) -> PersistError {
        PersistError::File { path: self.path.clone(), source }
    }
}
