//! File-backed task store
//!
//! The whole task list lives in one pretty-printed JSON array. Every read
//! loads the full list and every write replaces the full file.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::task::Task;

pub const DEFAULT_FILE: &str = "tasks.json";

#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store holding an empty list if it does not exist yet.
    pub fn ensure_exists(&self) -> Result<()> {
        let exists = self
            .path
            .try_exists()
            .map_err(|err| Error::io(&self.path, err))?;
        if exists {
            debug!(path = %self.path.display(), "task file present");
            return Ok(());
        }

        info!(path = %self.path.display(), "creating empty task file");
        self.write_all(&[])
    }

    /// Load every stored task. A missing file reads as an empty list.
    pub fn read_all(&self) -> Result<Vec<Task>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "task file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(Error::io(&self.path, err)),
        };

        let tasks: Vec<Task> = serde_json::from_str(&data).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Replace the stored list with `tasks`.
    ///
    /// Writes go to a sibling temp file which is then renamed over the
    /// store, so the file is either the old list or the new one.
    pub fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let mut json = serde_json::to_string_pretty(tasks).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }

        let temp_path = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()
        };
        let replaced = write()
            .map_err(|err| Error::io(&temp_path, err))
            .and_then(|()| {
                fs::rename(&temp_path, &self.path).map_err(|err| Error::io(&self.path, err))
            });
        if replaced.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        replaced?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
