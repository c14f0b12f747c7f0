//! Error types for the task tracker

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed task list in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("task not found: {0}")]
    NotFound(u32),

    #[error("invalid status: {0:?} (expected todo, in-progress or done)")]
    InvalidStatus(String),

    #[error("no task id left after {}", u32::MAX)]
    IdExhausted,

    #[error("invalid input: {0:?}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(Error::NotFound(3).to_string(), "task not found: 3");
        assert_eq!(
            Error::IdExhausted.to_string(),
            "no task id left after 4294967295"
        );
        assert_eq!(
            Error::InvalidStatus("later".into()).to_string(),
            "invalid status: \"later\" (expected todo, in-progress or done)"
        );

        let err = Error::io(
            "/tmp/tasks.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("cannot access /tmp/tasks.json"));
    }
}
