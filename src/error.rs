use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to map a command name to something we can execute.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0:?}: executable file not found in $PATH")]
    NotFound(String),
    #[error("{0}: is a directory")]
    IsDirectory(PathBuf),
    #[error("{0}: permission denied")]
    NotExecutable(PathBuf),
    #[error("{0}: {1}")]
    Io(PathBuf, #[source] io::Error),
}

/// Everything that can abort a pipeline before or while it runs.
///
/// The `Display` text of each variant starts with the phase that failed,
/// and is exactly what ends up on standard error.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Resolving binary: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Redirecting stdin: {path}: {source}")]
    RedirectIn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Redirecting stdout: {path}: {source}")]
    RedirectOut {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Creating pipe: {0}")]
    Pipe(#[source] io::Error),
    #[error("Forking process: {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Reaping process: {0}")]
    Wait(#[source] io::Error),
    #[error("Missing operand: `{0}` needs a following word")]
    MissingOperand(&'static str),
}
