use std::{
    env,
    ffi::OsString,
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use crate::error::ResolveError;

/// Maps a command name, as typed, to the path of an executable.
pub trait Resolve {
    fn resolve(&self, name: &str) -> Result<PathBuf, ResolveError>;
}

/// Resolves names the way a typical shell does:
/// - a name containing `/` is taken as a path and checked directly;
/// - a bare name is looked up in each directory of `PATH`, first hit wins.
#[derive(Debug, Clone)]
pub struct PathResolver {
    search_paths: OsString,
}

impl PathResolver {
    pub fn new(search_paths: impl Into<OsString>) -> Self {
        Self {
            search_paths: search_paths.into(),
        }
    }

    /// Snapshot of the interpreter's own `PATH`.
    pub fn from_env() -> Self {
        Self::new(env::var_os("PATH").unwrap_or_default())
    }
}

impl Resolve for PathResolver {
    fn resolve(&self, name: &str) -> Result<PathBuf, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::NotFound(name.to_string()));
        }

        if name.contains('/') {
            let path = Path::new(name);
            check_executable(path)?;
            return Ok(path.to_path_buf());
        }

        env::split_paths(&self.search_paths)
            .map(|dir| dir.join(name))
            .find(|candidate| check_executable(candidate).is_ok())
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))
    }
}

fn check_executable(path: &Path) -> Result<(), ResolveError> {
    let meta = fs::metadata(path).map_err(|e| ResolveError::Io(path.to_path_buf(), e))?;
    if meta.is_dir() {
        return Err(ResolveError::IsDirectory(path.to_path_buf()));
    }
    if meta.permissions().mode() & 0o111 == 0 {
        return Err(ResolveError::NotExecutable(path.to_path_buf()));
    }
    Ok(())
}
