//! File-backed session store

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{Session, SessionStore};
use crate::errors::{ReelpageError, Result};

/// Stores the bearer token in a single file, re-read on every `load`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the location named by the global configuration.
    pub fn from_config() -> Self {
        Self::new(crate::config::get_config().session.token_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Session::new(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(
                    "Failed to read session file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ReelpageError::file_operation(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        write_private(&self.path, session.token()).map_err(|e| {
            ReelpageError::file_operation(format!(
                "Failed to write session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ReelpageError::file_operation(format!(
                "Failed to remove session file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Write `token` to a file only the owner can read.
///
/// New files are created 0600; an existing file is narrowed before it is truncated,
/// so the token is never readable by others.
fn write_private(path: &Path, token: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    restrict_permissions(&file, path);
    file.set_len(0)?;
    file.write_all(token.as_bytes())?;
    file.sync_all()
}

#[cfg(unix)]
fn restrict_permissions(file: &std::fs::File, path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = file.set_permissions(std::fs::Permissions::from_mode(0o600)) {
        warn!("Failed to restrict permissions on {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &std::fs::File, _path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("nested").join("session"))
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&Session::new("tok-1").unwrap()).unwrap();
        assert_eq!(store.load().unwrap().token(), "tok-1");

        store.clear().unwrap();
        assert!(store.load().is_none());
        // 重复清除不报错
        store.clear().unwrap();
    }

    #[test]
    fn test_load_picks_up_external_replacement() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Session::new("old").unwrap()).unwrap();

        std::fs::write(store.path(), "new").unwrap();
        assert_eq!(store.load().unwrap().token(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Session::new("tok").unwrap()).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_narrows_existing_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "a much longer stale token").unwrap();
        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&Session::new("tok").unwrap()).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().token(), "tok");
    }
}
