use crate::storage::error::StorageError;
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Exclusive advisory lock held for as long as a service owns the storage.
///
/// The lock file sits next to the data file as `<data_file>.lock`. It is not
/// removed on drop; only the lock on it is released.
#[derive(Debug)]
pub struct StorageLock {
    path: PathBuf,
    file: File,
}

impl StorageLock {
    pub fn acquire(data_file: &Path) -> Result<Self, StorageError> {
        let path = lock_path_for(data_file);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| StorageError::unavailable(&path, e))?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!(path = %path.display(), "storage lock acquired");
                Ok(Self { path, file })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(StorageError::Locked { path })
            }
            Err(e) => Err(StorageError::unavailable(&path, e)),
        }
    }
}

impl Drop for StorageLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        debug!(path = %self.path.display(), "storage lock released");
    }
}

pub fn lock_path_for(data_file: &Path) -> PathBuf {
    let mut name: OsString = data_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("storage"));
    name.push(".lock");
    data_file.with_file_name(name)
}
