use crate::storage::error::StorageError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// New file content written next to its target but not yet visible there.
///
/// `commit` swaps it in with a rename. The bytes the target held before are
/// captured at staging time so a committed file can be put back with
/// [`StagedFile::restore_previous`] if a later step of the same change fails.
pub struct StagedFile {
    target: PathBuf,
    temp: NamedTempFile,
    previous: Option<Vec<u8>>,
}

impl StagedFile {
    pub fn stage(target: &Path, contents: &[u8]) -> Result<Self, StorageError> {
        let previous = match fs::read(target) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(StorageError::unavailable(target, e)),
        };
        let temp = write_temp(target, contents)?;
        Ok(Self {
            target: target.to_path_buf(),
            temp,
            previous,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Renames the staged content over the target. Returns a handle that can
    /// undo the swap.
    pub fn commit(self) -> Result<CommittedFile, StorageError> {
        let StagedFile {
            target,
            temp,
            previous,
        } = self;
        temp.persist(&target)
            .map_err(|e| StorageError::unavailable(&target, e.error))?;
        debug!(path = %target.display(), "committed");
        Ok(CommittedFile { target, previous })
    }
}

pub struct CommittedFile {
    target: PathBuf,
    previous: Option<Vec<u8>>,
}

impl CommittedFile {
    /// Puts back whatever the target held before the commit, removing it if
    /// it did not exist.
    pub fn restore_previous(self) -> Result<(), StorageError> {
        warn!(path = %self.target.display(), "rolling back committed file");
        match &self.previous {
            Some(bytes) => write_atomic(&self.target, bytes),
            None => match fs::remove_file(&self.target) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StorageError::unavailable(&self.target, e)),
            },
        }
    }
}

/// Write-to-temp then rename, so readers see either the old or new content.
pub fn write_atomic(target: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let temp = write_temp(target, contents)?;
    temp.persist(target)
        .map_err(|e| StorageError::unavailable(target, e.error))?;
    Ok(())
}

fn write_temp(target: &Path, contents: &[u8]) -> Result<NamedTempFile, StorageError> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp =
        NamedTempFile::new_in(dir).map_err(|e| StorageError::unavailable(target, e))?;
    temp.write_all(contents)
        .and_then(|_| temp.flush())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| StorageError::unavailable(target, e))?;
    Ok(temp)
}
