use crate::core::material_class::MaterialClass;
use crate::core::sample::Sample;
use crate::storage::atomic_file::{StagedFile, write_atomic};
use crate::storage::error::StorageError;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("unknown class id {0}")]
    UnknownClass(i64),

    #[error("count for {0} is at its maximum")]
    CountOverflow(MaterialClass),
}

/// Per-class sample counts, persisted as `classId:count` lines.
///
/// Every class in the table always has an entry, zero if never counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRegister {
    path: PathBuf,
    counts: BTreeMap<MaterialClass, u64>,
}

impl StatsRegister {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let mut counts = zeroed();
        match fs::read_to_string(&path) {
            Ok(text) => {
                for (i, line) in text.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let (class, count) = parse_line(line)
                        .map_err(|reason| StorageError::malformed(&path, i + 1, reason))?;
                    counts.insert(class, count);
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no stats file, starting from zero");
            }
            Err(e) => return Err(StorageError::unavailable(&path, e)),
        }
        Ok(Self { path, counts })
    }

    /// Counts the labels of `samples`. The result persists to `path`.
    pub fn derive_from(path: impl Into<PathBuf>, samples: &[Sample]) -> Self {
        let mut counts = zeroed();
        for s in samples {
            *counts.entry(s.label).or_insert(0) += 1;
        }
        Self {
            path: path.into(),
            counts,
        }
    }

    /// Adds one to the class and returns its new count. The register is
    /// unchanged on error.
    pub fn increment(&mut self, class_id: i64) -> Result<u64, StatsError> {
        let class =
            MaterialClass::try_from(class_id).map_err(|_| StatsError::UnknownClass(class_id))?;
        let count = self.counts.entry(class).or_insert(0);
        *count = count
            .checked_add(1)
            .ok_or(StatsError::CountOverflow(class))?;
        Ok(*count)
    }

    pub fn persist(&self) -> Result<(), StorageError> {
        write_atomic(&self.path, self.serialize().as_bytes())?;
        info!(path = %self.path.display(), "stats persisted");
        Ok(())
    }

    pub fn stage(&self) -> Result<StagedFile, StorageError> {
        StagedFile::stage(&self.path, self.serialize().as_bytes())
    }

    pub fn count(&self, class: MaterialClass) -> u64 {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<MaterialClass, u64> {
        &self.counts
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn serialize(&self) -> String {
        let mut out = String::new();
        for (class, count) in &self.counts {
            let _ = writeln!(out, "{}:{}", class.id(), count);
        }
        out
    }
}

fn zeroed() -> BTreeMap<MaterialClass, u64> {
    MaterialClass::ALL.iter().map(|&c| (c, 0)).collect()
}

fn parse_line(line: &str) -> Result<(MaterialClass, u64), String> {
    let (id, count) = line
        .split_once(':')
        .ok_or_else(|| format!("expected 'classId:count', found '{}'", line.trim()))?;
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| format!("class id '{}' is not an integer", id.trim()))?;
    let class = MaterialClass::try_from(id).map_err(|e| e.to_string())?;
    let count: u64 = count
        .trim()
        .parse()
        .map_err(|_| format!("count '{}' is not a non-negative integer", count.trim()))?;
    Ok((class, count))
}
