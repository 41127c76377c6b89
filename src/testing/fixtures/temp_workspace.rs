use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::service::ServiceConfig;

/// A throwaway directory holding one data file and one stats file.
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_path(&self) -> PathBuf {
        self.dir.path().join("materials_data.txt")
    }

    pub fn stats_path(&self) -> PathBuf {
        self.dir.path().join("material_stats.txt")
    }

    /// Default config pointed at this workspace.
    pub fn config(&self) -> ServiceConfig {
        ServiceConfig {
            data_file: self.data_path(),
            stats_file: self.stats_path(),
            ..ServiceConfig::default()
        }
    }

    pub fn read_data(&self) -> String {
        fs::read_to_string(self.data_path()).unwrap_or_default()
    }

    pub fn read_stats(&self) -> String {
        fs::read_to_string(self.stats_path()).unwrap_or_default()
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
