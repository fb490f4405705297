#![cfg(test)]
use std::path::{Path, PathBuf};

/// Unique path under the system temp dir, removed (file or directory) on drop
/// so failing assertions do not leave data files behind.
pub struct TempPath(PathBuf);

impl TempPath {
    /// `<tmp>/<prefix>_<uuid>.json`
    pub fn file(prefix: &str) -> Self {
        Self(std::env::temp_dir().join(format!("{}_{}.json", prefix, uuid::Uuid::new_v4())))
    }

    /// `<tmp>/<prefix>_<uuid>/`, not created yet.
    pub fn dir(prefix: &str) -> Self {
        Self(std::env::temp_dir().join(format!("{}_{}", prefix, uuid::Uuid::new_v4())))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        if self.0.is_dir() {
            let _ = std::fs::remove_dir_all(&self.0);
        } else {
            let _ = std::fs::remove_file(&self.0);
        }
    }
}
