// src/output/writer.rs
//! Writes backup files below the backup root.
//!
//! This module is the only place where file I/O occurs.

use super::paths::BackupPath;
use crate::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem sink rooted at the backup directory.
#[derive(Debug, Clone)]
pub struct BackupWriter {
    root: PathBuf,
}

impl BackupWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of `file_name` inside `dir`.
    pub fn file_path(&self, dir: &BackupPath, file_name: &str) -> PathBuf {
        dir.under(&self.root).join(file_name)
    }

    pub fn exists(&self, dir: &BackupPath, file_name: &str) -> bool {
        self.file_path(dir, file_name).exists()
    }

    /// Creates `dir` and its parents, returning its absolute location.
    pub fn ensure_dir(&self, dir: &BackupPath) -> Result<PathBuf, AppError> {
        let directory = dir.under(&self.root);
        fs::create_dir_all(&directory)?;
        Ok(directory)
    }

    /// Writes a text file, creating its directory first.
    pub fn write_text(
        &self,
        dir: &BackupPath,
        file_name: &str,
        content: &str,
    ) -> Result<PathBuf, AppError> {
        self.write_bytes(dir, file_name, content.as_bytes())
    }

    /// Writes a binary file, creating its directory first.
    pub fn write_bytes(
        &self,
        dir: &BackupPath,
        file_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, AppError> {
        let path = self.ensure_dir(dir)?.join(file_name);
        log::debug!("Writing {} bytes to {}", content.len(), path.display());
        fs::write(&path, content)?;
        Ok(path)
    }
}
