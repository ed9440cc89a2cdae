// src/output/paths.rs
//! Pure functions for output paths and file names.
//!
//! Drive and wiki names are kept as they appear in the UI. Only characters
//! that would change the directory structure are replaced.

use std::fmt;
use std::path::{Path, PathBuf};

/// Makes a display name usable as a single path segment.
pub fn sanitize_segment(name: &str) -> String {
    let safe_name = name
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    match safe_name.trim() {
        "" | "." | ".." => "unnamed".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// File name of the Markdown rendering of an item.
pub fn markdown_file_name(name: &str) -> String {
    format!("{}.md", sanitize_segment(name))
}

/// A directory below the backup root, built from display names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackupPath {
    segments: Vec<String>,
}

impl BackupPath {
    /// The backup root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// A child directory named after `name`.
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(sanitize_segment(name));
        Self { segments }
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Resolves the directory below `base`.
    pub fn under(&self, base: &Path) -> PathBuf {
        self.segments
            .iter()
            .fold(base.to_path_buf(), |path, segment| path.join(segment))
    }
}

impl fmt::Display for BackupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_segment() {
        assert_eq!(sanitize_segment("Q1/Q2 plan"), "Q1_Q2 plan");
        assert_eq!(sanitize_segment("a\\b"), "a_b");
        assert_eq!(sanitize_segment("周报: 第1周?"), "周报: 第1周?");
        assert_eq!(sanitize_segment("  "), "unnamed");
        assert_eq!(sanitize_segment(".."), "unnamed");
    }

    #[test]
    fn test_backup_path() {
        let path = BackupPath::root().join("Team").join("Specs/2024");
        assert_eq!(path.to_string(), "/Team/Specs_2024");
        assert_eq!(path.depth(), 2);
        assert_eq!(
            path.under(Path::new("/tmp/backup")),
            PathBuf::from("/tmp/backup/Team/Specs_2024")
        );
        assert_eq!(BackupPath::root().to_string(), "");
    }

    #[test]
    fn test_markdown_file_name() {
        assert_eq!(markdown_file_name("Roadmap"), "Roadmap.md");
    }
}
