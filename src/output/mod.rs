// src/output/mod.rs
//! Backup output: path planning kept apart from the filesystem writes.

mod paths;
mod writer;

pub use paths::{markdown_file_name, sanitize_segment, BackupPath};
pub use writer::BackupWriter;
