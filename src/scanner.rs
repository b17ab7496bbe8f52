/*!
 * File content aggregation
 */

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Result;
use crate::patterns::IgnorePatterns;
use crate::types::{FileContent, FileEntry};

/// Scanner statistics
#[derive(Debug, Clone, Default)]
pub struct ScannerStatistics {
    /// Files written to the contents section, unreadable ones included
    pub files_exported: usize,
    /// Files skipped because they did not decode as text
    pub binary_skipped: usize,
    /// Files whose read failed
    pub unreadable: usize,
}

/// Walks the project and collects every retained text file
pub struct Scanner<'a> {
    /// Scanner configuration
    config: &'a Config,
    /// Patterns shared with the tree renderer
    patterns: &'a IgnorePatterns,
    /// Scanner statistics
    statistics: RefCell<ScannerStatistics>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner
    pub fn new(config: &'a Config, patterns: &'a IgnorePatterns) -> Self {
        Self {
            config,
            patterns,
            statistics: RefCell::new(ScannerStatistics::default()),
        }
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScannerStatistics {
        self.statistics.borrow().clone()
    }

    /// Walk the project root top-down: each directory's files first, then
    /// its subdirectories. Ignored directories are never entered.
    pub fn scan(&self) -> Result<Vec<FileEntry>> {
        let root = self.config.root.as_path();
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(compare_entries)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.patterns.is_ignored(e.path()));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            // Symlinked directories are listed by the tree but never read.
            if entry.file_type().is_dir() || path.is_dir() {
                continue;
            }

            let rel_path = path.strip_prefix(root).unwrap_or(path);
            if let Some(content) = self.process_file(path, rel_path) {
                files.push(FileEntry {
                    path: rel_path.to_path_buf(),
                    content,
                });
            }
        }

        Ok(files)
    }

    /// Read a file and classify it. Returns `None` for binary files.
    fn process_file(&self, abs_path: &Path, rel_path: &Path) -> Option<FileContent> {
        let mut stats = self.statistics.borrow_mut();

        let bytes = match fs::read(abs_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read {}: {}", rel_path.display(), e);
                stats.files_exported += 1;
                stats.unreadable += 1;
                return Some(FileContent::Unreadable(format!(
                    "Error reading file: {}",
                    e
                )));
            }
        };

        match String::from_utf8(bytes) {
            Ok(text) => {
                stats.files_exported += 1;
                Some(FileContent::Text(text))
            }
            Err(_) => {
                debug!("Skipping binary file {}", rel_path.display());
                stats.binary_skipped += 1;
                None
            }
        }
    }
}

/// Files before directories, then case-insensitive name
fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_name = a.file_name().to_string_lossy();
    let b_name = b.file_name().to_string_lossy();

    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        .then_with(|| a_name.cmp(&b_name))
}
