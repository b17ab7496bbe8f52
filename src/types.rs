/*!
 * Core types and data structures for export-code
 */

use std::path::PathBuf;

/// What ends up under a file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Full text of the file
    Text(String),
    /// Description of the read failure, written in place of the content
    Unreadable(String),
}

/// A file retained for the contents section
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the project root
    pub path: PathBuf,
    /// File content or the read error
    pub content: FileContent,
}

/// Everything the writer needs to produce the export
#[derive(Debug, Clone, Default)]
pub struct ExportDocument {
    /// Rendered tree lines, without trailing newlines
    pub tree: Vec<String>,
    /// Retained files in walk order
    pub files: Vec<FileEntry>,
}
