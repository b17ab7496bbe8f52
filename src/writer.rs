/*!
 * Export document writer
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::types::{ExportDocument, FileContent, FileEntry};

/// Width of the separator written after each file
const SEPARATOR_WIDTH: usize = 80;

/// Prefix of every file header; the underline covers it too
const HEADER_PREFIX: &str = "File: ";

/// Writes the title, tree and contents sections to the output file
pub struct ExportWriter {
    /// Output file path
    output_file: PathBuf,
}

impl ExportWriter {
    /// Create a new export writer
    pub fn new(config: &Config) -> Self {
        Self {
            output_file: config.output_file.clone(),
        }
    }

    /// Write the document and return the size of the written file in bytes
    pub fn write(&self, document: &ExportDocument) -> Result<u64> {
        let output_error = |source: io::Error| ExportError::Output {
            path: self.output_file.clone(),
            source,
        };

        self.create_parent_dir()?;

        let file = File::create(&self.output_file).map_err(output_error)?;
        let mut writer = BufWriter::new(file);
        self.render(document, &mut writer).map_err(output_error)?;
        writer.flush().map_err(output_error)?;
        drop(writer);

        let size = fs::metadata(&self.output_file).map_err(output_error)?.len();
        Ok(size)
    }

    /// Create the output directory and truncate the output file. Runs
    /// before both passes, which therefore see an empty output file.
    pub fn prepare(&self) -> Result<()> {
        self.create_parent_dir()?;
        File::create(&self.output_file).map_err(|source| ExportError::Output {
            path: self.output_file.clone(),
            source,
        })?;
        Ok(())
    }

    fn create_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.output_file.parent() {
            if parent != Path::new("") {
                fs::create_dir_all(parent).map_err(|source| ExportError::Output {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Render the whole document into `writer`
    pub fn render<W: Write>(&self, document: &ExportDocument, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"PROJECT CODE EXPORT\n")?;
        writer.write_all(b"===================\n\n")?;

        writer.write_all(b"Tree structure of the project (excluding ignored files):\n")?;
        writer.write_all(b"------------------------------------------------------\n")?;
        writer.write_all(document.tree.join("\n").as_bytes())?;
        writer.write_all(b"\n\n")?;

        writer.write_all(b"Contents of text files:\n")?;
        writer.write_all(b"=======================\n\n")?;

        for entry in &document.files {
            self.write_file(entry, writer)?;
        }

        Ok(())
    }

    /// Write one file block: header, underline, content, separator
    fn write_file<W: Write>(&self, entry: &FileEntry, writer: &mut W) -> io::Result<()> {
        let rel_path = entry.path.to_string_lossy();
        let underline = "=".repeat(rel_path.chars().count() + HEADER_PREFIX.len());

        writeln!(writer, "{}{}", HEADER_PREFIX, rel_path)?;
        writeln!(writer, "{}", underline)?;
        writeln!(writer)?;

        match &entry.content {
            FileContent::Text(text) => writer.write_all(text.as_bytes())?,
            FileContent::Unreadable(message) => writeln!(writer, "{}", message)?,
        }

        writer.write_all(b"\n\n")?;
        writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        writeln!(writer)?;

        Ok(())
    }
}
