/*!
 * export-code - Flatten a project into a single text export
 *
 * This library walks a project directory, drops everything matched by the
 * project's ignore files, and writes a directory tree followed by the
 * contents of every text file into one document.
 */

pub mod config;
pub mod error;
pub mod patterns;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::Config;
pub use error::{ExportError, Result};
pub use patterns::IgnorePatterns;
pub use report::ExportReport;
pub use scanner::Scanner;
pub use tree::render_tree;
pub use types::{ExportDocument, FileContent, FileEntry};
pub use utils::format_file_size;
pub use writer::ExportWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a full export: collect patterns, render the tree, aggregate file
/// contents and write the document.
pub fn export(config: &Config) -> Result<ExportReport> {
    let start_time = std::time::Instant::now();

    let writer = ExportWriter::new(config);
    writer.prepare()?;

    let patterns = IgnorePatterns::collect(config)?;

    let tree = render_tree(&config.root, &patterns)?;

    let scanner = Scanner::new(config, &patterns);
    let files = scanner.scan()?;
    let stats = scanner.get_statistics();

    let document = ExportDocument { tree, files };
    let size = writer.write(&document)?;

    Ok(ExportReport {
        output_file: config.output_file.display().to_string(),
        size,
        duration: start_time.elapsed(),
        files_exported: stats.files_exported,
        binary_skipped: stats.binary_skipped,
        unreadable: stats.unreadable,
    })
}
