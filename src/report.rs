/*!
 * Reporting functionality for export-code
 *
 * The console gets a single completion line; the per-run counters go to the
 * log.
 */

use std::time::Duration;

use log::info;

use crate::utils::format_file_size;

/// Statistics for a finished export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Output file path
    pub output_file: String,
    /// Size of the written output in bytes
    pub size: u64,
    /// Time taken by the whole export
    pub duration: Duration,
    /// Files written to the contents section
    pub files_exported: usize,
    /// Files left out because they are not text
    pub binary_skipped: usize,
    /// Files whose content could not be read
    pub unreadable: usize,
}

impl ExportReport {
    /// The line printed when the export finishes
    pub fn completion_line(&self) -> String {
        format!(
            "Scan complete. Output written to {} (Size: {})",
            self.output_file,
            format_file_size(self.size)
        )
    }

    /// Print the completion line to stdout and the counters to the log
    pub fn print(&self) {
        info!(
            "Exported {} files ({} binary skipped, {} unreadable) in {:.4?}",
            self.files_exported, self.binary_skipped, self.unreadable, self.duration
        );
        println!("{}", self.completion_line());
    }
}
