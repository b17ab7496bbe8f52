/*!
 * Utility functions for export-code
 */

/// Per-directory ignore file
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Extra ignore file read from the project root only
pub const EXTRA_IGNORE_FILE: &str = ".export_code_ignore";

/// Output location relative to the project root
pub const DEFAULT_OUTPUT_FILE: &str = "docs/export_code.txt";

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a human-readable file size using the first unit whose magnitude
/// is below 1024. Sizes past the last unit stay in TB.
pub fn format_file_size(size: u64) -> String {
    let mut value = size as f64;
    for unit in &SIZE_UNITS[..SIZE_UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} {}", value, SIZE_UNITS[SIZE_UNITS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(0), "0.00 B");
        assert_eq!(format_file_size(1023), "1023.00 B");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
        assert_eq!(format_file_size(2 * 1024_u64.pow(4)), "2.00 TB");
    }

    #[test]
    fn test_format_file_size_caps_at_terabytes() {
        assert_eq!(format_file_size(2048 * 1024_u64.pow(4)), "2048.00 TB");
    }
}
