/*!
 * Directory tree rendering
 */

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::patterns::IgnorePatterns;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const VERTICAL: &str = "│   ";
const BLANK: &str = "    ";

/// A directory child as the renderer sees it
struct TreeEntry {
    name: String,
    path: PathBuf,
    /// Sorts and displays as a directory (symlinks resolved)
    is_dir: bool,
    /// Real directory, safe to descend into
    descend: bool,
}

/// Render the retained hierarchy below `root` as tree lines. The root
/// itself is not printed.
pub fn render_tree(root: &Path, patterns: &IgnorePatterns) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    walk_tree(root, patterns, "", &mut lines)?;
    Ok(lines)
}

fn walk_tree(
    dir: &Path,
    patterns: &IgnorePatterns,
    prefix: &str,
    lines: &mut Vec<String>,
) -> Result<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        entries.push(TreeEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: path.is_dir(),
            descend: file_type.is_dir(),
            path,
        });
    }

    entries.sort_by(compare_entries);

    // Ignored siblings still count when picking the last connector
    let total_entries = entries.len();
    for (idx, entry) in entries.into_iter().enumerate() {
        if patterns.is_ignored(&entry.path) {
            continue;
        }

        let is_last = idx + 1 == total_entries;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefix, connector, entry.name));

        if entry.descend {
            let extension = if is_last { BLANK } else { VERTICAL };
            walk_tree(
                &entry.path,
                patterns,
                &format!("{}{}", prefix, extension),
                lines,
            )?;
        }
    }

    Ok(())
}

/// Directories first, then case-insensitive name; exact name breaks ties
fn compare_entries(a: &TreeEntry, b: &TreeEntry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}
