/*!
 * Configuration handling for export-code
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::utils::DEFAULT_OUTPUT_FILE;
use crate::{bail, ensure};

/// Command-line arguments for export-code
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "export-code",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export a project's tree and text file contents into a single document",
    long_about = "Walks a project directory, skips everything listed in .gitignore files and .export_code_ignore, and writes a directory tree followed by the contents of every text file into one export file."
)]
pub struct Args {
    /// Project root to export (defaults to the parent of the directory holding this executable)
    pub root: Option<String>,

    /// Output file, relative to the project root unless absolute
    #[clap(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// Match ignore patterns case-insensitively
    #[clap(long)]
    pub ignore_case: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all log output
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Project root every pattern and relative path is anchored to
    pub root: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    /// Whether glob matching ignores case
    pub ignore_case: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let root = match args.root {
            Some(root) => PathBuf::from(root),
            None => default_root()?,
        };

        Ok(Self::new(root, PathBuf::from(args.output), args.ignore_case))
    }

    /// Build a configuration for `root`, resolving a relative `output`
    /// against it.
    pub fn new(root: PathBuf, output: PathBuf, ignore_case: bool) -> Self {
        // Left as given when missing so that validate() can report it.
        let root = fs::canonicalize(&root).unwrap_or(root);
        let output_file = if output.is_absolute() {
            output
        } else {
            root.join(output)
        };

        Self {
            root,
            output_file,
            ignore_case,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.root.exists(),
            PathNotFound,
            "Project root not found: {}",
            self.root.display()
        );
        ensure!(
            self.root.is_dir(),
            Config,
            "Project root is not a directory: {}",
            self.root.display()
        );

        if self.output_file.is_dir() {
            bail!(
                InvalidArgument,
                "Output path is a directory: {}",
                self.output_file.display()
            );
        }

        Ok(())
    }
}

/// The tool is meant to live one level below the project it exports
/// (`<project>/scripts/export-code`), so the root is the parent of the
/// executable's directory.
fn default_root() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    match exe.parent().and_then(Path::parent) {
        Some(root) => Ok(root.to_path_buf()),
        None => bail!(
            Config,
            "Cannot derive a project root from executable location: {}",
            exe.display()
        ),
    }
}
