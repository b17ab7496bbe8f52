/*!
 * Command-line interface for export-code
 */

use std::io;
use std::process;

use clap::{CommandFactory, Parser};
use log::{debug, error, LevelFilter};

use export_code::config::{Args, Config};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(args.quiet, args.verbose);
    debug!("CLI args parsed: {:?}", args);

    // Shell completions short-circuit the export
    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return;
    }

    if let Err(e) = run(args) {
        error!("Export failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> export_code::Result<()> {
    // Create and validate configuration
    let config = Config::from_args(args)?;
    config.validate()?;
    debug!("Exporting {}", config.root.display());

    let report = export_code::export(&config)?;
    report.print();

    Ok(())
}

fn setup_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
