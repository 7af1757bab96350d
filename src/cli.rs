//! Command-line interface for codebase-genius.

use std::path::PathBuf;

use clap::Parser;
use colored::*;
use tracing::Level;

use crate::config::ScanConfig;
use crate::runner::{RunError, Runner};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

const BANNER_WIDTH: usize = 60;

/// Document the structure of a codebase.
///
/// Scans a directory for source files, extracts functions, classes and
/// imports from Python files and function-like lines from everything else,
/// then writes a Markdown report and a JSON dump to the current directory.
#[derive(Parser)]
#[command(name = "codebase-genius")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Print per-file diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the stderr diagnostics subscriber.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be set (e.g. when embedded); that is fine.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn rule() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// Run an analysis for the parsed arguments and return the exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    init_tracing(cli.verbose);

    println!("{}", rule());
    println!("{}", "CODEBASE GENIUS - Codebase Documentation".cyan().bold());
    println!("{}", rule());

    let config = ScanConfig::new(&cli.path).recursive(cli.recursive);
    let result = Runner::new(config).run();

    println!();
    println!("{}", rule());
    let code = match result {
        Ok(report) => {
            println!("{}", "✓ Analysis complete".green().bold());
            println!("Files analyzed: {}", report.summary.total_files_analyzed);
            if report.summary.total_files_failed > 0 {
                println!(
                    "Files failed:   {}",
                    report.summary.total_files_failed.to_string().yellow()
                );
            }
            for path in &report.generated_files {
                println!("Wrote: {}", path.display());
            }
            EXIT_SUCCESS
        }
        Err(RunError::NoFilesDiscovered { root }) => {
            println!("{}", "✗ Analysis failed - no code files found".red().bold());
            println!("Looked in: {}", root.display());
            EXIT_FAILED
        }
        Err(e) => {
            println!("{}", "✗ Analysis failed - check the errors above".red().bold());
            println!("{}", rule());
            return Err(e.into());
        }
    };
    println!("{}", rule());

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["codebase-genius"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(!cli.recursive);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["codebase-genius", "src", "--recursive", "-v"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("src"));
        assert!(cli.recursive);
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["codebase-genius", "--format", "json"]).is_err());
    }
}
