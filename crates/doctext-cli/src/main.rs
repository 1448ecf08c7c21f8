//! `doctext` command-line interface.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doctext", version, about = "Extract plain text from office documents and PDFs")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the text content of a document to stdout
    Extract {
        /// Document to extract (.doc, .docx, .pptx, .xlsx, .pdf)
        path: PathBuf,
    },
    /// Export every .xlsx in a directory to PDF beside it
    ConvertSheets {
        /// Directory containing the spreadsheets
        dir: PathBuf,
    },
    /// Convert every .doc/.docx in a directory to PDF in another
    ConvertDocs {
        /// Directory containing the documents
        src: PathBuf,
        /// Directory to write the PDFs into
        dst: PathBuf,
    },
    /// Copy documents present in one directory but missing from another
    Sync {
        /// Source directory
        src: PathBuf,
        /// Destination directory
        dst: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Extract { path } => {
            let text = doctext::parse_file(&path)
                .with_context(|| format!("extracting {}", path.display()))?;
            println!("{text}");
        }
        Command::ConvertSheets { dir } => {
            let outcomes = doctext::convert::sheets_to_pdf(&dir)?;
            report_outcomes(&outcomes)?;
        }
        Command::ConvertDocs { src, dst } => {
            let outcomes = doctext::convert::docs_to_pdf(&src, &dst)?;
            report_outcomes(&outcomes)?;
        }
        Command::Sync { src, dst } => {
            let copied = doctext::dirsync::copy_missing(&src, &dst)?;
            for path in &copied {
                println!("copied {}", path.display());
            }
            println!("{} file(s) copied", copied.len());
        }
    }
    Ok(())
}

fn report_outcomes(outcomes: &[doctext::convert::ConversionOutcome]) -> anyhow::Result<()> {
    let mut failures = 0usize;
    for outcome in outcomes {
        match (&outcome.output, &outcome.error) {
            (Some(output), _) => println!("converted {} -> {}", outcome.input.display(), output.display()),
            (None, Some(error)) => {
                eprintln!("failed {}: {error}", outcome.input.display());
                failures += 1;
            }
            (None, None) => {}
        }
    }
    println!(
        "{} converted, {} failed",
        outcomes.len() - failures,
        failures
    );
    if failures > 0 {
        anyhow::bail!("{failures} conversion(s) failed");
    }
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("doctext={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
