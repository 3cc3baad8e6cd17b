//! Main entry point for the zipscan CLI application.
//!
//! Loads the host file into memory, runs the scan on a blocking thread and
//! prints the report to stdout. Every scan outcome exits successfully; only
//! I/O, allocation and interruption errors produce a failure status.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

use zipscan::{
    Cli, EntryName, LocalFileReader, MemoryReader, ReadAt, ScanConfig, ScanOutcome, Scanner,
};

/// Application entry point.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let data = if cli.is_stdin() {
        MemoryReader::from_stdin()
            .await
            .context("failed to read stdin")?
            .into_inner()
    } else {
        let reader = LocalFileReader::new(Path::new(&cli.file))
            .with_context(|| format!("failed to open {}", cli.file))?;
        reader
            .read_all()
            .await
            .with_context(|| format!("failed to read {}", cli.file))?
    };

    let outcome = scan(data, cli.scan_config()).await?;
    report(&outcome, cli.quiet);

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the scan off the async runtime, cancelling it on Ctrl-C.
async fn scan(data: Vec<u8>, config: ScanConfig) -> Result<ScanOutcome> {
    let cancel = Arc::new(AtomicBool::new(false));

    let flag = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            flag.store(true, Ordering::Relaxed);
        }
    });

    let outcome = tokio::task::spawn_blocking(move || {
        Scanner::new(config).scan_with_cancel(&data, &cancel)
    })
    .await
    .context("scan task failed")??;

    watcher.abort();
    Ok(outcome)
}

/// Print the scan outcome.
///
/// In quiet mode only entry names are printed, one per line.
fn report(outcome: &ScanOutcome, quiet: bool) {
    let status = |message: &str| {
        if !quiet {
            println!("{}", message);
        }
    };

    if let Some(offset) = outcome.archive_offset() {
        status(&format!("ZIP archive found at offset {}", offset));
    }

    match outcome {
        ScanOutcome::NoArchive => status("no ZIP archive found"),
        ScanOutcome::NoCentralDirectory { .. } => status("central directory not found"),
        ScanOutcome::Listed { entries, .. } => {
            status("files in archive:");
            print_entries(entries, quiet);
        }
        ScanOutcome::Corrupt { entries, .. } => {
            if !entries.is_empty() {
                status("files in archive:");
                print_entries(entries, quiet);
            }
            status("invalid ZIP structure");
        }
    }
}

fn print_entries(entries: &[EntryName], quiet: bool) {
    for name in entries {
        if quiet {
            println!("{}", name);
        } else {
            println!("- {}", name);
        }
    }
}
