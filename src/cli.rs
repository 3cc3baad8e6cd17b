use clap::Parser;

use crate::config::{CorruptionPolicy, DEFAULT_SEARCH_WINDOW, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "zipscan")]
#[command(version)]
#[command(about = "Find a ZIP archive embedded in a file and list its contents", long_about = None)]
#[command(after_help = "Examples:\n  \
  zipscan picture.jpg            list files of a ZIP appended to picture.jpg\n  \
  zipscan -w 0 installer.exe     search the whole file for the archive start\n  \
  cat blob.bin | zipscan -q -    list names only, reading from stdin")]
pub struct Cli {
    /// Host file to scan, or '-' for stdin
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Search the last BYTES of the file for the archive start (0 = whole file)
    #[arg(short = 'w', long = "window", value_name = "BYTES", default_value_t = DEFAULT_SEARCH_WINDOW)]
    pub window: usize,

    /// On a corrupt record, still list the names read before it
    #[arg(long)]
    pub partial: bool,

    /// Print entry names only, no status messages
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn is_stdin(&self) -> bool {
        self.file == "-"
    }

    /// Default tracing filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            search_window: self.window,
            corruption: if self.partial {
                CorruptionPolicy::KeepPartial
            } else {
                CorruptionPolicy::Abort
            },
        }
    }
}
