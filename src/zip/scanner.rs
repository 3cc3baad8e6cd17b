//! Locate an embedded archive and list its central directory.
//!
//! ## Pipeline
//!
//! 1. Search the tail window of the host buffer for a Local File Header
//!    signature. The first match is taken as the archive start.
//! 2. Search the archive region (archive start to end of buffer) for the
//!    first Central Directory File Header signature.
//! 3. Walk the central directory from there, collecting file names.
//!
//! Each step that finds nothing ends the scan with a non-error
//! [`ScanOutcome`].

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::config::{CorruptionPolicy, ScanConfig};
use crate::error::{Error, Result};

use super::parser::CentralDirectoryWalker;
use super::signature::{find, find_in_tail};
use super::structures::{CDFH_SIGNATURE, EntryName, LFH_SIGNATURE};

/// Result of scanning one host buffer.
///
/// Offsets are absolute positions in the host buffer.
#[derive(Debug)]
pub enum ScanOutcome {
    /// No Local File Header signature in the search window.
    NoArchive,
    /// An archive start was found but no central directory follows it.
    NoCentralDirectory { archive_offset: usize },
    /// The central directory was walked to its end.
    Listed {
        archive_offset: usize,
        central_dir_offset: usize,
        entries: Vec<EntryName>,
    },
    /// A truncated record stopped the walk.
    ///
    /// `entries` is empty under [`CorruptionPolicy::Abort`].
    Corrupt {
        archive_offset: usize,
        central_dir_offset: usize,
        entries: Vec<EntryName>,
        error: Error,
    },
}

impl ScanOutcome {
    /// Entry names to report, in central directory order.
    pub fn entries(&self) -> &[EntryName] {
        match self {
            ScanOutcome::Listed { entries, .. } | ScanOutcome::Corrupt { entries, .. } => entries,
            _ => &[],
        }
    }

    pub fn archive_offset(&self) -> Option<usize> {
        match self {
            ScanOutcome::NoArchive => None,
            ScanOutcome::NoCentralDirectory { archive_offset }
            | ScanOutcome::Listed { archive_offset, .. }
            | ScanOutcome::Corrupt { archive_offset, .. } => Some(*archive_offset),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, ScanOutcome::Corrupt { .. })
    }
}

/// Runs the locate-then-walk pipeline with a fixed [`ScanConfig`].
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `data` to completion.
    ///
    /// Missing signatures and corrupt records are reported through the
    /// outcome rather than as errors.
    pub fn scan(&self, data: &[u8]) -> Result<ScanOutcome> {
        self.run(data, None)
    }

    /// Scan `data`, giving up with [`Error::Cancelled`] once `cancel` is set.
    pub fn scan_with_cancel(&self, data: &[u8], cancel: &AtomicBool) -> Result<ScanOutcome> {
        self.run(data, Some(cancel))
    }

    fn run(&self, data: &[u8], cancel: Option<&AtomicBool>) -> Result<ScanOutcome> {
        let archive_offset = find_in_tail(data, LFH_SIGNATURE, self.config.search_window);
        check_cancel(cancel, archive_offset.unwrap_or(data.len()))?;
        let Some(archive_offset) = archive_offset else {
            debug!(len = data.len(), "no local file header signature");
            return Ok(ScanOutcome::NoArchive);
        };
        info!(archive_offset, "archive start located");

        let cd_start = find(&data[archive_offset..], CDFH_SIGNATURE);
        let central_dir_offset = cd_start.map(|start| archive_offset + start);
        check_cancel(cancel, central_dir_offset.unwrap_or(data.len()))?;
        let Some(central_dir_offset) = central_dir_offset else {
            debug!(archive_offset, "no central directory signature");
            return Ok(ScanOutcome::NoCentralDirectory { archive_offset });
        };
        debug!(central_dir_offset, "central directory located");

        // The archive region runs to the end of the buffer, so walking the
        // whole buffer keeps record offsets absolute.
        let mut walker = CentralDirectoryWalker::new(data, central_dir_offset);
        if let Some(flag) = cancel {
            walker = walker.with_cancel(flag);
        }

        let mut entries = Vec::new();
        for header in walker {
            match header {
                Ok(header) => entries.push(EntryName::from(header)),
                Err(error @ Error::TruncatedRecord { .. }) => {
                    if self.config.corruption == CorruptionPolicy::Abort {
                        entries.clear();
                    }
                    return Ok(ScanOutcome::Corrupt {
                        archive_offset,
                        central_dir_offset,
                        entries,
                        error,
                    });
                }
                Err(err) => return Err(err),
            }
        }

        info!(count = entries.len(), "central directory listed");
        Ok(ScanOutcome::Listed {
            archive_offset,
            central_dir_offset,
            entries,
        })
    }
}

/// Fail with [`Error::Cancelled`] if `cancel` has been set.
fn check_cancel(cancel: Option<&AtomicBool>, offset: usize) -> Result<()> {
    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return Err(Error::Cancelled { offset });
    }
    Ok(())
}
