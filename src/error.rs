use thiserror::Error;

/// Errors raised while loading a host file or walking its central directory.
///
/// A missing signature is not an error; it is reported through
/// [`ScanOutcome`](crate::zip::ScanOutcome).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot allocate {size} bytes for the host file")]
    Allocation { size: u64 },

    /// A central directory record declares lengths that run past the buffer.
    #[error(
        "truncated central directory record at offset {offset}: ends at {record_end}, buffer is {buffer_len} bytes"
    )]
    TruncatedRecord {
        offset: usize,
        record_end: usize,
        buffer_len: usize,
    },

    #[error("scan cancelled at offset {offset}")]
    Cancelled { offset: usize },
}

impl Error {
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::TruncatedRecord { .. })
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;
