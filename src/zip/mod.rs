//! Embedded ZIP detection and central directory listing.
//!
//! ## Architecture
//!
//! - [`structures`]: signatures and the Central Directory File Header view
//! - [`signature`]: byte-pattern search over the host buffer
//! - [`parser`]: sequential walk over central directory records
//! - [`scanner`]: the pipeline tying the above together
//!
//! ## Layout handled
//!
//! The host file is treated as opaque bytes with a ZIP archive somewhere
//! near its end:
//!
//! 1. Local file headers and stored data (`PK\x03\x04`)
//! 2. Central Directory records (`PK\x01\x02`), read back to back
//! 3. Anything else, usually the End of Central Directory record, ends the walk
//!
//! The End of Central Directory record itself is never consulted, so archives
//! with a damaged or missing EOCD still list.
//!
//! ## Limitations
//!
//! - No ZIP64 support
//! - No multi-disk archive support
//! - No decompression or CRC validation

mod parser;
mod scanner;
pub mod signature;
mod structures;

pub use parser::{CentralDirectoryWalker, list_entries};
pub use scanner::{ScanOutcome, Scanner};
pub use structures::*;
