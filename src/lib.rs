//! # zipscan
//!
//! Find a ZIP archive embedded in an arbitrary host file and list the names
//! stored in its central directory.
//!
//! Archives are often appended to other files: images, installers,
//! self-extracting stubs. This crate loads the host file into memory, looks
//! for a Local File Header signature in the tail of the file, then walks the
//! Central Directory records that follow it.
//!
//! ## Features
//!
//! - Read host files from the local filesystem or from stdin
//! - Configurable tail search window
//! - Bounds-checked record parsing: adversarial length fields never read
//!   past the buffer
//! - Abort-on-corruption by default, with an opt-in partial listing
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use zipscan::{LocalFileReader, ReadAt, ScanConfig, ScanOutcome, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = LocalFileReader::new(Path::new("photo.jpg"))?;
//!     let data = reader.read_all().await?;
//!
//!     let scanner = Scanner::new(ScanConfig::default());
//!     if let ScanOutcome::Listed { entries, .. } = scanner.scan(&data)? {
//!         for name in &entries {
//!             println!("{}", name);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod zip;

pub use crate::zip::{EntryName, ScanOutcome, Scanner};
pub use cli::Cli;
pub use config::{CorruptionPolicy, ScanConfig};
pub use error::{Error, Result};
pub use io::{LocalFileReader, MemoryReader, ReadAt};
