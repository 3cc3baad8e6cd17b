mod local;
mod memory;

pub use local::LocalFileReader;
pub use memory::MemoryReader;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;

    /// Load the whole data source into memory.
    ///
    /// Fails with [`Error::Allocation`] when the buffer cannot be reserved and
    /// with an `UnexpectedEof` I/O error if the source shrinks while reading.
    async fn read_all(&self) -> Result<Vec<u8>> {
        let size = self.size();
        let len = usize::try_from(size).map_err(|_| Error::Allocation { size })?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| Error::Allocation { size })?;
        buf.resize(len, 0);

        let mut filled = 0;
        while filled < len {
            let n = self.read_at(filled as u64, &mut buf[filled..]).await?;
            if n == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("source ended after {filled} of {len} bytes"),
                )
                .into());
            }
            filled += n;
        }

        debug!(bytes = len, "loaded host file");
        Ok(buf)
    }
}
