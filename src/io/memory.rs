use super::ReadAt;
use crate::error::Result;
use async_trait::async_trait;

/// Reader over bytes already held in memory, e.g. a host file piped on stdin.
pub struct MemoryReader {
    data: Vec<u8>,
}

impl MemoryReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Drain standard input into memory.
    pub async fn from_stdin() -> Result<Self> {
        use tokio::io::AsyncReadExt;

        let mut data = Vec::new();
        tokio::io::stdin().read_to_end(&mut data).await?;
        Ok(Self::new(data))
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

#[async_trait]
impl ReadAt for MemoryReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let start = match usize::try_from(offset) {
            Ok(start) if start < self.data.len() => start,
            _ => return Ok(0),
        };
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
