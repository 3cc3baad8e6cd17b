use super::ReadAt;
use crate::error::Result;
use async_trait::async_trait;
use std::fs::File;
use std::path::Path;

/// Host file on the local filesystem.
///
/// The length is taken once at open time; [`ReadAt::read_all`] reports an
/// `UnexpectedEof` error if the file shrinks afterwards.
pub struct LocalFileReader {
    file: File,
    len: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self { file, len })
    }
}

#[cfg(unix)]
fn pread(file: &File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn pread(file: &File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}

#[cfg(not(any(unix, windows)))]
fn pread(mut file: &File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::io::{Read, Seek, SeekFrom};
    file.seek(SeekFrom::Start(offset))?;
    file.read(buf)
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        Ok(pread(&self.file, offset, buf)?)
    }

    fn size(&self) -> u64 {
        self.len
    }
}
