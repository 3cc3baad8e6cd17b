//! Central directory walker.
//!
//! Records are read back to back starting at a known CDFH offset. The walk
//! ends normally at the first position that does not carry a CDFH signature
//! (typically the End of Central Directory record) or when fewer than four
//! bytes remain. A record whose declared lengths run past the buffer ends the
//! walk with [`Error::TruncatedRecord`].

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{trace, warn};

use crate::error::{Error, Result};

use super::structures::{CentralDirectoryHeader, EntryName};

/// Iterator over consecutive Central Directory File Headers.
///
/// Yields one header per record in archive order. After an error is yielded
/// the iterator is exhausted.
pub struct CentralDirectoryWalker<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> CentralDirectoryWalker<'a> {
    /// Start walking at `offset`, which should point at a CDFH signature.
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            offset,
            done: false,
            cancel: None,
        }
    }

    /// Stop with [`Error::Cancelled`] once `flag` is set.
    ///
    /// The flag is checked once before each record.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Offset of the next record to be read.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn fail(&mut self, err: Error) -> Option<Result<CentralDirectoryHeader<'a>>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for CentralDirectoryWalker<'a> {
    type Item = Result<CentralDirectoryHeader<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return self.fail(Error::Cancelled {
                offset: self.offset,
            });
        }

        if !CentralDirectoryHeader::starts_at(self.data, self.offset) {
            trace!(offset = self.offset, "end of central directory");
            self.done = true;
            return None;
        }

        match CentralDirectoryHeader::parse(self.data, self.offset) {
            Ok(header) => {
                trace!(
                    offset = header.offset,
                    name_len = header.file_name_length,
                    extra_len = header.extra_field_length,
                    comment_len = header.comment_length,
                    "central directory record"
                );
                // Each record is at least CDFH_MIN_SIZE bytes, so the walk always advances.
                self.offset = header.end();
                Some(Ok(header))
            }
            Err(err) => {
                warn!(offset = self.offset, "{err}");
                self.fail(err)
            }
        }
    }
}

/// List entry names of the central directory starting at `offset`.
///
/// Aborts on the first truncated record: no names are returned in that case.
pub fn list_entries(data: &[u8], offset: usize) -> Result<Vec<EntryName>> {
    CentralDirectoryWalker::new(data, offset)
        .map(|header| header.map(EntryName::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zip::structures::{CDFH_MIN_SIZE, CDFH_SIGNATURE};

    fn push_record(buf: &mut Vec<u8>, name: &[u8], extra: &[u8], comment: &[u8]) {
        let mut fixed = [0u8; CDFH_MIN_SIZE];
        fixed[..4].copy_from_slice(CDFH_SIGNATURE);
        fixed[28..30].copy_from_slice(&(name.len() as u16).to_le_bytes());
        fixed[30..32].copy_from_slice(&(extra.len() as u16).to_le_bytes());
        fixed[32..34].copy_from_slice(&(comment.len() as u16).to_le_bytes());
        buf.extend_from_slice(&fixed);
        buf.extend_from_slice(name);
        buf.extend_from_slice(extra);
        buf.extend_from_slice(comment);
    }

    fn names(entries: &[EntryName]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn lists_records_in_order() {
        let mut buf = Vec::new();
        push_record(&mut buf, b"first.txt", b"", b"");
        push_record(&mut buf, b"second/", b"\x01\x00\x04\x00abcd", b"");
        push_record(&mut buf, b"third.bin", b"", b"a comment");
        buf.extend_from_slice(b"PK\x05\x06 trailing end record");

        let entries = list_entries(&buf, 0).unwrap();
        assert_eq!(names(&entries), ["first.txt", "second/", "third.bin"]);
    }

    #[test]
    fn starts_at_given_offset() {
        let mut buf = b"garbage".to_vec();
        push_record(&mut buf, b"only", b"", b"");

        let entries = list_entries(&buf, 7).unwrap();
        assert_eq!(names(&entries), ["only"]);
    }

    #[test]
    fn stops_when_signature_breaks() {
        let mut buf = Vec::new();
        push_record(&mut buf, b"kept", b"", b"");
        buf.extend_from_slice(b"PK\x01");

        let entries = list_entries(&buf, 0).unwrap();
        assert_eq!(names(&entries), ["kept"]);
    }

    #[test]
    fn no_signature_at_start_yields_nothing() {
        assert!(list_entries(b"not a directory", 0).unwrap().is_empty());
        assert!(list_entries(b"", 0).unwrap().is_empty());
        assert!(list_entries(b"PK\x01\x02", 10).unwrap().is_empty());
    }

    #[test]
    fn truncated_record_aborts_listing() {
        let mut buf = Vec::new();
        push_record(&mut buf, b"good", b"", b"");
        let bad = buf.len();
        push_record(&mut buf, b"bad", b"", b"");
        buf.truncate(buf.len() - 1);

        let err = list_entries(&buf, 0).unwrap_err();
        match err {
            Error::TruncatedRecord {
                offset,
                record_end,
                buffer_len,
            } => {
                assert_eq!(offset, bad);
                assert_eq!(record_end, buf.len() + 1);
                assert_eq!(buffer_len, buf.len());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn walker_yields_good_records_before_error() {
        let mut buf = Vec::new();
        push_record(&mut buf, b"good", b"", b"");
        let mut bad = [0u8; CDFH_MIN_SIZE];
        bad[..4].copy_from_slice(CDFH_SIGNATURE);
        bad[32..34].copy_from_slice(&u16::MAX.to_le_bytes());
        buf.extend_from_slice(&bad);

        let mut walker = CentralDirectoryWalker::new(&buf, 0);
        assert_eq!(walker.next().unwrap().unwrap().file_name(), b"good");
        assert!(walker.next().unwrap().unwrap_err().is_corruption());
        assert!(walker.next().is_none());
    }

    #[test]
    fn name_length_0x0100_reads_256_bytes() {
        let name = vec![b'z'; 256];
        let mut buf = Vec::new();
        push_record(&mut buf, &name, b"", b"");
        assert_eq!(&buf[28..30], &[0x00, 0x01]);

        let entries = list_entries(&buf, 0).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].as_bytes().len(), 256);
    }

    #[test]
    fn cancellation_is_checked_per_record() {
        let mut buf = Vec::new();
        push_record(&mut buf, b"a", b"", b"");
        push_record(&mut buf, b"b", b"", b"");

        let flag = AtomicBool::new(false);
        let mut walker = CentralDirectoryWalker::new(&buf, 0).with_cancel(&flag);
        assert!(walker.next().unwrap().is_ok());

        flag.store(true, Ordering::Relaxed);
        let err = walker.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::Cancelled { offset } if offset == CDFH_MIN_SIZE + 1));
        assert!(walker.next().is_none());
    }
}
