use byteorder::{LittleEndian, ReadBytesExt};
use std::borrow::Cow;
use std::fmt;
use std::io::Cursor;

use crate::error::{Error, Result};

/// Local File Header (LFH) signature, marks the start of stored file data
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";

/// Central Directory File Header (CDFH) signature
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";

/// Central Directory File Header (CDFH) - 46 bytes minimum
pub const CDFH_MIN_SIZE: usize = 46;

/// Offset of the file name length inside a CDFH; extra and comment lengths follow.
const CDFH_LENGTHS_OFFSET: usize = 28;

/// View of one Central Directory File Header inside a byte buffer.
///
/// Only the three length fields and the file name are decoded. The view
/// borrows the buffer and is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CentralDirectoryHeader<'a> {
    pub offset: usize,
    pub file_name_length: u16,
    pub extra_field_length: u16,
    pub comment_length: u16,
    file_name: &'a [u8],
}

impl<'a> CentralDirectoryHeader<'a> {
    /// Check whether a CDFH signature starts at `offset`.
    ///
    /// Returns false when fewer than four bytes remain.
    pub fn starts_at(data: &[u8], offset: usize) -> bool {
        offset
            .checked_add(CDFH_SIGNATURE.len())
            .and_then(|end| data.get(offset..end))
            .is_some_and(|sig| sig == CDFH_SIGNATURE)
    }

    /// Parse the header whose signature starts at `offset`.
    ///
    /// The caller is expected to have checked the signature with
    /// [`starts_at`](Self::starts_at). Both the fixed region and the declared
    /// variable region must fit in `data`, otherwise
    /// [`Error::TruncatedRecord`] is returned and nothing is read past the end.
    pub fn parse(data: &'a [u8], offset: usize) -> Result<Self> {
        let truncated = |record_end: usize| Error::TruncatedRecord {
            offset,
            record_end,
            buffer_len: data.len(),
        };

        let fixed_end = offset.saturating_add(CDFH_MIN_SIZE);
        let fixed = data.get(offset..fixed_end).ok_or_else(|| truncated(fixed_end))?;

        let mut cursor = Cursor::new(&fixed[CDFH_LENGTHS_OFFSET..]);
        let file_name_length = cursor.read_u16::<LittleEndian>()?;
        let extra_field_length = cursor.read_u16::<LittleEndian>()?;
        let comment_length = cursor.read_u16::<LittleEndian>()?;

        let header = Self {
            offset,
            file_name_length,
            extra_field_length,
            comment_length,
            file_name: &[],
        };

        let record_end = fixed_end.saturating_add(header.variable_len());
        if record_end > data.len() {
            return Err(truncated(record_end));
        }

        let name_end = fixed_end + file_name_length as usize;
        Ok(Self {
            file_name: &data[fixed_end..name_end],
            ..header
        })
    }

    /// Combined length of file name, extra field and comment.
    fn variable_len(&self) -> usize {
        self.file_name_length as usize
            + self.extra_field_length as usize
            + self.comment_length as usize
    }

    /// Total size of this record including variable-length fields
    pub fn total_len(&self) -> usize {
        CDFH_MIN_SIZE + self.variable_len()
    }

    /// Offset of the first byte after this record
    pub fn end(&self) -> usize {
        self.offset + self.total_len()
    }

    /// Raw file name bytes
    pub fn file_name(&self) -> &'a [u8] {
        self.file_name
    }
}

/// File name of one archive member, kept as raw bytes.
///
/// ZIP names carry no reliable encoding, so display is lossy UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryName(Vec<u8>);

impl EntryName {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Directory entries end with '/'
    pub fn is_directory(&self) -> bool {
        self.0.last() == Some(&b'/')
    }
}

impl From<&[u8]> for EntryName {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<'a> From<CentralDirectoryHeader<'a>> for EntryName {
    fn from(header: CentralDirectoryHeader<'a>) -> Self {
        Self::from(header.file_name())
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &[u8], extra: usize, comment: usize) -> Vec<u8> {
        let mut buf = vec![0u8; CDFH_MIN_SIZE];
        buf[..4].copy_from_slice(CDFH_SIGNATURE);
        buf[28..30].copy_from_slice(&(name.len() as u16).to_le_bytes());
        buf[30..32].copy_from_slice(&(extra as u16).to_le_bytes());
        buf[32..34].copy_from_slice(&(comment as u16).to_le_bytes());
        buf.extend_from_slice(name);
        buf.extend(std::iter::repeat_n(0xEE, extra + comment));
        buf
    }

    #[test]
    fn parses_lengths_and_name() {
        let data = record(b"dir/file.bin", 9, 4);
        let header = CentralDirectoryHeader::parse(&data, 0).unwrap();

        assert_eq!(header.file_name_length, 12);
        assert_eq!(header.extra_field_length, 9);
        assert_eq!(header.comment_length, 4);
        assert_eq!(header.file_name(), b"dir/file.bin");
        assert_eq!(header.end(), data.len());
    }

    #[test]
    fn lengths_are_little_endian() {
        let mut data = record(b"", 0, 0);
        data[28] = 0x00;
        data[29] = 0x01;
        data.extend(std::iter::repeat_n(b'n', 256));

        let header = CentralDirectoryHeader::parse(&data, 0).unwrap();
        assert_eq!(header.file_name_length, 256);
        assert_eq!(header.file_name().len(), 256);
    }

    #[test]
    fn short_fixed_region_is_truncated() {
        let data = record(b"x", 0, 0);
        let err = CentralDirectoryHeader::parse(&data[..20], 0).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedRecord { offset: 0, record_end: 46, buffer_len: 20 }
        ));
    }

    #[test]
    fn maximal_lengths_do_not_read_past_end() {
        let mut data = record(b"", 0, 0);
        data[28..34].copy_from_slice(&[0xFF; 6]);

        let err = CentralDirectoryHeader::parse(&data, 0).unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn starts_at_needs_four_bytes() {
        let data = record(b"a", 0, 0);
        assert!(CentralDirectoryHeader::starts_at(&data, 0));
        assert!(!CentralDirectoryHeader::starts_at(&data, 1));
        assert!(!CentralDirectoryHeader::starts_at(&data[..3], 0));
        assert!(!CentralDirectoryHeader::starts_at(&data, usize::MAX));
    }

    #[test]
    fn entry_name_display_is_lossy() {
        let name = EntryName::from(&b"caf\xE9/"[..]);
        assert_eq!(name.to_string(), "caf\u{FFFD}/");
        assert!(name.is_directory());
        assert_eq!(name.as_bytes(), b"caf\xE9/");
    }
}
