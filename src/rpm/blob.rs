//! Bounds-checked access to a section's data blob.
//!
//! Index entries address values by offset into the blob. Every read here is
//! checked against the buffered length first, so a corrupt offset or count
//! surfaces as a [`BoundsViolation`] instead of a panic.

use byteorder::{BigEndian, ByteOrder};
use std::io::Read;

use super::error::BoundsViolation;

type BlobResult<T> = std::result::Result<T, BoundsViolation>;

/// Fully buffered data blob of one header section.
#[derive(Debug, Clone, Default)]
pub struct DataBlob {
    bytes: Vec<u8>,
}

impl DataBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Buffer exactly `size` bytes from the stream.
    pub fn read_from<R: Read>(reader: &mut R, size: usize) -> std::io::Result<Self> {
        let mut bytes = vec![0u8; size];
        reader.read_exact(&mut bytes)?;
        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Single big-endian `i32` at `offset`.
    pub fn int32(&self, offset: i32) -> BlobResult<i32> {
        let start = to_offset(offset)?;
        let slice = self.slice(start, 4)?;
        Ok(BigEndian::read_i32(slice))
    }

    /// `count` consecutive big-endian `i32` values starting at `offset`.
    pub fn int32_array(&self, offset: i32, count: i32) -> BlobResult<Vec<i32>> {
        let start = to_offset(offset)?;
        let count = to_count(count)?;
        let len = count.checked_mul(4).ok_or(BoundsViolation::Overrun {
            offset: start,
            len: usize::MAX,
            blob_len: self.bytes.len(),
        })?;
        let slice = self.slice(start, len)?;
        Ok(slice.chunks_exact(4).map(BigEndian::read_i32).collect())
    }

    /// NUL-terminated text at `offset`, trimmed of surrounding whitespace.
    pub fn string(&self, offset: i32) -> BlobResult<String> {
        let mut cursor = self.cursor(to_offset(offset)?);
        cursor.next_string()
    }

    /// `count` NUL-terminated strings packed back to back from `offset`.
    pub fn string_array(&self, offset: i32, count: i32) -> BlobResult<Vec<String>> {
        let mut cursor = self.cursor(to_offset(offset)?);
        let count = to_count(count)?;
        // each entry needs at least one byte, so the blob bounds the allocation
        let mut values = Vec::with_capacity(count.min(self.bytes.len()));
        for _ in 0..count {
            values.push(cursor.next_string()?);
        }
        Ok(values)
    }

    fn cursor(&self, pos: usize) -> BlobCursor<'_> {
        BlobCursor {
            data: &self.bytes,
            pos,
        }
    }

    fn slice(&self, start: usize, len: usize) -> BlobResult<&[u8]> {
        start
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .map(|end| &self.bytes[start..end])
            .ok_or(BoundsViolation::Overrun {
                offset: start,
                len,
                blob_len: self.bytes.len(),
            })
    }
}

/// Forward-only reader over packed strings.
struct BlobCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl BlobCursor<'_> {
    /// Read up to the next NUL (or blob end) and step past it.
    fn next_string(&mut self) -> BlobResult<String> {
        // a string occupies at least its terminator
        if self.pos >= self.data.len() {
            return Err(BoundsViolation::Overrun {
                offset: self.pos,
                len: 1,
                blob_len: self.data.len(),
            });
        }
        let rest = &self.data[self.pos..];
        let (raw, consumed) = match rest.iter().position(|&b| b == 0) {
            Some(nul) => (&rest[..nul], nul + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        Ok(String::from_utf8_lossy(raw).trim().to_string())
    }
}

fn to_offset(offset: i32) -> BlobResult<usize> {
    usize::try_from(offset).map_err(|_| BoundsViolation::NegativeOffset { offset })
}

fn to_count(count: i32) -> BlobResult<usize> {
    usize::try_from(count).map_err(|_| BoundsViolation::NegativeCount { count })
}
