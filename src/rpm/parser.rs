//! Low-level RPM package reader.
//!
//! This module walks the fixed structures at the front of a package from
//! any sequential [`Read`] source. Nothing is ever rewound: each region is
//! read exactly once, in file order.
//!
//! ## Parsing Strategy
//!
//! 1. Read and validate the 96-byte lead
//! 2. Read the signature section envelope and skip its index and data,
//!    including the padding up to the next 8-byte boundary
//! 3. Read the metadata section envelope and index table
//! 4. Buffer the metadata data blob so values can be read by offset
//! 5. Dispatch every index entry onto the package
//!
//! The payload that follows the metadata section is left unread.

use std::io::{self, Read};

use tracing::debug;

use super::assembler::Assembler;
use super::blob::DataBlob;
use super::error::{Error, FormatViolation, IoStage, Result, Stage};
use super::options::DecodeOptions;
use super::package::Package;
use super::structures::{IndexEntry, Lead, SectionHeader};

/// Sequential reader over the header regions of one package.
///
/// ## Usage
///
/// Typically used through [`decode`](crate::decode) rather than directly.
/// Driving it by hand is useful for inspecting the raw index table:
///
/// ```no_run
/// use rpmpeek::RpmParser;
///
/// # fn main() -> rpmpeek::Result<()> {
/// let file = std::fs::File::open("hello-1.0-1.x86_64.rpm").unwrap();
/// let mut parser = RpmParser::new(std::io::BufReader::new(file));
/// parser.read_lead()?;
/// parser.skip_signature()?;
/// let (entries, _blob) = parser.read_metadata()?;
/// for entry in entries {
///     println!("{} @ {}", entry.tag, entry.offset);
/// }
/// # Ok(())
/// # }
/// ```
pub struct RpmParser<R: Read> {
    /// The underlying byte stream
    reader: R,
    options: DecodeOptions,
}

impl<R: Read> RpmParser<R> {
    /// Create a parser with default [`DecodeOptions`].
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self { reader, options }
    }

    /// Read and validate the package lead.
    ///
    /// # Errors
    ///
    /// Returns a format error for a bad magic or any unsupported version,
    /// type, os or signature code, and an I/O error if the stream ends
    /// inside the lead.
    pub fn read_lead(&mut self) -> Result<Lead> {
        let mut buf = [0u8; Lead::SIZE];
        self.reader.read_exact(&mut buf).stage(Stage::Lead)?;

        let lead = Lead::from_bytes(&buf)?;
        lead.validate()?;

        debug!(version = %lead.version(), name = %lead.name(), "read package lead");
        Ok(lead)
    }

    /// Read one section envelope.
    pub fn read_section_header(&mut self, stage: Stage) -> Result<SectionHeader> {
        let mut buf = [0u8; SectionHeader::SIZE];
        self.reader.read_exact(&mut buf).stage(stage)?;
        SectionHeader::from_bytes(&buf, stage)
    }

    /// Consume the signature section without interpreting it.
    ///
    /// Exactly `round_up_to_8(index_count * 16 + data_size)` bytes are read
    /// after the envelope, so the stream is left at the metadata section.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the stream ends before the section does.
    pub fn skip_signature(&mut self) -> Result<SectionHeader> {
        let header = self.read_section_header(Stage::SignatureHeader)?;
        let len = header.padded_body_len();

        let skipped = io::copy(&mut (&mut self.reader).take(len), &mut io::sink())
            .stage(Stage::SignatureBody)?;
        if skipped != len {
            return Err(Error::Io {
                stage: Stage::SignatureBody,
                source: io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("signature section ended after {} of {} bytes", skipped, len),
                ),
            });
        }

        debug!(
            entries = header.index_count,
            data_size = header.data_size,
            skipped,
            "skipped signature section"
        );
        Ok(header)
    }

    /// Read `header.index_count` index entries, in stored order.
    pub fn read_index_table(&mut self, header: &SectionHeader) -> Result<Vec<IndexEntry>> {
        let count = header.index_count as usize;
        let mut entries = Vec::with_capacity(count.min(4096));
        let mut buf = [0u8; IndexEntry::SIZE];

        for i in 0..count {
            self.reader
                .read_exact(&mut buf)
                .stage(Stage::MetadataIndex(i))?;
            entries.push(IndexEntry::from_bytes(&buf).stage(Stage::MetadataIndex(i))?);
        }

        Ok(entries)
    }

    /// Read the metadata section envelope, index table and data blob.
    ///
    /// # Errors
    ///
    /// Besides the envelope checks, a data blob larger than
    /// [`DecodeOptions::max_data_size`] is rejected before it is allocated.
    pub fn read_metadata(&mut self) -> Result<(Vec<IndexEntry>, DataBlob)> {
        let header = self.read_section_header(Stage::MetadataHeader)?;

        let size = header.data_size as usize;
        if size > self.options.max_data_size {
            return Err(Error::format(
                Stage::MetadataHeader,
                FormatViolation::DataSizeLimit {
                    size,
                    limit: self.options.max_data_size,
                },
            ));
        }

        let entries = self.read_index_table(&header)?;
        let blob = DataBlob::read_from(&mut self.reader, size).stage(Stage::MetadataData)?;

        debug!(
            entries = entries.len(),
            data_size = blob.len(),
            "read metadata section"
        );
        Ok((entries, blob))
    }

    /// Decode the whole header area into a [`Package`].
    pub fn parse(mut self) -> Result<Package> {
        let lead = self.read_lead()?;
        self.skip_signature()?;
        let (entries, blob) = self.read_metadata()?;

        let package = Package {
            rpm_version: lead.version(),
            ..Default::default()
        };
        let mut assembler = Assembler::new(&blob, package);
        for entry in &entries {
            assembler.dispatch(entry)?;
        }
        assembler.finish()
    }
}
