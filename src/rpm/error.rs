//! Error types for RPM decoding.
//!
//! Every failure carries the [`Stage`] of the package that was being read
//! when it happened, so callers can tell a broken lead apart from a broken
//! metadata section without parsing messages.

use std::fmt;
use std::io;

use thiserror::Error;

/// Structural region of the package being decoded when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening or stat-ing the package file
    Open,
    /// The 96-byte lead
    Lead,
    /// The signature section envelope and index
    SignatureHeader,
    /// The signature index table and data blob being skipped
    SignatureBody,
    /// The metadata section envelope
    MetadataHeader,
    /// One entry of the metadata index table
    MetadataIndex(usize),
    /// The metadata data blob
    MetadataData,
    /// Extraction of the value(s) of one tag
    Tag(i32),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => f.write_str("opening package"),
            Stage::Lead => f.write_str("reading lead"),
            Stage::SignatureHeader => f.write_str("reading signature header"),
            Stage::SignatureBody => f.write_str("skipping signature section"),
            Stage::MetadataHeader => f.write_str("reading metadata header"),
            Stage::MetadataIndex(n) => write!(f, "reading index entry {}", n),
            Stage::MetadataData => f.write_str("reading metadata data"),
            Stage::Tag(tag) => match super::tags::name(*tag) {
                Some(name) => write!(f, "extracting tag {} ({})", tag, name),
                None => write!(f, "extracting tag {}", tag),
            },
        }
    }
}

/// A structurally invalid or unsupported value in a fixed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatViolation {
    #[error("invalid lead magic {0:#010x}")]
    LeadMagic(u32),
    #[error("unsupported major version {0}")]
    MajorVersion(u8),
    #[error("unsupported minor version {0}")]
    MinorVersion(u8),
    #[error("unsupported package type {0}")]
    PackageType(i16),
    #[error("unsupported os {0}")]
    Os(i16),
    #[error("unsupported signature type {0}")]
    SignatureType(i16),
    #[error("invalid header magic {0:#010x}")]
    SectionMagic(u32),
    #[error("negative index count {0}")]
    NegativeIndexCount(i32),
    #[error("negative data size {0}")]
    NegativeDataSize(i32),
    #[error("data size {size} exceeds limit of {limit} bytes")]
    DataSizeLimit { size: usize, limit: usize },
}

/// A read that would leave the buffered data blob, or collection arrays
/// that disagree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsViolation {
    #[error("offset {offset} is negative")]
    NegativeOffset { offset: i32 },
    #[error("count {count} is negative")]
    NegativeCount { count: i32 },
    #[error("read of {len} bytes at offset {offset} overruns {blob_len}-byte blob")]
    Overrun {
        offset: usize,
        len: usize,
        blob_len: usize,
    },
    #[error("{found} values do not match collection of {expected}")]
    CountMismatch { expected: usize, found: usize },
    #[error("directory index {index} out of range for {dirs} directories")]
    DirIndex { index: i32, dirs: usize },
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    Bounds,
}

/// The primary error type for all decoding operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error {stage}: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: io::Error,
    },

    #[error("invalid package {stage}: {violation}")]
    Format {
        stage: Stage,
        violation: FormatViolation,
    },

    #[error("out of bounds {stage}: {violation}")]
    Bounds {
        stage: Stage,
        violation: BoundsViolation,
    },
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::Io { stage, .. } | Error::Format { stage, .. } | Error::Bounds { stage, .. } => {
                *stage
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::Format { .. } => ErrorKind::Format,
            Error::Bounds { .. } => ErrorKind::Bounds,
        }
    }

    pub(crate) fn format(stage: Stage, violation: FormatViolation) -> Self {
        Error::Format { stage, violation }
    }

    pub(crate) fn bounds(stage: Stage, violation: BoundsViolation) -> Self {
        Error::Bounds { stage, violation }
    }
}

/// Attach a [`Stage`] to a low-level I/O result.
pub(crate) trait IoStage<T> {
    fn stage(self, stage: Stage) -> Result<T>;
}

impl<T> IoStage<T> for io::Result<T> {
    fn stage(self, stage: Stage) -> Result<T> {
        self.map_err(|source| Error::Io { stage, source })
    }
}

/// A convenience `Result` type alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
