//! RPM package header decoding.
//!
//! This module reads the metadata of RPM packages (format version 3.0, as
//! produced by every rpm release since 4.0) without linking against librpm.
//!
//! ## Architecture
//!
//! - [`structures`]: fixed-layout regions (lead, section envelope, index entry)
//! - [`parser`]: sequential walk over the regions of one stream
//! - [`blob`]: bounds-checked typed reads from the metadata data blob
//! - [`tags`]: the table mapping each tag to the package field it feeds
//! - [`assembler`]: applies index entries and rebuilds files, dependencies
//!   and changelog entries from their parallel arrays
//! - `decoder`: the [`decode`] and [`decode_file`] entry points
//!
//! ## RPM Format Overview
//!
//! An RPM file consists of:
//! 1. A 96-byte lead identifying the format
//! 2. The signature section, padded to an 8-byte boundary
//! 3. The metadata section: a 16-byte envelope, an index of 16-byte
//!    entries and a data blob the entries point into
//! 4. The compressed payload
//!
//! Only the metadata section is decoded. Signatures are skipped unverified
//! and the payload is never read.

pub mod assembler;
pub mod blob;
mod decoder;
mod error;
mod options;
mod package;
pub mod parser;
pub mod structures;
pub mod tags;

pub use decoder::{decode, decode_file, decode_file_with, decode_with};
pub use error::{BoundsViolation, Error, ErrorKind, FormatViolation, Result, Stage};
pub use options::{DEFAULT_MAX_DATA_SIZE, DecodeOptions};
pub use package::{ChangelogEntry, Dependency, FileEntry, Package};
pub use parser::RpmParser;
pub use structures::{IndexEntry, IndexType, Lead, SectionHeader};
