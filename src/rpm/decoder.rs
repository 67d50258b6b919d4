use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::io::LocalPackageFile;

use super::error::{IoStage, Result, Stage};
use super::options::DecodeOptions;
use super::package::Package;
use super::parser::RpmParser;

/// Decode package metadata from any sequential byte source.
pub fn decode<R: Read>(reader: R) -> Result<Package> {
    decode_with(reader, &DecodeOptions::default())
}

pub fn decode_with<R: Read>(reader: R, options: &DecodeOptions) -> Result<Package> {
    RpmParser::with_options(reader, *options).parse()
}

/// Open `path` and decode it, recording the path and file mtime.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Package> {
    decode_file_with(path, &DecodeOptions::default())
}

pub fn decode_file_with<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Package> {
    let path = path.as_ref();
    debug!(path = %path.display(), "decoding package file");

    let mut file = LocalPackageFile::open(path).stage(Stage::Open)?;
    let modified = file.modified();

    let mut package = decode_with(&mut file, options)?;
    package.filename = Some(file.path().to_path_buf());
    package.modified = modified;
    Ok(package)
}
