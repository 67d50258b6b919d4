//! # rpmpeek
//!
//! Read RPM package metadata without librpm.
//!
//! This library decodes the header of an `.rpm` file into a plain
//! [`Package`] record: name, version and the other descriptive fields, the
//! file manifest, the requires/provides/conflicts/obsoletes lists and the
//! changelog. Nothing is installed, executed or decompressed, which makes
//! it suitable for indexing, auditing and dependency graphing.
//!
//! ## Features
//!
//! - Decode from any [`std::io::Read`] source, or from a path
//! - File names rebuilt from either the modern base/dir/index tags or the
//!   legacy full path tag
//! - Every read from the header data is bounds-checked
//! - Errors report the region being decoded ([`Stage`])
//!
//! ## Example
//!
//! ```no_run
//! fn main() -> rpmpeek::Result<()> {
//!     let package = rpmpeek::decode_file("hello-2.12-1.x86_64.rpm")?;
//!
//!     println!("{} ({})", package.nvra(), package.license);
//!     for dep in &package.requires {
//!         println!("requires {} {}", dep.name, dep.version);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod rpm;

pub use cli::Cli;
pub use io::LocalPackageFile;
pub use rpm::{
    BoundsViolation, ChangelogEntry, DecodeOptions, Dependency, Error, ErrorKind, FileEntry,
    FormatViolation, Package, Result, RpmParser, Stage, decode, decode_file, decode_file_with,
    decode_with,
};
