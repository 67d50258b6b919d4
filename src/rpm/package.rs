use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// One entry of a requires/provides/conflicts/obsoletes list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    /// RPMSENSE_* comparison and context bits
    pub flags: i32,
    pub version: String,
}

/// One file in the package manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Full installed path
    pub name: String,
    /// RPMFILE_* bits (config, doc, ghost, ...)
    pub flags: i32,
    pub size: i64,
    pub mtime: Option<DateTime<Utc>>,
    /// Hex digest, empty for directories and symlinks
    pub digest: String,
    pub link_to: String,
    pub user: String,
    pub group: String,
}

impl FileEntry {
    pub fn is_config(&self) -> bool {
        self.flags & FILE_CONFIG != 0
    }

    pub fn is_doc(&self) -> bool {
        self.flags & FILE_DOC != 0
    }

    pub fn is_ghost(&self) -> bool {
        self.flags & FILE_GHOST != 0
    }
}

const FILE_CONFIG: i32 = 1 << 0;
const FILE_DOC: i32 = 1 << 1;
const FILE_GHOST: i32 = 1 << 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
    /// Author line, usually "Name <email> - version"
    pub name: String,
    pub text: String,
    pub time: DateTime<Utc>,
}

/// Decoded metadata of one RPM package.
///
/// Built in a single pass by [`decode`](crate::decode) and never mutated
/// afterwards by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Path the package was read from, when decoded from a file
    pub filename: Option<PathBuf>,
    /// Last modification time of the package file
    pub modified: Option<DateTime<Utc>>,
    /// Lead format version, "3.0"
    pub rpm_version: String,

    pub name: String,
    pub version: String,
    pub release: String,
    pub architecture: String,
    pub os: String,
    pub platform: String,
    pub summary: String,
    pub description: String,
    pub license: String,
    pub vendor: String,
    pub packager: String,
    pub group: String,
    pub distribution: String,
    pub homepage: String,
    pub build_host: String,
    pub build_time: Option<DateTime<Utc>>,
    pub source_rpm: String,
    pub cookie: String,
    pub optflags: String,
    pub dist_url: String,
    pub payload_format: String,
    pub payload_compressor: String,

    /// Installed size in bytes
    pub size: i64,
    /// Uncompressed payload size in bytes
    pub archive_size: i64,

    pub files: Vec<FileEntry>,
    pub requires: Vec<Dependency>,
    pub provides: Vec<Dependency>,
    pub conflicts: Vec<Dependency>,
    pub obsoletes: Vec<Dependency>,
    pub changelog: Vec<ChangelogEntry>,
}

impl Package {
    /// `name-version-release.arch`, the conventional package identifier
    pub fn nvra(&self) -> String {
        let mut nvra = self.name.clone();
        if !self.version.is_empty() {
            nvra.push('-');
            nvra.push_str(&self.version);
        }
        if !self.release.is_empty() {
            nvra.push('-');
            nvra.push_str(&self.release);
        }
        if !self.architecture.is_empty() {
            nvra.push('.');
            nvra.push_str(&self.architecture);
        }
        nvra
    }
}
