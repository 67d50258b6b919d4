//! Metadata section tags and the field each one feeds.
//!
//! [`TAGS`] is the single dispatch table used by the assembler. A tag with
//! no [`Target`] is known (so it can be named in diagnostics) but its value
//! is not surfaced on [`Package`](super::Package). Supporting another tag
//! means adding or filling in one row.

pub const HEADERSIGNATURES: i32 = 62;
pub const HEADERIMMUTABLE: i32 = 63;
pub const HEADERI18NTABLE: i32 = 100;
pub const NAME: i32 = 1000;
pub const VERSION: i32 = 1001;
pub const RELEASE: i32 = 1002;
pub const SUMMARY: i32 = 1004;
pub const DESCRIPTION: i32 = 1005;
pub const BUILDTIME: i32 = 1006;
pub const BUILDHOST: i32 = 1007;
pub const SIZE: i32 = 1009;
pub const DISTRIBUTION: i32 = 1010;
pub const VENDOR: i32 = 1011;
pub const LICENSE: i32 = 1014;
pub const PACKAGER: i32 = 1015;
pub const GROUP: i32 = 1016;
pub const URL: i32 = 1020;
pub const OS: i32 = 1021;
pub const ARCH: i32 = 1022;
pub const PREIN: i32 = 1023;
pub const POSTIN: i32 = 1024;
pub const PREUN: i32 = 1025;
pub const POSTUN: i32 = 1026;
pub const OLDFILENAMES: i32 = 1027;
pub const FILESIZES: i32 = 1028;
pub const FILEMODES: i32 = 1030;
pub const FILERDEVS: i32 = 1033;
pub const FILEMTIMES: i32 = 1034;
pub const FILEMD5S: i32 = 1035;
pub const FILELINKTOS: i32 = 1036;
pub const FILEFLAGS: i32 = 1037;
pub const FILEUSERNAME: i32 = 1039;
pub const FILEGROUPNAME: i32 = 1040;
pub const SOURCERPM: i32 = 1044;
pub const FILEVERIFYFLAGS: i32 = 1045;
pub const ARCHIVESIZE: i32 = 1046;
pub const PROVIDENAME: i32 = 1047;
pub const REQUIREFLAGS: i32 = 1048;
pub const REQUIRENAME: i32 = 1049;
pub const REQUIREVERSION: i32 = 1050;
pub const CONFLICTFLAGS: i32 = 1053;
pub const CONFLICTNAME: i32 = 1054;
pub const CONFLICTVERSION: i32 = 1055;
pub const RPMVERSION: i32 = 1064;
pub const CHANGELOGTIME: i32 = 1080;
pub const CHANGELOGNAME: i32 = 1081;
pub const CHANGELOGTEXT: i32 = 1082;
pub const PREINPROG: i32 = 1085;
pub const POSTINPROG: i32 = 1086;
pub const PREUNPROG: i32 = 1087;
pub const POSTUNPROG: i32 = 1088;
pub const OBSOLETENAME: i32 = 1090;
pub const COOKIE: i32 = 1094;
pub const FILEDEVICES: i32 = 1095;
pub const FILEINODES: i32 = 1096;
pub const FILELANGS: i32 = 1097;
pub const PROVIDEFLAGS: i32 = 1112;
pub const PROVIDEVERSION: i32 = 1113;
pub const OBSOLETEFLAGS: i32 = 1114;
pub const OBSOLETEVERSION: i32 = 1115;
pub const DIRINDEXES: i32 = 1116;
pub const BASENAMES: i32 = 1117;
pub const DIRNAMES: i32 = 1118;
pub const OPTFLAGS: i32 = 1122;
pub const DISTURL: i32 = 1123;
pub const PAYLOADFORMAT: i32 = 1124;
pub const PAYLOADCOMPRESSOR: i32 = 1125;
pub const PAYLOADFLAGS: i32 = 1126;
pub const RHNPLATFORM: i32 = 1131;
pub const PLATFORM: i32 = 1132;

/// Text scalars on the package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Version,
    Release,
    Summary,
    Description,
    BuildHost,
    Distribution,
    Vendor,
    License,
    Packager,
    Group,
    Homepage,
    Os,
    Architecture,
    SourceRpm,
    Cookie,
    OptFlags,
    DistUrl,
    PayloadFormat,
    PayloadCompressor,
    Platform,
}

/// Integer scalars on the package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntField {
    /// Seconds since the epoch, stored as a timestamp
    BuildTime,
    Size,
    ArchiveSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Requires,
    Provides,
    Conflicts,
    Obsoletes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyAttr {
    Name,
    Flags,
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAttr {
    Flags,
    Size,
    Mtime,
    Digest,
    LinkTo,
    User,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangelogAttr {
    Time,
    Name,
    Text,
}

/// Inputs to file name reconstruction, held until the whole index is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNameSource {
    BaseNames,
    DirNames,
    DirIndexes,
    OldFileNames,
}

/// Where the value of a tag ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Text(TextField),
    Int(IntField),
    Dependency(DependencyKind, DependencyAttr),
    File(FileAttr),
    Changelog(ChangelogAttr),
    FileName(FileNameSource),
}

#[derive(Debug, Clone, Copy)]
pub struct TagInfo {
    pub tag: i32,
    pub name: &'static str,
    pub target: Option<Target>,
}

const fn known(tag: i32, name: &'static str) -> TagInfo {
    TagInfo {
        tag,
        name,
        target: None,
    }
}

const fn mapped(tag: i32, name: &'static str, target: Target) -> TagInfo {
    TagInfo {
        tag,
        name,
        target: Some(target),
    }
}

use DependencyAttr as D;
use DependencyKind as K;
use Target::*;

/// Every known metadata tag, sorted by tag number.
#[rustfmt::skip]
pub static TAGS: &[TagInfo] = &[
    known(HEADERSIGNATURES,   "HEADERSIGNATURES"),
    known(HEADERIMMUTABLE,    "HEADERIMMUTABLE"),
    known(HEADERI18NTABLE,    "HEADERI18NTABLE"),
    mapped(NAME,              "NAME",              Text(TextField::Name)),
    mapped(VERSION,           "VERSION",           Text(TextField::Version)),
    mapped(RELEASE,           "RELEASE",           Text(TextField::Release)),
    mapped(SUMMARY,           "SUMMARY",           Text(TextField::Summary)),
    mapped(DESCRIPTION,       "DESCRIPTION",       Text(TextField::Description)),
    mapped(BUILDTIME,         "BUILDTIME",         Int(IntField::BuildTime)),
    mapped(BUILDHOST,         "BUILDHOST",         Text(TextField::BuildHost)),
    mapped(SIZE,              "SIZE",              Int(IntField::Size)),
    mapped(DISTRIBUTION,      "DISTRIBUTION",      Text(TextField::Distribution)),
    mapped(VENDOR,            "VENDOR",            Text(TextField::Vendor)),
    mapped(LICENSE,           "LICENSE",           Text(TextField::License)),
    mapped(PACKAGER,          "PACKAGER",          Text(TextField::Packager)),
    mapped(GROUP,             "GROUP",             Text(TextField::Group)),
    mapped(URL,               "URL",               Text(TextField::Homepage)),
    mapped(OS,                "OS",                Text(TextField::Os)),
    mapped(ARCH,              "ARCH",              Text(TextField::Architecture)),
    known(PREIN,              "PREIN"),
    known(POSTIN,             "POSTIN"),
    known(PREUN,              "PREUN"),
    known(POSTUN,             "POSTUN"),
    mapped(OLDFILENAMES,      "OLDFILENAMES",      FileName(FileNameSource::OldFileNames)),
    mapped(FILESIZES,         "FILESIZES",         File(FileAttr::Size)),
    known(FILEMODES,          "FILEMODES"),
    known(FILERDEVS,          "FILERDEVS"),
    mapped(FILEMTIMES,        "FILEMTIMES",        File(FileAttr::Mtime)),
    mapped(FILEMD5S,          "FILEMD5S",          File(FileAttr::Digest)),
    mapped(FILELINKTOS,       "FILELINKTOS",       File(FileAttr::LinkTo)),
    mapped(FILEFLAGS,         "FILEFLAGS",         File(FileAttr::Flags)),
    mapped(FILEUSERNAME,      "FILEUSERNAME",      File(FileAttr::User)),
    mapped(FILEGROUPNAME,     "FILEGROUPNAME",     File(FileAttr::Group)),
    mapped(SOURCERPM,         "SOURCERPM",         Text(TextField::SourceRpm)),
    known(FILEVERIFYFLAGS,    "FILEVERIFYFLAGS"),
    mapped(ARCHIVESIZE,       "ARCHIVESIZE",       Int(IntField::ArchiveSize)),
    mapped(PROVIDENAME,       "PROVIDENAME",       Dependency(K::Provides, D::Name)),
    mapped(REQUIREFLAGS,      "REQUIREFLAGS",      Dependency(K::Requires, D::Flags)),
    mapped(REQUIRENAME,       "REQUIRENAME",       Dependency(K::Requires, D::Name)),
    mapped(REQUIREVERSION,    "REQUIREVERSION",    Dependency(K::Requires, D::Version)),
    mapped(CONFLICTFLAGS,     "CONFLICTFLAGS",     Dependency(K::Conflicts, D::Flags)),
    mapped(CONFLICTNAME,      "CONFLICTNAME",      Dependency(K::Conflicts, D::Name)),
    mapped(CONFLICTVERSION,   "CONFLICTVERSION",   Dependency(K::Conflicts, D::Version)),
    known(RPMVERSION,         "RPMVERSION"),
    mapped(CHANGELOGTIME,     "CHANGELOGTIME",     Changelog(ChangelogAttr::Time)),
    mapped(CHANGELOGNAME,     "CHANGELOGNAME",     Changelog(ChangelogAttr::Name)),
    mapped(CHANGELOGTEXT,     "CHANGELOGTEXT",     Changelog(ChangelogAttr::Text)),
    known(PREINPROG,          "PREINPROG"),
    known(POSTINPROG,         "POSTINPROG"),
    known(PREUNPROG,          "PREUNPROG"),
    known(POSTUNPROG,         "POSTUNPROG"),
    mapped(OBSOLETENAME,      "OBSOLETENAME",      Dependency(K::Obsoletes, D::Name)),
    mapped(COOKIE,            "COOKIE",            Text(TextField::Cookie)),
    known(FILEDEVICES,        "FILEDEVICES"),
    known(FILEINODES,         "FILEINODES"),
    known(FILELANGS,          "FILELANGS"),
    mapped(PROVIDEFLAGS,      "PROVIDEFLAGS",      Dependency(K::Provides, D::Flags)),
    mapped(PROVIDEVERSION,    "PROVIDEVERSION",    Dependency(K::Provides, D::Version)),
    mapped(OBSOLETEFLAGS,     "OBSOLETEFLAGS",     Dependency(K::Obsoletes, D::Flags)),
    mapped(OBSOLETEVERSION,   "OBSOLETEVERSION",   Dependency(K::Obsoletes, D::Version)),
    mapped(DIRINDEXES,        "DIRINDEXES",        FileName(FileNameSource::DirIndexes)),
    mapped(BASENAMES,         "BASENAMES",         FileName(FileNameSource::BaseNames)),
    mapped(DIRNAMES,          "DIRNAMES",          FileName(FileNameSource::DirNames)),
    mapped(OPTFLAGS,          "OPTFLAGS",          Text(TextField::OptFlags)),
    mapped(DISTURL,           "DISTURL",           Text(TextField::DistUrl)),
    mapped(PAYLOADFORMAT,     "PAYLOADFORMAT",     Text(TextField::PayloadFormat)),
    mapped(PAYLOADCOMPRESSOR, "PAYLOADCOMPRESSOR", Text(TextField::PayloadCompressor)),
    known(PAYLOADFLAGS,       "PAYLOADFLAGS"),
    known(RHNPLATFORM,        "RHNPLATFORM"),
    mapped(PLATFORM,          "PLATFORM",          Text(TextField::Platform)),
];

pub fn lookup(tag: i32) -> Option<&'static TagInfo> {
    TAGS.binary_search_by_key(&tag, |info| info.tag)
        .ok()
        .map(|i| &TAGS[i])
}

pub fn name(tag: i32) -> Option<&'static str> {
    lookup(tag).map(|info| info.name)
}

pub fn target(tag: i32) -> Option<Target> {
    lookup(tag).and_then(|info| info.target)
}
