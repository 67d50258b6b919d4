//! Turns metadata index entries into a [`Package`].
//!
//! Scalars are written straight onto the package. Collections (files,
//! dependencies, changelog) are stored in the section as parallel arrays,
//! one tag per attribute; the first tag seen for a collection fixes its
//! length and every later tag fills its attribute position by position.
//! File names are resolved last because they may come from either the
//! modern base/dir/index triple or the legacy full path array.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use super::blob::DataBlob;
use super::error::{BoundsViolation, Error, Result, Stage};
use super::package::{ChangelogEntry, Dependency, FileEntry, Package};
use super::structures::IndexEntry;
use super::tags::{
    self, ChangelogAttr, DependencyAttr, DependencyKind, FileAttr, FileNameSource, IntField,
    Target, TextField,
};

type SlotResult<T> = std::result::Result<T, BoundsViolation>;

/// Fixed-size collection allocated by the first attribute written to it.
#[derive(Debug)]
struct Slots<T>(Option<Vec<T>>);

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Slots(None)
    }
}

impl<T: Default> Slots<T> {
    fn fill<V>(&mut self, values: Vec<V>, mut set: impl FnMut(&mut T, V)) -> SlotResult<()> {
        let items = self
            .0
            .get_or_insert_with(|| values.iter().map(|_| T::default()).collect());
        if items.len() != values.len() {
            return Err(BoundsViolation::CountMismatch {
                expected: items.len(),
                found: values.len(),
            });
        }
        for (item, value) in items.iter_mut().zip(values) {
            set(item, value);
        }
        Ok(())
    }

    fn into_vec(self) -> Vec<T> {
        self.0.unwrap_or_default()
    }
}

/// Scratch inputs for file name reconstruction.
#[derive(Debug, Default)]
struct FileNames {
    base_names: Option<Vec<String>>,
    dir_names: Option<Vec<String>>,
    dir_indexes: Option<Vec<i32>>,
    old_file_names: Option<Vec<String>>,
}

/// Single-use builder for one metadata section.
pub struct Assembler<'a> {
    blob: &'a DataBlob,
    package: Package,
    files: Slots<FileEntry>,
    dependencies: [Slots<Dependency>; 4],
    changelog: Slots<ChangelogEntry>,
    file_names: FileNames,
}

impl<'a> Assembler<'a> {
    /// Start assembling onto `package`, which may already carry lead and
    /// file-level fields.
    pub fn new(blob: &'a DataBlob, package: Package) -> Self {
        Self {
            blob,
            package,
            files: Slots::default(),
            dependencies: Default::default(),
            changelog: Slots::default(),
            file_names: FileNames::default(),
        }
    }

    /// Apply one index entry. Tags without a target are skipped.
    pub fn dispatch(&mut self, entry: &IndexEntry) -> Result<()> {
        let Some(target) = tags::target(entry.tag) else {
            trace!(
                tag = entry.tag,
                name = tags::name(entry.tag).unwrap_or("unknown"),
                "skipping tag"
            );
            return Ok(());
        };
        trace!(
            tag = entry.tag,
            offset = entry.offset,
            count = entry.count,
            ?target,
            "dispatching tag"
        );
        self.apply(target, entry)
            .map_err(|violation| Error::bounds(Stage::Tag(entry.tag), violation))
    }

    fn apply(&mut self, target: Target, entry: &IndexEntry) -> SlotResult<()> {
        let blob = self.blob;
        let (offset, count) = (entry.offset, entry.count);

        match target {
            Target::Text(field) => *self.text_field(field) = blob.string(offset)?,
            Target::Int(field) => {
                let value = blob.int32(offset)?;
                match field {
                    IntField::BuildTime => self.package.build_time = Some(timestamp(value)),
                    IntField::Size => self.package.size = widen(value),
                    IntField::ArchiveSize => self.package.archive_size = widen(value),
                }
            }
            Target::Dependency(kind, attr) => {
                let slots = &mut self.dependencies[dependency_slot(kind)];
                match attr {
                    DependencyAttr::Name => {
                        slots.fill(blob.string_array(offset, count)?, |d, v| d.name = v)?
                    }
                    DependencyAttr::Flags => {
                        slots.fill(blob.int32_array(offset, count)?, |d, v| d.flags = v)?
                    }
                    DependencyAttr::Version => {
                        slots.fill(blob.string_array(offset, count)?, |d, v| d.version = v)?
                    }
                }
            }
            Target::File(attr) => {
                let files = &mut self.files;
                match attr {
                    FileAttr::Flags => {
                        files.fill(blob.int32_array(offset, count)?, |f, v| f.flags = v)?
                    }
                    FileAttr::Size => {
                        files.fill(blob.int32_array(offset, count)?, |f, v| f.size = widen(v))?
                    }
                    FileAttr::Mtime => files.fill(blob.int32_array(offset, count)?, |f, v| {
                        f.mtime = Some(timestamp(v))
                    })?,
                    FileAttr::Digest => {
                        files.fill(blob.string_array(offset, count)?, |f, v| f.digest = v)?
                    }
                    FileAttr::LinkTo => {
                        files.fill(blob.string_array(offset, count)?, |f, v| f.link_to = v)?
                    }
                    FileAttr::User => {
                        files.fill(blob.string_array(offset, count)?, |f, v| f.user = v)?
                    }
                    FileAttr::Group => {
                        files.fill(blob.string_array(offset, count)?, |f, v| f.group = v)?
                    }
                }
            }
            Target::Changelog(attr) => {
                let changelog = &mut self.changelog;
                match attr {
                    ChangelogAttr::Time => changelog.fill(blob.int32_array(offset, count)?, |c, v| {
                        c.time = timestamp(v)
                    })?,
                    ChangelogAttr::Name => {
                        changelog.fill(blob.string_array(offset, count)?, |c, v| c.name = v)?
                    }
                    ChangelogAttr::Text => {
                        changelog.fill(blob.string_array(offset, count)?, |c, v| c.text = v)?
                    }
                }
            }
            Target::FileName(source) => {
                let names = &mut self.file_names;
                match source {
                    FileNameSource::BaseNames => {
                        names.base_names = Some(blob.string_array(offset, count)?)
                    }
                    FileNameSource::DirNames => {
                        names.dir_names = Some(blob.string_array(offset, count)?)
                    }
                    FileNameSource::DirIndexes => {
                        names.dir_indexes = Some(blob.int32_array(offset, count)?)
                    }
                    FileNameSource::OldFileNames => {
                        names.old_file_names = Some(blob.string_array(offset, count)?)
                    }
                }
            }
        }
        Ok(())
    }

    fn text_field(&mut self, field: TextField) -> &mut String {
        let p = &mut self.package;
        match field {
            TextField::Name => &mut p.name,
            TextField::Version => &mut p.version,
            TextField::Release => &mut p.release,
            TextField::Summary => &mut p.summary,
            TextField::Description => &mut p.description,
            TextField::BuildHost => &mut p.build_host,
            TextField::Distribution => &mut p.distribution,
            TextField::Vendor => &mut p.vendor,
            TextField::License => &mut p.license,
            TextField::Packager => &mut p.packager,
            TextField::Group => &mut p.group,
            TextField::Homepage => &mut p.homepage,
            TextField::Os => &mut p.os,
            TextField::Architecture => &mut p.architecture,
            TextField::SourceRpm => &mut p.source_rpm,
            TextField::Cookie => &mut p.cookie,
            TextField::OptFlags => &mut p.optflags,
            TextField::DistUrl => &mut p.dist_url,
            TextField::PayloadFormat => &mut p.payload_format,
            TextField::PayloadCompressor => &mut p.payload_compressor,
            TextField::Platform => &mut p.platform,
        }
    }

    /// Resolve file names and hand over the finished package.
    pub fn finish(mut self) -> Result<Package> {
        let FileNames {
            base_names,
            dir_names,
            dir_indexes,
            old_file_names,
        } = std::mem::take(&mut self.file_names);

        match (base_names, dir_names, dir_indexes, old_file_names) {
            (Some(base_names), Some(dir_names), Some(dir_indexes), _) => {
                let names = join_dir_names(base_names, &dir_names, dir_indexes)
                    .map_err(|v| Error::bounds(Stage::Tag(tags::DIRINDEXES), v))?;
                self.files
                    .fill(names, |f, name| f.name = name)
                    .map_err(|v| Error::bounds(Stage::Tag(tags::BASENAMES), v))?;
            }
            (_, _, _, Some(old_file_names)) => {
                self.files
                    .fill(old_file_names, |f, name| f.name = name)
                    .map_err(|v| Error::bounds(Stage::Tag(tags::OLDFILENAMES), v))?;
            }
            _ => {}
        }

        let [requires, provides, conflicts, obsoletes] = self.dependencies;
        let mut package = self.package;
        package.files = self.files.into_vec();
        package.requires = requires.into_vec();
        package.provides = provides.into_vec();
        package.conflicts = conflicts.into_vec();
        package.obsoletes = obsoletes.into_vec();
        package.changelog = self.changelog.into_vec();

        debug!(
            package = %package.nvra(),
            files = package.files.len(),
            requires = package.requires.len(),
            provides = package.provides.len(),
            changelog = package.changelog.len(),
            "assembled package"
        );
        Ok(package)
    }
}

/// `dir_names[dir_indexes[i]] + base_names[i]` for every file.
fn join_dir_names(
    base_names: Vec<String>,
    dir_names: &[String],
    dir_indexes: Vec<i32>,
) -> SlotResult<Vec<String>> {
    if dir_indexes.len() != base_names.len() {
        return Err(BoundsViolation::CountMismatch {
            expected: base_names.len(),
            found: dir_indexes.len(),
        });
    }
    base_names
        .into_iter()
        .zip(dir_indexes)
        .map(|(base, index)| {
            let dir = usize::try_from(index)
                .ok()
                .and_then(|i| dir_names.get(i))
                .ok_or(BoundsViolation::DirIndex {
                    index,
                    dirs: dir_names.len(),
                })?;
            Ok(format!("{}{}", dir, base))
        })
        .collect()
}

fn dependency_slot(kind: DependencyKind) -> usize {
    match kind {
        DependencyKind::Requires => 0,
        DependencyKind::Provides => 1,
        DependencyKind::Conflicts => 2,
        DependencyKind::Obsoletes => 3,
    }
}

fn timestamp(seconds: i32) -> DateTime<Utc> {
    DateTime::from_timestamp(i64::from(seconds), 0).unwrap_or_default()
}

/// Sizes are stored as unsigned 32-bit values.
fn widen(value: i32) -> i64 {
    i64::from(value as u32)
}
