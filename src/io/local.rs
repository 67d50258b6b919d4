use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Package file opened for one sequential decode
pub struct LocalPackageFile {
    reader: BufReader<File>,
    path: PathBuf,
    modified: Option<DateTime<Utc>>,
}

impl LocalPackageFile {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        // not every platform reports an mtime
        let modified = file.metadata()?.modified().ok().map(DateTime::<Utc>::from);
        Ok(Self {
            reader: BufReader::new(file),
            path: path.to_path_buf(),
            modified,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last modification time of the file, when the platform reports one
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }
}

impl Read for LocalPackageFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}
