use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use super::error::{Error, FormatViolation, Result, Stage};

/// RPM value type codes stored in index entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    Null,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    String,
    Bin,
    StringArray,
    I18nString,
    Unknown(i32),
}

impl IndexType {
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => IndexType::Null,
            1 => IndexType::Char,
            2 => IndexType::Int8,
            3 => IndexType::Int16,
            4 => IndexType::Int32,
            5 => IndexType::Int64,
            6 => IndexType::String,
            7 => IndexType::Bin,
            8 => IndexType::StringArray,
            9 => IndexType::I18nString,
            _ => IndexType::Unknown(value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IndexType::Null => "NULL",
            IndexType::Char => "CHAR",
            IndexType::Int8 => "INT8",
            IndexType::Int16 => "INT16",
            IndexType::Int32 => "INT32",
            IndexType::Int64 => "INT64",
            IndexType::String => "STRING",
            IndexType::Bin => "BIN",
            IndexType::StringArray => "STRING_ARRAY",
            IndexType::I18nString => "I18NSTRING",
            IndexType::Unknown(_) => "UNKNOWN",
        }
    }
}

/// Package lead - 96 bytes
pub struct Lead {
    pub magic: u32,
    pub major: u8,
    pub minor: u8,
    pub package_type: i16,
    pub arch: i16,
    pub name: [u8; 66],
    pub os: i16,
    pub signature_type: i16,
}

impl Lead {
    pub const MAGIC: u32 = 0xedab_eedb;
    pub const SIZE: usize = 96;
    pub const MAJOR: u8 = 3;
    pub const MINOR: u8 = 0;
    pub const TYPE_BINARY: i16 = 0;
    pub const OS_LINUX: i16 = 1;
    pub const SIGNATURE_HEADER: i16 = 5;

    pub fn from_bytes(data: &[u8; Lead::SIZE]) -> Result<Self> {
        let mut cursor = Cursor::new(&data[..]);
        Self::parse(&mut cursor).map_err(|source| Error::Io {
            stage: Stage::Lead,
            source,
        })
    }

    fn parse(cursor: &mut Cursor<&[u8]>) -> std::io::Result<Self> {
        let magic = cursor.read_u32::<BigEndian>()?;
        let major = cursor.read_u8()?;
        let minor = cursor.read_u8()?;
        let package_type = cursor.read_i16::<BigEndian>()?;
        let arch = cursor.read_i16::<BigEndian>()?;
        let mut name = [0u8; 66];
        cursor.read_exact(&mut name)?;
        let os = cursor.read_i16::<BigEndian>()?;
        let signature_type = cursor.read_i16::<BigEndian>()?;
        // 16 reserved bytes follow

        Ok(Self {
            magic,
            major,
            minor,
            package_type,
            arch,
            name,
            os,
            signature_type,
        })
    }

    /// Check every marker this decoder depends on.
    pub fn validate(&self) -> Result<()> {
        let violation = if self.magic != Self::MAGIC {
            FormatViolation::LeadMagic(self.magic)
        } else if self.major != Self::MAJOR {
            FormatViolation::MajorVersion(self.major)
        } else if self.minor != Self::MINOR {
            FormatViolation::MinorVersion(self.minor)
        } else if self.package_type != Self::TYPE_BINARY {
            FormatViolation::PackageType(self.package_type)
        } else if self.os != Self::OS_LINUX {
            FormatViolation::Os(self.os)
        } else if self.signature_type != Self::SIGNATURE_HEADER {
            FormatViolation::SignatureType(self.signature_type)
        } else {
            return Ok(());
        };
        Err(Error::format(Stage::Lead, violation))
    }

    /// Format version as stored on the decoded package
    pub fn version(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Package name field, up to its first NUL
    pub fn name(&self) -> String {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        String::from_utf8_lossy(&self.name[..end]).to_string()
    }
}

/// Section envelope shared by the signature and metadata sections - 16 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub magic: u32,
    pub index_count: i32,
    pub data_size: i32,
}

impl SectionHeader {
    pub const MAGIC: u32 = 0x8ead_e801;
    pub const SIZE: usize = 16;

    /// Decode and validate an envelope. `stage` names the section in errors.
    pub fn from_bytes(data: &[u8; SectionHeader::SIZE], stage: Stage) -> Result<Self> {
        let mut cursor = Cursor::new(&data[..]);
        let parsed = Self::parse(&mut cursor).map_err(|source| Error::Io { stage, source })?;

        if parsed.magic != Self::MAGIC {
            return Err(Error::format(stage, FormatViolation::SectionMagic(parsed.magic)));
        }
        if parsed.index_count < 0 {
            return Err(Error::format(
                stage,
                FormatViolation::NegativeIndexCount(parsed.index_count),
            ));
        }
        if parsed.data_size < 0 {
            return Err(Error::format(
                stage,
                FormatViolation::NegativeDataSize(parsed.data_size),
            ));
        }
        Ok(parsed)
    }

    fn parse(cursor: &mut Cursor<&[u8]>) -> std::io::Result<Self> {
        let magic = cursor.read_u32::<BigEndian>()?;
        let _reserved = cursor.read_u32::<BigEndian>()?;
        Ok(Self {
            magic,
            index_count: cursor.read_i32::<BigEndian>()?,
            data_size: cursor.read_i32::<BigEndian>()?,
        })
    }

    /// Bytes occupied by the index table and data blob, without padding
    pub fn body_len(&self) -> u64 {
        self.index_count as u64 * IndexEntry::SIZE as u64 + self.data_size as u64
    }

    /// Body length rounded up so the next section starts on an 8-byte boundary
    pub fn padded_body_len(&self) -> u64 {
        self.body_len().div_ceil(8) * 8
    }
}

/// One index table entry - 16 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub tag: i32,
    pub kind: IndexType,
    pub offset: i32,
    pub count: i32,
}

impl IndexEntry {
    pub const SIZE: usize = 16;

    pub fn from_bytes(data: &[u8; IndexEntry::SIZE]) -> std::io::Result<Self> {
        let mut cursor = Cursor::new(&data[..]);
        Ok(Self {
            tag: cursor.read_i32::<BigEndian>()?,
            kind: IndexType::from_i32(cursor.read_i32::<BigEndian>()?),
            offset: cursor.read_i32::<BigEndian>()?,
            count: cursor.read_i32::<BigEndian>()?,
        })
    }
}
