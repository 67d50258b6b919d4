//! In-memory RPM package builder for integration tests.

#![allow(dead_code)]

pub const LEAD_MAGIC: u32 = 0xedab_eedb;
pub const HEADER_MAGIC: u32 = 0x8ead_e801;

const TYPE_INT32: i32 = 4;
const TYPE_STRING: i32 = 6;
const TYPE_BIN: i32 = 7;
const TYPE_STRING_ARRAY: i32 = 8;

/// Index entries plus data blob of one header section.
#[derive(Clone, Default)]
pub struct Section {
    pub entries: Vec<[i32; 4]>,
    pub data: Vec<u8>,
    pub magic: Option<u32>,
    pub index_count: Option<i32>,
    pub data_size: Option<i32>,
}

impl Section {
    pub fn string(&mut self, tag: i32, value: &str) -> &mut Self {
        let offset = self.data.len() as i32;
        self.data.extend_from_slice(value.as_bytes());
        self.data.push(0);
        self.entry(tag, TYPE_STRING, offset, 1)
    }

    pub fn strings(&mut self, tag: i32, values: &[&str]) -> &mut Self {
        let offset = self.data.len() as i32;
        for value in values {
            self.data.extend_from_slice(value.as_bytes());
            self.data.push(0);
        }
        self.entry(tag, TYPE_STRING_ARRAY, offset, values.len() as i32)
    }

    pub fn int32(&mut self, tag: i32, value: i32) -> &mut Self {
        self.ints(tag, &[value])
    }

    pub fn ints(&mut self, tag: i32, values: &[i32]) -> &mut Self {
        while self.data.len() % 4 != 0 {
            self.data.push(0);
        }
        let offset = self.data.len() as i32;
        for value in values {
            self.data.extend_from_slice(&value.to_be_bytes());
        }
        self.entry(tag, TYPE_INT32, offset, values.len() as i32)
    }

    pub fn bin(&mut self, tag: i32, bytes: &[u8]) -> &mut Self {
        let offset = self.data.len() as i32;
        self.data.extend_from_slice(bytes);
        self.entry(tag, TYPE_BIN, offset, bytes.len() as i32)
    }

    pub fn entry(&mut self, tag: i32, kind: i32, offset: i32, count: i32) -> &mut Self {
        self.entries.push([tag, kind, offset, count]);
        self
    }

    /// Envelope, index table and data blob, without trailing padding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.magic.unwrap_or(HEADER_MAGIC).to_be_bytes());
        out.extend_from_slice(&[0u8; 4]);
        let index_count = self.index_count.unwrap_or(self.entries.len() as i32);
        out.extend_from_slice(&index_count.to_be_bytes());
        let data_size = self.data_size.unwrap_or(self.data.len() as i32);
        out.extend_from_slice(&data_size.to_be_bytes());
        for entry in &self.entries {
            for field in entry {
                out.extend_from_slice(&field.to_be_bytes());
            }
        }
        out.extend_from_slice(&self.data);
        out
    }

    /// Bytes following the envelope that a reader has to skip, with padding.
    pub fn padded_body_len(&self) -> usize {
        (self.entries.len() * 16 + self.data.len()).div_ceil(8) * 8
    }
}

pub struct PackageBuilder {
    pub lead: [u8; 96],
    pub signature: Section,
    pub metadata: Section,
    pub payload: Vec<u8>,
}

impl PackageBuilder {
    /// A well-formed lead and a signature section whose body needs padding.
    pub fn new() -> Self {
        let mut lead = [0u8; 96];
        lead[0..4].copy_from_slice(&LEAD_MAGIC.to_be_bytes());
        lead[4] = 3;
        lead[8..10].copy_from_slice(&1i16.to_be_bytes());
        lead[10..24].copy_from_slice(b"hello-2.12-1\0\0");
        lead[76..78].copy_from_slice(&1i16.to_be_bytes());
        lead[78..80].copy_from_slice(&5i16.to_be_bytes());

        let mut signature = Section::default();
        signature
            .int32(1000, 4242)
            .bin(1004, &[0xde, 0xad, 0xbe, 0xef, 0x01]);

        Self {
            lead,
            signature,
            metadata: Section::default(),
            payload: b"\x1f\x8b payload bytes".to_vec(),
        }
    }

    pub fn set_lead(&mut self, at: usize, bytes: &[u8]) -> &mut Self {
        self.lead[at..at + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Offset of the metadata section in the built package.
    pub fn metadata_offset(&self) -> usize {
        96 + 16 + self.signature.padded_body_len()
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.lead.to_vec();
        let signature = self.signature.to_bytes();
        out.extend_from_slice(&signature);
        while out.len() < self.metadata_offset() {
            out.push(0);
        }
        out.extend_from_slice(&self.metadata.to_bytes());
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Metadata of a small but complete package.
pub fn hello_package() -> PackageBuilder {
    let mut builder = PackageBuilder::new();
    builder
        .metadata
        .bin(63, &[0u8; 16])
        .string(1000, "hello")
        .string(1001, "2.12")
        .string(1002, "1.fc39")
        .string(1004, "Prints a familiar, friendly greeting")
        .string(1005, "The GNU Hello program produces a familiar greeting.\n")
        .int32(1006, 1_700_000_000)
        .string(1007, "buildhost.example.org")
        .int32(1009, 185_446)
        .string(1011, "Fedora Project")
        .string(1014, "  GPL-3.0-or-later  ")
        .string(1015, "Fedora Project")
        .string(1016, "Unspecified")
        .string(1020, "https://www.gnu.org/software/hello/")
        .string(1021, "linux")
        .string(1022, "x86_64")
        .string(1044, "hello-2.12-1.fc39.src.rpm")
        .int32(1046, 190_000)
        .ints(1028, &[72_000, 0])
        .ints(1037, &[0, 2])
        .strings(1039, &["root", "root"])
        .strings(1040, &["root", "root"])
        .strings(1047, &["hello", "hello(x86-64)"])
        .ints(1112, &[8, 8])
        .strings(1113, &["2.12-1.fc39", "2.12-1.fc39"])
        .ints(1048, &[16384, 0])
        .strings(1049, &["/bin/sh", "libc.so.6()(64bit)"])
        .strings(1050, &["", ""])
        .ints(1080, &[1_690_000_000])
        .strings(1081, &["Jane Packager <jane@example.org> - 2.12-1"])
        .strings(1082, &["- Update to 2.12"])
        .ints(1116, &[0, 1])
        .strings(1117, &["hello", "hello"])
        .strings(1118, &["/usr/bin/", "/usr/share/doc/hello/"])
        .string(1124, "cpio")
        .string(1125, "zstd");
    builder
}
