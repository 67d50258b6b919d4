mod common;

use std::io::Write;

use common::{PackageBuilder, hello_package};
use rpmpeek::{
    BoundsViolation, DecodeOptions, Dependency, Error, ErrorKind, FormatViolation, RpmParser,
    Stage, decode, decode_file, decode_with,
};

#[test]
fn decodes_complete_package() {
    let package = decode(&hello_package().build()[..]).unwrap();

    assert_eq!(package.rpm_version, "3.0");
    assert_eq!(package.nvra(), "hello-2.12-1.fc39.x86_64");
    assert_eq!(package.summary, "Prints a familiar, friendly greeting");
    assert_eq!(
        package.description,
        "The GNU Hello program produces a familiar greeting."
    );
    assert_eq!(package.license, "GPL-3.0-or-later");
    assert_eq!(package.homepage, "https://www.gnu.org/software/hello/");
    assert_eq!(package.source_rpm, "hello-2.12-1.fc39.src.rpm");
    assert_eq!(package.build_host, "buildhost.example.org");
    assert_eq!(package.build_time.unwrap().timestamp(), 1_700_000_000);
    assert_eq!(package.size, 185_446);
    assert_eq!(package.archive_size, 190_000);
    assert_eq!(package.os, "linux");
    assert_eq!(package.payload_compressor, "zstd");
    assert!(package.filename.is_none());
    assert!(package.modified.is_none());

    let names: Vec<_> = package.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["/usr/bin/hello", "/usr/share/doc/hello/hello"]);
    assert_eq!(package.files[0].size, 72_000);
    assert_eq!(package.files[0].user, "root");
    assert!(package.files[1].is_doc());

    assert_eq!(package.provides.len(), 2);
    assert_eq!(
        package.provides[1],
        Dependency {
            name: "hello(x86-64)".to_string(),
            flags: 8,
            version: "2.12-1.fc39".to_string(),
        }
    );
    assert_eq!(package.requires[0].name, "/bin/sh");
    assert_eq!(package.requires[0].version, "");
    assert!(package.conflicts.is_empty());
    assert!(package.obsoletes.is_empty());

    assert_eq!(package.changelog.len(), 1);
    assert_eq!(package.changelog[0].time.timestamp(), 1_690_000_000);
    assert_eq!(package.changelog[0].text, "- Update to 2.12");
}

#[test]
fn decoding_is_deterministic() {
    let bytes = hello_package().build();
    assert_eq!(decode(&bytes[..]).unwrap(), decode(&bytes[..]).unwrap());
}

#[test]
fn each_lead_check_is_a_format_violation() {
    let cases: &[(usize, &[u8], FormatViolation)] = &[
        (0, &[0, 0, 0, 0], FormatViolation::LeadMagic(0)),
        (4, &[4], FormatViolation::MajorVersion(4)),
        (5, &[1], FormatViolation::MinorVersion(1)),
        (6, &[0, 1], FormatViolation::PackageType(1)),
        (76, &[0, 2], FormatViolation::Os(2)),
        (78, &[0, 1], FormatViolation::SignatureType(1)),
    ];

    for (at, bytes, expected) in cases {
        let mut builder = hello_package();
        builder.set_lead(*at, bytes);
        let err = decode(&builder.build()[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format, "{:?}", expected);
        assert_eq!(err.stage(), Stage::Lead);
        assert!(
            matches!(err, Error::Format { violation, .. } if violation == *expected),
            "{:?}",
            expected
        );
    }
}

#[test]
fn metadata_magic_mismatch_is_format_violation() {
    let mut builder = hello_package();
    builder.metadata.magic = Some(0x8eade802);
    let err = decode(&builder.build()[..]).unwrap_err();
    assert_eq!(err.stage(), Stage::MetadataHeader);
    assert!(matches!(
        err,
        Error::Format {
            violation: FormatViolation::SectionMagic(0x8eade802),
            ..
        }
    ));
}

#[test]
fn signature_magic_mismatch_is_format_violation() {
    let mut builder = hello_package();
    builder.signature.magic = Some(0);
    let err = decode(&builder.build()[..]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.stage(), Stage::SignatureHeader);
}

#[test]
fn negative_envelope_fields_are_rejected() {
    let mut builder = hello_package();
    builder.metadata.index_count = Some(-1);
    let err = decode(&builder.build()[..]).unwrap_err();
    assert!(matches!(
        err,
        Error::Format {
            violation: FormatViolation::NegativeIndexCount(-1),
            ..
        }
    ));

    let mut builder = hello_package();
    builder.signature.data_size = Some(-16);
    let err = decode(&builder.build()[..]).unwrap_err();
    assert_eq!(err.stage(), Stage::SignatureHeader);
    assert!(matches!(
        err,
        Error::Format {
            violation: FormatViolation::NegativeDataSize(-16),
            ..
        }
    ));
}

#[test]
fn signature_skip_consumes_padded_body_exactly() {
    let builder = hello_package();
    let bytes = builder.build();
    // 2 entries + 9 data bytes = 41, padded to 48
    assert_eq!(builder.signature.padded_body_len(), 48);

    let mut parser = RpmParser::new(&bytes[..]);
    parser.read_lead().unwrap();
    let header = parser.skip_signature().unwrap();
    assert_eq!(header.padded_body_len(), 48);
    // the next envelope must start right where the padding ends
    let metadata = parser.read_section_header(Stage::MetadataHeader).unwrap();
    assert_eq!(metadata.index_count as usize, builder.metadata.entries.len());
}

#[test]
fn truncated_signature_section_is_io_error() {
    let builder = hello_package();
    let bytes = builder.build();
    let cut = &bytes[..builder.metadata_offset() - 1];

    let err = decode(cut).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.stage(), Stage::SignatureBody);
}

#[test]
fn truncated_lead_and_index_are_io_errors() {
    let bytes = hello_package().build();
    let err = decode(&bytes[..50]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.stage(), Stage::Lead);

    let builder = hello_package();
    // envelope plus two and a half index entries
    let cut = builder.metadata_offset() + 16 + 40;
    let err = decode(&bytes[..cut]).unwrap_err();
    assert_eq!(err.stage(), Stage::MetadataIndex(2));
}

#[test]
fn truncated_data_blob_is_io_error() {
    let mut builder = hello_package();
    builder.payload.clear();
    let bytes = builder.build();
    let err = decode(&bytes[..bytes.len() - 3]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.stage(), Stage::MetadataData);
}

#[test]
fn offset_past_blob_is_bounds_violation() {
    let mut builder = PackageBuilder::new();
    builder.metadata.string(1000, "ok").entry(1014, 6, 400, 1);
    let err = decode(&builder.build()[..]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bounds);
    assert_eq!(err.stage(), Stage::Tag(1014));

    let mut builder = PackageBuilder::new();
    builder.metadata.ints(1028, &[1, 2]).entry(1037, 4, 4, 2);
    let err = decode(&builder.build()[..]).unwrap_err();
    assert!(matches!(
        err,
        Error::Bounds {
            stage: Stage::Tag(1037),
            violation: BoundsViolation::Overrun {
                offset: 4,
                len: 8,
                blob_len: 8
            }
        }
    ));
}

#[test]
fn text_values_are_trimmed() {
    let mut builder = PackageBuilder::new();
    builder.metadata.string(1014, "  MIT  ");
    assert_eq!(decode(&builder.build()[..]).unwrap().license, "MIT");
}

#[test]
fn legacy_file_names_are_used_verbatim() {
    let mut builder = PackageBuilder::new();
    builder
        .metadata
        .strings(1027, &["/etc/conf", "/bin/tool"])
        .ints(1028, &[5, 6]);
    let package = decode(&builder.build()[..]).unwrap();
    let names: Vec<_> = package.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["/etc/conf", "/bin/tool"]);
    assert_eq!(package.files[1].size, 6);
}

#[test]
fn directory_indexed_file_names() {
    let mut builder = PackageBuilder::new();
    builder
        .metadata
        .strings(1117, &["foo.txt", "bar.so"])
        .strings(1118, &["/usr/bin/", "/usr/lib/"])
        .ints(1116, &[0, 1]);
    let package = decode(&builder.build()[..]).unwrap();
    let names: Vec<_> = package.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["/usr/bin/foo.txt", "/usr/lib/bar.so"]);
}

#[test]
fn dependencies_merge_positionally() {
    let mut builder = PackageBuilder::new();
    builder
        .metadata
        .strings(1049, &["a", "b"])
        .ints(1048, &[1, 2])
        .strings(1050, &["1.0", "2.0"]);
    let package = decode(&builder.build()[..]).unwrap();
    let deps: Vec<_> = package
        .requires
        .iter()
        .map(|d| (d.name.as_str(), d.flags, d.version.as_str()))
        .collect();
    assert_eq!(deps, [("a", 1, "1.0"), ("b", 2, "2.0")]);
}

#[test]
fn unknown_tags_are_ignored() {
    let mut builder = PackageBuilder::new();
    builder
        .metadata
        .string(1000, "tool")
        .string(5_000_123, "future")
        .string(1023, "echo preinstall");
    let package = decode(&builder.build()[..]).unwrap();
    assert_eq!(package.name, "tool");
    assert!(package.files.is_empty());
}

#[test]
fn empty_metadata_section_decodes() {
    let package = decode(&PackageBuilder::new().build()[..]).unwrap();
    assert_eq!(package.rpm_version, "3.0");
    assert!(package.name.is_empty());
    assert!(package.build_time.is_none());
}

#[test]
fn oversized_metadata_is_rejected_before_reading() {
    let bytes = hello_package().build();
    let options = DecodeOptions::default().max_data_size(64);
    let err = decode_with(&bytes[..], &options).unwrap_err();
    assert_eq!(err.stage(), Stage::MetadataHeader);
    assert!(matches!(
        err,
        Error::Format {
            violation: FormatViolation::DataSizeLimit { limit: 64, .. },
            ..
        }
    ));
}

#[test]
fn decode_file_records_path_and_mtime() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&hello_package().build()).unwrap();
    file.flush().unwrap();

    let package = decode_file(file.path()).unwrap();
    assert_eq!(package.name, "hello");
    assert_eq!(package.filename.as_deref(), Some(file.path()));
    assert!(package.modified.is_some());
}

#[test]
fn missing_file_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = decode_file(dir.path().join("absent.rpm")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.stage(), Stage::Open);
}

#[test]
fn error_messages_name_the_stage() {
    let mut builder = PackageBuilder::new();
    builder.metadata.entry(1000, 6, 12, 1);
    let err = decode(&builder.build()[..]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "out of bounds extracting tag 1000 (NAME): read of 1 bytes at offset 12 overruns 0-byte blob"
    );
}
