//! Main entry point for the rpmpeek CLI application.
//!
//! This binary prints the metadata of one or more RPM packages, either as
//! human-readable text or as JSON lines.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rpmpeek::rpm::tags;
use rpmpeek::{Cli, LocalPackageFile, Package, RpmParser};

/// Application entry point.
///
/// Every file is processed even if an earlier one fails; the exit status is
/// non-zero when any of them could not be decoded.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut failed = 0usize;
    let multiple_files = cli.files.len() > 1;

    for path in &cli.files {
        if let Err(e) = process_package(path, &cli, multiple_files) {
            failed += 1;
            eprintln!("rpmpeek: {:#}", e);
        }
    }

    if failed > 0 {
        warn!(failed, total = cli.files.len(), "some packages could not be read");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Decode one package and print what the CLI options ask for.
///
/// # Arguments
///
/// * `path` - Package file to read
/// * `cli` - Parsed command-line arguments
/// * `show_filename` - If true, print a marker line before the output
fn process_package(path: &Path, cli: &Cli, show_filename: bool) -> Result<()> {
    if cli.dump_index {
        if show_filename {
            println!("--- {} ---", path.display());
        }
        return dump_index(path, cli);
    }

    let package = rpmpeek::decode_file_with(path, &cli.decode_options())
        .with_context(|| format!("{}", path.display()))?;

    // JSON mode: one object per line, nothing else on stdout
    if cli.json {
        println!("{}", serde_json::to_string(&package)?);
        return Ok(());
    }

    if show_filename {
        println!("--- {} ---", path.display());
    }

    let listing = cli.list || cli.deps || cli.changelog;
    if !listing {
        print_summary(&package);
    }
    if cli.list {
        print_files(&package);
    }
    if cli.deps {
        print_dependencies(&package);
    }
    if cli.changelog {
        print_changelog(&package);
    }

    Ok(())
}

/// Print the descriptive fields in the layout of `rpm -qi`.
fn print_summary(package: &Package) {
    let date = |t: Option<chrono::DateTime<chrono::Utc>>| {
        t.map(|t| t.format("%a %d %b %Y %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };
    let none = |s: &str| {
        if s.is_empty() {
            "(none)".to_string()
        } else {
            s.to_string()
        }
    };

    println!("Name        : {}", package.name);
    println!("Version     : {}", package.version);
    println!("Release     : {}", package.release);
    println!("Architecture: {}", none(&package.architecture));
    println!("Group       : {}", none(&package.group));
    println!("Size        : {}", format_size(package.size));
    println!("License     : {}", none(&package.license));
    println!("Source RPM  : {}", none(&package.source_rpm));
    println!("Build Date  : {}", date(package.build_time));
    println!("Build Host  : {}", none(&package.build_host));
    println!("Packager    : {}", none(&package.packager));
    println!("Vendor      : {}", none(&package.vendor));
    println!("URL         : {}", none(&package.homepage));
    println!("Summary     : {}", package.summary);
    println!("Description :");
    println!("{}", package.description);
}

/// List files with their size and a short flag marker.
///
/// Markers: `c` config, `d` documentation, `g` ghost (not in the payload).
fn print_files(package: &Package) {
    println!("{:>10}  {:<3}  Name", "Size", "Flg");
    println!("{}", "-".repeat(60));

    let mut total = 0i64;
    for file in &package.files {
        let marker: String = [
            (file.is_config(), 'c'),
            (file.is_doc(), 'd'),
            (file.is_ghost(), 'g'),
        ]
        .iter()
        .map(|&(set, c)| if set { c } else { '-' })
        .collect();

        let name = if file.link_to.is_empty() {
            file.name.clone()
        } else {
            format!("{} -> {}", file.name, file.link_to)
        };
        println!("{:>10}  {}  {}", file.size, marker, name);
        total += file.size;
    }

    println!("{}", "-".repeat(60));
    println!("{:>10}       {} files", total, package.files.len());
}

fn print_dependencies(package: &Package) {
    let lists = [
        ("requires", &package.requires),
        ("provides", &package.provides),
        ("conflicts", &package.conflicts),
        ("obsoletes", &package.obsoletes),
    ];
    for (label, deps) in lists {
        for dep in deps {
            let op = sense_operator(dep.flags);
            if dep.version.is_empty() || op.is_empty() {
                println!("{:<10}{}", label, dep.name);
            } else {
                println!("{:<10}{} {} {}", label, dep.name, op, dep.version);
            }
        }
    }
}

fn print_changelog(package: &Package) {
    for entry in &package.changelog {
        println!("* {} {}", entry.time.format("%a %b %d %Y"), entry.name);
        println!("{}", entry.text);
        println!();
    }
}

/// Print the raw metadata index table.
///
/// Useful for looking at tags this tool does not surface.
fn dump_index(path: &Path, cli: &Cli) -> Result<()> {
    let file = LocalPackageFile::open(path).with_context(|| format!("{}", path.display()))?;
    let mut parser = RpmParser::with_options(file, cli.decode_options());

    let lead = parser
        .read_lead()
        .with_context(|| format!("{}", path.display()))?;
    parser
        .skip_signature()
        .with_context(|| format!("{}", path.display()))?;
    let (entries, blob) = parser
        .read_metadata()
        .with_context(|| format!("{}", path.display()))?;

    println!(
        "lead {} ({}), {} entries, {} data bytes",
        lead.version(),
        lead.name(),
        entries.len(),
        blob.len()
    );
    println!(
        "{:>6}  {:<18}  {:<12}  {:>8}  {:>6}",
        "Tag", "Name", "Type", "Offset", "Count"
    );
    for entry in &entries {
        println!(
            "{:>6}  {:<18}  {:<12}  {:>8}  {:>6}",
            entry.tag,
            tags::name(entry.tag).unwrap_or("?"),
            entry.kind.name(),
            entry.offset,
            entry.count
        );
    }

    Ok(())
}

/// Comparison operator encoded in the RPMSENSE_LESS/GREATER/EQUAL bits.
fn sense_operator(flags: i32) -> &'static str {
    const LESS: i32 = 0x02;
    const GREATER: i32 = 0x04;
    const EQUAL: i32 = 0x08;

    match flags & (LESS | GREATER | EQUAL) {
        f if f == LESS => "<",
        f if f == GREATER => ">",
        f if f == EQUAL => "=",
        f if f == LESS | EQUAL => "<=",
        f if f == GREATER | EQUAL => ">=",
        _ => "",
    }
}

/// Format a byte size into a human-readable string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: i64) -> String {
    const KB: i64 = 1024;
    const MB: i64 = KB * 1024;
    const GB: i64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
