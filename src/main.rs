#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use datapak::pak::{Archive, ArchiveBuilder, BackingMode, CompressionMethod};

#[derive(Debug, Parser)]
#[command(name = "datapak", version, about = "DataPak (.pak) archive tool")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an archive from a directory.
    Create {
        /// Output .pak file.
        archive: PathBuf,
        /// Directory whose files become the archive entries.
        input_dir: PathBuf,
        /// Compression method: none or deflate.
        #[arg(default_value = "deflate")]
        compression: String,
    },

    /// List the entries in an archive.
    List {
        archive: PathBuf,
    },

    /// Extract one entry to a local file.
    Extract {
        archive: PathBuf,
        /// Virtual path of the entry inside the archive.
        file_path: String,
        /// Output path (defaults to the entry path).
        output: Option<PathBuf>,
    },

    /// Show archive information.
    Info {
        archive: PathBuf,
    },
}

fn parse_compression(name: &str) -> CompressionMethod {
    match name.to_ascii_lowercase().as_str() {
        "none" => CompressionMethod::None,
        "deflate" => CompressionMethod::Deflate,
        #[cfg(feature = "zstd")]
        "zstd" => CompressionMethod::Zstd,
        _ => CompressionMethod::Deflate,
    }
}

fn cmd_create(archive: &Path, input_dir: &Path, compression: &str) -> Result<(), Box<dyn Error>> {
    let method = parse_compression(compression);

    let mut builder = ArchiveBuilder::new(method);
    builder.add_directory(input_dir, "", None)?;

    println!(
        "Creating archive '{}' from '{}'...",
        archive.display(),
        input_dir.display()
    );
    println!("Compression: {}", method.name());
    println!("Files to archive: {}", builder.file_count());

    builder.build(archive)?;

    println!("Archive created successfully!");
    Ok(())
}

fn cmd_list(archive: &Path) -> Result<(), Box<dyn Error>> {
    let pak = Archive::new(archive, BackingMode::Disk)?;
    let mut files = pak.list_files();
    files.sort();

    println!("Files in archive '{}':", archive.display());
    println!("Total files: {}", files.len());
    println!();
    for file in &files {
        println!("  {file}");
    }
    Ok(())
}

fn cmd_extract(
    archive: &Path,
    file_path: &str,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let mut pak = Archive::new(archive, BackingMode::Disk)?;
    let stream = pak.open(file_path)?;

    let output = output.unwrap_or_else(|| PathBuf::from(file_path));
    fs::write(&output, stream.as_bytes())?;

    println!("Extracted '{}' to '{}'", file_path, output.display());
    Ok(())
}

fn cmd_info(archive: &Path) -> Result<(), Box<dyn Error>> {
    let mut pak = Archive::new(archive, BackingMode::Disk)?;
    let size = fs::metadata(archive)?.len();

    println!("Archive Information");
    println!("===================");
    println!("File: {}", archive.display());
    println!("Size: {size} bytes");
    println!("Files: {}", pak.entry_count());
    println!("Format: DataPak (.pak)");

    let mut total_uncompressed: u64 = 0;
    for name in pak.list_files() {
        if let Ok(stream) = pak.open(&name) {
            total_uncompressed += stream.len();
        }
    }

    if total_uncompressed > 0 {
        let ratio = size as f64 / total_uncompressed as f64;
        println!("Uncompressed size: {total_uncompressed} bytes");
        println!("Compression ratio: {ratio:.2}:1");
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let res = match cli.cmd {
        Command::Create {
            archive,
            input_dir,
            compression,
        } => cmd_create(&archive, &input_dir, &compression),
        Command::List { archive } => cmd_list(&archive),
        Command::Extract {
            archive,
            file_path,
            output,
        } => cmd_extract(&archive, &file_path, output),
        Command::Info { archive } => cmd_info(&archive),
    };

    if let Err(e) = res {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
