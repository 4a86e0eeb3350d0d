#![forbid(unsafe_code)]

use std::fs::{self, File};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::pak::codec;
use crate::pak::error::BuildError;
use crate::pak::format::{CompressionMethod, MAGIC, MAX_NAME_LEN, VERSION};
use crate::pak::io::{write_u32, write_u64, write_u8};
use crate::pak::path::{normalize_archive_path, normalize_rel_path, prefixed};

#[derive(Debug, Clone)]
struct PendingFile {
    source: PathBuf,
    archive_path: String,
    method: CompressionMethod,
}

/// Collects `(source, archive_path, method)` entries and writes a container.
///
/// Container layout (all fields little-endian, no padding):
/// - header: `[u32 magic "PAKF"] [u32 version] [u64 directory_offset]
///   [u32 directory_count] [u32 reserved]`
/// - data region: each entry's (possibly compressed) bytes, in insertion
///   order, back to back
/// - directory: per entry `[u32 name_len] [name bytes] [u64 data_offset]
///   [u64 compressed_size] [u64 uncompressed_size] [u8 method]`
///
/// The header is written first with `directory_offset = 0` and rewritten
/// once the directory position is known.
pub struct ArchiveBuilder {
    files: Vec<PendingFile>,
    default_method: CompressionMethod,
}

impl ArchiveBuilder {
    pub fn new(default_method: CompressionMethod) -> Self {
        ArchiveBuilder {
            files: Vec::new(),
            default_method,
        }
    }

    /// Queue a single file. `method: None` inherits the builder default;
    /// `Some(CompressionMethod::None)` stores the file uncompressed.
    pub fn add_file(
        &mut self,
        source: impl Into<PathBuf>,
        archive_path: impl AsRef<str>,
        method: Option<CompressionMethod>,
    ) {
        self.files.push(PendingFile {
            source: source.into(),
            archive_path: normalize_archive_path(archive_path.as_ref()),
            method: method.unwrap_or(self.default_method),
        });
    }

    /// Queue every regular file under `dir`, with archive paths taken
    /// relative to `dir` and joined onto `prefix`.
    pub fn add_directory(
        &mut self,
        dir: impl AsRef<Path>,
        prefix: &str,
        method: Option<CompressionMethod>,
    ) -> Result<(), BuildError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(BuildError::InvalidPath(
                dir.to_string_lossy().into_owned(),
            ));
        }

        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| dir.to_path_buf());
                BuildError::FileNotFound(path)
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let rel = normalize_rel_path(dir, entry.path())?;
            self.add_file(entry.path(), prefixed(prefix, &rel), method);
        }

        Ok(())
    }

    pub fn set_default_compression(&mut self, method: CompressionMethod) {
        self.default_method = method;
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Write the container. Fail-fast: the first error aborts and leaves
    /// the output in its last flushed state.
    pub fn build(&self, output: impl AsRef<Path>) -> Result<(), BuildError> {
        let mut out = File::create(output).map_err(BuildError::Write)?;

        write_header(&mut out, 0, self.files.len() as u32)?;

        struct Written {
            archive_path: String,
            data_offset: u64,
            compressed_size: u64,
            uncompressed_size: u64,
            method: CompressionMethod,
        }

        let mut directory = Vec::with_capacity(self.files.len());

        for file in &self.files {
            let name_len = file.archive_path.len();
            if name_len == 0 || name_len >= MAX_NAME_LEN as usize {
                return Err(BuildError::InvalidPath(file.archive_path.clone()));
            }

            let raw = fs::read(&file.source)
                .map_err(|_| BuildError::FileNotFound(file.source.clone()))?;
            let uncompressed_size = raw.len() as u64;

            let payload = if file.method == CompressionMethod::None {
                raw
            } else {
                codec::compress(&raw, file.method)?
            };

            let data_offset = out.stream_position().map_err(BuildError::Write)?;
            out.write_all(&payload).map_err(BuildError::Write)?;

            directory.push(Written {
                archive_path: file.archive_path.clone(),
                data_offset,
                compressed_size: payload.len() as u64,
                uncompressed_size,
                method: file.method,
            });
        }

        let directory_offset = out.stream_position().map_err(BuildError::Write)?;

        for entry in &directory {
            let name = entry.archive_path.as_bytes();
            write_u32(&mut out, name.len() as u32).map_err(BuildError::Write)?;
            out.write_all(name).map_err(BuildError::Write)?;
            write_u64(&mut out, entry.data_offset).map_err(BuildError::Write)?;
            write_u64(&mut out, entry.compressed_size).map_err(BuildError::Write)?;
            write_u64(&mut out, entry.uncompressed_size).map_err(BuildError::Write)?;
            write_u8(&mut out, entry.method as u8).map_err(BuildError::Write)?;
        }

        out.seek(SeekFrom::Start(0)).map_err(BuildError::Write)?;
        write_header(&mut out, directory_offset, self.files.len() as u32)?;
        out.flush().map_err(BuildError::Write)?;

        Ok(())
    }
}

fn write_header(w: &mut File, directory_offset: u64, count: u32) -> Result<(), BuildError> {
    write_u32(w, MAGIC).map_err(BuildError::Write)?;
    write_u32(w, VERSION).map_err(BuildError::Write)?;
    write_u64(w, directory_offset).map_err(BuildError::Write)?;
    write_u32(w, count).map_err(BuildError::Write)?;
    write_u32(w, 0).map_err(BuildError::Write)?;
    Ok(())
}
