#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::pak::codec;
use crate::pak::error::{ArchiveError, CodecError};
use crate::pak::format::{CompressionMethod, DirEntry, HEADER_LEN};
use crate::pak::read::read_archive;
use crate::pak::stream::PakStream;

/// How an [`Archive`] reads its container bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackingMode {
    /// Keep a read-only file handle and seek per access.
    Disk,
    /// Slurp the whole container into memory at construction.
    Memory,
}

#[derive(Debug)]
enum Backing {
    Disk(File),
    Memory(Vec<u8>),
}

impl Backing {
    fn read_range(&mut self, offset: u64, len: u64) -> Result<Vec<u8>, ArchiveError> {
        match self {
            Backing::Disk(file) => {
                file.seek(SeekFrom::Start(offset))
                    .map_err(ArchiveError::Read)?;
                let mut buf = vec![0u8; len as usize];
                file.read_exact(&mut buf).map_err(ArchiveError::Read)?;
                Ok(buf)
            }
            Backing::Memory(data) => {
                let end = offset
                    .checked_add(len)
                    .filter(|&end| end <= data.len() as u64)
                    .ok_or_else(|| {
                        ArchiveError::Read(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "entry data out of bounds",
                        ))
                    })?;
                Ok(data[offset as usize..end as usize].to_vec())
            }
        }
    }
}

/// Random-access reader over one `.pak` container.
///
/// The directory is loaded eagerly at construction; a value either has a
/// fully parsed directory or was never created. Not internally
/// synchronized: share across threads only behind external locking.
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    backing: Backing,
    directory: HashMap<String, DirEntry>,
}

impl Archive {
    pub fn new(path: impl AsRef<Path>, mode: BackingMode) -> Result<Archive, ArchiveError> {
        let path = path.as_ref().to_path_buf();

        match mode {
            BackingMode::Disk => {
                let file = File::open(&path).map_err(|e| open_error(e, &path))?;
                let mut reader = BufReader::new(file);
                let directory = read_archive(&mut reader)?;
                Ok(Archive {
                    path,
                    backing: Backing::Disk(reader.into_inner()),
                    directory,
                })
            }
            BackingMode::Memory => {
                let data = fs::read(&path).map_err(|e| open_error(e, &path))?;
                if (data.len() as u64) < HEADER_LEN {
                    return Err(ArchiveError::InvalidFormat(format!(
                        "{} bytes is smaller than the header",
                        data.len()
                    )));
                }
                let directory = read_archive(&mut Cursor::new(data.as_slice()))?;
                Ok(Archive {
                    path,
                    backing: Backing::Memory(data),
                    directory,
                })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, name: &str) -> bool {
        self.directory.contains_key(name)
    }

    /// Entry names, in no particular order.
    pub fn list_files(&self) -> Vec<String> {
        self.directory.keys().cloned().collect()
    }

    pub fn entry_count(&self) -> usize {
        self.directory.len()
    }

    /// Read and (if needed) decompress one entry into a seekable stream.
    /// An unrecognized compression tag is reported here, per entry, not
    /// at directory load.
    pub fn open(&mut self, name: &str) -> Result<PakStream, ArchiveError> {
        let entry = self
            .directory
            .get(name)
            .ok_or_else(|| ArchiveError::EntryNotFound(name.to_owned()))?;

        let method = CompressionMethod::from_u8(entry.compression)
            .ok_or(CodecError::InvalidMethod(entry.compression))?;

        let data = self
            .backing
            .read_range(entry.data_offset, entry.compressed_size)?;

        if method == CompressionMethod::None {
            return Ok(PakStream::new(data));
        }

        let raw = codec::decompress(&data, method, entry.uncompressed_size as usize)?;
        Ok(PakStream::new(raw))
    }
}

fn open_error(e: io::Error, path: &Path) -> ArchiveError {
    if e.kind() == io::ErrorKind::NotFound {
        ArchiveError::FileNotFound(path.to_path_buf())
    } else {
        ArchiveError::Read(e)
    }
}
