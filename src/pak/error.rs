#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the compression codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported compression method: {0}")]
    InvalidMethod(u8),

    #[error("compress failed: {0}")]
    CompressFailed(std::io::Error),

    #[error("decompress failed: {0}")]
    DecompressFailed(std::io::Error),

    #[error("output buffer too small: need {need}, have {have}")]
    BufferTooSmall { need: usize, have: usize },
}

/// Errors from opening or reading an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid archive: {0}")]
    InvalidFormat(String),

    #[error("read error: {0}")]
    Read(std::io::Error),

    #[error("entry decompression failed: {0}")]
    Compression(#[from] CodecError),

    #[error("entry not found: {0}")]
    EntryNotFound(String),
}

/// Errors from building an archive.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("source file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("write error: {0}")]
    Write(std::io::Error),

    #[error("compression failed: {0}")]
    Compression(#[from] CodecError),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// Errors from the VFS overlay.
#[derive(Debug, Error)]
pub enum VfsError {
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("file not found in any mounted archive: {0}")]
    FileNotFound(String),

    #[error("cache error: {0}")]
    Cache(String),
}
