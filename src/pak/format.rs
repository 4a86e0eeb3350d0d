#![forbid(unsafe_code)]

/// DataPak magic number, "PAKF" read as a little-endian u32.
pub const MAGIC: u32 = 0x5041_4B46;

/// Current container format version.
pub const VERSION: u32 = 1;

/// Fixed header size: magic, version, directory_offset, directory_count, reserved.
pub const HEADER_LEN: u64 = 4 + 4 + 8 + 4 + 4;

/// Directory entry names must be shorter than this; a length field of zero
/// or beyond this bound marks the entry as malformed.
pub const MAX_NAME_LEN: u32 = 4096;

/// Per-entry compression method tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompressionMethod {
    None = 0,
    Deflate = 1,
    Zstd = 2,
}

impl CompressionMethod {
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(CompressionMethod::None),
            1 => Some(CompressionMethod::Deflate),
            2 => Some(CompressionMethod::Zstd),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionMethod::None => "none",
            CompressionMethod::Deflate => "deflate",
            CompressionMethod::Zstd => "zstd",
        }
    }
}

/// Decoded archive header. Magic, version, and the reserved word are
/// validated (or emitted) at the I/O boundary and not retained.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header {
    pub directory_offset: u64,
    pub directory_count: u32,
}

/// One directory entry: a named span of the data region. The name is the
/// key of the directory map. The compression tag is kept as the raw wire
/// byte; it is only interpreted when the entry is opened.
#[derive(Debug, Clone)]
pub(crate) struct DirEntry {
    pub data_offset: u64,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub compression: u8,
}
