#![forbid(unsafe_code)]

//! DataPak: a read/write archive container (`.pak`) and a read-side
//! virtual filesystem that overlays multiple archives into one namespace.

pub mod pak;

pub use pak::{
    Archive, ArchiveBuilder, ArchiveError, BackingMode, BuildError, CodecError,
    CompressionMethod, PakStream, SearchOrder, Vfs, VfsError,
};
