#![forbid(unsafe_code)]

mod archive;
mod build;
pub mod codec;
mod error;
mod format;
mod io;
mod path;
mod read;
mod stream;
mod vfs;

pub use archive::{Archive, BackingMode};
pub use build::ArchiveBuilder;
pub use error::{ArchiveError, BuildError, CodecError, VfsError};
pub use format::{CompressionMethod, HEADER_LEN, MAGIC, MAX_NAME_LEN, VERSION};
pub use stream::PakStream;
pub use vfs::{SearchOrder, Vfs};
