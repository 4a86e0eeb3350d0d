#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

use crate::pak::error::ArchiveError;
use crate::pak::format::{DirEntry, Header, MAGIC, MAX_NAME_LEN, VERSION};
use crate::pak::io::{read_u32, read_u64, read_u8};

pub(crate) fn read_header(r: &mut impl Read) -> Result<Header, ArchiveError> {
    let magic = read_u32(r).map_err(ArchiveError::Read)?;
    if magic != MAGIC {
        return Err(ArchiveError::InvalidFormat(format!(
            "bad magic 0x{magic:08X}"
        )));
    }

    let version = read_u32(r).map_err(ArchiveError::Read)?;
    if version != VERSION {
        return Err(ArchiveError::InvalidFormat(format!(
            "unsupported version {version}"
        )));
    }

    let directory_offset = read_u64(r).map_err(ArchiveError::Read)?;
    let directory_count = read_u32(r).map_err(ArchiveError::Read)?;
    let _reserved = read_u32(r).map_err(ArchiveError::Read)?;

    Ok(Header {
        directory_offset,
        directory_count,
    })
}

/// Decode the directory table into a name → entry map.
///
/// Entries whose name length field is zero or at least [`MAX_NAME_LEN`] are
/// malformed: the declared name bytes and the fixed fields are still
/// consumed, keeping the loop framed, but nothing is inserted. Duplicate
/// names keep the last occurrence.
pub(crate) fn read_directory(
    r: &mut (impl Read + Seek),
    header: &Header,
) -> Result<HashMap<String, DirEntry>, ArchiveError> {
    r.seek(SeekFrom::Start(header.directory_offset))
        .map_err(ArchiveError::Read)?;

    let mut directory = HashMap::with_capacity(header.directory_count as usize);

    for _ in 0..header.directory_count {
        let name_len = read_u32(r).map_err(ArchiveError::Read)?;

        let name = if name_len > 0 && name_len < MAX_NAME_LEN {
            let mut buf = vec![0u8; name_len as usize];
            r.read_exact(&mut buf).map_err(ArchiveError::Read)?;
            String::from_utf8_lossy(&buf).into_owned()
        } else {
            if name_len > 0 {
                r.seek(SeekFrom::Current(name_len as i64))
                    .map_err(ArchiveError::Read)?;
            }
            String::new()
        };

        let data_offset = read_u64(r).map_err(ArchiveError::Read)?;
        let compressed_size = read_u64(r).map_err(ArchiveError::Read)?;
        let uncompressed_size = read_u64(r).map_err(ArchiveError::Read)?;
        let compression = read_u8(r).map_err(ArchiveError::Read)?;

        if name.is_empty() {
            continue;
        }

        directory.insert(
            name,
            DirEntry {
                data_offset,
                compressed_size,
                uncompressed_size,
                compression,
            },
        );
    }

    Ok(directory)
}

pub(crate) fn read_archive(
    r: &mut (impl Read + Seek),
) -> Result<HashMap<String, DirEntry>, ArchiveError> {
    r.seek(SeekFrom::Start(0)).map_err(ArchiveError::Read)?;
    let header = read_header(r)?;
    read_directory(r, &header)
}
