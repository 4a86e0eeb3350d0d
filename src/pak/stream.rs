#![forbid(unsafe_code)]

use std::io::{self, Read, Seek, SeekFrom};

/// A positioned, read-only view over an owned byte buffer.
///
/// Reads advance the position and return 0 bytes at end-of-stream. Seeks
/// accept all three origins but must land inside `[0, len]`.
#[derive(Debug)]
pub struct PakStream {
    data: Vec<u8>,
    pos: u64,
}

impl PakStream {
    pub fn new(data: Vec<u8>) -> Self {
        PakStream { data, pos: 0 }
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    /// The full underlying buffer, independent of the read position.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Read for PakStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let start = self.pos.min(self.len()) as usize;
        let remaining = &self.data[start..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for PakStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target: i128 = match pos {
            SeekFrom::Start(off) => off as i128,
            SeekFrom::Current(off) => self.pos as i128 + off as i128,
            SeekFrom::End(off) => self.len() as i128 + off as i128,
        };

        if target < 0 || target > self.len() as i128 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("seek out of range: {target}"),
            ));
        }

        self.pos = target as u64;
        Ok(self.pos)
    }
}
