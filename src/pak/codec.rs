#![forbid(unsafe_code)]

//! Per-method compression and decompression of byte buffers.
//!
//! Deflate payloads are complete zlib streams, so `expected_len` on the
//! decode side is a capacity hint rather than a boundary.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::pak::error::CodecError;
use crate::pak::format::CompressionMethod;

pub fn compress(data: &[u8], method: CompressionMethod) -> Result<Vec<u8>, CodecError> {
    match method {
        CompressionMethod::None => Ok(data.to_vec()),
        CompressionMethod::Deflate => {
            let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len()), Compression::default());
            encoder
                .write_all(data)
                .map_err(CodecError::CompressFailed)?;
            encoder.finish().map_err(CodecError::CompressFailed)
        }
        CompressionMethod::Zstd => {
            #[cfg(feature = "zstd")]
            {
                zstd::encode_all(data, 0).map_err(CodecError::CompressFailed)
            }
            #[cfg(not(feature = "zstd"))]
            {
                Err(CodecError::InvalidMethod(CompressionMethod::Zstd as u8))
            }
        }
    }
}

pub fn decompress(
    data: &[u8],
    method: CompressionMethod,
    expected_len: usize,
) -> Result<Vec<u8>, CodecError> {
    match method {
        CompressionMethod::None => Ok(data.to_vec()),
        CompressionMethod::Deflate => {
            let mut decoder = ZlibDecoder::new(data);
            let mut out = Vec::with_capacity(expected_len);
            decoder
                .read_to_end(&mut out)
                .map_err(CodecError::DecompressFailed)?;
            Ok(out)
        }
        CompressionMethod::Zstd => {
            #[cfg(feature = "zstd")]
            {
                zstd::decode_all(data).map_err(CodecError::DecompressFailed)
            }
            #[cfg(not(feature = "zstd"))]
            {
                Err(CodecError::InvalidMethod(CompressionMethod::Zstd as u8))
            }
        }
    }
}
