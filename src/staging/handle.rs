use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::CompressionMethod;
use crate::error::CompressionError;
use crate::staging::container::{MAGIC, VERSION};
use crate::staging::io::ReadLeExt;

type Result<T> = std::result::Result<T, CompressionError>;

/// A staging container opened for streaming decompression. The method passed
/// at open time must match the one the container was written with.
#[derive(Debug)]
pub struct IoFileHandle {
    file: BufReader<File>,
    method: CompressionMethod,
    chunk_size: u32,
    total_len: u64,
}

impl IoFileHandle {
    pub fn open(path: &Path, method: CompressionMethod) -> Result<Self> {
        let mut file = BufReader::new(File::open(path)?);

        let mut magic = [0u8; 4];
        std::io::Read::read_exact(&mut file, &mut magic)?;
        if magic != MAGIC {
            return Err(CompressionError::Corrupt("bad container magic"));
        }
        if file.read_u16_le()? != VERSION {
            return Err(CompressionError::Corrupt("unsupported container version"));
        }
        let written = CompressionMethod::from_u8(file.read_u8()?)
            .ok_or(CompressionError::Corrupt("unknown compression method tag"))?;
        let _reserved = file.read_u8()?;
        if written != method {
            return Err(CompressionError::MethodMismatch {
                written,
                requested: method,
            });
        }
        let chunk_size = file.read_u32_le()?;
        let total_len = file.read_u64_le()?;
        if total_len == 0 {
            return Err(CompressionError::Corrupt("container holds no data"));
        }

        Ok(Self {
            file,
            method,
            chunk_size,
            total_len,
        })
    }

    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Reads exactly `len` decompressed bytes starting at decompressed
    /// `offset`. Chunks are walked sequentially from the start of the
    /// container, so this consumes the handle's read position.
    pub fn read_decompressed(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        if offset + len as u64 > self.total_len {
            return Err(CompressionError::Corrupt("read past end of container"));
        }

        let mut out = Vec::with_capacity(len);
        let mut pos = 0u64;
        while out.len() < len {
            let uncompressed_len = self.file.read_u32_le()? as usize;
            if uncompressed_len as u64 > self.chunk_size as u64 {
                return Err(CompressionError::Corrupt(
                    "chunk larger than declared chunk size",
                ));
            }
            let compressed_len = self.file.read_u32_le()? as usize;
            if compressed_len > lz4_flex::block::get_maximum_output_size(uncompressed_len) {
                return Err(CompressionError::Corrupt("compressed chunk too large"));
            }
            let payload = self.file.read_exact_vec(compressed_len)?;

            let chunk = match self.method {
                CompressionMethod::None => {
                    if payload.len() != uncompressed_len {
                        return Err(CompressionError::Corrupt("stored chunk length mismatch"));
                    }
                    payload
                }
                CompressionMethod::Lz4 => {
                    lz4_flex::block::decompress(&payload, uncompressed_len)?
                }
            };

            let chunk_end = pos + chunk.len() as u64;
            if chunk_end > offset {
                let start = offset.saturating_sub(pos) as usize;
                let take = (len - out.len()).min(chunk.len() - start);
                out.extend_from_slice(&chunk[start..start + take]);
            }
            pos = chunk_end;
        }
        Ok(out)
    }
}
