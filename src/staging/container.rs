use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use crate::config::CompressionMethod;
use crate::error::CompressionError;
use crate::staging::io::WriteLeExt;

pub(crate) const MAGIC: [u8; 4] = *b"CSTG";
pub(crate) const VERSION: u16 = 1;

// Header layout: magic (4), version (2), method (1), reserved (1),
// chunk_size (4), total uncompressed length (8, patched on finish).
const TOTAL_LEN_OFFSET: u64 = 12;

const MAX_CHUNK_SIZE: u32 = 64 * 1024 * 1024;

type Result<T> = std::result::Result<T, CompressionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionStatus {
    Complete,
    Error,
}

/// Streaming writer for a chunked staging container. Appended bytes are split
/// into chunks of `chunk_size` and each chunk is framed as
/// (uncompressed_len: u32, compressed_len: u32, payload).
#[derive(Debug)]
pub struct CompressionContext {
    file: BufWriter<File>,
    method: CompressionMethod,
    chunk_size: u32,
    total_len: u64,
    failed: bool,
}

impl CompressionContext {
    pub fn create(path: &Path, method: CompressionMethod, chunk_size: u32) -> Result<Self> {
        if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
            return Err(CompressionError::InvalidChunkSize(chunk_size));
        }

        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(&MAGIC)?;
        file.write_u16_le(VERSION)?;
        file.write_u8(method as u8)?;
        file.write_u8(0)?; // reserved
        file.write_u32_le(chunk_size)?;
        file.write_u64_le(0)?; // total length, patched on finish

        Ok(Self {
            file,
            method,
            chunk_size,
            total_len: 0,
            failed: false,
        })
    }

    pub fn append_data(&mut self, data: &[u8]) -> Result<()> {
        for chunk in data.chunks(self.chunk_size as usize) {
            if let Err(err) = self.write_chunk(chunk) {
                self.failed = true;
                return Err(err);
            }
        }
        self.total_len += data.len() as u64;
        Ok(())
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        let payload: Cow<[u8]> = match self.method {
            CompressionMethod::None => Cow::Borrowed(chunk),
            CompressionMethod::Lz4 => Cow::Owned(lz4_flex::block::compress(chunk)),
        };
        let compressed_len: u32 = payload
            .len()
            .try_into()
            .map_err(|_| CompressionError::Corrupt("compressed chunk too large"))?;
        self.file.write_u32_le(chunk.len() as u32)?;
        self.file.write_u32_le(compressed_len)?;
        self.file.write_all(&payload)?;
        Ok(())
    }

    /// Patches the total length into the header and flushes the file. The
    /// container is only valid if this returns `Complete`.
    pub fn flush_and_finish(mut self) -> CompressionStatus {
        if self.failed {
            return CompressionStatus::Error;
        }
        let finish = (|| -> Result<()> {
            self.file.seek(SeekFrom::Start(TOTAL_LEN_OFFSET))?;
            self.file.write_u64_le(self.total_len)?;
            self.file.flush()?;
            Ok(())
        })();
        match finish {
            Ok(()) => CompressionStatus::Complete,
            Err(_) => CompressionStatus::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_chunk_size() {
        let dir = tempfile::tempdir().unwrap();
        let err = CompressionContext::create(&dir.path().join("0.lz4"), CompressionMethod::Lz4, 0)
            .unwrap_err();
        assert!(matches!(err, CompressionError::InvalidChunkSize(0)));
    }

    #[test]
    fn writes_are_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        for name in ["a.lz4", "b.lz4"] {
            let mut context =
                CompressionContext::create(&dir.path().join(name), CompressionMethod::Lz4, 1024)
                    .unwrap();
            context.append_data(&data).unwrap();
            assert_eq!(context.flush_and_finish(), CompressionStatus::Complete);
        }

        let a = std::fs::read(dir.path().join("a.lz4")).unwrap();
        let b = std::fs::read(dir.path().join("b.lz4")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn header_records_method_and_total_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.lz4");
        let mut context =
            CompressionContext::create(&path, CompressionMethod::None, 16).unwrap();
        context.append_data(&[1u8; 40]).unwrap();
        assert_eq!(context.flush_and_finish(), CompressionStatus::Complete);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &MAGIC);
        assert_eq!(bytes[6], CompressionMethod::None as u8);
        assert_eq!(
            u64::from_le_bytes(bytes[12..20].try_into().unwrap()),
            40
        );
    }
}
