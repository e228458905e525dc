use std::path::{Path, PathBuf};

use crate::config::CompressionMethod;
use crate::error::CompressionError;
use crate::resource::face::{CubeFace, FaceImage};
use crate::staging::container::{CompressionContext, CompressionStatus};

pub mod container;
pub mod handle;
mod io;

/// A staging file holding one face's compressed bytes. The file is the sole
/// owner of those bytes; the asset only records how to open it.
#[derive(Debug, Clone)]
pub struct CompressedAsset {
    pub face: CubeFace,
    pub path: PathBuf,
    pub method: CompressionMethod,
    pub chunk_size: u32,
}

impl CompressedAsset {
    /// Compresses the face's raw bytes into a staging file under `dir`, named
    /// by face index.
    pub fn stage(
        image: &FaceImage,
        dir: &Path,
        method: CompressionMethod,
        chunk_size: u32,
    ) -> Result<Self, CompressionError> {
        let path = dir.join(image.face.staging_file_name());
        compress(&image.data, &path, method, chunk_size)?;
        Ok(Self {
            face: image.face,
            path,
            method,
            chunk_size,
        })
    }
}

/// Writes `data` into a compressed container at `path`. Creates or overwrites
/// the file; on any error the file at `path` must be treated as invalid.
pub fn compress(
    data: &[u8],
    path: &Path,
    method: CompressionMethod,
    chunk_size: u32,
) -> Result<(), CompressionError> {
    if data.is_empty() {
        return Err(CompressionError::EmptyInput);
    }
    let mut context = CompressionContext::create(path, method, chunk_size)?;
    context.append_data(data)?;
    match context.flush_and_finish() {
        CompressionStatus::Complete => Ok(()),
        CompressionStatus::Error => Err(CompressionError::Incomplete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::face::PixelFormat;
    use crate::staging::handle::IoFileHandle;

    #[test]
    fn rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.lz4");
        let err = compress(&[], &path, CompressionMethod::Lz4, 64).unwrap_err();
        assert!(matches!(err, CompressionError::EmptyInput));
        assert!(!path.exists());
    }

    #[test]
    fn stage_names_file_by_face_index() {
        let dir = tempfile::tempdir().unwrap();
        let image = FaceImage::new(
            CubeFace::NegativeY,
            2,
            2,
            PixelFormat::Rgba8UnormSrgb,
            vec![9u8; 16],
        );
        let asset =
            CompressedAsset::stage(&image, dir.path(), CompressionMethod::Lz4, 8).unwrap();
        assert_eq!(asset.path, dir.path().join("3.lz4"));
        assert_eq!(asset.face, CubeFace::NegativeY);

        let mut handle = IoFileHandle::open(&asset.path, asset.method).unwrap();
        assert_eq!(handle.read_decompressed(0, 16).unwrap(), image.data);
    }

    #[test]
    fn recompression_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 199) as u8).collect();
        let first = dir.path().join("first.lz4");
        let second = dir.path().join("second.lz4");
        compress(&data, &first, CompressionMethod::Lz4, 512).unwrap();
        compress(&data, &second, CompressionMethod::Lz4, 512).unwrap();
        assert_eq!(
            std::fs::read(first).unwrap(),
            std::fs::read(second).unwrap()
        );
    }
}
