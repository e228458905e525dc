use std::path::PathBuf;

use thiserror::Error;

use crate::config::CompressionMethod;
use crate::render::io_queue::IoCommandBufferStatus;
use crate::resource::face::{CubeFace, PixelFormat};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to decode source image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported pixel layout {color:?} in {}, expected an 8-bit RGB or RGBA image", path.display())]
    UnsupportedColor {
        path: PathBuf,
        color: image::ColorType,
    },
}

#[derive(Debug, Error)]
#[error(
    "cube face {face} is {found_width}x{found_height} {found_format:?}, \
     but earlier faces are {expected_width}x{expected_height} {expected_format:?}"
)]
pub struct DimensionMismatch {
    pub face: CubeFace,
    pub expected_width: u32,
    pub expected_height: u32,
    pub expected_format: PixelFormat,
    pub found_width: u32,
    pub found_height: u32,
    pub found_format: PixelFormat,
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("io error on staging file: {0}")]
    Io(#[from] std::io::Error),

    #[error("refusing to compress an empty buffer")]
    EmptyInput,

    #[error("invalid compression chunk size {0}")]
    InvalidChunkSize(u32),

    #[error("compression context did not reach a complete status")]
    Incomplete,

    #[error("staging container is corrupt: {0}")]
    Corrupt(&'static str),

    #[error("staging container was written with {written:?} but opened as {requested:?}")]
    MethodMismatch {
        written: CompressionMethod,
        requested: CompressionMethod,
    },

    #[error("lz4 decompression failed: {0}")]
    Lz4Decompress(#[from] lz4_flex::block::DecompressError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io command buffer finished with terminal status {0:?}")]
    ExecutionFailed(IoCommandBufferStatus),

    #[error(transparent)]
    Staging(#[from] CompressionError),
}

#[derive(Debug, Error)]
#[error(
    "cube face {face} diverged after load: \
     expected first pixel {expected:?}, actual first pixel {actual:?}"
)]
pub struct VerificationMismatch {
    pub face: CubeFace,
    pub expected: [u8; 4],
    pub actual: [u8; 4],
}
