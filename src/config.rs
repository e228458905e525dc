/// Default granularity for splitting a face's raw bytes into compressed
/// chunks inside a staging container.
pub const DEFAULT_CHUNK_SIZE: u32 = 64 * 1024;

/// How load operations are grouped into io command buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPolicy {
    /// All six face loads share a single command buffer with one commit and
    /// one wait. This is the batching strategy under test.
    Shared,
    /// Each face load gets its own command buffer which is committed and
    /// waited on before the next face is touched.
    PerFace,
}

/// Codec used for the chunk payloads of a staging container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompressionMethod {
    None = 0,
    Lz4 = 1,
}

impl CompressionMethod {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(CompressionMethod::None),
            1 => Some(CompressionMethod::Lz4),
            _ => None,
        }
    }
}

/// Process-wide pipeline configuration, fixed at build time and passed
/// explicitly into the orchestration entry point.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub batching: BatchPolicy,
    pub compression: CompressionMethod,
    pub chunk_size: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batching: BatchPolicy::Shared,
            compression: CompressionMethod::Lz4,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
