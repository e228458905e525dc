use crate::error::DimensionMismatch;

/// One face of a cube texture. Indices are stable and match both the array
/// slice of the GPU texture and the staging file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const COUNT: usize = 6;

    pub const ALL: [CubeFace; CubeFace::COUNT] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn source_file_name(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "cubemap_posx.png",
            CubeFace::NegativeX => "cubemap_negx.png",
            CubeFace::PositiveY => "cubemap_posy.png",
            CubeFace::NegativeY => "cubemap_negy.png",
            CubeFace::PositiveZ => "cubemap_posz.png",
            CubeFace::NegativeZ => "cubemap_negz.png",
        }
    }

    pub fn staging_file_name(self) -> String {
        format!("{}.lz4", self.index())
    }
}

impl std::fmt::Display for CubeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The accepted 4-byte-per-pixel layouts for decoded face images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Bgra8Unorm,
    Bgra8UnormSrgb,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> u32 {
        4
    }

    pub fn to_wgpu(self) -> wgpu::TextureFormat {
        match self {
            PixelFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            PixelFormat::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            PixelFormat::Bgra8Unorm => wgpu::TextureFormat::Bgra8Unorm,
            PixelFormat::Bgra8UnormSrgb => wgpu::TextureFormat::Bgra8UnormSrgb,
        }
    }
}

/// Raw pixel bytes for a single cube face, immutable after decode.
#[derive(Debug, Clone)]
pub struct FaceImage {
    pub face: CubeFace,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl FaceImage {
    pub fn new(face: CubeFace, width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len() as u32,
            width * height * format.bytes_per_pixel(),
            "face image byte length must match its dimensions"
        );
        Self {
            face,
            width,
            height,
            format,
            data,
        }
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * self.format.bytes_per_pixel()
    }

    pub fn bytes_per_image(&self) -> u32 {
        self.bytes_per_row() * self.height
    }
}

/// All six faces of a cubemap, collected in face order. Every face pushed
/// after the first must match its width, height and pixel format.
#[derive(Debug, Default)]
pub struct FaceSet {
    faces: Vec<FaceImage>,
}

impl FaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: FaceImage) -> Result<(), DimensionMismatch> {
        debug_assert_eq!(
            image.face.index() as usize,
            self.faces.len(),
            "faces must be pushed in CubeFace::ALL order"
        );
        if let Some(first) = self.faces.first() {
            if image.width != first.width
                || image.height != first.height
                || image.format != first.format
            {
                return Err(DimensionMismatch {
                    face: image.face,
                    expected_width: first.width,
                    expected_height: first.height,
                    expected_format: first.format,
                    found_width: image.width,
                    found_height: image.height,
                    found_format: image.format,
                });
            }
        }
        self.faces.push(image);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.faces.len() == CubeFace::COUNT
    }

    pub fn width(&self) -> u32 {
        self.faces[0].width
    }

    pub fn height(&self) -> u32 {
        self.faces[0].height
    }

    pub fn format(&self) -> PixelFormat {
        self.faces[0].format
    }

    pub fn face(&self, face: CubeFace) -> &FaceImage {
        &self.faces[face.index() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaceImage> {
        self.faces.iter()
    }
}
