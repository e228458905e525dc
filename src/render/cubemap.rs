use crate::resource::face::{FaceSet, PixelFormat};

/// The GPU cube texture: six array slices, one mip level, written only by the
/// streaming loader and read back by the verifier.
pub struct CubeTexture {
    pub gpu_texture: wgpu::Texture,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl CubeTexture {
    pub fn for_face_set(faces: &FaceSet, device: &wgpu::Device) -> Self {
        let width = faces.width();
        let height = faces.height();
        let format = faces.format();

        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("CUBE_TEXTURE"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: format.to_wgpu(),
            usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        Self {
            gpu_texture,
            width,
            height,
            format,
        }
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * self.format.bytes_per_pixel()
    }

    /// Row stride required for buffer/texture copies.
    pub fn padded_bytes_per_row(&self) -> u32 {
        align_up(self.bytes_per_row(), wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
    }

    pub fn bytes_per_image(&self) -> u32 {
        self.bytes_per_row() * self.height
    }

    /// Extent of a single face at mip 0.
    pub fn face_extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

fn align_up(v: u32, alignment: u32) -> u32 {
    v.div_ceil(alignment) * alignment
}

#[cfg(test)]
mod tests {
    use super::align_up;

    #[test]
    fn align_up_rounds_to_copy_alignment() {
        assert_eq!(align_up(16, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
    }
}
