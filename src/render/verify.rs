use anyhow::{anyhow, Result};

use crate::render::cubemap::CubeTexture;
use crate::resource::face::{CubeFace, FaceSet};

/// First-pixel diagnostic captured when a face's loaded bytes diverge from
/// its source bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstPixelDiff {
    pub expected: [u8; 4],
    pub actual: [u8; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVerification {
    pub face: CubeFace,
    pub mismatch: Option<FirstPixelDiff>,
}

impl FaceVerification {
    pub fn matched(&self) -> bool {
        self.mismatch.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub faces: Vec<FaceVerification>,
}

impl VerificationReport {
    pub fn all_match(&self) -> bool {
        self.faces.iter().all(FaceVerification::matched)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &FaceVerification> {
        self.faces.iter().filter(|f| !f.matched())
    }
}

/// Reads every slice of `target` back to host memory and compares it
/// byte-for-byte against the original face bytes. A mismatch is recorded,
/// never retried.
pub fn verify(
    target: &CubeTexture,
    originals: &FaceSet,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> Result<VerificationReport> {
    let mut faces = Vec::with_capacity(CubeFace::COUNT);
    for face in CubeFace::ALL {
        log::debug!("Reading back cube face {} for verification", face);
        let expected = originals.face(face).data.as_slice();
        let mut actual = vec![0u8; target.bytes_per_image() as usize];
        read_back_face(target, face, device, queue, &mut actual)?;

        let mismatch = if expected == actual.as_slice() {
            None
        } else {
            Some(FirstPixelDiff {
                expected: [expected[0], expected[1], expected[2], expected[3]],
                actual: [actual[0], actual[1], actual[2], actual[3]],
            })
        };
        faces.push(FaceVerification { face, mismatch });
    }
    Ok(VerificationReport { faces })
}

/// Copies one slice (mip 0, full extent) into a mappable buffer, blocks on the
/// map, and compacts the padded rows into `out`.
fn read_back_face(
    target: &CubeTexture,
    face: CubeFace,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    out: &mut [u8],
) -> Result<()> {
    let bytes_per_row = target.bytes_per_row() as usize;
    let padded_bytes_per_row = target.padded_bytes_per_row() as usize;

    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("VERIFY_READBACK_BUFFER"),
        size: (padded_bytes_per_row * target.height as usize) as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("VERIFY_READBACK_ENCODER"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture: &target.gpu_texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: face.index(),
            },
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &readback,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row as u32),
                rows_per_image: Some(target.height),
            },
        },
        target.face_extent(),
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (sender, receiver) = futures_intrusive::channel::shared::oneshot_channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    let _ = device.poll(wgpu::Maintain::Wait);
    pollster::block_on(receiver.receive())
        .ok_or_else(|| anyhow!("readback map callback dropped for cube face {face}"))??;

    let mapped = slice.get_mapped_range();
    for row in 0..target.height as usize {
        out[row * bytes_per_row..][..bytes_per_row]
            .copy_from_slice(&mapped[row * padded_bytes_per_row..][..bytes_per_row]);
    }
    drop(mapped);
    readback.unmap();
    Ok(())
}
