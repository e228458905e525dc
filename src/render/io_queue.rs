use crate::error::LoadError;
use crate::render::cubemap::CubeTexture;
use crate::resource::face::CubeFace;
use crate::staging::handle::IoFileHandle;

/// Terminal status of a committed io command buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoCommandBufferStatus {
    Complete,
    Error(String),
}

/// One decompress-and-copy unit of work: a byte range of an opened staging
/// container destined for one array slice of the cube texture. Not owned
/// after submission; the command buffer owns execution.
#[derive(Debug, Clone, Copy)]
pub struct LoadOperation {
    pub face: CubeFace,
    pub source_offset: u64,
}

/// Issues load command buffers against one device/queue pair.
pub struct IoCommandQueue<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl<'a> IoCommandQueue<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Opens a command buffer. A validation error scope is pushed here and
    /// popped by `wait_until_completed`, so every buffer made from this queue
    /// must be committed and waited on exactly once.
    pub fn make_command_buffer(&self, label: &str) -> IoCommandBuffer<'a> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        IoCommandBuffer {
            device: self.device,
            queue: self.queue,
            encoder: self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) }),
        }
    }
}

/// An ordered batch of load operations bound for a single submission.
pub struct IoCommandBuffer<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    encoder: wgpu::CommandEncoder,
}

impl<'a> IoCommandBuffer<'a> {
    /// Decompresses the operation's bytes from `handle` into a staging buffer
    /// and records a copy into the destination slice of `target`.
    pub fn load_texture(
        &mut self,
        handle: &mut IoFileHandle,
        op: LoadOperation,
        target: &CubeTexture,
    ) -> Result<(), LoadError> {
        let bytes_per_row = target.bytes_per_row() as usize;
        let padded_bytes_per_row = target.padded_bytes_per_row() as usize;
        let data = handle.read_decompressed(op.source_offset, target.bytes_per_image() as usize)?;

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("IO_STAGING_BUFFER"),
            size: (padded_bytes_per_row * target.height as usize) as u64,
            usage: wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: true,
        });
        {
            let mut mapped = staging.slice(..).get_mapped_range_mut();
            for (row, src) in data.chunks_exact(bytes_per_row).enumerate() {
                mapped[row * padded_bytes_per_row..row * padded_bytes_per_row + bytes_per_row]
                    .copy_from_slice(src);
            }
        }
        staging.unmap();

        self.encoder.copy_buffer_to_texture(
            wgpu::ImageCopyBuffer {
                buffer: &staging,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row as u32),
                    rows_per_image: Some(target.height),
                },
            },
            wgpu::ImageCopyTexture {
                texture: &target.gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: op.face.index(),
                },
                aspect: wgpu::TextureAspect::All,
            },
            target.face_extent(),
        );
        Ok(())
    }

    /// Submits the recorded loads as one command buffer.
    pub fn commit(self) -> CommittedIoCommandBuffer<'a> {
        let index = self.queue.submit(std::iter::once(self.encoder.finish()));
        CommittedIoCommandBuffer {
            device: self.device,
            index,
        }
    }
}

/// A submitted batch awaiting its single completion signal.
pub struct CommittedIoCommandBuffer<'a> {
    device: &'a wgpu::Device,
    index: wgpu::SubmissionIndex,
}

impl CommittedIoCommandBuffer<'_> {
    /// Blocks until the submission retires and reports its terminal status.
    pub fn wait_until_completed(self) -> IoCommandBufferStatus {
        let poll = self
            .device
            .poll(wgpu::Maintain::WaitForSubmissionIndex(self.index));
        let validation = pollster::block_on(self.device.pop_error_scope());
        if let Some(err) = validation {
            return IoCommandBufferStatus::Error(err.to_string());
        }
        if !poll.is_queue_empty() {
            return IoCommandBufferStatus::Error(String::from(
                "device poll returned before the submission retired",
            ));
        }
        IoCommandBufferStatus::Complete
    }
}
