use crate::config::BatchPolicy;
use crate::error::LoadError;
use crate::render::cubemap::CubeTexture;
use crate::render::io_queue::{
    IoCommandBuffer, IoCommandBufferStatus, IoCommandQueue, LoadOperation,
};
use crate::staging::handle::IoFileHandle;
use crate::staging::CompressedAsset;

/// Streams every staged face into its slice of `target`.
///
/// Under `Shared` all loads ride one command buffer with a single commit and
/// wait; under `PerFace` each load is committed and waited on before the next
/// face is touched. The two paths are intentionally distinct: comparing their
/// verification outcomes is the point of this tool.
pub fn stream_load(
    assets: &[CompressedAsset],
    target: &CubeTexture,
    policy: BatchPolicy,
    io_queue: &IoCommandQueue,
) -> Result<(), LoadError> {
    match policy {
        BatchPolicy::Shared => {
            log::info!(
                "Loading {} cube faces through a single shared io command buffer",
                assets.len()
            );
            let mut batch = io_queue.make_command_buffer("IO_SHARED_BATCH");
            for asset in assets {
                append_load(&mut batch, asset, target)?;
            }
            finish_batch(batch)
        }
        BatchPolicy::PerFace => {
            log::info!(
                "Loading {} cube faces through one io command buffer each",
                assets.len()
            );
            for asset in assets {
                let mut batch = io_queue.make_command_buffer("IO_PER_FACE_BATCH");
                append_load(&mut batch, asset, target)?;
                finish_batch(batch)?;
            }
            Ok(())
        }
    }
}

fn append_load(
    batch: &mut IoCommandBuffer,
    asset: &CompressedAsset,
    target: &CubeTexture,
) -> Result<(), LoadError> {
    log::debug!(
        "Appending load of cube face {} from {}",
        asset.face,
        asset.path.display()
    );
    let mut handle = IoFileHandle::open(&asset.path, asset.method)?;
    batch.load_texture(
        &mut handle,
        LoadOperation {
            face: asset.face,
            source_offset: 0,
        },
        target,
    )
}

fn finish_batch(batch: IoCommandBuffer) -> Result<(), LoadError> {
    match batch.commit().wait_until_completed() {
        IoCommandBufferStatus::Complete => Ok(()),
        status => Err(LoadError::ExecutionFailed(status)),
    }
}
