use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PipelineConfig;
use crate::error::VerificationMismatch;
use crate::render::cubemap::CubeTexture;
use crate::render::io_queue::IoCommandQueue;
use crate::render::state::GpuSystemState;
use crate::render::verify::VerificationReport;
use crate::render::{loader, verify};
use crate::resource::decode;
use crate::resource::face::{CubeFace, FaceSet};
use crate::staging::CompressedAsset;

/// Runs the full probe: decode -> compress -> stream load -> verify.
/// Linear and fail-fast; every stage failure aborts the run.
pub fn run_pipeline(textures_dir: &Path, config: PipelineConfig) -> Result<()> {
    log::info!(
        "Decoding cube face source images from {}",
        textures_dir.display()
    );
    let faces = decode_faces(textures_dir)?;
    log::info!(
        "Decoded 6 faces, {}x{} {:?}",
        faces.width(),
        faces.height(),
        faces.format()
    );

    let staging_dir = tempfile::Builder::new()
        .prefix("cubemap_streamer")
        .tempdir()
        .context("failed to create staging directory")?;
    log::info!(
        "Compressing cube faces into {} ({:?}, chunk size {})",
        staging_dir.path().display(),
        config.compression,
        config.chunk_size
    );
    let assets = compress_faces(&faces, staging_dir.path(), &config)?;

    let gpu = pollster::block_on(GpuSystemState::new())?;
    gpu.log_adapter_info();

    let target = CubeTexture::for_face_set(&faces, &gpu.device);
    let io_queue = IoCommandQueue::new(&gpu.device, &gpu.queue);
    loader::stream_load(&assets, &target, config.batching, &io_queue)?;
    log::info!("Load completed");

    log::info!("Verifying each slice of the cube texture against its source bytes");
    let report = verify::verify(&target, &faces, &gpu.device, &gpu.queue)?;
    report_outcome(&report)
}

fn decode_faces(dir: &Path) -> Result<FaceSet> {
    let mut set = FaceSet::new();
    for face in CubeFace::ALL {
        let image = decode::decode_face(dir, face)?;
        log::debug!(
            "Decoded cube face {} ({}x{}, {:?})",
            face,
            image.width,
            image.height,
            image.format
        );
        set.push(image)?;
    }
    Ok(set)
}

fn compress_faces(
    faces: &FaceSet,
    dir: &Path,
    config: &PipelineConfig,
) -> Result<Vec<CompressedAsset>> {
    let mut assets = Vec::with_capacity(CubeFace::COUNT);
    for image in faces.iter() {
        let asset = CompressedAsset::stage(image, dir, config.compression, config.chunk_size)
            .with_context(|| format!("failed to stage cube face {}", image.face))?;
        log::debug!("Wrote staging file {}", asset.path.display());
        assets.push(asset);
    }
    Ok(assets)
}

fn report_outcome(report: &VerificationReport) -> Result<()> {
    for result in &report.faces {
        if result.matched() {
            log::info!("Cube face {} matches its source bytes", result.face);
        }
    }
    let mismatches: Vec<_> = report
        .mismatches()
        .filter_map(|result| result.mismatch.map(|diff| (result.face, diff)))
        .collect();
    if mismatches.is_empty() {
        log::info!("All {} cube faces verified", report.faces.len());
        return Ok(());
    }
    for (face, diff) in &mismatches {
        log::error!(
            "Cube face {} diverged: expected first pixel {:?}, actual first pixel {:?}",
            face,
            diff.expected,
            diff.actual
        );
    }
    let (face, diff) = mismatches[0];
    Err(VerificationMismatch {
        face,
        expected: diff.expected,
        actual: diff.actual,
    }
    .into())
}
