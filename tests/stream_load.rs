use cubemap_streamer::config::{BatchPolicy, PipelineConfig};
use cubemap_streamer::render::cubemap::CubeTexture;
use cubemap_streamer::render::io_queue::IoCommandQueue;
use cubemap_streamer::render::loader::stream_load;
use cubemap_streamer::render::state::GpuSystemState;
use cubemap_streamer::render::verify::{verify, VerificationReport};
use cubemap_streamer::resource::face::{CubeFace, FaceImage, FaceSet, PixelFormat};
use cubemap_streamer::staging::CompressedAsset;

const FACE_COLORS: [[u8; 4]; 6] = [
    [255, 0, 0, 255],
    [0, 255, 0, 255],
    [0, 0, 255, 255],
    [255, 255, 0, 255],
    [0, 255, 255, 255],
    [255, 0, 255, 255],
];

fn constant_color_face_set(width: u32, height: u32) -> FaceSet {
    let mut set = FaceSet::new();
    for face in CubeFace::ALL {
        let pixels = vec![FACE_COLORS[face.index() as usize]; (width * height) as usize];
        let data = bytemuck::cast_slice(&pixels).to_vec();
        set.push(FaceImage::new(
            face,
            width,
            height,
            PixelFormat::Rgba8UnormSrgb,
            data,
        ))
        .unwrap();
    }
    set
}

fn acquire_gpu() -> Option<GpuSystemState> {
    match pollster::block_on(GpuSystemState::new()) {
        Ok(gpu) => Some(gpu),
        Err(err) => {
            eprintln!("skipping gpu test: {err:#}");
            None
        }
    }
}

fn run_policy(gpu: &GpuSystemState, faces: &FaceSet, policy: BatchPolicy) -> VerificationReport {
    let config = PipelineConfig {
        batching: policy,
        ..Default::default()
    };
    let staging_dir = tempfile::tempdir().unwrap();
    let assets: Vec<CompressedAsset> = faces
        .iter()
        .map(|image| {
            CompressedAsset::stage(image, staging_dir.path(), config.compression, config.chunk_size)
                .unwrap()
        })
        .collect();

    let target = CubeTexture::for_face_set(faces, &gpu.device);
    let io_queue = IoCommandQueue::new(&gpu.device, &gpu.queue);
    stream_load(&assets, &target, policy, &io_queue).unwrap();
    verify(&target, faces, &gpu.device, &gpu.queue).unwrap()
}

#[test]
fn per_face_round_trip_matches() {
    let Some(gpu) = acquire_gpu() else { return };
    let faces = constant_color_face_set(4, 4);

    let report = run_policy(&gpu, &faces, BatchPolicy::PerFace);
    assert_eq!(report.faces.len(), 6);
    assert!(
        report.all_match(),
        "per-face loads must round-trip exactly: {report:?}"
    );
}

#[test]
fn shared_batch_report_matches_per_face() {
    let Some(gpu) = acquire_gpu() else { return };
    let faces = constant_color_face_set(4, 4);

    let per_face = run_policy(&gpu, &faces, BatchPolicy::PerFace);
    let shared = run_policy(&gpu, &faces, BatchPolicy::Shared);
    assert_eq!(
        shared, per_face,
        "shared and per-face batching must produce identical verification reports"
    );
}

#[test]
fn single_pixel_faces_round_trip() {
    let Some(gpu) = acquire_gpu() else { return };
    let faces = constant_color_face_set(1, 1);

    let report = run_policy(&gpu, &faces, BatchPolicy::PerFace);
    assert!(report.all_match(), "1x1 faces must round-trip: {report:?}");
}

#[test]
fn wide_faces_exercise_row_padding() {
    // 33 pixels per row makes the tight row stride fall between copy
    // alignment boundaries.
    let Some(gpu) = acquire_gpu() else { return };
    let faces = constant_color_face_set(33, 7);

    let report = run_policy(&gpu, &faces, BatchPolicy::Shared);
    assert!(report.all_match(), "padded rows must compact cleanly: {report:?}");
}
