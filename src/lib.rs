use std::path::Path;

use anyhow::Result;

use crate::args::Args;
use crate::config::PipelineConfig;

pub mod args;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod resource;
pub mod staging;

pub fn run(args: Args) -> Result<()> {
    env_logger::init();
    pipeline::run_pipeline(Path::new(&args.textures_dir), PipelineConfig::default())
}
