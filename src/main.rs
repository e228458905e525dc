use clap::Parser;

use crate::cli::Cli;
use cubemap_streamer::args::Args;
use cubemap_streamer::run;

mod cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(Args {
        textures_dir: cli.textures_dir,
    }) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
