use clap::Parser;

/// Compresses the six faces of a cubemap into staging files, streams them back
/// into a GPU cube texture, and verifies the loaded bytes against the source
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the six cubemap face images
    /// (cubemap_{posx,negx,posy,negy,posz,negz}.png)
    pub textures_dir: String,
}
