pub struct Args {
    pub textures_dir: String,
}
