pub mod cubemap;
pub mod io_queue;
pub mod loader;
pub mod state;
pub mod verify;
