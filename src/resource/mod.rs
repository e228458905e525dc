pub mod decode;
pub mod face;
