pub mod gltf;

pub use gltf::load_garment;
