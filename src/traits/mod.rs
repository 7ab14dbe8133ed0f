pub mod camera;
pub mod controller;
pub mod scene;
pub mod storage;

pub use camera::*;
pub use controller::*;
pub use scene::*;
pub use storage::*;
