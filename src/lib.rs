pub mod camera;
pub mod cli;
pub mod client;
pub mod core;
pub mod garment;
pub mod loaders;
pub mod math;
pub mod presets;
pub mod store;
pub mod swatches;
pub mod text;
pub mod traits;
pub mod viewer;

pub use camera::PerspectiveCamera;
pub use core::{CameraAnimator, OrbitControls, TransitionHandle, TransitionStatus};
pub use presets::{ModelPreset, PresetTable};
pub use store::{ShirtState, ShirtStore};
