//! Viewer setup shared by the previewer front ends.

use glam::Vec3;

use crate::camera::{PerspectiveCamera, DEFAULT_FOV};
use crate::core::orbit_controls::{OrbitControls, DEFAULT_DAMPING_FACTOR};
use crate::presets::ModelPreset;

/// View constants for the garment viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub fov: f32,
    pub damping_factor: f32,
    pub enable_pan: bool,
    /// Animation duration of the first framing after mount
    pub initial_duration_ms: f64,
    /// Animation duration when switching models
    pub switch_duration_ms: f64,
    /// Offset of the group holding the garment mesh
    pub group_offset: Vec3,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            enable_pan: false,
            initial_duration_ms: 600.0,
            switch_duration_ms: 800.0,
            group_offset: Vec3::new(0.0, -1.2, 0.0),
        }
    }
}

impl ViewerConfig {
    /// Camera and orbit controls as first mounted for `preset`
    ///
    /// The camera starts at the preset's position; the controls take the
    /// preset's target and distance limits, falling back to origin and 2..8.
    pub fn build_rig(&self, preset: &ModelPreset) -> (PerspectiveCamera, OrbitControls) {
        let camera = PerspectiveCamera::new(preset.camera_position(), self.fov);

        let mut controls = OrbitControls::new(preset.camera_target()).with_limits(
            preset.min_distance_or_default(),
            preset.max_distance_or_default(),
        );
        controls.enable_damping = true;
        controls.damping_factor = self.damping_factor;
        controls.enable_pan = self.enable_pan;
        controls.sync_camera(&camera);

        (camera, controls)
    }
}
