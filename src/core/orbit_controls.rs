use glam::{Mat4, Vec3};

use crate::traits::{CameraRig, OrbitTarget};

pub const DEFAULT_MIN_DISTANCE: f32 = 2.0;
pub const DEFAULT_MAX_DISTANCE: f32 = 8.0;
pub const DEFAULT_DAMPING_FACTOR: f32 = 0.05;

/// Orbit controller state: the point the camera circles and its distance limits
///
/// Pointer handling lives in the host. This type keeps the target, limits
/// and the view matrix derived from the last synced camera position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
    eye: Vec3,
    view: Mat4,
    revision: u64,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
            enable_damping: true,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            enable_pan: false,
            eye: Vec3::Z,
            view: Mat4::look_at_rh(Vec3::Z, target, Vec3::Y),
            revision: 0,
        }
    }

    pub fn with_limits(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self
    }

    /// Record the camera position the view matrix is built from
    pub fn sync_camera(&mut self, camera: &impl CameraRig) {
        self.sync_eye(camera.position());
        self.update();
    }

    pub fn distance_to(&self, camera: &impl CameraRig) -> f32 {
        camera.position().distance(self.target)
    }

    /// Zoom by `scale` along the view ray, clamped to the distance limits
    pub fn dolly(&mut self, camera: &mut impl CameraRig, scale: f32) {
        let offset = camera.position() - self.target;
        let direction = offset.try_normalize().unwrap_or(Vec3::Z);
        let distance = (offset.length() * scale).clamp(self.min_distance, self.max_distance);

        camera.set_position(self.target + direction * distance);
        self.sync_camera(&*camera);
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Number of times `update` has run; every call counts, even when
    /// nothing changed
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl OrbitTarget for OrbitControls {
    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn min_distance(&self) -> f32 {
        self.min_distance
    }

    fn set_min_distance(&mut self, distance: f32) {
        self.min_distance = distance;
    }

    fn max_distance(&self) -> f32 {
        self.max_distance
    }

    fn set_max_distance(&mut self, distance: f32) {
        self.max_distance = distance;
    }

    fn sync_eye(&mut self, position: Vec3) {
        self.eye = position;
    }

    fn update(&mut self) {
        // Degenerate when eye and target coincide; keep the previous view
        if self.eye.distance_squared(self.target) > f32::EPSILON {
            self.view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        }
        self.revision += 1;
    }
}
