use glam::Vec3;

/// Camera collaborator driven by the animator
pub trait CameraRig {
    /// Camera position in world space
    fn position(&self) -> Vec3;

    /// Move the camera to a new world-space position
    fn set_position(&mut self, position: Vec3);

    /// Vertical field of view in degrees
    fn fov_degrees(&self) -> f32;
}
