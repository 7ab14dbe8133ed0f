use glam::Vec3;

/// Orbit controller collaborator - owns the point the camera orbits around
///
/// `update` is the controller's apply-changes step. It must be called after
/// every direct write to the target, the camera position or the distance
/// limits, and is safe to call repeatedly.
pub trait OrbitTarget {
    /// Current orbit target
    fn target(&self) -> Vec3;

    /// Replace the orbit target
    fn set_target(&mut self, target: Vec3);

    /// Minimum camera-to-target distance
    fn min_distance(&self) -> f32;

    fn set_min_distance(&mut self, distance: f32);

    /// Maximum camera-to-target distance
    fn max_distance(&self) -> f32;

    fn set_max_distance(&mut self, distance: f32);

    /// Camera moved to `position` outside the controller's own input handling
    ///
    /// Controllers that derive state from the eye position record it here;
    /// the change takes effect on the next `update`.
    fn sync_eye(&mut self, _position: Vec3) {}

    /// Re-sync internal state after direct mutation
    fn update(&mut self);
}
