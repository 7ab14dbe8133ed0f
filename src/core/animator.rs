//! Camera animator: snaps or eases a camera and its orbit target to
//! per-model framing presets.
//!
//! The animator borrows the camera and controller for its whole lifetime and
//! runs at most one transition at a time. The host calls [`CameraAnimator::tick`]
//! once per rendered frame. Starting a new transition cancels the one in
//! flight, and dropping the animator cancels whatever is still running, so
//! no completion signal is left unsettled.

use std::rc::Rc;

use glam::Vec3;

use super::clock::{SystemClock, TimeSource};
use super::orbit_controls::OrbitControls;
use super::transition::{ActiveTransition, TransitionHandle, TransitionSample};
use crate::presets::PresetTable;
use crate::traits::{Bounded, CameraRig, OrbitTarget};

pub const DEFAULT_DURATION_MS: f64 = 1000.0;
pub const DEFAULT_FIT_RATIO: f32 = 1.2;
pub const DEFAULT_MODEL: &str = "shirt";

/// Camera distance at which an object of `max_dim` fills a `fov_degrees`
/// vertical view with `fit_ratio` headroom
pub fn fit_distance(max_dim: f32, fov_degrees: f32, fit_ratio: f32) -> f32 {
    let fov = fov_degrees.to_radians();
    max_dim / (2.0 * (fov / 2.0).tan()) * fit_ratio
}

/// Camera position straight down +Z from the center of `object` that fits
/// it at `view_angle` degrees
pub fn calculate_optimal_camera_position(
    object: &impl Bounded,
    view_angle: f32,
    fit_ratio: f32,
) -> Vec3 {
    let bounds = object.bounds();
    let center = bounds.center();
    let distance = fit_distance(bounds.max_dimension(), view_angle, fit_ratio);

    Vec3::new(center.x, center.y, center.z + distance)
}

/// Drives a borrowed camera and optional orbit controller between framings
pub struct CameraAnimator<'a, C: CameraRig, O: OrbitTarget> {
    camera: &'a mut C,
    controls: Option<&'a mut O>,
    duration_ms: f64,
    presets: &'a PresetTable,
    clock: Rc<dyn TimeSource>,
    active: Option<ActiveTransition>,
}

impl<'a, C: CameraRig> CameraAnimator<'a, C, OrbitControls> {
    /// Animator without a controller; every move is applied immediately
    pub fn camera_only(camera: &'a mut C, duration_ms: f64) -> Self {
        Self::new(camera, None, duration_ms)
    }
}

impl<'a, C: CameraRig, O: OrbitTarget> CameraAnimator<'a, C, O> {
    pub fn new(camera: &'a mut C, controls: Option<&'a mut O>, duration_ms: f64) -> Self {
        Self {
            camera,
            controls,
            duration_ms,
            presets: PresetTable::builtin(),
            clock: Rc::new(SystemClock::new()),
            active: None,
        }
    }

    /// Look presets up in `presets` instead of the built-in table
    pub fn with_presets(mut self, presets: &'a PresetTable) -> Self {
        self.presets = presets;
        self
    }

    /// Read time from `clock` instead of the system clock
    pub fn with_clock(mut self, clock: impl TimeSource + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Applies to transitions started after this call
    pub fn set_duration_ms(&mut self, duration_ms: f64) {
        self.duration_ms = duration_ms;
    }

    pub fn camera(&self) -> &C {
        &*self.camera
    }

    pub fn controls(&self) -> Option<&O> {
        self.controls.as_deref()
    }

    /// `false` once the running transition has been cancelled through its
    /// handle, even before the next `tick` settles it
    pub fn is_animating(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.is_cancelled())
    }

    /// Move to the framing preset of `model_id`
    ///
    /// Unknown ids are logged and leave the camera where it is; the returned
    /// handle is already complete.
    pub fn normalize_for_model(&mut self, model_id: &str, immediate: bool) -> TransitionHandle {
        let Some(preset) = self.presets.get(model_id) else {
            log::warn!("No camera preset found for model: {}", model_id);
            return TransitionHandle::completed();
        };

        let (position, target) = (preset.camera_position(), preset.camera_target());
        self.animate_to_position(position, target, immediate)
    }

    /// Move the camera to `position` looking at `look_at`
    ///
    /// With `immediate`, or without a controller, both are applied in one step
    /// and the handle is already complete. Otherwise the start state is
    /// captured now, the first frame is evaluated now, and the rest follow
    /// from [`tick`](Self::tick).
    pub fn animate_to_position(
        &mut self,
        position: Vec3,
        look_at: Vec3,
        immediate: bool,
    ) -> TransitionHandle {
        if let Some(previous) = self.active.take() {
            log::debug!("Superseding in-flight camera transition");
            drop(previous);
        }

        let start_target = if immediate {
            None
        } else {
            self.controls.as_deref().map(|controls| controls.target())
        };

        let Some(start_target) = start_target else {
            self.apply(position, look_at);
            return TransitionHandle::completed();
        };

        let (transition, handle) = ActiveTransition::begin(
            (self.camera.position(), start_target),
            (position, look_at),
            self.clock.now_ms(),
            self.duration_ms,
        );
        log::debug!(
            "Camera transition to {:?} looking at {:?} over {}ms",
            position,
            look_at,
            self.duration_ms
        );

        self.active = Some(transition);
        self.tick();

        handle
    }

    /// Advance the in-flight transition by one frame
    ///
    /// Returns `true` while a transition is still running afterwards.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        let (sample, cancelled) = match &self.active {
            Some(active) => (active.sample(now), active.is_cancelled()),
            None => return false,
        };

        if cancelled {
            log::debug!("Camera transition cancelled at {:.0}%", sample.progress * 100.0);
            self.active = None;
            return false;
        }

        self.apply_sample(&sample);

        if sample.progress >= 1.0 {
            if let Some(mut finished) = self.active.take() {
                finished.finish();
            }
            return false;
        }

        true
    }

    /// Stop the in-flight transition where it is
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            log::debug!("Camera transition cancelled by caller");
        }
    }

    /// Frame `object` so its largest dimension fills the view with
    /// `fit_ratio` headroom, keeping the current viewing direction
    pub fn fit_camera_to_object(
        &mut self,
        object: &impl Bounded,
        fit_ratio: f32,
        immediate: bool,
    ) -> TransitionHandle {
        let bounds = object.bounds();
        let center = bounds.center();
        let distance = fit_distance(bounds.max_dimension(), self.camera.fov_degrees(), fit_ratio);

        // Camera sitting on the center has no direction; look down -Z
        let direction = (self.camera.position() - center)
            .try_normalize()
            .unwrap_or(Vec3::Z);

        self.animate_to_position(center + direction * distance, center, immediate)
    }

    /// Return to the preset of `model_id`, or [`DEFAULT_MODEL`]
    pub fn reset_to_default(&mut self, model_id: Option<&str>, immediate: bool) -> TransitionHandle {
        self.normalize_for_model(model_id.unwrap_or(DEFAULT_MODEL), immediate)
    }

    /// Copy the preset's orbit distance limits onto the controller
    ///
    /// Limits the preset leaves out are not touched.
    pub fn update_controls_limits(&mut self, model_id: &str) {
        let (Some(preset), Some(controls)) =
            (self.presets.get(model_id), self.controls.as_deref_mut())
        else {
            return;
        };

        if let Some(min) = preset.min_distance {
            controls.set_min_distance(min);
        }
        if let Some(max) = preset.max_distance {
            controls.set_max_distance(max);
        }
        controls.update();
    }

    fn apply_sample(&mut self, sample: &TransitionSample) {
        self.apply(sample.position, sample.target);
    }

    fn apply(&mut self, position: Vec3, target: Vec3) {
        self.camera.set_position(position);
        if let Some(controls) = self.controls.as_deref_mut() {
            controls.set_target(target);
            controls.sync_eye(position);
            controls.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::core::clock::ManualClock;
    use crate::core::transition::TransitionStatus;
    use crate::math::AABB;

    fn rig() -> (PerspectiveCamera, OrbitControls) {
        (
            PerspectiveCamera::new(Vec3::new(0.0, 0.0, 5.0), 50.0),
            OrbitControls::new(Vec3::ZERO),
        )
    }

    #[test]
    fn test_fit_distance_formula() {
        let expected = 2.0 / (2.0 * 25.0_f32.to_radians().tan()) * 1.2;
        assert!((fit_distance(2.0, 50.0, 1.2) - expected).abs() < 1e-6);
        assert!((expected - 2.573).abs() < 1e-3);
    }

    #[test]
    fn test_optimal_position_is_along_z() {
        let bounds = AABB::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(2.0));
        let position = calculate_optimal_camera_position(&bounds, 45.0, 1.2);

        assert_eq!(position.x, 1.0);
        assert_eq!(position.y, 2.0);
        assert!((position.z - (3.0 + fit_distance(2.0, 45.0, 1.2))).abs() < 1e-5);
    }

    #[test]
    fn test_immediate_normalize_applies_preset() {
        let (mut camera, mut controls) = rig();
        let mut animator = CameraAnimator::new(&mut camera, Some(&mut controls), 800.0);

        let mut handle = animator.normalize_for_model("shirt", true);

        assert_eq!(handle.status(), TransitionStatus::Finished);
        assert!(!animator.is_animating());
        assert_eq!(animator.camera().position, Vec3::new(0.0, 0.0, 4.5));
        assert_eq!(animator.controls().unwrap().target, Vec3::new(0.0, -1.2, 0.0));
    }

    #[test]
    fn test_unknown_model_is_a_noop() {
        let (mut camera, mut controls) = rig();
        let mut animator = CameraAnimator::new(&mut camera, Some(&mut controls), 800.0);

        let mut handle = animator.normalize_for_model("hoodie", false);

        assert_eq!(handle.status(), TransitionStatus::Finished);
        assert_eq!(animator.camera().position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(animator.controls().unwrap().target, Vec3::ZERO);
        assert_eq!(animator.controls().unwrap().revision(), 0);
    }

    #[test]
    fn test_animated_transition_runs_to_completion() {
        let (mut camera, mut controls) = rig();
        let clock = ManualClock::new();
        let mut animator =
            CameraAnimator::new(&mut camera, Some(&mut controls), 800.0).with_clock(clock.clone());

        let mut handle = animator.normalize_for_model("shirt2", false);
        // First frame is evaluated at call time with zero elapsed
        assert_eq!(animator.camera().position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(handle.status(), TransitionStatus::Running);

        clock.advance(400.0);
        assert!(animator.tick());
        assert!((animator.camera().position.z - 4.0).abs() < 1e-5);

        clock.advance(400.0);
        assert!(!animator.tick());
        assert_eq!(animator.camera().position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(handle.status(), TransitionStatus::Finished);

        // Nothing left to drive
        assert!(!animator.tick());
    }

    #[test]
    fn test_controls_view_follows_every_applied_frame() {
        let (mut camera, mut controls) = rig();
        let clock = ManualClock::new();
        let mut animator =
            CameraAnimator::new(&mut camera, Some(&mut controls), 800.0).with_clock(clock.clone());

        let in_sync = |animator: &CameraAnimator<'_, PerspectiveCamera, OrbitControls>| {
            let controls = animator.controls().unwrap();
            let expected = animator.camera().view_matrix(controls.target);
            controls.view_matrix().abs_diff_eq(expected, 1e-5)
        };

        animator.normalize_for_model("shirt", true);
        assert!(in_sync(&animator));

        animator.normalize_for_model("shirt2", false);
        while animator.is_animating() {
            clock.advance(100.0);
            animator.tick();
            assert!(in_sync(&animator));
        }
    }

    #[test]
    fn test_without_controls_moves_immediately() {
        let mut camera = PerspectiveCamera::default();
        let mut animator = CameraAnimator::camera_only(&mut camera, 800.0);

        let mut handle = animator.normalize_for_model("shirt", false);

        assert_eq!(handle.status(), TransitionStatus::Finished);
        assert_eq!(animator.camera().position, Vec3::new(0.0, 0.0, 4.5));
    }

    #[test]
    fn test_update_limits_without_controls_is_a_noop() {
        let mut camera = PerspectiveCamera::default();
        let mut animator = CameraAnimator::camera_only(&mut camera, 800.0);
        animator.update_controls_limits("shirt");
        assert!(animator.controls().is_none());
    }

    #[test]
    fn test_cancel_stops_mid_flight() {
        let (mut camera, mut controls) = rig();
        let clock = ManualClock::new();
        let mut animator =
            CameraAnimator::new(&mut camera, Some(&mut controls), 1000.0).with_clock(clock.clone());

        let mut handle = animator.normalize_for_model("shirt", false);
        clock.advance(500.0);
        animator.tick();
        let halfway = animator.camera().position;

        handle.cancel();
        assert!(!animator.is_animating());
        // Settled by the next frame
        assert_eq!(handle.status(), TransitionStatus::Running);

        clock.advance(500.0);
        assert!(!animator.tick());

        assert_eq!(animator.camera().position, halfway);
        assert_eq!(handle.status(), TransitionStatus::Cancelled);
    }

    #[test]
    fn test_reset_defaults_to_shirt() {
        let (mut camera, mut controls) = rig();
        let mut animator = CameraAnimator::new(&mut camera, Some(&mut controls), 800.0);

        animator.reset_to_default(None, true);
        assert_eq!(animator.camera().position, Vec3::new(0.0, 0.0, 4.5));

        animator.reset_to_default(Some("shirt2"), true);
        assert_eq!(animator.camera().position, Vec3::new(0.0, 0.0, 3.0));
    }
}
