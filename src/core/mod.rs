pub mod animator;
pub mod clock;
pub mod easing;
pub mod frame;
pub mod orbit_controls;
pub mod transition;

pub use animator::{
    calculate_optimal_camera_position, fit_distance, CameraAnimator, DEFAULT_DURATION_MS,
    DEFAULT_FIT_RATIO, DEFAULT_MODEL,
};
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use easing::ease_in_out_cubic;
pub use frame::{FixedStepFrames, FrameInfo, FrameIterator};
pub use orbit_controls::OrbitControls;
pub use transition::{
    CancelToken, Canceled, Completion, TransitionHandle, TransitionSample, TransitionStatus,
};
