//! Easing curves for camera transitions.

/// Cubic ease-in-out: slow start, fast middle, slow end
///
/// Input is clamped to [0, 1]. `ease(0) = 0`, `ease(0.5) = 0.5`, `ease(1) = 1`.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
