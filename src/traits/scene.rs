use crate::math::AABB;

/// Anything the camera can be fitted to
pub trait Bounded {
    /// World-space axis-aligned bounds
    fn bounds(&self) -> AABB;
}

impl Bounded for AABB {
    fn bounds(&self) -> AABB {
        *self
    }
}
