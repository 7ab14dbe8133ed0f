mod aabb;
mod color;

pub use aabb::AABB;
pub use color::{parse_hex_color, srgb_to_linear, Rgb};
