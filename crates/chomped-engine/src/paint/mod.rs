//! Paint model for shapes.
//!
//! Scope:
//! - color representation (straight alpha, unclamped)
//! - material (the per-shape fill)
//!
//! Geometry types live in `geometry`.

pub mod color;

pub use color::Color;

/// Fill applied to every fragment of a shape.
///
/// Only solid fills exist; the color is uploaded as a uniform on each draw.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Material {
    pub color: Color,
}

impl Material {
    #[inline]
    pub const fn solid(color: Color) -> Self {
        Self { color }
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.color.a >= 1.0
    }
}

impl From<Color> for Material {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}
