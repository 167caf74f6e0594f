//! Shader sources.
//!
//! A shape is built from two stages written in WGSL. Every stage reads the
//! same uniform block at `@group(0) @binding(0)`:
//!
//! ```wgsl
//! struct ShapeUniform {
//!     mvp: mat4x4<f32>,
//!     color: vec4<f32>,
//! };
//! ```
//!
//! The vertex stage consumes `@location(0) position: vec3<f32>`.

use std::borrow::Cow;
use std::fmt;

/// Entry point the vertex stage must export.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Entry point the fragment stage must export.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Pipeline stage a source string is compiled for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    #[inline]
    pub const fn entry_point(self) -> &'static str {
        match self {
            Self::Vertex => VERTEX_ENTRY,
            Self::Fragment => FRAGMENT_ENTRY,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Vertex + fragment source pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// The shared default: transform by `mvp`, fill with `color`.
    pub const fn solid() -> Self {
        Self {
            vertex: Cow::Borrowed(SOLID_VERTEX),
            fragment: Cow::Borrowed(SOLID_FRAGMENT),
        }
    }

    #[inline]
    pub fn stage(&self, kind: StageKind) -> &str {
        match kind {
            StageKind::Vertex => &self.vertex,
            StageKind::Fragment => &self.fragment,
        }
    }
}

impl Default for ShaderSource {
    fn default() -> Self {
        Self::solid()
    }
}

const SOLID_VERTEX: &str = include_str!("shaders/solid.vert.wgsl");
const SOLID_FRAGMENT: &str = include_str!("shaders/solid.frag.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_stages_export_their_entry_points() {
        let src = ShaderSource::solid();
        assert!(src.stage(StageKind::Vertex).contains("fn vs_main"));
        assert!(src.stage(StageKind::Fragment).contains("fn fs_main"));
    }

    #[test]
    fn default_is_the_shared_solid_pair() {
        assert_eq!(ShaderSource::default(), ShaderSource::solid());
    }
}
