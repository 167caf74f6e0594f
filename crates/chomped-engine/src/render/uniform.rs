//! GPU-side layouts shared by every shape pipeline.

use bytemuck::{Pod, Zeroable};

use crate::coords::Transform;
use crate::geometry::VERTEX_STRIDE;

/// Uniform block at `@group(0) @binding(0)`.
///
/// Matches the WGSL `ShapeUniform { mvp: mat4x4<f32>, color: vec4<f32> }`:
/// 64 + 16 bytes, no padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct ShapeUniform {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ShapeUniform {
    pub const SIZE: u64 = std::mem::size_of::<ShapeUniform>() as u64;

    pub fn new(mvp: &Transform, color: [f32; 4]) -> Self {
        Self { mvp: mvp.cols, color }
    }
}

impl Default for ShapeUniform {
    fn default() -> Self {
        Self::new(&Transform::IDENTITY, [0.0; 4])
    }
}

pub(crate) fn uniform_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(ShapeUniform::SIZE)
        .expect("ShapeUniform has non-zero size by construction")
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// One tightly packed `vec3<f32>` position per vertex at location 0.
pub(crate) fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_eighty_bytes() {
        assert_eq!(ShapeUniform::SIZE, 80);
        assert_eq!(uniform_min_binding_size().get(), 80);
    }

    #[test]
    fn color_lands_after_matrix_bit_exact() {
        let color = [1.75, -0.5, 3.25, 0.125];
        let u = ShapeUniform::new(&Transform::IDENTITY, color);
        let bytes = bytemuck::bytes_of(&u);
        let uploaded: &[f32] = bytemuck::cast_slice(&bytes[64..80]);
        assert_eq!(uploaded, &color);
    }

    #[test]
    fn matrix_is_uploaded_column_major() {
        let mvp = Transform::translation(0.25, -0.5, 0.0);
        let u = ShapeUniform::new(&mvp, [0.0; 4]);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(&floats[..16], &mvp.to_cols_array());
    }

    #[test]
    fn position_layout_matches_vertex_stride() {
        let layout = position_layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[0].shader_location, 0);
    }
}
