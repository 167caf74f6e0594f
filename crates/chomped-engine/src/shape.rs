//! Renderable shape: geometry + material + linked shader program.
//!
//! A shape is built once at scene setup and drawn once per frame. Building
//! compiles and links its shader stages through the host
//! [`GraphicsContext`]; a build failure is logged and leaves a shape that
//! draws nothing.

use crate::coords::Transform;
use crate::geometry::{DrawCall, Geometry, GeometryError};
use crate::gfx::{GraphicsContext, ShaderError};
use crate::paint::{Color, Material};
use crate::shader::{ShaderSource, StageKind};

/// Device objects owned by a drawable shape. Released on drop.
struct Resources<C: GraphicsContext> {
    program: C::Program,
    buffers: C::Buffers,
}

pub struct Shape<C: GraphicsContext> {
    geometry: Geometry,
    material: Material,
    draw_call: DrawCall,
    resources: Option<Resources<C>>,
    build_error: Option<ShaderError>,
}

impl<C: GraphicsContext> Shape<C> {
    /// Builds a shape.
    ///
    /// Shader failures do not abort: they are logged, kept in
    /// [`build_error`](Self::build_error), and the shape becomes a no-op on
    /// [`draw`](Self::draw).
    pub fn new(ctx: &mut C, geometry: Geometry, material: Material, shader: &ShaderSource) -> Self {
        match build_program(ctx, shader) {
            Ok(program) => Self::with_program(ctx, geometry, material, program),
            Err(err) => {
                log::error!("shape build failed: {err}");
                Self {
                    draw_call: geometry.draw_call(),
                    geometry,
                    material,
                    resources: None,
                    build_error: Some(err),
                }
            }
        }
    }

    /// Like [`new`](Self::new) but returns the shader error instead of a
    /// non-drawable shape.
    pub fn try_new(
        ctx: &mut C,
        geometry: Geometry,
        material: Material,
        shader: &ShaderSource,
    ) -> Result<Self, ShaderError> {
        let program = build_program(ctx, shader)?;
        Ok(Self::with_program(ctx, geometry, material, program))
    }

    /// Validates raw vertex data, then builds as [`new`](Self::new) does.
    pub fn from_raw(
        ctx: &mut C,
        positions: Vec<f32>,
        indices: Option<Vec<u16>>,
        color: Color,
        shader: &ShaderSource,
    ) -> Result<Self, GeometryError> {
        let geometry = Geometry::new(positions, indices)?;
        Ok(Self::new(ctx, geometry, Material::solid(color), shader))
    }

    fn with_program(ctx: &mut C, geometry: Geometry, material: Material, program: C::Program) -> Self {
        let buffers = ctx.upload_geometry(&geometry);
        log::debug!(
            "shape built: {} vertices, {:?}",
            geometry.vertex_count(),
            geometry.draw_call()
        );
        Self {
            draw_call: geometry.draw_call(),
            geometry,
            material,
            resources: Some(Resources { program, buffers }),
            build_error: None,
        }
    }

    /// Issues this shape's single draw call with `mvp` as its transform.
    ///
    /// No-op for a shape whose build failed.
    pub fn draw(&self, ctx: &mut C, mvp: &Transform) {
        let Some(res) = self.resources.as_ref() else {
            log::trace!("skipping draw of non-drawable shape");
            return;
        };

        ctx.use_program(&res.program);
        ctx.bind_geometry(&res.buffers);
        ctx.set_color(&res.program, self.material.color.to_array());
        ctx.set_transform(&res.program, mvp);
        ctx.check_error("set_transform");
        ctx.draw(self.draw_call);
        ctx.unbind_geometry(&res.buffers);
    }

    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.resources.is_some()
    }

    #[inline]
    pub fn build_error(&self) -> Option<&ShaderError> {
        self.build_error.as_ref()
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn draw_call(&self) -> DrawCall {
        self.draw_call
    }
}

/// Compiles both stages and links them.
///
/// Stage handles drop on return, after linking, whether or not it succeeded.
fn build_program<C: GraphicsContext>(
    ctx: &mut C,
    shader: &ShaderSource,
) -> Result<C::Program, ShaderError> {
    let vertex = ctx.compile_stage(StageKind::Vertex, shader.stage(StageKind::Vertex))?;
    let fragment = ctx.compile_stage(StageKind::Fragment, shader.stage(StageKind::Fragment))?;
    ctx.link_program(&vertex, &fragment)
}
