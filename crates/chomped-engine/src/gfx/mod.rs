//! Graphics-context seam.
//!
//! [`GraphicsContext`] is everything a [`Shape`](crate::shape::Shape) needs
//! from its host: stage compilation, program linking, geometry upload, the
//! per-draw binding sequence and a "most recent error" query.
//!
//! Handles are owned values. Dropping one releases the underlying object, so
//! the owner's lifetime is the resource's lifetime.
//!
//! Every method takes `&mut self`: binding state is global to the context and
//! calls must come from the one thread that owns it.

mod error;

#[cfg(test)]
pub(crate) mod recording;

pub use error::ShaderError;

use crate::coords::Transform;
use crate::geometry::{DrawCall, Geometry};
use crate::shader::StageKind;

pub trait GraphicsContext {
    /// One compiled stage.
    type Stage;
    /// A linked vertex + fragment pair.
    type Program;
    /// Device-side copy of a [`Geometry`].
    type Buffers;

    fn compile_stage(&mut self, kind: StageKind, source: &str) -> Result<Self::Stage, ShaderError>;

    fn link_program(
        &mut self,
        vertex: &Self::Stage,
        fragment: &Self::Stage,
    ) -> Result<Self::Program, ShaderError>;

    fn upload_geometry(&mut self, geometry: &Geometry) -> Self::Buffers;

    /// Makes `program` current for subsequent uniform uploads and draws.
    fn use_program(&mut self, program: &Self::Program);

    /// Enables the position attribute and points it at `buffers`.
    fn bind_geometry(&mut self, buffers: &Self::Buffers);

    fn set_color(&mut self, program: &Self::Program, rgba: [f32; 4]);

    fn set_transform(&mut self, program: &Self::Program, mvp: &Transform);

    fn draw(&mut self, call: DrawCall);

    /// Disables the attribute enabled by [`bind_geometry`](Self::bind_geometry).
    fn unbind_geometry(&mut self, buffers: &Self::Buffers);

    /// Returns and clears the most recent context error, if any.
    fn take_error(&mut self) -> Option<String>;

    /// Logs the most recent context error after `op`.
    ///
    /// Returns `true` if an error was pending.
    fn check_error(&mut self, op: &str) -> bool {
        match self.take_error() {
            Some(err) => {
                log::error!("{op}: {err}");
                true
            }
            None => false,
        }
    }
}
