//! wgpu host for shapes.
//!
//! [`WgpuContext`] implements [`GraphicsContext`](crate::gfx::GraphicsContext)
//! on top of a wgpu device:
//! - a stage is a shader module, a program is a render pipeline
//! - compile and link failures are read back from the device's
//!   [`ErrorSink`](crate::device::ErrorSink)
//! - draws are recorded into the [`GpuFrame`](crate::device::GpuFrame)
//!   currently attached to the context, one render pass per draw
//!
//! Shader text is WGSL.

mod context;
mod uniform;

pub use context::{WgpuBuffers, WgpuContext, WgpuProgram, WgpuStage};
