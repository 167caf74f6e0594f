//! Chomped engine crate.
//!
//! Solid-color shapes drawn through a small graphics-context seam:
//! - [`shape::Shape`] owns geometry, a material and a linked shader program
//! - [`gfx::GraphicsContext`] is what a shape needs from its host
//! - [`render::WgpuContext`] is the wgpu host, driven by [`window::Runtime`]

pub mod coords;
pub mod geometry;
pub mod gfx;
pub mod paint;
pub mod shader;
pub mod shape;

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod window;
