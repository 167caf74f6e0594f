//! Coordinate transforms shared between shapes and their hosts.
//!
//! Canonical space is clip space: the transform handed to a draw maps model
//! coordinates straight to it. Camera and projection math stay with the
//! caller.

mod transform;

pub use transform::Transform;
