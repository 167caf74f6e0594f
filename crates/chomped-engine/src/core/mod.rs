//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop)
//! and the application that owns the shapes.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
