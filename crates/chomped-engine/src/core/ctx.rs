use winit::window::{Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::gfx::GraphicsContext;
use crate::paint::Color;
use crate::render::WgpuContext;

use super::app::AppControl;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub gfx: &'a mut WgpuContext,
    /// Color the surface is cleared to before `render` draws.
    pub clear: Color,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface with [`clear`](Self::clear), attaches the frame to
    /// the graphics context, calls `draw`, then presents.
    ///
    /// Surface errors skip the frame; a fatal one returns
    /// [`AppControl::Exit`].
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&mut WgpuContext),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("surface error: {err}");
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("fatal surface error; exiting");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        // Clear pass; dropped before the frame moves into the context.
        let clear = self.clear;
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("chomped clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        if self.gfx.begin_frame(frame).is_some() {
            log::warn!("dropped a frame left attached by a previous render");
        }

        draw(&mut *self.gfx);
        self.gfx.check_error("frame");

        let Some(frame) = self.gfx.end_frame() else {
            return AppControl::Continue;
        };

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
        // Render-pass validation runs when the encoder is finished.
        self.gfx.check_error("submit");

        AppControl::Continue
    }
}
