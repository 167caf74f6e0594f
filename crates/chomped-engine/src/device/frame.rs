/// A single acquired surface frame.
///
/// Short-lived: attach it to a [`WgpuContext`](crate::render::WgpuContext),
/// record draws, detach and submit. Holding the surface texture blocks
/// acquisition of the next frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
