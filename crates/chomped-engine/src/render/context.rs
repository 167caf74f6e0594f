use wgpu::util::DeviceExt;

use crate::coords::Transform;
use crate::device::{ErrorSink, Gpu, GpuFrame};
use crate::geometry::{DrawCall, Geometry};
use crate::gfx::{GraphicsContext, ShaderError};
use crate::shader::{StageKind, FRAGMENT_ENTRY, VERTEX_ENTRY};

use super::uniform::{position_layout, uniform_min_binding_size, ShapeUniform};

/// Compiled WGSL module for one stage.
pub struct WgpuStage {
    kind: StageKind,
    module: wgpu::ShaderModule,
}

/// Render pipeline plus the layout its uniform bind group must match.
#[derive(Clone)]
pub struct WgpuProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

/// Vertex (and optional `u16` index) buffer for one geometry.
pub struct WgpuBuffers {
    vertex: wgpu::Buffer,
    index: Option<wgpu::Buffer>,
}

/// Current program, bound geometry and pending uniform values.
#[derive(Default)]
struct BindState {
    program: Option<WgpuProgram>,
    vertex: Option<wgpu::Buffer>,
    index: Option<wgpu::Buffer>,
    uniform: ShapeUniform,
}

/// wgpu implementation of [`GraphicsContext`].
///
/// Binding calls only update local state; [`draw`](GraphicsContext::draw)
/// turns that state into a render pass on the attached frame.
pub struct WgpuContext {
    device: wgpu::Device,
    surface_format: wgpu::TextureFormat,
    errors: ErrorSink,
    frame: Option<GpuFrame>,
    state: BindState,
}

impl WgpuContext {
    /// `errors` must already be installed on `device`.
    pub fn new(device: wgpu::Device, surface_format: wgpu::TextureFormat, errors: ErrorSink) -> Self {
        Self {
            device,
            surface_format,
            errors,
            frame: None,
            state: BindState::default(),
        }
    }

    pub fn from_gpu(gpu: &Gpu<'_>) -> Self {
        Self::new(gpu.device().clone(), gpu.surface_format(), gpu.errors().clone())
    }

    /// Attaches `frame` as the draw target.
    ///
    /// A frame that was still attached is returned unsubmitted.
    pub fn begin_frame(&mut self, frame: GpuFrame) -> Option<GpuFrame> {
        let previous = self.frame.replace(frame);
        if previous.is_some() {
            log::warn!("begin_frame called while a frame was still attached");
        }
        previous
    }

    /// Detaches the current frame so it can be submitted.
    pub fn end_frame(&mut self) -> Option<GpuFrame> {
        self.frame.take()
    }
}

impl GraphicsContext for WgpuContext {
    type Stage = WgpuStage;
    type Program = WgpuProgram;
    type Buffers = WgpuBuffers;

    fn compile_stage(&mut self, kind: StageKind, source: &str) -> Result<WgpuStage, ShaderError> {
        // Anything already in the sink belongs to an earlier call.
        self.check_error("before compile");

        let label = match kind {
            StageKind::Vertex => "chomped vertex stage",
            StageKind::Fragment => "chomped fragment stage",
        };
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        match self.errors.take() {
            Some(log) => Err(ShaderError::Compile { stage: kind, log }),
            None => Ok(WgpuStage { kind, module }),
        }
    }

    fn link_program(
        &mut self,
        vertex: &WgpuStage,
        fragment: &WgpuStage,
    ) -> Result<WgpuProgram, ShaderError> {
        if vertex.kind != StageKind::Vertex || fragment.kind != StageKind::Fragment {
            return Err(ShaderError::Link {
                log: format!("expected vertex + fragment, got {} + {}", vertex.kind, fragment.kind),
            });
        }

        self.check_error("before link");

        let bind_group_layout =
            self.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("chomped shape bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(uniform_min_binding_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            self.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("chomped shape pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("chomped shape pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex.module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[position_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment.module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        match self.errors.take() {
            Some(log) => Err(ShaderError::Link { log }),
            None => Ok(WgpuProgram {
                pipeline,
                bind_group_layout,
            }),
        }
    }

    fn upload_geometry(&mut self, geometry: &Geometry) -> WgpuBuffers {
        let vertex = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chomped shape vbo"),
            contents: bytemuck::cast_slice(geometry.positions()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index = geometry.indices().map(|indices| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("chomped shape ibo"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        WgpuBuffers { vertex, index }
    }

    fn use_program(&mut self, program: &WgpuProgram) {
        self.state.program = Some(program.clone());
    }

    fn bind_geometry(&mut self, buffers: &WgpuBuffers) {
        self.state.vertex = Some(buffers.vertex.clone());
        self.state.index = buffers.index.clone();
    }

    fn set_color(&mut self, _program: &WgpuProgram, rgba: [f32; 4]) {
        self.state.uniform.color = rgba;
    }

    fn set_transform(&mut self, _program: &WgpuProgram, mvp: &Transform) {
        self.state.uniform.mvp = mvp.cols;
    }

    fn draw(&mut self, call: DrawCall) {
        if call.count() == 0 {
            log::trace!("skipping empty draw {call:?}");
            return;
        }

        let Some(program) = self.state.program.as_ref() else {
            self.errors.record("draw: no program in use");
            return;
        };
        let Some(vertex) = self.state.vertex.as_ref() else {
            self.errors.record("draw: no geometry bound");
            return;
        };
        let index = self.state.index.as_ref();
        if matches!(call, DrawCall::Indexed { .. }) && index.is_none() {
            self.errors.record("draw: indexed draw without an index buffer");
            return;
        }
        let Some(frame) = self.frame.as_mut() else {
            self.errors.record("draw: no frame attached");
            return;
        };

        let ubo = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chomped shape ubo"),
            contents: bytemuck::bytes_of(&self.state.uniform),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("chomped shape bind group"),
            layout: &program.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("chomped shape pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&program.pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.set_vertex_buffer(0, vertex.slice(..));

        match (call, index) {
            (DrawCall::Indexed { index_count }, Some(index)) => {
                rpass.set_index_buffer(index.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..index_count, 0, 0..1);
            }
            (DrawCall::Arrays { vertex_count }, _) => rpass.draw(0..vertex_count, 0..1),
            (DrawCall::Indexed { .. }, None) => {}
        }
    }

    fn unbind_geometry(&mut self, _buffers: &WgpuBuffers) {
        self.state.vertex = None;
        self.state.index = None;
    }

    fn take_error(&mut self) -> Option<String> {
        self.errors.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::GpuInit;
    use crate::paint::{Color, Material};
    use crate::shader::ShaderSource;
    use crate::shape::Shape;

    fn noop_context() -> (WgpuContext, ErrorSink) {
        let (device, _queue) = wgpu::Device::noop(&GpuInit::default().device_descriptor());
        let errors = ErrorSink::new();
        errors.install(&device);
        let ctx = WgpuContext::new(device, wgpu::TextureFormat::Rgba8Unorm, errors.clone());
        (ctx, errors)
    }

    fn triangle() -> Geometry {
        Geometry::from_positions(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap()
    }

    fn green() -> Material {
        Material::solid(Color::new(0.636_718_75, 0.769_531_25, 0.222_656_25, 1.0))
    }

    #[test]
    fn malformed_wgsl_is_a_vertex_compile_error() {
        let (mut ctx, _) = noop_context();
        let err = ctx
            .compile_stage(StageKind::Vertex, "@vertex fn vs_main( {")
            .err()
            .unwrap();

        match err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(stage, StageKind::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn solid_shader_builds_a_drawable_shape() {
        let (mut ctx, _) = noop_context();
        let shape = Shape::new(&mut ctx, triangle(), green(), &ShaderSource::solid());

        assert!(shape.is_drawable());
        assert_eq!(shape.build_error(), None);
        assert_eq!(ctx.take_error(), None);
    }

    #[test]
    fn fragment_input_missing_from_vertex_output_fails_to_link() {
        let (mut ctx, _) = noop_context();
        let fragment = "@fragment\n\
            fn fs_main(@location(3) tint: vec4<f32>) -> @location(0) vec4<f32> {\n\
                return tint;\n\
            }\n";
        let shader = ShaderSource::new(ShaderSource::solid().vertex, fragment);
        let shape = Shape::new(&mut ctx, triangle(), green(), &shader);

        assert!(!shape.is_drawable());
        assert!(matches!(shape.build_error(), Some(ShaderError::Link { .. })));
    }

    #[test]
    fn draw_without_a_frame_is_reported() {
        let (mut ctx, _) = noop_context();
        let shape = Shape::new(&mut ctx, triangle(), green(), &ShaderSource::solid());
        assert!(shape.is_drawable());

        shape.draw(&mut ctx, &Transform::IDENTITY);
        let err = ctx.take_error().unwrap();
        assert!(err.contains("no frame attached"), "{err}");
    }

    #[test]
    fn draw_without_a_program_is_reported() {
        let (mut ctx, _) = noop_context();
        ctx.draw(DrawCall::Arrays { vertex_count: 3 });
        assert_eq!(ctx.take_error().as_deref(), Some("draw: no program in use"));
    }

    #[test]
    fn stale_error_does_not_fail_the_next_compile() {
        let (mut ctx, errors) = noop_context();
        errors.record("left over from an earlier call");

        let stage = ctx.compile_stage(StageKind::Vertex, ShaderSource::solid().stage(StageKind::Vertex));
        assert!(stage.is_ok());
        assert_eq!(errors.take(), None);
    }
}
