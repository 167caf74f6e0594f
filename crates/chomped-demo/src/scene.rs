use anyhow::Result;

use chomped_engine::coords::Transform;
use chomped_engine::core::{App, AppControl, FrameCtx};
use chomped_engine::geometry::Geometry;
use chomped_engine::paint::{Color, Material};
use chomped_engine::render::WgpuContext;
use chomped_engine::shader::ShaderSource;
use chomped_engine::shape::Shape;

/// Sliver pointing up, counter-clockwise: top, bottom left, bottom right.
const TRIANGLE: [f32; 9] = [
    0.0, -0.922_008_46, 0.0,
    -0.05, -1.0, 0.0,
    0.05, -1.0, 0.0,
];

const TRIANGLE_COLOR: Color = Color::new(0.636_718_75, 0.769_531_25, 0.222_656_25, 1.0);

/// Top left, bottom left, bottom right, top right.
const SQUARE: [f32; 12] = [
    0.05, -0.7, 0.0,
    0.05, -0.8, 0.0,
    -0.05, -0.8, 0.0,
    -0.05, -0.7, 0.0,
];

const SQUARE_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const SQUARE_COLOR: Color = Color::new(0.2, 0.709_803_9, 0.898_039_2, 1.0);

/// The two-shape scene, drawn every frame with the identity transform.
#[derive(Default)]
pub struct ChompedScene {
    shapes: Vec<Shape<WgpuContext>>,
}

impl App for ChompedScene {
    fn init(&mut self, gfx: &mut WgpuContext) -> Result<()> {
        let shader = ShaderSource::solid();

        let triangle = Shape::new(
            gfx,
            Geometry::from_positions(TRIANGLE.to_vec())?,
            Material::solid(TRIANGLE_COLOR),
            &shader,
        );
        let square = Shape::new(
            gfx,
            Geometry::indexed(SQUARE.to_vec(), SQUARE_INDICES.to_vec())?,
            Material::solid(SQUARE_COLOR),
            &shader,
        );

        self.shapes = vec![triangle, square];

        let drawable = self.shapes.iter().filter(|s| s.is_drawable()).count();
        if drawable < self.shapes.len() {
            log::warn!("{} of {} shapes failed to build", self.shapes.len() - drawable, self.shapes.len());
        }
        log::info!("scene ready: {drawable} drawable shapes");

        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let mvp = Transform::IDENTITY;
        let shapes = &self.shapes;
        ctx.render(|gfx| {
            for shape in shapes {
                shape.draw(gfx, &mvp);
            }
        })
    }
}
