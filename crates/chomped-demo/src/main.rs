mod scene;

use anyhow::Result;
use winit::dpi::LogicalSize;

use chomped_engine::device::GpuInit;
use chomped_engine::logging::{init_logging, LoggingConfig};
use chomped_engine::paint::Color;
use chomped_engine::window::{Runtime, RuntimeConfig};

use scene::ChompedScene;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Chomped".to_string(),
        initial_size: LogicalSize::new(480.0, 800.0),
        clear_color: Color::black(),
    };

    log::info!("starting {}", config.title);

    Runtime::run(config, GpuInit::downlevel(), ChompedScene::default())
}
