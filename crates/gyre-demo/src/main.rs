mod app;
mod scene;
mod session;

use anyhow::Result;
use gyre_engine::device::GpuInit;
use gyre_engine::logging::{LoggingConfig, init_logging};
use gyre_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use crate::app::DemoApp;

const WINDOW_TITLE: &str = "gyre";
const WINDOW_WIDTH: u32 = 640;
const WINDOW_HEIGHT: u32 = 480;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!(
        "starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    log::info!("controls: Esc quit | F1 fullscreen | W/S strafe | mouse look");

    let config = RuntimeConfig {
        title: WINDOW_TITLE.to_string(),
        initial_size: LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64),
        capture_pointer: true,
    };
    Runtime::run(
        config,
        GpuInit::default(),
        DemoApp::new(WINDOW_WIDTH, WINDOW_HEIGHT),
    )
}
