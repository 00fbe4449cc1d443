use calpal::config::{ConfigSource, SimConfig};
use calpal::error::CalPalError;
use calpal::frame_loop::{self, Simulation};
use log::info;
use std::path::PathBuf;

mod platform;

use platform::{SdlPlatform, SdlSurface, load_sprites};

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional config path as the first argument
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let (config, source) = SimConfig::load(explicit).map_err(CalPalError::from)?;
    match &source {
        ConfigSource::File(path) => info!("Using config {}", path.display()),
        ConfigSource::Defaults => info!("Using built-in config"),
    }

    let sdl_context = sdl2::init().map_err(CalPalError::Platform)?;
    let video_subsystem = sdl_context.video().map_err(CalPalError::Platform)?;
    let _image_context =
        sdl2::image::init(sdl2::image::InitFlag::PNG).map_err(CalPalError::Platform)?;

    let window = video_subsystem
        .window(&config.window.title, config.window.width, config.window.height)
        .position_centered()
        .build()
        .map_err(|e| CalPalError::Platform(e.to_string()))?;

    let canvas = window
        .into_canvas()
        .build()
        .map_err(|e| CalPalError::Platform(e.to_string()))?;
    let texture_creator = canvas.texture_creator();
    let event_pump = sdl_context.event_pump().map_err(CalPalError::Platform)?;

    let textures = load_sprites(&texture_creator, &config)?;
    info!(
        "Window {}x{} at {} FPS, {} sprite images loaded",
        config.window.width,
        config.window.height,
        config.window.target_fps,
        textures.len()
    );
    info!("Controls: 1 grass, 2 kibble, 3 snack (placed at the mouse), e spend");

    let mut platform = SdlPlatform::new(SdlSurface::new(canvas, textures), event_pump);
    let mut simulation = Simulation::new(config);

    let ticks = frame_loop::run(&mut simulation, &mut platform, None)?;
    info!("Simulated {} ticks, {} objects alive", ticks, simulation.registry().len());

    Ok(())
}
