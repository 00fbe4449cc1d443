//! Frame loop
//!
//! One tick, in order:
//!
//! 1. Wait for the frame slot (caps the loop at `target_fps`) and measure `dt`
//! 2. Poll input; a quit event ends the loop before anything else happens
//! 3. Step the simulation (see [`crate::registry`] for what a step does)
//! 4. Clear, render back to front, present
//! 5. Every `fps_sample_ticks` ticks, put the averaged FPS in the window title
//!
//! The loop talks to the outside world only through [`Platform`], so it runs
//! the same against SDL2 or a scripted test double.

use crate::config::SimConfig;
use crate::input::FrameInput;
use crate::registry::ObjectRegistry;
use crate::render::{self, Surface, BACKGROUND};
use crate::scene;
use log::{info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Window, input and timing services the loop needs.
pub trait Platform {
    /// Everything that happened since the last poll.
    fn poll_input(&mut self) -> FrameInput;

    /// Blocks until the next frame slot. Returns seconds since the last call.
    fn wait_frame(&mut self, target_fps: u32) -> f32;

    fn surface(&mut self) -> &mut dyn Surface;

    fn present(&mut self) -> Result<(), String>;

    fn set_title(&mut self, title: &str) -> Result<(), String>;
}

/// Averages frame times over a fixed number of ticks.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    sample_ticks: u32,
    ticks: u32,
    elapsed: f32,
}

impl FpsCounter {
    pub fn new(sample_ticks: u32) -> Self {
        FpsCounter {
            sample_ticks: sample_ticks.max(1),
            ticks: 0,
            elapsed: 0.0,
        }
    }

    /// Adds one frame. Returns the average FPS when a sample completes.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.ticks += 1;
        self.elapsed += dt;
        if self.ticks < self.sample_ticks {
            return None;
        }

        let fps = if self.elapsed > 0.0 {
            self.ticks as f32 / self.elapsed
        } else {
            0.0
        };
        self.ticks = 0;
        self.elapsed = 0.0;
        Some(fps)
    }
}

/// The registry plus everything it needs to step: config and RNG.
pub struct Simulation {
    registry: ObjectRegistry,
    config: SimConfig,
    rng: StdRng,
    ticks: u64,
}

impl Simulation {
    /// Builds a simulation with the starting scene enqueued.
    pub fn new(config: SimConfig) -> Self {
        let mut simulation = Simulation::empty(config);
        scene::populate(&mut simulation.registry, &simulation.config, &mut simulation.rng);
        simulation
    }

    /// Builds a simulation with nothing in it.
    pub fn empty(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Simulation {
            registry: ObjectRegistry::new(),
            config,
            rng,
            ticks: 0,
        }
    }

    pub fn step(&mut self, input: &FrameInput, dt: f32) {
        self.registry.update(input, dt, &self.config, &mut self.rng);
        self.ticks += 1;
    }

    pub fn render(&self, surface: &mut dyn Surface, dt: f32) -> Result<(), String> {
        surface.clear(BACKGROUND)?;
        render::render_pass(surface, &self.registry, dt)
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Runs until a quit event arrives, or for at most `max_ticks` ticks.
///
/// Returns the number of ticks simulated.
pub fn run<P: Platform>(
    simulation: &mut Simulation,
    platform: &mut P,
    max_ticks: Option<u64>,
) -> Result<u64, String> {
    let window = simulation.config().window.clone();
    let mut fps = FpsCounter::new(window.fps_sample_ticks);
    let mut ticks = 0;

    while max_ticks.is_none_or(|max| ticks < max) {
        let dt = platform.wait_frame(window.target_fps);

        let input = platform.poll_input();
        if input.quit_requested() {
            info!("Quit requested after {} ticks", ticks);
            break;
        }

        simulation.step(&input, dt);
        simulation.render(platform.surface(), dt)?;
        platform.present()?;
        ticks += 1;

        if let Some(average) = fps.record(dt) {
            trace!("Averaged {:.1} FPS", average);
            platform.set_title(&format!("{} - {:.0} FPS", window.title, average))?;
        }
    }

    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Key};
    use crate::render::{HeadlessSurface, Sprite};
    use glam::Vec2;
    use std::collections::VecDeque;

    /// Replays scripted frames at a fixed frame time.
    struct ScriptedPlatform {
        frames: VecDeque<FrameInput>,
        surface: HeadlessSurface,
        /// Sprites drawn in each presented frame
        presented: Vec<Vec<Sprite>>,
        titles: Vec<String>,
    }

    impl ScriptedPlatform {
        fn new(frames: Vec<FrameInput>) -> Self {
            ScriptedPlatform {
                frames: frames.into(),
                surface: HeadlessSurface::new(),
                presented: Vec::new(),
                titles: Vec::new(),
            }
        }
    }

    impl Platform for ScriptedPlatform {
        fn poll_input(&mut self) -> FrameInput {
            self.frames.pop_front().unwrap_or_default()
        }

        fn wait_frame(&mut self, target_fps: u32) -> f32 {
            1.0 / target_fps as f32
        }

        fn surface(&mut self) -> &mut dyn Surface {
            &mut self.surface
        }

        fn present(&mut self) -> Result<(), String> {
            self.presented.push(self.surface.sprites());
            self.surface.reset();
            Ok(())
        }

        fn set_title(&mut self, title: &str) -> Result<(), String> {
            self.titles.push(title.to_string());
            Ok(())
        }
    }

    fn quiet_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.seed = Some(11);
        config.scene.creatures = 0;
        config.scene.grass = 0;
        config
    }

    #[test]
    fn test_fps_counter_samples_every_n_ticks() {
        let mut counter = FpsCounter::new(3);
        assert_eq!(counter.record(0.01), None);
        assert_eq!(counter.record(0.01), None);
        let fps = counter.record(0.01).expect("sample complete");
        assert!((fps - 100.0).abs() < 0.01);
        assert_eq!(counter.record(0.01), None);
    }

    #[test]
    fn test_quit_stops_before_stepping() {
        let mut simulation = Simulation::new(quiet_config());
        let quit = FrameInput::new(vec![InputEvent::Quit], Vec2::ZERO);
        let mut platform = ScriptedPlatform::new(vec![FrameInput::default(), quit]);

        let ticks = run(&mut simulation, &mut platform, None).expect("loop runs");

        assert_eq!(ticks, 1);
        assert_eq!(simulation.ticks(), 1);
        assert_eq!(platform.presented.len(), 1);
    }

    #[test]
    fn test_max_ticks_bounds_the_loop() {
        let mut simulation = Simulation::new(quiet_config());
        let mut platform = ScriptedPlatform::new(Vec::new());

        let ticks = run(&mut simulation, &mut platform, Some(5)).expect("loop runs");

        assert_eq!(ticks, 5);
        assert_eq!(platform.presented.len(), 5);
    }

    #[test]
    fn test_scene_is_drawn_from_the_first_tick() {
        let mut simulation = Simulation::new(quiet_config());
        let mut platform = ScriptedPlatform::new(Vec::new());

        run(&mut simulation, &mut platform, Some(1)).expect("loop runs");

        assert_eq!(platform.presented[0], vec![Sprite::PondCalm, Sprite::Shack]);
    }

    #[test]
    fn test_fps_title_is_refreshed_every_sample() {
        let mut simulation = Simulation::new(quiet_config());
        let mut platform = ScriptedPlatform::new(Vec::new());

        run(&mut simulation, &mut platform, Some(60)).expect("loop runs");

        assert_eq!(platform.titles.len(), 2);
        assert_eq!(platform.titles[0], "CalPal - 120 FPS");
    }

    #[test]
    fn test_key_press_spawns_food_visible_next_frame() {
        let mut simulation = Simulation::new(quiet_config());
        let press = FrameInput::new(vec![InputEvent::KeyDown(Key::Num2)], Vec2::new(300.0, 300.0));
        let mut platform = ScriptedPlatform::new(vec![press]);

        run(&mut simulation, &mut platform, Some(2)).expect("loop runs");

        assert!(!platform.presented[0].contains(&Sprite::Kibble));
        assert_eq!(
            platform.presented[1],
            vec![Sprite::PondCalm, Sprite::Shack, Sprite::Kibble]
        );
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut config = SimConfig::default();
        config.seed = Some(99);

        let positions = |config: &SimConfig| {
            let mut simulation = Simulation::new(config.clone());
            for _ in 0..200 {
                simulation.step(&FrameInput::default(), 1.0 / 120.0);
            }
            simulation
                .registry()
                .live()
                .iter()
                .map(|object| object.position)
                .collect::<Vec<_>>()
        };

        assert_eq!(positions(&config), positions(&config));
    }
}
