//! Initial scene and layout scaling
//!
//! Scene positions are authored in a square 900-unit layout space and scaled
//! to the configured window, so the same layout works at any resolution.
//! Single lengths scale by the window width.

use crate::config::{SimConfig, WindowConfig};
use crate::object::creature::MAX_NEED;
use crate::object::SimObject;
use crate::registry::ObjectRegistry;
use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::Rng;

/// Side length of the layout space.
pub const LAYOUT_UNITS: f32 = 900.0;

/// Margin kept free around the edge when scattering objects.
const SCATTER_MARGIN: f32 = 100.0;

/// Scales a layout point to window coordinates.
pub fn posscale(point: [f32; 2], window: &WindowConfig) -> Vec2 {
    Vec2::new(
        point[0] / LAYOUT_UNITS * window.width as f32,
        point[1] / LAYOUT_UNITS * window.height as f32,
    )
}

/// Like [`posscale`] but truncated to whole pixels.
pub fn cscale(point: [f32; 2], window: &WindowConfig) -> (i32, i32) {
    let scaled = posscale(point, window);
    (scaled.x as i32, scaled.y as i32)
}

/// Scales a single length by the window width.
pub fn scale_length(length: f32, window: &WindowConfig) -> f32 {
    length / LAYOUT_UNITS * window.width as f32
}

fn scatter(rng: &mut StdRng, window: &WindowConfig) -> Vec2 {
    let range = SCATTER_MARGIN..=(LAYOUT_UNITS - SCATTER_MARGIN);
    posscale([rng.gen_range(range.clone()), rng.gen_range(range)], window)
}

/// Enqueues the starting scene: GUI, pond, shack, creatures and grass.
///
/// Nothing is live until the registry's next pass.
pub fn populate(registry: &mut ObjectRegistry, config: &SimConfig, rng: &mut StdRng) {
    let window = &config.window;

    registry.enqueue_add(SimObject::gui(config));
    registry.enqueue_add(SimObject::pond(posscale(config.scene.pond, window), config));
    registry.enqueue_add(SimObject::shack(posscale(config.scene.shack, window)));

    for _ in 0..config.scene.creatures {
        let mut creature = SimObject::creature(scatter(rng, window), config);
        if let Some(pet) = creature.as_creature_mut() {
            let hunger = rng.gen_range(70.0..=MAX_NEED);
            let thirst = rng.gen_range(70.0..=MAX_NEED);
            *pet = pet.clone().with_needs(hunger, thirst);
        }
        registry.enqueue_add(creature);
    }

    for _ in 0..config.scene.grass {
        registry.enqueue_add(SimObject::grass(scatter(rng, window), config));
    }

    info!(
        "Scene: {} creatures, {} grass, pond at {:?}, shack at {:?}",
        config.scene.creatures,
        config.scene.grass,
        cscale(config.scene.pond, window),
        cscale(config.scene.shack, window)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn window(width: u32, height: u32) -> WindowConfig {
        WindowConfig {
            width,
            height,
            ..Default::default()
        }
    }

    #[test]
    fn test_layout_scaling() {
        let window = window(1800, 450);
        assert_eq!(posscale([450.0, 450.0], &window), Vec2::new(900.0, 225.0));
        assert_eq!(cscale([100.0, 100.0], &window), (200, 50));
        assert_eq!(scale_length(90.0, &window), 180.0);
    }

    #[test]
    fn test_identity_at_layout_size() {
        let window = window(900, 900);
        assert_eq!(posscale([123.0, 456.0], &window), Vec2::new(123.0, 456.0));
    }

    #[test]
    fn test_populate_enqueues_whole_scene() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut registry = ObjectRegistry::new();

        populate(&mut registry, &config, &mut rng);
        assert!(registry.is_empty());
        assert_eq!(
            registry.pending_len(),
            3 + config.scene.creatures + config.scene.grass
        );

        registry.advance();
        assert_eq!(registry.count_kind("gui"), 1);
        assert_eq!(registry.count_kind("pond"), 1);
        assert_eq!(registry.count_kind("shack"), 1);
        assert_eq!(registry.count_kind("creature"), config.scene.creatures);
        assert_eq!(registry.count_kind("grass"), config.scene.grass);

        // GUI draws last
        assert_eq!(registry.live().last().map(|o| o.kind.name()), Some("gui"));

        for creature in registry.live().iter().filter_map(SimObject::as_creature) {
            assert!(creature.hunger >= 70.0);
            assert!(creature.thirst >= 70.0);
        }
    }

    #[test]
    fn test_scatter_stays_inside_margin() {
        let window = window(900, 900);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let point = scatter(&mut rng, &window);
            assert!(point.x >= SCATTER_MARGIN && point.x <= LAYOUT_UNITS - SCATTER_MARGIN);
            assert!(point.y >= SCATTER_MARGIN && point.y <= LAYOUT_UNITS - SCATTER_MARGIN);
        }
    }
}
