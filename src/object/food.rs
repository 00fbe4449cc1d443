//! Consumable food
//!
//! Kibble and snacks are static food items with fixed values; grass is food
//! too but grows (see [`super::grass`]). The player buys all three through the
//! GUI overlay.

use super::{draw_order, ObjectKind, SimObject};
use crate::config::{GuiConfig, SimConfig};
use crate::render::Sprite;
use glam::Vec2;

pub const KIBBLE_SIZE: u32 = 24;
pub const SNACK_SIZE: u32 = 24;

/// What a creature gains from eating something.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutrition {
    pub calories: f32,
    pub happiness: f32,
}

/// Food the player can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Grass,
    Kibble,
    Snack,
}

impl FoodKind {
    /// Calorie cost charged to the GUI budget.
    pub fn cost(&self, gui: &GuiConfig) -> u32 {
        match self {
            FoodKind::Grass => gui.grass_cost,
            FoodKind::Kibble => gui.kibble_cost,
            FoodKind::Snack => gui.snack_cost,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FoodKind::Grass => "grass",
            FoodKind::Kibble => "kibble",
            FoodKind::Snack => "snack",
        }
    }

    pub fn sprite(&self) -> Sprite {
        match self {
            FoodKind::Grass => Sprite::Seed,
            FoodKind::Kibble => Sprite::Kibble,
            FoodKind::Snack => Sprite::Snack,
        }
    }

    /// Builds a new, not yet enqueued, food object at `position`.
    pub fn spawn(&self, position: Vec2, config: &SimConfig) -> SimObject {
        let food = &config.food;
        match self {
            FoodKind::Grass => SimObject::grass(position, config),
            FoodKind::Kibble => SimObject::new(
                ObjectKind::Kibble(Nutrition {
                    calories: food.kibble_calories,
                    happiness: food.kibble_happiness,
                }),
                position,
                draw_order::FOOD,
                KIBBLE_SIZE,
                KIBBLE_SIZE,
            )
            .with_lifetime(food.kibble_lifetime_ticks),
            FoodKind::Snack => SimObject::new(
                ObjectKind::Snack(Nutrition {
                    calories: food.snack_calories,
                    happiness: food.snack_happiness,
                }),
                position,
                draw_order::FOOD,
                SNACK_SIZE,
                SNACK_SIZE,
            )
            .with_lifetime(food.snack_lifetime_ticks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_costs_follow_gui_config() {
        let gui = GuiConfig::default();
        assert_eq!(FoodKind::Grass.cost(&gui), 100);
        assert_eq!(FoodKind::Kibble.cost(&gui), 200);
        assert_eq!(FoodKind::Snack.cost(&gui), 300);
    }

    #[test]
    fn test_spawn_produces_matching_kind() {
        let config = SimConfig::default();
        let position = Vec2::new(5.0, 6.0);

        assert!(matches!(FoodKind::Grass.spawn(position, &config).kind, ObjectKind::Grass(_)));
        assert!(matches!(FoodKind::Kibble.spawn(position, &config).kind, ObjectKind::Kibble(_)));

        let snack = FoodKind::Snack.spawn(position, &config);
        assert!(matches!(snack.kind, ObjectKind::Snack(_)));
        assert_eq!(snack.position, position);
        assert!(snack.is_food());
    }
}
