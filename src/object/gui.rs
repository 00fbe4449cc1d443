//! Player overlay
//!
//! The GUI owns the calorie budget the player spends on food. Each frame it
//! scans the key presses:
//!
//! - `1` / `2` / `3`: place grass / kibble / snack at the pointer
//! - `e`: spend calories on nothing
//!
//! A purchase only happens if the budget covers the full cost, so the budget
//! can never go negative. Spawned food is enqueued and goes live on the next
//! registry pass.

use super::FoodKind;
use crate::config::GuiConfig;
use crate::input::Key;
use crate::registry::FrameContext;
use crate::render::{Color, Surface};
use log::debug;

const TEXT_COLOR: Color = Color::rgb(255, 255, 255);
const LEGEND_COLOR: Color = Color::rgb(200, 200, 210);
const BROKE_COLOR: Color = Color::rgb(220, 80, 80);

#[derive(Debug, Clone)]
pub struct Gui {
    budget: u32,
    /// Fractional calories regenerated but not yet credited
    regen_carry: f32,
    config: GuiConfig,
}

impl Gui {
    pub fn new(config: &GuiConfig) -> Self {
        Gui {
            budget: config.starting_budget,
            regen_carry: 0.0,
            config: config.clone(),
        }
    }

    pub fn with_budget(config: &GuiConfig, budget: u32) -> Self {
        Gui {
            budget,
            ..Gui::new(config)
        }
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Deducts `cost` if the budget covers it. Returns whether it did.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.budget >= cost {
            self.budget -= cost;
            true
        } else {
            false
        }
    }

    /// Credits regenerated calories, capped at the configured maximum.
    pub fn regenerate(&mut self, time_delta: f32) {
        if self.config.regen_per_second <= 0.0 || self.budget >= self.config.max_budget {
            self.regen_carry = 0.0;
            return;
        }

        self.regen_carry += self.config.regen_per_second * time_delta;
        let whole = self.regen_carry.floor();
        if whole >= 1.0 {
            self.regen_carry -= whole;
            self.budget = self
                .budget
                .saturating_add(whole as u32)
                .min(self.config.max_budget);
        }
    }

    pub fn pre_update(&mut self, ctx: &mut FrameContext) {
        self.regenerate(ctx.dt);

        let input = ctx.input;
        let config = ctx.config;
        for key in input.key_presses() {
            let food = match key {
                Key::Num1 => FoodKind::Grass,
                Key::Num2 => FoodKind::Kibble,
                Key::Num3 => FoodKind::Snack,
                Key::E => {
                    if self.try_spend(self.config.spend_cost) {
                        debug!("Spent {} calories, {} left", self.config.spend_cost, self.budget);
                    }
                    continue;
                }
                Key::Other => continue,
            };

            let cost = food.cost(&self.config);
            if self.try_spend(cost) {
                let id = ctx.world.enqueue_add(food.spawn(input.pointer, config));
                debug!(
                    "Placed {} {} at ({:.0}, {:.0}), {} calories left",
                    food.name(),
                    id,
                    input.pointer.x,
                    input.pointer.y,
                    self.budget
                );
            } else {
                debug!("Not enough calories for {} ({} < {})", food.name(), self.budget, cost);
            }
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), String> {
        let cheapest = self
            .config
            .grass_cost
            .min(self.config.kibble_cost)
            .min(self.config.snack_cost);
        let budget_color = if self.budget < cheapest { BROKE_COLOR } else { TEXT_COLOR };

        surface.draw_text(&format!("CALORIES: {}", self.budget), 10, 10, budget_color, 2)?;
        surface.draw_text(
            &format!(
                "1 GRASS {}  2 KIBBLE {}  3 SNACK {}",
                self.config.grass_cost, self.config.kibble_cost, self.config.snack_cost
            ),
            10,
            34,
            LEGEND_COLOR,
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_regen() -> GuiConfig {
        GuiConfig {
            regen_per_second: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_spend_is_gated_by_budget() {
        let mut gui = Gui::with_budget(&no_regen(), 150);

        assert!(gui.try_spend(100));
        assert_eq!(gui.budget(), 50);

        assert!(!gui.try_spend(100));
        assert_eq!(gui.budget(), 50);
    }

    #[test]
    fn test_regeneration_accumulates_fractions() {
        let config = GuiConfig {
            regen_per_second: 2.0,
            max_budget: 1000,
            ..Default::default()
        };
        let mut gui = Gui::with_budget(&config, 0);

        gui.regenerate(0.25);
        assert_eq!(gui.budget(), 0);
        gui.regenerate(0.25);
        assert_eq!(gui.budget(), 1);
    }

    #[test]
    fn test_regeneration_caps_at_max() {
        let config = GuiConfig {
            regen_per_second: 100.0,
            max_budget: 120,
            ..Default::default()
        };
        let mut gui = Gui::with_budget(&config, 100);

        gui.regenerate(1.0);
        assert_eq!(gui.budget(), 120);
    }
}
