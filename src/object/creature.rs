//! Creatures: the virtual pets
//!
//! A creature is a small state machine driven once per tick:
//!
//! ```text
//!            drain needs              pick target
//!   Idle ───────────────> Idle ──────────────────> Moving
//!    ^                                               │
//!    │   consume target (eat food / drink pond)      │ arrive (< arrival_radius)
//!    └───────────── Arrived <────────────────────────┘
//! ```
//!
//! - **Idle**: hunger or thirst (one, chosen at random) drains by a bounded
//!   random amount scaled by elapsed time. Then the creature decides whether to
//!   go eat or drink.
//! - **Moving**: steer toward the target (seek + obstacle avoidance). Needs do
//!   not drain while travelling.
//! - **Arrived**: stopped at the target; on the next tick the target is
//!   consumed exactly once and cleared.
//!
//! Hunger or thirst reaching zero kills the creature (see
//! [`crate::config::DeathPolicy`]).
//!
//! # Target selection
//!
//! - Food is wanted when `thirst / hunger > seek_ratio` or hunger drops under a
//!   random threshold in `[seek_threshold_min, seek_threshold_max]`.
//! - Water is wanted when `hunger / thirst > seek_ratio` or thirst drops under a
//!   fresh random threshold.
//! - When both fire, the lower need wins (ties go to water). If the winner has
//!   no candidate in the scene the other wanted resource is tried; with nothing
//!   available the creature stays idle and re-evaluates next tick.

use super::ObjectId;
use crate::config::CreatureConfig;
use crate::registry::FrameContext;
use crate::render::{DrawRect, Sprite, Surface};
use crate::steering::{self, Seek, SteeringParams};
use crate::ui::{Need, NeedBar, NeedBarStyle};
use glam::Vec2;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

pub const MAX_NEED: f32 = 100.0;

/// What happened to the creature this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatureOutcome {
    Alive,
    /// Hunger or thirst just hit zero
    Died,
    /// Died on an earlier tick and was kept around
    Corpse,
}

/// Which resource a creature is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Want {
    Food,
    Water,
}

#[derive(Debug, Clone)]
pub struct Creature {
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_speed: f32,
    pub max_force: f32,
    pub hunger: f32,
    pub thirst: f32,
    pub happiness: f32,
    pub is_moving: bool,
    /// Non-owning handle to the food or pond being sought
    pub target_food: Option<ObjectId>,
    pub alive: bool,
}

impl Creature {
    pub fn new(config: &CreatureConfig) -> Self {
        Creature {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed: config.max_speed,
            max_force: config.max_force,
            hunger: MAX_NEED,
            thirst: MAX_NEED,
            happiness: MAX_NEED / 2.0,
            is_moving: false,
            target_food: None,
            alive: true,
        }
    }

    pub fn with_needs(mut self, hunger: f32, thirst: f32) -> Self {
        self.hunger = hunger.clamp(0.0, MAX_NEED);
        self.thirst = thirst.clamp(0.0, MAX_NEED);
        self
    }

    fn steering_params(&self, config: &CreatureConfig) -> SteeringParams {
        SteeringParams {
            max_speed: self.max_speed,
            max_force: self.max_force,
            arrival_radius: config.arrival_radius,
            slow_radius: config.slow_radius,
            avoid_radius: config.avoid_radius,
        }
    }

    /// Drops the target handle and stops. Called when the referent disappears.
    pub fn forget_target(&mut self) {
        self.target_food = None;
        self.is_moving = false;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }

    pub fn pre_update(
        &mut self,
        id: ObjectId,
        position: &mut Vec2,
        ctx: &mut FrameContext,
    ) -> CreatureOutcome {
        if !self.alive {
            return CreatureOutcome::Corpse;
        }

        if !self.is_moving {
            self.drain(ctx);
        }

        if self.hunger <= 0.0 || self.thirst <= 0.0 {
            self.alive = false;
            self.forget_target();
            debug!(
                "Creature {} starved (hunger {:.1}, thirst {:.1})",
                id, self.hunger, self.thirst
            );
            return CreatureOutcome::Died;
        }

        if self.is_moving {
            self.travel(id, position, ctx);
        } else {
            if let Some(target) = self.target_food.take() {
                self.consume(id, target, ctx);
            }
            self.choose_target(id, ctx);
        }

        CreatureOutcome::Alive
    }

    /// Passive need decay while idle.
    fn drain(&mut self, ctx: &mut FrameContext) {
        let config = &ctx.config.creature;
        let amount = ctx.rng.gen_range(0.0..=config.drain_per_second) * ctx.dt;
        if ctx.rng.gen_bool(0.5) {
            self.hunger = (self.hunger - amount).clamp(0.0, MAX_NEED);
        } else {
            self.thirst = (self.thirst - amount).clamp(0.0, MAX_NEED);
        }
    }

    /// One steering step toward the current target.
    fn travel(&mut self, id: ObjectId, position: &mut Vec2, ctx: &mut FrameContext) {
        let Some(target_id) = self.target_food else {
            self.is_moving = false;
            return;
        };

        let target = ctx
            .world
            .get(target_id)
            .filter(|target| !target.marked_for_removal)
            .map(|target| (target.position, target.is_pond()));
        let Some((target_position, target_is_pond)) = target else {
            debug!("Creature {} lost its target {}", id, target_id);
            self.forget_target();
            return;
        };

        let params = self.steering_params(&ctx.config.creature);
        match steering::seek(*position, self.velocity, target_position, &params) {
            Seek::Arrived => {
                self.velocity = Vec2::ZERO;
                self.acceleration = Vec2::ZERO;
                self.is_moving = false;
                debug!("Creature {} arrived at {}", id, target_id);
                return;
            }
            Seek::Steer(force) => self.acceleration += force,
        }

        // The pond being walked to is not an obstacle
        let obstacles = ctx
            .world
            .others()
            .filter(|other| other.is_collidable())
            .filter(|other| !(target_is_pond && other.id() == target_id))
            .map(|other| other.position);
        self.acceleration += steering::avoid(*position, obstacles, &params);

        let dt_scale = ctx.dt * ctx.config.creature.time_scale;
        let (new_position, new_velocity) =
            steering::integrate(*position, self.velocity, self.acceleration, dt_scale, self.max_speed);
        *position = new_position;
        self.velocity = new_velocity;
        self.acceleration = Vec2::ZERO;
    }

    /// Applies the effect of an arrived-at target. Food is destroyed; a target
    /// already gone (or already eaten this tick) has no effect.
    fn consume(&mut self, id: ObjectId, target_id: ObjectId, ctx: &mut FrameContext) {
        let Some(target) = ctx.world.get(target_id).filter(|t| !t.marked_for_removal) else {
            debug!("Creature {} found {} already gone", id, target_id);
            return;
        };

        if target.is_pond() {
            self.thirst = MAX_NEED;
            debug!("Creature {} drank from {}", id, target_id);
        } else if let Some(nutrition) = target.nutrition() {
            self.hunger = (self.hunger + nutrition.calories).clamp(0.0, MAX_NEED);
            self.happiness = (self.happiness + nutrition.happiness).clamp(0.0, MAX_NEED);
            ctx.world.request_remove(target_id);
            debug!(
                "Creature {} ate {} (+{:.0} calories), hunger now {:.1}",
                id, target_id, nutrition.calories, self.hunger
            );
        }
    }

    /// Decides whether to start seeking food or water.
    fn choose_target(&mut self, id: ObjectId, ctx: &mut FrameContext) {
        let config = &ctx.config.creature;
        let ratio = config.seek_ratio;
        let range = config.seek_threshold_min..=config.seek_threshold_max;

        let wants_food = self.thirst / self.hunger > ratio
            || self.hunger < ctx.rng.gen_range(range.clone());
        let wants_water =
            self.hunger / self.thirst > ratio || self.thirst < ctx.rng.gen_range(range);

        let order = match (wants_food, wants_water) {
            (false, false) => return,
            (true, false) => vec![Want::Food],
            (false, true) => vec![Want::Water],
            // Most urgent need first
            (true, true) if self.thirst <= self.hunger => vec![Want::Water, Want::Food],
            (true, true) => vec![Want::Food, Want::Water],
        };

        for want in order {
            let target = match want {
                Want::Food => {
                    let candidates = ctx.world.food_ids();
                    candidates.choose(&mut *ctx.rng).copied()
                }
                Want::Water => ctx.world.first_pond(),
            };

            if let Some(target) = target {
                self.target_food = Some(target);
                self.is_moving = true;
                debug!("Creature {} heads for {} ({:?})", id, target, want);
                return;
            }
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, rect: DrawRect) -> Result<(), String> {
        let sprite = if self.alive { Sprite::Creature } else { Sprite::Corpse };
        surface.draw_sprite(sprite, rect)?;

        if !self.alive {
            return Ok(());
        }

        let bar = NeedBar::with_style(NeedBarStyle {
            width: rect.width,
            ..Default::default()
        });
        let spacing = bar.style().height as i32 + 1;
        let top = rect.y - 3 * spacing;
        bar.render(surface, rect.x, top, self.hunger / MAX_NEED, Need::Hunger)?;
        bar.render(surface, rect.x, top + spacing, self.thirst / MAX_NEED, Need::Thirst)?;
        bar.render(
            surface,
            rect.x,
            top + 2 * spacing,
            self.happiness / MAX_NEED,
            Need::Happiness,
        )
    }
}
