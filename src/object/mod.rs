//! Simulation objects
//!
//! Every thing in the scene is a [`SimObject`]: shared lifecycle state
//! (position, draw order, age, lifetime, removal flag) plus an [`ObjectKind`]
//! carrying the variant-specific data. The kind is a closed enum, so category
//! checks are pattern matches instead of string-set lookups:
//!
//! | Kind     | Tags              | Collidable | Consumable |
//! |----------|-------------------|------------|------------|
//! | Gui      | GUI               | no         | no         |
//! | Creature | CREATURE          | no         | no         |
//! | Grass    | FOOD              | no         | yes        |
//! | Kibble   | FOOD              | no         | yes        |
//! | Snack    | FOOD              | no         | yes        |
//! | Shack    | OBSTACLE          | yes        | no         |
//! | Pond     | POND, OBSTACLE    | yes        | water      |
//!
//! # Update protocol
//!
//! The registry calls [`SimObject::run`] once per tick for every live object
//! that is not marked for removal. `run` is two-phase: `pre_update` (variant
//! behaviour), a rect sync from the new position, then `post_update`.

pub mod creature;
pub mod food;
pub mod grass;
pub mod gui;
pub mod scenery;

use crate::config::{DeathPolicy, SimConfig};
use crate::registry::FrameContext;
use crate::render::{DrawRect, Surface};
use bitflags::bitflags;
use glam::Vec2;
use log::info;
use std::fmt;

pub use creature::{Creature, CreatureOutcome};
pub use food::{FoodKind, Nutrition};
pub use grass::{Grass, GrowthStage};
pub use gui::Gui;
pub use scenery::Pond;

/// Draw order per kind (lower is drawn first).
pub mod draw_order {
    pub const POND: i32 = 0;
    pub const SHACK: i32 = 1;
    pub const FOOD: i32 = 2;
    pub const CREATURE: i32 = 3;
    pub const GUI: i32 = 10;
}

/// Stable handle to an object in the registry.
///
/// Handles are assigned when an object is enqueued and are never reused, so a
/// stale handle simply stops resolving once its object is pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    /// Placeholder carried by objects that have not been enqueued yet.
    pub const UNASSIGNED: ObjectId = ObjectId(u64::MAX);
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Category markers used for runtime filtering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Tags: u8 {
        const FOOD = 1;
        const POND = 1 << 1;
        const CREATURE = 1 << 2;
        const GUI = 1 << 3;
        const OBSTACLE = 1 << 4;
    }
}

impl Tags {
    /// Lowercase tag names, for logging.
    pub fn tag_names(&self) -> Vec<String> {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect()
    }
}

/// Variant-specific data.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Gui(Gui),
    Creature(Creature),
    Grass(Grass),
    Kibble(Nutrition),
    Snack(Nutrition),
    Shack,
    Pond(Pond),
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Gui(_) => "gui",
            ObjectKind::Creature(_) => "creature",
            ObjectKind::Grass(_) => "grass",
            ObjectKind::Kibble(_) => "kibble",
            ObjectKind::Snack(_) => "snack",
            ObjectKind::Shack => "shack",
            ObjectKind::Pond(_) => "pond",
        }
    }

    pub fn tags(&self) -> Tags {
        match self {
            ObjectKind::Gui(_) => Tags::GUI,
            ObjectKind::Creature(_) => Tags::CREATURE,
            ObjectKind::Grass(_) | ObjectKind::Kibble(_) | ObjectKind::Snack(_) => Tags::FOOD,
            ObjectKind::Shack => Tags::OBSTACLE,
            ObjectKind::Pond(_) => Tags::POND | Tags::OBSTACLE,
        }
    }
}

/// A live (or soon to be live) scene object.
#[derive(Debug, Clone)]
pub struct SimObject {
    id: ObjectId,
    /// World-space center
    pub position: Vec2,
    pub draw_order: i32,
    /// Remaining ticks before automatic removal; `None` is immortal
    pub lifetime_ticks: Option<i64>,
    /// Age in ticks, starts at 0
    pub exist_ticks: u64,
    pub marked_for_removal: bool,
    pub visible: bool,
    pub width: u32,
    pub height: u32,
    /// Screen rect, re-synced from `position` after every `pre_update`
    rect: DrawRect,
    pub kind: ObjectKind,
}

impl SimObject {
    pub fn new(kind: ObjectKind, position: Vec2, draw_order: i32, width: u32, height: u32) -> Self {
        SimObject {
            id: ObjectId::UNASSIGNED,
            position,
            draw_order,
            lifetime_ticks: None,
            exist_ticks: 0,
            marked_for_removal: false,
            visible: true,
            width,
            height,
            rect: DrawRect::centered(position, width, height),
            kind,
        }
    }

    pub fn with_lifetime(mut self, lifetime_ticks: Option<i64>) -> Self {
        self.lifetime_ticks = lifetime_ticks;
        self
    }

    // === Constructors per kind ===

    pub fn gui(config: &SimConfig) -> Self {
        SimObject::new(
            ObjectKind::Gui(Gui::new(&config.gui)),
            Vec2::ZERO,
            draw_order::GUI,
            config.window.width,
            config.window.height,
        )
    }

    pub fn creature(position: Vec2, config: &SimConfig) -> Self {
        let size = config.creature.size;
        SimObject::new(
            ObjectKind::Creature(Creature::new(&config.creature)),
            position,
            draw_order::CREATURE,
            size,
            size,
        )
    }

    pub fn grass(position: Vec2, config: &SimConfig) -> Self {
        SimObject::new(
            ObjectKind::Grass(Grass::new(&config.grass)),
            position,
            draw_order::FOOD,
            grass::GRASS_SIZE,
            grass::GRASS_SIZE,
        )
    }

    pub fn kibble(position: Vec2, config: &SimConfig) -> Self {
        FoodKind::Kibble.spawn(position, config)
    }

    pub fn snack(position: Vec2, config: &SimConfig) -> Self {
        FoodKind::Snack.spawn(position, config)
    }

    pub fn shack(position: Vec2) -> Self {
        SimObject::new(
            ObjectKind::Shack,
            position,
            draw_order::SHACK,
            scenery::SHACK_WIDTH,
            scenery::SHACK_HEIGHT,
        )
    }

    pub fn pond(position: Vec2, config: &SimConfig) -> Self {
        SimObject::new(
            ObjectKind::Pond(Pond::new(config.scene.pond_ripple_period)),
            position,
            draw_order::POND,
            scenery::POND_WIDTH,
            scenery::POND_HEIGHT,
        )
    }

    // === Identity & capabilities ===

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    pub fn tags(&self) -> Tags {
        self.kind.tags()
    }

    pub fn is_food(&self) -> bool {
        self.tags().contains(Tags::FOOD)
    }

    pub fn is_pond(&self) -> bool {
        matches!(self.kind, ObjectKind::Pond(_))
    }

    /// Participates in creature obstacle avoidance.
    pub fn is_collidable(&self) -> bool {
        self.tags().contains(Tags::OBSTACLE)
    }

    /// Food value if this object can be eaten.
    pub fn nutrition(&self) -> Option<Nutrition> {
        match &self.kind {
            ObjectKind::Grass(grass) => Some(Nutrition {
                calories: grass.calories,
                happiness: 0.0,
            }),
            ObjectKind::Kibble(nutrition) | ObjectKind::Snack(nutrition) => Some(*nutrition),
            _ => None,
        }
    }

    pub fn as_creature(&self) -> Option<&Creature> {
        match &self.kind {
            ObjectKind::Creature(creature) => Some(creature),
            _ => None,
        }
    }

    pub fn as_creature_mut(&mut self) -> Option<&mut Creature> {
        match &mut self.kind {
            ObjectKind::Creature(creature) => Some(creature),
            _ => None,
        }
    }

    pub fn rect(&self) -> DrawRect {
        self.rect
    }

    // === Update protocol ===

    /// Runs one tick of behaviour: `pre_update`, rect sync, `post_update`.
    pub fn run(&mut self, ctx: &mut FrameContext) {
        self.pre_update(ctx);
        self.rect = DrawRect::centered(self.position, self.width, self.height);
        self.post_update(ctx);
    }

    fn pre_update(&mut self, ctx: &mut FrameContext) {
        let id = self.id;
        match &mut self.kind {
            ObjectKind::Gui(gui) => gui.pre_update(ctx),
            ObjectKind::Grass(grass) => grass.pre_update(self.exist_ticks),
            ObjectKind::Creature(creature) => {
                if creature.pre_update(id, &mut self.position, ctx) == CreatureOutcome::Died {
                    match ctx.config.creature.death_policy {
                        DeathPolicy::Remove => {
                            info!("Creature {} died and will be removed", id);
                            self.marked_for_removal = true;
                        }
                        DeathPolicy::Linger => {
                            info!("Creature {} died and stays as a corpse", id);
                        }
                    }
                }
            }
            ObjectKind::Kibble(_) | ObjectKind::Snack(_) | ObjectKind::Shack | ObjectKind::Pond(_) => {}
        }
    }

    fn post_update(&mut self, ctx: &mut FrameContext) {
        // Creatures stay on screen even when avoidance shoves them outward
        if let ObjectKind::Creature(creature) = &mut self.kind {
            let clamped = self.position.clamp(Vec2::ZERO, ctx.bounds);
            if clamped != self.position {
                self.position = clamped;
                self.rect = DrawRect::centered(self.position, self.width, self.height);
                creature.velocity = Vec2::ZERO;
            }
        }
    }

    // === Rendering ===

    /// Draws this object. Rendering never mutates simulation state.
    pub fn render(&self, surface: &mut dyn Surface, _time_delta: f32) -> Result<(), String> {
        match &self.kind {
            ObjectKind::Gui(gui) => gui.render(surface),
            ObjectKind::Creature(creature) => creature.render(surface, self.rect),
            ObjectKind::Grass(grass) => surface.draw_sprite(grass.stage.sprite(), self.rect),
            ObjectKind::Kibble(_) => surface.draw_sprite(FoodKind::Kibble.sprite(), self.rect),
            ObjectKind::Snack(_) => surface.draw_sprite(FoodKind::Snack.sprite(), self.rect),
            ObjectKind::Shack => surface.draw_sprite(scenery::shack_sprite(), self.rect),
            ObjectKind::Pond(pond) => surface.draw_sprite(pond.sprite(self.exist_ticks), self.rect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_per_kind() {
        let config = SimConfig::default();

        let pond = SimObject::pond(Vec2::ZERO, &config);
        assert!(pond.is_pond());
        assert!(pond.is_collidable());
        assert!(!pond.is_food());

        let shack = SimObject::shack(Vec2::ZERO);
        assert!(shack.is_collidable());
        assert!(!shack.is_pond());

        let grass = SimObject::grass(Vec2::ZERO, &config);
        assert!(grass.is_food());
        assert!(!grass.is_collidable());

        let creature = SimObject::creature(Vec2::ZERO, &config);
        assert!(!creature.is_collidable());
        assert!(creature.tags().contains(Tags::CREATURE));

        let gui = SimObject::gui(&config);
        assert!(!gui.is_collidable());
        assert!(gui.nutrition().is_none());
    }

    #[test]
    fn test_tag_names() {
        let names = (Tags::POND | Tags::OBSTACLE).tag_names();
        assert_eq!(names, vec!["pond".to_string(), "obstacle".to_string()]);
    }

    #[test]
    fn test_new_object_defaults() {
        let config = SimConfig::default();
        let kibble = SimObject::kibble(Vec2::new(10.0, 20.0), &config);

        assert_eq!(kibble.id(), ObjectId::UNASSIGNED);
        assert_eq!(kibble.exist_ticks, 0);
        assert!(kibble.visible);
        assert!(!kibble.marked_for_removal);
        assert_eq!(kibble.draw_order, draw_order::FOOD);
        assert_eq!(kibble.nutrition().map(|n| n.calories), Some(config.food.kibble_calories));
    }

    #[test]
    fn test_snack_spoils_by_default() {
        let config = SimConfig::default();
        let snack = SimObject::snack(Vec2::ZERO, &config);
        assert_eq!(snack.lifetime_ticks, config.food.snack_lifetime_ticks);
    }
}
