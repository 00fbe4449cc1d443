//! Object registry: the owner of every simulation object
//!
//! The registry holds the live collection (kept sorted by draw order) and a
//! queue of pending additions. Objects never touch those collections directly;
//! during an update they reach the rest of the scene through a
//! [`FrameContext`], which can only look up objects, flag them for removal,
//! or enqueue new ones.
//!
//! # Tick order
//!
//! [`ObjectRegistry::update`] performs one full tick:
//!
//! 1. Fold pending additions into the live collection and clear the queue
//! 2. Stable-sort the live collection by draw order (ties keep insertion order)
//! 3. Run every live object not marked for removal, in that order
//! 4. Age every live object (`exist_ticks += 1`, `lifetime_ticks -= 1`) and
//!    regrow grass from its new age
//! 5. Prune objects whose lifetime ran out or that are marked for removal,
//!    and invalidate any creature target that pointed at them
//!
//! [`ObjectRegistry::advance`] is the same tick without step 3.
//!
//! Objects spawned during step 3 sit in the queue until the next tick, so they
//! are never updated in the tick that created them, and an object marked in
//! step 3 is never updated again.

use crate::config::SimConfig;
use crate::input::FrameInput;
use crate::object::{ObjectId, ObjectKind, SimObject};
use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Pending additions plus the handle counter.
#[derive(Debug, Default)]
pub struct SpawnQueue {
    pending: Vec<SimObject>,
    next_id: u64,
}

impl SpawnQueue {
    /// Assigns the next handle to `object` and queues it.
    fn push(&mut self, mut object: SimObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        object.assign_id(id);
        self.pending.push(object);
        id
    }

    fn find_mut(&mut self, id: ObjectId) -> Option<&mut SimObject> {
        self.pending.iter_mut().find(|object| object.id() == id)
    }
}

/// The scene as seen by the object currently being updated.
///
/// The updating object itself is split out of the live collection, so a view
/// only covers the objects before and after it. Objects earlier in the pass
/// have already been updated this tick.
pub struct WorldView<'a> {
    before: &'a mut [SimObject],
    after: &'a mut [SimObject],
    spawns: &'a mut SpawnQueue,
}

impl<'a> WorldView<'a> {
    pub fn get(&self, id: ObjectId) -> Option<&SimObject> {
        self.others().find(|object| object.id() == id)
    }

    /// Every other live object, in draw order.
    pub fn others(&self) -> impl Iterator<Item = &SimObject> + '_ {
        self.before.iter().chain(self.after.iter())
    }

    /// Flags an object for removal. Unknown handles are ignored.
    pub fn request_remove(&mut self, id: ObjectId) -> bool {
        let object = self
            .before
            .iter_mut()
            .chain(self.after.iter_mut())
            .find(|object| object.id() == id);
        match object {
            Some(object) => {
                object.marked_for_removal = true;
                true
            }
            None => match self.spawns.find_mut(id) {
                Some(object) => {
                    object.marked_for_removal = true;
                    true
                }
                None => false,
            },
        }
    }

    /// Queues a new object; it goes live on the next tick.
    pub fn enqueue_add(&mut self, object: SimObject) -> ObjectId {
        self.spawns.push(object)
    }

    /// Handles of edible objects that are not already on their way out.
    pub fn food_ids(&self) -> Vec<ObjectId> {
        self.others()
            .filter(|object| object.is_food() && !object.marked_for_removal)
            .map(SimObject::id)
            .collect()
    }

    /// The first pond in draw order.
    pub fn first_pond(&self) -> Option<ObjectId> {
        self.others()
            .find(|object| object.is_pond() && !object.marked_for_removal)
            .map(SimObject::id)
    }
}

/// Everything an object may use while it updates.
pub struct FrameContext<'a> {
    pub input: &'a FrameInput,
    /// Seconds since the previous tick
    pub dt: f32,
    pub config: &'a SimConfig,
    pub rng: &'a mut StdRng,
    pub world: WorldView<'a>,
    /// Size of the playfield; creatures are kept inside `[0, bounds]`
    pub bounds: Vec2,
}

/// Owns the live object collection and the pending-add queue.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    live: Vec<SimObject>,
    spawns: SpawnQueue,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        ObjectRegistry::default()
    }

    /// Queues `object` and returns its handle. It is not live until the next
    /// [`advance`](Self::advance) or [`update`](Self::update).
    pub fn enqueue_add(&mut self, object: SimObject) -> ObjectId {
        self.spawns.push(object)
    }

    /// Flags an object (live or pending) for removal.
    ///
    /// The object stays live until the next prune. Returns `false` for a
    /// handle that matches nothing; that is not an error.
    pub fn request_remove(&mut self, id: ObjectId) -> bool {
        let object = match self.live.iter_mut().find(|object| object.id() == id) {
            Some(object) => Some(object),
            None => self.spawns.find_mut(id),
        };
        match object {
            Some(object) => {
                object.marked_for_removal = true;
                true
            }
            None => false,
        }
    }

    /// One lifecycle tick with no object updates: fold, sort, age, prune.
    pub fn advance(&mut self) {
        self.fold_pending();
        self.age_and_prune();
    }

    /// One full simulation tick (see the module docs for the order).
    pub fn update(
        &mut self,
        input: &FrameInput,
        dt: f32,
        config: &SimConfig,
        rng: &mut StdRng,
    ) {
        self.fold_pending();

        let bounds = Vec2::new(config.window.width as f32, config.window.height as f32);
        for index in 0..self.live.len() {
            let (before, rest) = self.live.split_at_mut(index);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            if current.marked_for_removal {
                continue;
            }

            let mut ctx = FrameContext {
                input,
                dt,
                config,
                rng: &mut *rng,
                world: WorldView {
                    before,
                    after,
                    spawns: &mut self.spawns,
                },
                bounds,
            };
            current.run(&mut ctx);
        }

        self.age_and_prune();
    }

    fn fold_pending(&mut self) {
        if !self.spawns.pending.is_empty() {
            for object in &self.spawns.pending {
                debug!("Spawned {} {}", object.kind.name(), object.id());
            }
            self.live.append(&mut self.spawns.pending);
        }
        // sort_by_key is stable: equal draw orders keep insertion order
        self.live.sort_by_key(|object| object.draw_order);
    }

    fn age_and_prune(&mut self) {
        let mut pruned = HashSet::new();
        for object in &mut self.live {
            object.exist_ticks += 1;
            if let ObjectKind::Grass(grass) = &mut object.kind {
                grass.grow(object.exist_ticks);
            }
            if let Some(lifetime) = object.lifetime_ticks.as_mut() {
                *lifetime -= 1;
            }
            let expired = object.lifetime_ticks.is_some_and(|lifetime| lifetime <= 0);
            if expired || object.marked_for_removal {
                pruned.insert(object.id());
            }
        }

        if pruned.is_empty() {
            return;
        }

        self.live.retain(|object| {
            let keep = !pruned.contains(&object.id());
            if !keep {
                debug!("Removed {} {}", object.kind.name(), object.id());
            }
            keep
        });

        // Handles into the pruned set would otherwise dangle
        for creature in self.live.iter_mut().filter_map(SimObject::as_creature_mut) {
            if creature.target_food.is_some_and(|target| pruned.contains(&target)) {
                creature.forget_target();
            }
        }
    }

    /// The live collection in draw order.
    pub fn live(&self) -> &[SimObject] {
        &self.live
    }

    pub fn get(&self, id: ObjectId) -> Option<&SimObject> {
        self.live.iter().find(|object| object.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SimObject> {
        self.live.iter_mut().find(|object| object.id() == id)
    }

    /// Whether `id` is in the live collection (pending objects are not).
    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn pending_len(&self) -> usize {
        self.spawns.pending.len()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of live objects of the given kind name (see `ObjectKind::name`).
    pub fn count_kind(&self, name: &str) -> usize {
        self.live
            .iter()
            .filter(|object| object.kind.name() == name)
            .count()
    }
}
