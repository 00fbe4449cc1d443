//! Per-frame input snapshot
//!
//! The platform layer turns OS events into [`InputEvent`]s once per tick and
//! hands them to the simulation as a [`FrameInput`]. Objects only ever see this
//! snapshot, never the raw event source, which keeps them independent of SDL2.

use glam::Vec2;

/// Keys the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Place grass
    Num1,
    /// Place kibble
    Num2,
    /// Place a snack
    Num3,
    /// Spend calories on nothing
    E,
    /// Anything else; ignored by the simulation
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

/// Everything that happened since the previous tick.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Events in the order they arrived
    pub events: Vec<InputEvent>,
    /// Pointer position in window coordinates at poll time
    pub pointer: Vec2,
}

impl FrameInput {
    pub fn new(events: Vec<InputEvent>, pointer: Vec2) -> Self {
        FrameInput { events, pointer }
    }

    /// Key-down events, in arrival order.
    pub fn key_presses(&self) -> impl Iterator<Item = Key> + '_ {
        self.events.iter().filter_map(|event| match event {
            InputEvent::KeyDown(key) => Some(*key),
            InputEvent::Quit => None,
        })
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}
