//! World-space HUD components
//!
//! These components render above objects in world coordinates. They are
//! stateless: created once, reused for every object, drawn with surface
//! primitives rather than sprites.
//!
//! # Available Components
//!
//! - [`NeedBar`] - Hunger / thirst / happiness meters above creatures

pub mod need_bar;

pub use need_bar::{LOW_NEED_FRACTION, Need, NeedBar, NeedBarStyle};
