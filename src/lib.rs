//! CalPal: a small 2D virtual-pet simulation
//!
//! Creatures wander a meadow, get hungry and thirsty, and steer toward food
//! and the pond while avoiding obstacles. The player places food through a
//! calorie-budgeted GUI overlay.
//!
//! This library is the simulation core and does not depend on SDL2. The
//! `calpal` binary supplies the window, input and drawing through the
//! [`frame_loop::Platform`] and [`render::Surface`] traits.
//!
//! # Layout
//!
//! - [`registry`]: object lifecycle and the per-tick update pass
//! - [`object`]: the object kinds and their behaviour
//! - [`steering`]: seek / avoid vector math
//! - [`frame_loop`]: timing, input, update, render per tick
//! - [`render`]: back-to-front render pass and the drawing interface

pub mod config;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod object;
pub mod registry;
pub mod render;
pub mod scene;
pub mod skeleton;
pub mod steering;
pub mod ui;

pub use config::SimConfig;
pub use error::{BoneError, CalPalError, ConfigError};
pub use frame_loop::{Platform, Simulation};
pub use object::{ObjectId, ObjectKind, SimObject};
pub use registry::ObjectRegistry;
