//! Back-to-front rendering of the live object set
//!
//! The registry keeps its live collection sorted by draw order, so the render
//! pass is a plain walk: every visible object draws itself, in order, onto a
//! [`Surface`]. Lower draw orders land first and end up behind.
//!
//! # Architecture
//!
//! - [`Surface`]: drawing primitives the platform layer provides (sprites,
//!   rects, text). The SDL2 binary implements it over a canvas;
//!   [`HeadlessSurface`] records calls for tests.
//! - [`Sprite`]: every image the simulation can ask for, by name.
//! - [`render_pass`]: the render step of a tick.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! surface.clear(BACKGROUND)?;
//! render_pass(&mut surface, &registry, dt)?;
//! ```

use crate::registry::ObjectRegistry;
use glam::Vec2;

/// An RGBA colour, independent of any graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }
}

/// Grass-green backdrop cleared before every frame.
pub const BACKGROUND: Color = Color::rgb(96, 160, 72);

/// Integer screen rectangle (top-left corner plus size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DrawRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        DrawRect {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size centred on `center`.
    pub fn centered(center: Vec2, width: u32, height: u32) -> Self {
        DrawRect {
            x: (center.x - width as f32 / 2.0).round() as i32,
            y: (center.y - height as f32 / 2.0).round() as i32,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

/// Every image the simulation draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Creature,
    Corpse,
    Seed,
    Sprout,
    MatureGrass,
    Kibble,
    Snack,
    Shack,
    PondCalm,
    PondRipple,
}

impl Sprite {
    pub const ALL: [Sprite; 10] = [
        Sprite::Creature,
        Sprite::Corpse,
        Sprite::Seed,
        Sprite::Sprout,
        Sprite::MatureGrass,
        Sprite::Kibble,
        Sprite::Snack,
        Sprite::Shack,
        Sprite::PondCalm,
        Sprite::PondRipple,
    ];

    /// Key used for this sprite in the config's `sprites` map.
    pub fn name(&self) -> &'static str {
        match self {
            Sprite::Creature => "creature",
            Sprite::Corpse => "corpse",
            Sprite::Seed => "seed",
            Sprite::Sprout => "sprout",
            Sprite::MatureGrass => "mature_grass",
            Sprite::Kibble => "kibble",
            Sprite::Snack => "snack",
            Sprite::Shack => "shack",
            Sprite::PondCalm => "pond_calm",
            Sprite::PondRipple => "pond_ripple",
        }
    }

    pub fn from_name(name: &str) -> Option<Sprite> {
        Sprite::ALL.iter().copied().find(|sprite| sprite.name() == name)
    }

    /// Flat colour drawn when no image is loaded for this sprite.
    pub fn placeholder_color(&self) -> Color {
        match self {
            Sprite::Creature => Color::rgb(240, 200, 120),
            Sprite::Corpse => Color::rgb(110, 100, 90),
            Sprite::Seed => Color::rgb(150, 110, 60),
            Sprite::Sprout => Color::rgb(120, 200, 90),
            Sprite::MatureGrass => Color::rgb(40, 130, 40),
            Sprite::Kibble => Color::rgb(170, 90, 40),
            Sprite::Snack => Color::rgb(230, 60, 90),
            Sprite::Shack => Color::rgb(120, 80, 50),
            Sprite::PondCalm => Color::rgb(50, 110, 200),
            Sprite::PondRipple => Color::rgb(80, 140, 220),
        }
    }
}

/// Drawing primitives provided by the platform layer.
///
/// All methods return SDL-style `String` errors.
pub trait Surface {
    fn clear(&mut self, color: Color) -> Result<(), String>;

    fn draw_sprite(&mut self, sprite: Sprite, rect: DrawRect) -> Result<(), String>;

    fn fill_rect(&mut self, rect: DrawRect, color: Color) -> Result<(), String>;

    /// Outline only.
    fn draw_rect(&mut self, rect: DrawRect, color: Color) -> Result<(), String>;

    /// Draws `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color, scale: u32)
    -> Result<(), String>;
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Sprite(Sprite, DrawRect),
    FillRect(DrawRect, Color),
    DrawRect(DrawRect, Color),
    Text(String, i32, i32),
}

/// Surface that records what was drawn instead of drawing it.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub calls: Vec<DrawCall>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        HeadlessSurface::default()
    }

    /// Sprites drawn so far, in draw order.
    pub fn sprites(&self) -> Vec<Sprite> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Sprite(sprite, _) => Some(*sprite),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for HeadlessSurface {
    fn clear(&mut self, color: Color) -> Result<(), String> {
        self.calls.push(DrawCall::Clear(color));
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: DrawRect) -> Result<(), String> {
        self.calls.push(DrawCall::Sprite(sprite, rect));
        Ok(())
    }

    fn fill_rect(&mut self, rect: DrawRect, color: Color) -> Result<(), String> {
        self.calls.push(DrawCall::FillRect(rect, color));
        Ok(())
    }

    fn draw_rect(&mut self, rect: DrawRect, color: Color) -> Result<(), String> {
        self.calls.push(DrawCall::DrawRect(rect, color));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        _color: Color,
        _scale: u32,
    ) -> Result<(), String> {
        self.calls.push(DrawCall::Text(text.to_string(), x, y));
        Ok(())
    }
}

/// Draws every visible live object in registry order (back to front).
///
/// The registry sorts by draw order on every update pass, with a stable sort
/// so equal draw orders keep insertion order. Nothing is re-sorted here.
pub fn render_pass(
    surface: &mut dyn Surface,
    registry: &ObjectRegistry,
    time_delta: f32,
) -> Result<(), String> {
    for object in registry.live().iter().filter(|object| object.visible) {
        object.render(surface, time_delta)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::object::SimObject;

    #[test]
    fn test_centered_rect() {
        let rect = DrawRect::centered(Vec2::new(100.0, 50.0), 20, 10);
        assert_eq!(rect, DrawRect::new(90, 45, 20, 10));
        assert_eq!(rect.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_sprite_names_round_trip() {
        for sprite in Sprite::ALL {
            assert_eq!(Sprite::from_name(sprite.name()), Some(sprite));
        }
        assert_eq!(Sprite::from_name("dragon"), None);
    }

    #[test]
    fn test_render_pass_draws_back_to_front() {
        let config = SimConfig::default();
        let mut registry = ObjectRegistry::new();
        // Enqueued front-most first; the sort must reverse them
        registry.enqueue_add(SimObject::kibble(Vec2::new(10.0, 10.0), &config));
        registry.enqueue_add(SimObject::shack(Vec2::new(50.0, 50.0)));
        registry.enqueue_add(SimObject::pond(Vec2::new(90.0, 90.0), &config));
        registry.advance();

        let mut surface = HeadlessSurface::new();
        render_pass(&mut surface, &registry, 0.0).expect("render");

        assert_eq!(
            surface.sprites(),
            vec![Sprite::PondCalm, Sprite::Shack, Sprite::Kibble]
        );
    }

    #[test]
    fn test_render_pass_skips_invisible() {
        let config = SimConfig::default();
        let mut registry = ObjectRegistry::new();
        let hidden = registry.enqueue_add(SimObject::kibble(Vec2::ZERO, &config));
        registry.enqueue_add(SimObject::snack(Vec2::ZERO, &config));
        registry.advance();

        if let Some(object) = registry.get_mut(hidden) {
            object.visible = false;
        }

        let mut surface = HeadlessSurface::new();
        render_pass(&mut surface, &registry, 0.0).expect("render");

        assert_eq!(surface.sprites(), vec![Sprite::Snack]);
    }

    #[test]
    fn test_unloaded_registry_draws_nothing() {
        let registry = ObjectRegistry::new();
        let mut surface = HeadlessSurface::new();
        render_pass(&mut surface, &registry, 0.0).expect("render");
        assert!(surface.calls.is_empty());
    }
}
