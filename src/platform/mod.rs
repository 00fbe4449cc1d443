//! SDL2 platform layer
//!
//! Implements the simulation's [`Surface`] and [`Platform`] traits on top of
//! an SDL2 window, canvas and event pump. Sprites come from PNGs listed in the
//! config; any sprite without an image is drawn as a flat placeholder rect.

pub mod text;

use calpal::config::SimConfig;
use calpal::frame_loop::Platform;
use calpal::input::{FrameInput, InputEvent, Key};
use calpal::render::{Color, DrawRect, Sprite, Surface};
use glam::Vec2;
use log::{debug, warn};
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::image::LoadTexture;
use sdl2::keyboard::Keycode;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use std::collections::HashMap;
use std::time::{Duration, Instant};

fn sdl_color(color: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a)
}

fn sdl_rect(rect: DrawRect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, rect.height)
}

/// Loads a texture with a consistent error message.
fn load_texture<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    path: &str,
) -> Result<Texture<'a>, String> {
    texture_creator
        .load_texture(path)
        .map_err(|e| format!("Failed to load {}: {}", path, e))
}

/// Loads every sprite listed in the config.
///
/// Unknown sprite names are skipped with a warning; a listed file that fails
/// to load is an error.
pub fn load_sprites<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    config: &SimConfig,
) -> Result<HashMap<Sprite, Texture<'a>>, String> {
    let mut textures = HashMap::new();
    for (name, path) in &config.sprites {
        let Some(sprite) = Sprite::from_name(name) else {
            warn!("Ignoring unknown sprite '{}' in config", name);
            continue;
        };
        textures.insert(sprite, load_texture(texture_creator, path)?);
        debug!("Loaded sprite {} from {}", name, path);
    }
    Ok(textures)
}

fn map_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Key::Num1,
        Keycode::Num2 | Keycode::Kp2 => Key::Num2,
        Keycode::Num3 | Keycode::Kp3 => Key::Num3,
        Keycode::E => Key::E,
        _ => Key::Other,
    }
}

pub struct SdlSurface<'a> {
    canvas: Canvas<Window>,
    textures: HashMap<Sprite, Texture<'a>>,
}

impl<'a> SdlSurface<'a> {
    pub fn new(canvas: Canvas<Window>, textures: HashMap<Sprite, Texture<'a>>) -> Self {
        SdlSurface { canvas, textures }
    }
}

impl Surface for SdlSurface<'_> {
    fn clear(&mut self, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.clear();
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: DrawRect) -> Result<(), String> {
        match self.textures.get(&sprite) {
            Some(texture) => self.canvas.copy(texture, None, sdl_rect(rect)),
            None => self.fill_rect(rect, sprite.placeholder_color()),
        }
    }

    fn fill_rect(&mut self, rect: DrawRect, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.fill_rect(sdl_rect(rect))
    }

    fn draw_rect(&mut self, rect: DrawRect, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.draw_rect(sdl_rect(rect))
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
        scale: u32,
    ) -> Result<(), String> {
        text::draw_simple_text(&mut self.canvas, text, x, y, sdl_color(color), scale)
    }
}

pub struct SdlPlatform<'a> {
    surface: SdlSurface<'a>,
    event_pump: EventPump,
    last_frame: Instant,
}

impl<'a> SdlPlatform<'a> {
    pub fn new(surface: SdlSurface<'a>, event_pump: EventPump) -> Self {
        SdlPlatform {
            surface,
            event_pump,
            last_frame: Instant::now(),
        }
    }
}

impl Platform for SdlPlatform<'_> {
    fn poll_input(&mut self) -> FrameInput {
        let events = self
            .event_pump
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. } => Some(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => Some(InputEvent::KeyDown(map_key(keycode))),
                _ => None,
            })
            .collect();

        let mouse = self.event_pump.mouse_state();
        FrameInput::new(events, Vec2::new(mouse.x() as f32, mouse.y() as f32))
    }

    fn wait_frame(&mut self, target_fps: u32) -> f32 {
        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let elapsed = self.last_frame.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }

    fn present(&mut self) -> Result<(), String> {
        self.surface.canvas.present();
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.surface
            .canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(Keycode::Num1), Key::Num1);
        assert_eq!(map_key(Keycode::Kp2), Key::Num2);
        assert_eq!(map_key(Keycode::Num3), Key::Num3);
        assert_eq!(map_key(Keycode::E), Key::E);
        assert_eq!(map_key(Keycode::Q), Key::Other);
    }

    #[test]
    fn test_color_and_rect_conversion() {
        let color = sdl_color(Color::rgba(1, 2, 3, 4));
        assert_eq!((color.r, color.g, color.b, color.a), (1, 2, 3, 4));
        assert_eq!(sdl_rect(DrawRect::new(5, 6, 7, 8)), Rect::new(5, 6, 7, 8));
    }
}
