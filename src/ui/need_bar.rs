//! Need bar component for displaying creature needs
//!
//! A need bar is a thin meter drawn above a creature, one per need (hunger,
//! thirst, happiness). Need bars are stateless components: build one and call
//! `render()` for every bar you want drawn.
//!
//! # Example
//!
//! ```rust,ignore
//! use calpal::ui::{Need, NeedBar};
//!
//! let bar = NeedBar::new();
//! bar.render(surface, rect.x, rect.y - 8, creature.hunger / 100.0, Need::Hunger)?;
//! ```

use crate::render::{Color, DrawRect, Surface};

/// Which need a bar shows. Each need has its own fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Need {
    Hunger,
    Thirst,
    Happiness,
}

impl Need {
    pub fn color(&self) -> Color {
        match self {
            Need::Hunger => Color::rgb(230, 150, 40),
            Need::Thirst => Color::rgb(60, 140, 230),
            Need::Happiness => Color::rgb(230, 90, 170),
        }
    }
}

/// Configuration for need bar appearance
#[derive(Debug, Clone)]
pub struct NeedBarStyle {
    /// Bar width in pixels
    pub width: u32,

    /// Bar height in pixels
    pub height: u32,

    /// Background bar color (shown where the need is depleted)
    pub background_color: Color,

    /// Fill color when the need is low (<30%), regardless of which need
    pub low_color: Color,

    /// Border color
    pub border_color: Color,

    /// Border thickness in pixels (0 = no border)
    pub border_thickness: u32,
}

impl Default for NeedBarStyle {
    fn default() -> Self {
        NeedBarStyle {
            width: 48,
            height: 4,
            background_color: Color::rgb(50, 50, 50),
            low_color: Color::rgb(200, 0, 0),
            border_color: Color::rgb(0, 0, 0),
            border_thickness: 1,
        }
    }
}

/// Fraction under which a bar switches to the low colour.
pub const LOW_NEED_FRACTION: f32 = 0.3;

#[derive(Debug, Clone, Default)]
pub struct NeedBar {
    style: NeedBarStyle,
}

impl NeedBar {
    /// Creates a need bar with default styling (48x4, red under 30%)
    pub fn new() -> Self {
        NeedBar {
            style: NeedBarStyle::default(),
        }
    }

    pub fn with_style(style: NeedBarStyle) -> Self {
        NeedBar { style }
    }

    pub fn style(&self) -> &NeedBarStyle {
        &self.style
    }

    /// Fill colour for a bar at `fraction` (0.0-1.0).
    pub fn fill_color(&self, fraction: f32, need: Need) -> Color {
        if fraction < LOW_NEED_FRACTION {
            self.style.low_color
        } else {
            need.color()
        }
    }

    /// Renders one bar with its top-left corner at `(x, y)`.
    ///
    /// # Returns
    ///
    /// - `Ok(())` on success
    /// - `Err(String)` if the surface fails to draw
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        x: i32,
        y: i32,
        fraction: f32,
        need: Need,
    ) -> Result<(), String> {
        let frame = DrawRect::new(x, y, self.style.width, self.style.height);
        surface.fill_rect(frame, self.style.background_color)?;

        let fill_width = (self.style.width as f32 * fraction.clamp(0.0, 1.0)) as u32;
        if fill_width > 0 {
            let fill = DrawRect::new(x, y, fill_width, self.style.height);
            surface.fill_rect(fill, self.fill_color(fraction, need))?;
        }

        // Border last so it sits on top
        if self.style.border_thickness > 0 {
            surface.draw_rect(frame, self.style.border_color)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCall, HeadlessSurface};

    #[test]
    fn test_default_style() {
        let style = NeedBarStyle::default();
        assert_eq!(style.width, 48);
        assert_eq!(style.height, 4);
        assert_eq!(style.border_thickness, 1);
    }

    #[test]
    fn test_custom_style() {
        let bar = NeedBar::with_style(NeedBarStyle {
            width: 64,
            ..Default::default()
        });
        assert_eq!(bar.style().width, 64);
        assert_eq!(bar.style().height, 4);
    }

    #[test]
    fn test_low_need_uses_low_color() {
        let bar = NeedBar::new();
        assert_eq!(bar.fill_color(0.1, Need::Thirst), bar.style().low_color);
        assert_eq!(bar.fill_color(0.8, Need::Thirst), Need::Thirst.color());
    }

    #[test]
    fn test_render_draws_background_fill_and_border() {
        let bar = NeedBar::new();
        let mut surface = HeadlessSurface::new();

        bar.render(&mut surface, 10, 20, 0.5, Need::Hunger).expect("render");

        assert_eq!(surface.calls.len(), 3);
        match &surface.calls[1] {
            DrawCall::FillRect(rect, color) => {
                assert_eq!(rect.width, 24);
                assert_eq!(*color, Need::Hunger.color());
            }
            other => panic!("expected fill, got {:?}", other),
        }
        assert!(matches!(surface.calls[2], DrawCall::DrawRect(..)));
    }

    #[test]
    fn test_empty_need_skips_fill() {
        let bar = NeedBar::new();
        let mut surface = HeadlessSurface::new();

        bar.render(&mut surface, 0, 0, 0.0, Need::Happiness).expect("render");

        assert_eq!(surface.calls.len(), 2);
    }
}
