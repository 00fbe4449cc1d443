//! Static scenery: the shack and the pond
//!
//! Both are obstacles creatures steer around. The pond is also the only water
//! source, so a thirsty creature drops it from its obstacle set while heading
//! to it.

use crate::render::Sprite;

pub const SHACK_WIDTH: u32 = 160;
pub const SHACK_HEIGHT: u32 = 140;
pub const POND_WIDTH: u32 = 200;
pub const POND_HEIGHT: u32 = 140;

pub fn shack_sprite() -> Sprite {
    Sprite::Shack
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pond {
    /// Ticks spent on each ripple frame
    pub ripple_period: u64,
}

impl Pond {
    pub fn new(ripple_period: u64) -> Self {
        Pond {
            ripple_period: ripple_period.max(1),
        }
    }

    /// Ripple frame for a pond of the given age (toggles every period).
    pub fn sprite(&self, exist_ticks: u64) -> Sprite {
        if (exist_ticks / self.ripple_period) % 2 == 0 {
            Sprite::PondCalm
        } else {
            Sprite::PondRipple
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ripple_toggles_each_period() {
        let pond = Pond::new(60);
        assert_eq!(pond.sprite(0), Sprite::PondCalm);
        assert_eq!(pond.sprite(59), Sprite::PondCalm);
        assert_eq!(pond.sprite(60), Sprite::PondRipple);
        assert_eq!(pond.sprite(119), Sprite::PondRipple);
        assert_eq!(pond.sprite(120), Sprite::PondCalm);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let pond = Pond::new(0);
        assert_eq!(pond.ripple_period, 1);
        assert_eq!(pond.sprite(1), Sprite::PondRipple);
    }
}
