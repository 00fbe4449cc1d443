//! Seek/avoid steering for creatures
//!
//! Classic Reynolds steering: a creature wants to move toward its target at
//! full speed, slows down inside the arrival ring, and the difference between
//! where it wants to go and where it is going is the steering force.
//!
//! # Algorithm: Seek with Arrival
//!
//! 1. `desired = target - position`, `dist = |desired|`
//! 2. Desired speed is `max_speed`, scaled down by `dist / slow_radius` inside
//!    the slow ring
//! 3. `steer = desired_velocity - velocity`, clamped to `max_force`
//! 4. Inside `arrival_radius` the agent has arrived and no force is produced
//!
//! Obstacle avoidance adds an unclamped push away from every collidable object
//! in range, so separation always wins over seeking.

use glam::Vec2;

/// Tuning values shared by every steering call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    pub max_speed: f32,
    pub max_force: f32,
    pub arrival_radius: f32,
    pub slow_radius: f32,
    pub avoid_radius: f32,
}

impl Default for SteeringParams {
    fn default() -> Self {
        SteeringParams {
            max_speed: 1.0,
            max_force: 0.25,
            arrival_radius: 10.0,
            slow_radius: 100.0,
            avoid_radius: 200.0,
        }
    }
}

/// Result of a seek step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seek {
    /// Still travelling; apply this force.
    Steer(Vec2),
    /// Within the arrival radius (this includes zero distance).
    Arrived,
}

/// Computes the seek force from `position` toward `target`.
pub fn seek(position: Vec2, velocity: Vec2, target: Vec2, params: &SteeringParams) -> Seek {
    let offset = target - position;
    let dist = offset.length();

    // Zero distance has no direction; it is also an arrival.
    if dist < params.arrival_radius || dist <= f32::EPSILON {
        return Seek::Arrived;
    }

    let speed = if dist < params.slow_radius {
        params.max_speed * (dist / params.slow_radius)
    } else {
        params.max_speed
    };

    let desired = offset / dist * speed;
    let steer = (desired - velocity).clamp_length_max(params.max_force);
    Seek::Steer(steer)
}

/// Sums the repulsion from every obstacle within `avoid_radius`.
///
/// Each obstacle contributes a force of magnitude `max_speed` pointing from the
/// obstacle to the agent. Obstacles exactly on top of the agent are skipped.
pub fn avoid<I>(position: Vec2, obstacles: I, params: &SteeringParams) -> Vec2
where
    I: IntoIterator<Item = Vec2>,
{
    obstacles
        .into_iter()
        .filter_map(|obstacle| {
            let away = position - obstacle;
            let dist = away.length();
            (dist > f32::EPSILON && dist < params.avoid_radius)
                .then(|| away / dist * params.max_speed)
        })
        .fold(Vec2::ZERO, |total, force| total + force)
}

/// Explicit Euler step. Returns the new `(position, velocity)`.
///
/// `dt_scale` is elapsed seconds times the configured time scale, so forces
/// tuned per tick stay in range at any frame rate. Velocity is capped at
/// `max_speed`.
pub fn integrate(
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    dt_scale: f32,
    max_speed: f32,
) -> (Vec2, Vec2) {
    let velocity = (velocity + acceleration * dt_scale).clamp_length_max(max_speed);
    (position + velocity * dt_scale, velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_points_at_target_and_respects_max_force() {
        let params = SteeringParams {
            max_speed: 1.0,
            max_force: 0.25,
            ..Default::default()
        };

        match seek(Vec2::ZERO, Vec2::ZERO, Vec2::new(200.0, 0.0), &params) {
            Seek::Steer(force) => {
                assert!(force.x > 0.0);
                assert!(force.y.abs() < 1e-6);
                assert!(force.length() <= 0.25 + 1e-6);
            }
            Seek::Arrived => panic!("should still be travelling"),
        }
    }

    #[test]
    fn test_seek_slows_inside_slow_radius() {
        let params = SteeringParams {
            max_speed: 1.0,
            max_force: 10.0,
            ..Default::default()
        };

        // Halfway into the slow ring: desired speed is half of max_speed
        match seek(Vec2::ZERO, Vec2::ZERO, Vec2::new(50.0, 0.0), &params) {
            Seek::Steer(force) => assert!((force.length() - 0.5).abs() < 1e-5),
            Seek::Arrived => panic!("50 units is outside the arrival radius"),
        }
    }

    #[test]
    fn test_seek_arrives_inside_arrival_radius() {
        let params = SteeringParams::default();
        let result = seek(Vec2::ZERO, Vec2::new(1.0, 1.0), Vec2::new(9.0, 0.0), &params);
        assert_eq!(result, Seek::Arrived);
    }

    #[test]
    fn test_seek_zero_distance_is_arrival() {
        let params = SteeringParams {
            arrival_radius: 0.0,
            ..Default::default()
        };
        let point = Vec2::new(42.0, 42.0);
        assert_eq!(seek(point, Vec2::ZERO, point, &params), Seek::Arrived);
    }

    #[test]
    fn test_avoid_pushes_away_and_ignores_far_obstacles() {
        let params = SteeringParams {
            max_speed: 2.0,
            ..Default::default()
        };
        let obstacles = [Vec2::new(100.0, 0.0), Vec2::new(1000.0, 0.0)];

        let force = avoid(Vec2::ZERO, obstacles, &params);
        assert!((force - Vec2::new(-2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_avoid_is_not_clamped() {
        let params = SteeringParams {
            max_speed: 1.0,
            max_force: 0.1,
            ..Default::default()
        };
        let obstacles = [Vec2::new(-50.0, 0.0), Vec2::new(-60.0, 0.0)];

        let force = avoid(Vec2::ZERO, obstacles, &params);
        assert!((force.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_avoid_skips_coincident_obstacle() {
        let params = SteeringParams::default();
        let force = avoid(Vec2::new(5.0, 5.0), [Vec2::new(5.0, 5.0)], &params);
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_integrate_caps_velocity() {
        let (position, velocity) =
            integrate(Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0, 2.0);
        assert_eq!(velocity, Vec2::new(2.0, 0.0));
        assert_eq!(position, Vec2::new(2.0, 0.0));
    }
}
