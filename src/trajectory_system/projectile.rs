use crate::utils::vector2d::Vector2D;

use super::aerodynamics::Aerodynamics;

/// A released bomb. Shares the plane's frame conventions: canvas-pixel
/// position, physical velocity.
#[derive(Debug, Clone)]
pub struct BombState {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub path: Vec<Vector2D>,
    pub landed: bool,
    /// Simulation clock at release.
    pub release_time: f64,
    pub release_position: Vector2D,
}

impl BombState {
    pub fn new(position: Vector2D, velocity: Vector2D, release_time: f64) -> Self {
        BombState {
            position,
            velocity,
            path: vec![position],
            landed: false,
            release_time,
            release_position: position,
        }
    }

    /// Advances one Euler step. Returns true on the tick the bomb touches
    /// the ground; a landed bomb is never moved again.
    pub fn update(
        &mut self,
        delta_time: f64,
        scale: f64,
        aerodynamics: &Aerodynamics,
        ground_level: f64,
    ) -> bool {
        if self.landed {
            return false;
        }

        let acceleration = aerodynamics.calculate_acceleration(self.velocity);
        self.velocity += acceleration * delta_time;
        self.position += self.velocity * delta_time * scale;
        self.path.push(self.position);

        if self.position.y >= ground_level {
            self.position.y = ground_level;
            self.landed = true;
        }

        self.landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAVITY;
    use crate::control::config::AirResistance;
    use approx::assert_relative_eq;

    const DT: f64 = 0.05;

    #[test]
    fn test_bomb_falls_under_gravity() {
        let mut bomb = BombState::new(Vector2D::new(0.0, 0.0), Vector2D::new(0.0, 0.0), 0.0);
        let aero = Aerodynamics::default();

        for _ in 0..20 {
            bomb.update(DT, 1.0, &aero, 10_000.0);
        }

        assert_relative_eq!(bomb.velocity.y, GRAVITY * 20.0 * DT, epsilon = 1e-9);
        assert_relative_eq!(bomb.velocity.x, 0.0, epsilon = 1e-12);
        assert!(bomb.position.y > 0.0);
        assert_eq!(bomb.path.len(), 21);
        assert!(!bomb.landed);
    }

    #[test]
    fn test_bomb_inherits_horizontal_velocity() {
        let mut bomb = BombState::new(Vector2D::new(0.0, 0.0), Vector2D::new(100.0, 0.0), 0.0);
        let aero = Aerodynamics::default();
        bomb.update(DT, 0.5, &aero, 10_000.0);

        assert_relative_eq!(bomb.velocity.x, 100.0, epsilon = 1e-12);
        assert_relative_eq!(bomb.position.x, 100.0 * DT * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_landing_clamps_and_freezes() {
        let mut bomb = BombState::new(Vector2D::new(0.0, 99.0), Vector2D::new(10.0, 50.0), 0.0);
        let aero = Aerodynamics::default();

        let landed_now = bomb.update(DT, 1.0, &aero, 100.0);
        assert!(landed_now);
        assert!(bomb.landed);
        assert_eq!(bomb.position.y, 100.0);

        let position = bomb.position;
        let velocity = bomb.velocity;
        let path_len = bomb.path.len();
        for _ in 0..10 {
            assert!(!bomb.update(DT, 1.0, &aero, 100.0));
        }
        assert_eq!(bomb.position, position);
        assert_eq!(bomb.velocity, velocity);
        assert_eq!(bomb.path.len(), path_len);
    }

    #[test]
    fn test_drag_reduces_horizontal_speed() {
        let aero = Aerodynamics::new(AirResistance::ProportionalToSpeed, 0.2);
        let mut with_drag =
            BombState::new(Vector2D::new(0.0, 0.0), Vector2D::new(100.0, 0.0), 0.0);
        let mut without_drag = with_drag.clone();

        for _ in 0..40 {
            with_drag.update(DT, 1.0, &aero, 1e9);
            without_drag.update(DT, 1.0, &Aerodynamics::default(), 1e9);
        }

        assert!(with_drag.velocity.x < without_drag.velocity.x);
        assert!(with_drag.position.x < without_drag.position.x);
        assert!(with_drag.velocity.y < without_drag.velocity.y);
    }
}
