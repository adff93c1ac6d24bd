use crate::{
    constants::GRAVITY, control::config::AirResistance, utils::vector2d::Vector2D,
};

/// Drag acting on a bomb of unit mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub model: AirResistance,
    pub coefficient: f64,
}

impl Aerodynamics {
    pub fn new(model: AirResistance, coefficient: f64) -> Self {
        Aerodynamics { model, coefficient }
    }

    /// Drag acceleration, directed against `velocity`. Zero when the model is
    /// `None` or the body is at rest.
    pub fn calculate_drag(&self, velocity: Vector2D) -> Vector2D {
        let speed = velocity.magnitude();
        if speed == 0.0 {
            return Vector2D::ZERO;
        }

        let drag_magnitude = match self.model {
            AirResistance::None => return Vector2D::ZERO,
            AirResistance::Constant => self.coefficient,
            AirResistance::ProportionalToSpeed => self.coefficient * speed,
        };

        -velocity.normalize() * drag_magnitude
    }

    /// Gravity (canvas-down) plus drag.
    pub fn calculate_acceleration(&self, velocity: Vector2D) -> Vector2D {
        Vector2D::new(0.0, GRAVITY) + self.calculate_drag(velocity)
    }
}

impl Default for Aerodynamics {
    fn default() -> Self {
        Aerodynamics::new(AirResistance::None, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_no_resistance() {
        let aero = Aerodynamics::new(AirResistance::None, 3.0);
        assert_eq!(aero.calculate_drag(Vector2D::new(100.0, 20.0)), Vector2D::ZERO);

        let accel = aero.calculate_acceleration(Vector2D::new(100.0, 20.0));
        assert_relative_eq!(accel.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(accel.y, GRAVITY, epsilon = EPSILON);
    }

    #[test]
    fn test_constant_drag_opposes_velocity() {
        let aero = Aerodynamics::new(AirResistance::Constant, 2.0);
        let drag = aero.calculate_drag(Vector2D::new(30.0, 40.0));

        assert_relative_eq!(drag.magnitude(), 2.0, epsilon = EPSILON);
        assert_relative_eq!(drag.x, -1.2, epsilon = EPSILON);
        assert_relative_eq!(drag.y, -1.6, epsilon = EPSILON);
    }

    #[test]
    fn test_proportional_drag_scales_with_speed() {
        let aero = Aerodynamics::new(AirResistance::ProportionalToSpeed, 0.1);
        let slow = aero.calculate_drag(Vector2D::new(10.0, 0.0));
        let fast = aero.calculate_drag(Vector2D::new(100.0, 0.0));

        assert_relative_eq!(slow.x, -1.0, epsilon = EPSILON);
        assert_relative_eq!(fast.x, -10.0, epsilon = EPSILON);
        assert_relative_eq!(fast.y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_drag_at_rest_is_zero() {
        for model in [
            AirResistance::None,
            AirResistance::Constant,
            AirResistance::ProportionalToSpeed,
        ] {
            let aero = Aerodynamics::new(model, 5.0);
            let drag = aero.calculate_drag(Vector2D::ZERO);
            assert!(drag.is_zero(), "{:?} produced {:?}", model, drag);
            assert_eq!(aero.calculate_acceleration(Vector2D::ZERO), Vector2D::new(0.0, GRAVITY));
        }
    }
}
