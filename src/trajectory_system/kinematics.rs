use crate::{control::config::AccelerationMode, utils::vector2d::Vector2D};

/// The bomber. Position lives in canvas pixels (y grows downward), velocity
/// and acceleration in m/s and m/s² with the same axis orientation.
#[derive(Debug, Clone)]
pub struct PlaneState {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    /// Heading above the horizon in radians (counter-clockwise, y-up sense).
    pub heading: f64,
    pub mode: AccelerationMode,
    pub acceleration_magnitude: f64,
    pub path: Vec<Vector2D>,
}

impl PlaneState {
    pub fn new(
        position: Vector2D,
        speed: f64,
        launch_angle_rad: f64,
        mode: AccelerationMode,
        acceleration_magnitude: f64,
    ) -> Self {
        PlaneState {
            position,
            velocity: Vector2D::new(
                speed * launch_angle_rad.cos(),
                -speed * launch_angle_rad.sin(),
            ),
            acceleration: Vector2D::ZERO,
            heading: launch_angle_rad,
            mode,
            acceleration_magnitude,
            path: vec![position],
        }
    }

    /// One explicit Euler step. Velocity integrates in physical units; only
    /// the position delta is multiplied by `scale`.
    pub fn update(&mut self, delta_time: f64, scale: f64) {
        self.acceleration = self.calculate_acceleration();

        self.velocity += self.acceleration * delta_time;
        self.position += self.velocity * delta_time * scale;
        self.path.push(self.position);

        if self.mode != AccelerationMode::ConstantVelocity && !self.acceleration.is_zero() {
            self.heading = heading_of(self.velocity);
        }
    }

    fn calculate_acceleration(&self) -> Vector2D {
        match self.mode {
            AccelerationMode::ConstantVelocity => Vector2D::ZERO,
            AccelerationMode::ConstantAcceleration => Vector2D::new(
                self.acceleration_magnitude * self.heading.cos(),
                -self.acceleration_magnitude * self.heading.sin(),
            ),
            AccelerationMode::ConstantDeceleration => {
                // normalize() yields zero for a stationary plane
                (-self.velocity).normalize() * self.acceleration_magnitude
            }
        }
    }

    pub fn get_speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

/// Heading of a canvas-space velocity, measured y-up.
pub fn heading_of(velocity: Vector2D) -> f64 {
    (-velocity.y).atan2(velocity.x)
}
