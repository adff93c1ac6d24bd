use log::warn;

use crate::constants::{
    ASSUMED_MAX_SPEED, CANVAS_WIDTH_BUFFER, FALLBACK_SCALE, GRAVITY, GROUND_BAND_HEIGHT,
    HORIZONTAL_MARGIN, MAX_SCALE, TRAJECTORY_SAFETY_BUFFER, VERTICAL_MARGIN,
};

/// Browser window (or equivalent host surface) the canvas is fitted into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Vertical space already used by the controls panel.
    pub reserved_height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport {
            width,
            height,
            reserved_height: 0.0,
        }
    }

    pub fn with_reserved_height(mut self, reserved_height: f64) -> Self {
        self.reserved_height = reserved_height;
        self
    }

    pub fn available_width(&self) -> f64 {
        self.width - HORIZONTAL_MARGIN
    }

    pub fn available_height(&self) -> f64 {
        self.height - self.reserved_height - VERTICAL_MARGIN
    }
}

/// Canvas geometry derived once per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Pixels per meter, always > 0.
    pub scale: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Canvas y coordinate of the ground surface.
    pub ground_level: f64,
}

impl Layout {
    /// Best-effort fit of the worst-case trajectory into the viewport.
    /// Never fails; degenerate inputs fall back to `FALLBACK_SCALE`.
    pub fn resolve(viewport: &Viewport, altitude: f64) -> Self {
        let available_width = viewport.available_width();
        let available_height = viewport.available_height();

        let max_distance = estimate_max_distance(altitude);
        let scale_x = available_width / max_distance;
        let scale_y = available_height / altitude;

        // f64::min ignores a NaN operand, so NaN only survives if both are NaN.
        let mut scale = scale_x.min(scale_y).min(MAX_SCALE);
        if !(scale > 0.0) {
            warn!(
                "Layout scale {} is not positive (viewport {}x{}, altitude {} m); using fallback {}",
                scale, viewport.width, viewport.height, altitude, FALLBACK_SCALE
            );
            scale = FALLBACK_SCALE;
        }

        let fitted_width = max_distance * scale * CANVAS_WIDTH_BUFFER;
        let canvas_width = available_width.min(fitted_width).max(0.0);
        let canvas_height = available_height.max(0.0);

        Layout {
            scale,
            canvas_width,
            canvas_height,
            ground_level: canvas_height - GROUND_BAND_HEIGHT,
        }
    }

    /// Converts a canvas position into physical meters: x from the left
    /// edge, y as height above ground.
    pub fn to_physical(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.scale, (self.ground_level - y) / self.scale)
    }
}

/// Rough flight time of the slowest-falling, fastest-moving case.
pub fn estimate_max_flight_time(altitude: f64) -> f64 {
    (2.0 * altitude / GRAVITY).sqrt() + (altitude / ASSUMED_MAX_SPEED) * 5.0
}

pub fn estimate_max_distance(altitude: f64) -> f64 {
    ASSUMED_MAX_SPEED * estimate_max_flight_time(altitude) * TRAJECTORY_SAFETY_BUFFER
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flight_time_estimate() {
        let expected = (2.0 * 1000.0 / GRAVITY).sqrt() + 10.0;
        assert_relative_eq!(estimate_max_flight_time(1000.0), expected, epsilon = 1e-9);
        assert_relative_eq!(
            estimate_max_distance(1000.0),
            500.0 * expected * 1.2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_wide_viewport_is_height_limited() {
        let viewport = Viewport::new(100_000.0, 650.0);
        let layout = Layout::resolve(&viewport, 1000.0);
        // available height = 650 - 50 = 600, scale_y = 0.6, capped at 0.5
        assert_relative_eq!(layout.scale, 0.5, epsilon = 1e-12);
        assert_relative_eq!(layout.canvas_height, 600.0, epsilon = 1e-12);
        assert_relative_eq!(layout.ground_level, 570.0, epsilon = 1e-12);
    }

    #[test]
    fn test_typical_viewport_is_width_limited() {
        let viewport = Viewport::new(1280.0, 800.0).with_reserved_height(150.0);
        let layout = Layout::resolve(&viewport, 1000.0);
        let expected = 1240.0 / estimate_max_distance(1000.0);
        assert_relative_eq!(layout.scale, expected, epsilon = 1e-12);
        assert_relative_eq!(layout.canvas_height, 600.0, epsilon = 1e-12);
        assert!(layout.canvas_width <= 1240.0);
    }

    #[test]
    fn test_degenerate_inputs_fall_back() {
        let cases = [
            (Viewport::new(0.0, 0.0), 1000.0),
            (Viewport::new(10.0, 10.0), 1000.0),
            (Viewport::new(1280.0, 800.0), 0.0),
            (Viewport::new(0.0, 0.0), 0.0),
            (Viewport::new(f64::NAN, 800.0), 1000.0),
        ];
        for (viewport, altitude) in cases {
            let layout = Layout::resolve(&viewport, altitude);
            assert!(
                layout.scale > 0.0 && layout.scale.is_finite(),
                "scale must stay positive for {:?} / {}: {}",
                viewport,
                altitude,
                layout.scale
            );
            assert!(layout.canvas_width >= 0.0);
            assert!(layout.canvas_height >= 0.0);
        }
    }

    #[test]
    fn test_to_physical() {
        let layout = Layout {
            scale: 0.5,
            canvas_width: 800.0,
            canvas_height: 600.0,
            ground_level: 570.0,
        };
        let (x, y) = layout.to_physical(100.0, 70.0);
        assert_relative_eq!(x, 200.0, epsilon = 1e-12);
        assert_relative_eq!(y, 1000.0, epsilon = 1e-12);
    }
}
