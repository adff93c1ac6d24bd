use crate::utils::vector2d::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::rgba(r, g, b, 1.0)
    }

    /// CSS form, e.g. `rgba(0, 0, 255, 0.5)`.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const GROUND_COLOR: Color = Color::rgb(0, 128, 0);
pub const PLANE_COLOR: Color = Color::rgb(0, 0, 255);
pub const PLANE_TRAIL_COLOR: Color = Color::rgba(0, 0, 255, 0.5);
pub const BOMB_COLOR: Color = Color::rgb(255, 0, 0);
pub const BOMB_TRAIL_COLOR: Color = Color::rgba(255, 0, 0, 0.5);
pub const TEXT_COLOR: Color = Color::rgb(0, 0, 0);

/// Canvas-space drawing primitive. Coordinates are pixels, y downward.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Polyline {
        points: Vec<Vector2D>,
        color: Color,
        line_width: f64,
    },
    FillPolygon {
        points: Vec<Vector2D>,
        color: Color,
    },
    FillCircle {
        center: Vector2D,
        radius: f64,
        color: Color,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        color: Color,
    },
}

/// Ordered drawing commands for one frame, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (&Vector2D, f64)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillCircle { center, radius, .. } => Some((center, *radius)),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[Vector2D]> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(PLANE_TRAIL_COLOR.to_css(), "rgba(0, 0, 255, 0.5)");
        assert_eq!(GROUND_COLOR.to_css(), "rgba(0, 128, 0, 1)");
    }

    #[test]
    fn test_frame_filters() {
        let mut frame = Frame::default();
        assert!(frame.is_empty());
        frame.push(DrawCommand::Text {
            text: "hello".to_string(),
            x: 0.0,
            y: 0.0,
            font_size: 12.0,
            color: TEXT_COLOR,
        });
        frame.push(DrawCommand::FillCircle {
            center: Vector2D::new(1.0, 2.0),
            radius: 3.0,
            color: BOMB_COLOR,
        });

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["hello"]);
        assert_eq!(frame.circles().count(), 1);
        assert_eq!(frame.polylines().count(), 0);
    }
}
