use crate::{
    constants::{
        BOMB_RADIUS, LEGEND_FIRST_LINE_Y, LEGEND_FONT_SIZE, LEGEND_LINE_SPACING, LEGEND_X,
        PLANE_HALF_SPAN, PLANE_NOSE_LENGTH, PLANE_TAIL_LENGTH,
    },
    control::simulation::SimulationRun,
    utils::vector2d::Vector2D,
};

use super::draw::{
    DrawCommand, Frame, BOMB_COLOR, BOMB_TRAIL_COLOR, GROUND_COLOR, PLANE_COLOR,
    PLANE_TRAIL_COLOR, TEXT_COLOR,
};

/// Projects the run onto drawing commands. Reads only.
pub fn render(run: &SimulationRun) -> Frame {
    let layout = &run.layout;
    let scale = layout.scale;
    let mut frame = Frame::default();

    frame.push(DrawCommand::Clear {
        width: layout.canvas_width,
        height: layout.canvas_height,
    });
    frame.push(DrawCommand::FillRect {
        x: 0.0,
        y: layout.ground_level,
        width: layout.canvas_width,
        height: layout.canvas_height - layout.ground_level,
        color: GROUND_COLOR,
    });

    if let Some(trail) = trail(&run.plane.path) {
        frame.push(DrawCommand::Polyline {
            points: trail,
            color: PLANE_TRAIL_COLOR,
            line_width: 2.0,
        });
    }
    frame.push(DrawCommand::FillPolygon {
        points: plane_glyph(run.plane.position, run.plane.heading, scale),
        color: PLANE_COLOR,
    });

    for bomb in &run.bombs {
        if let Some(trail) = trail(&bomb.path) {
            frame.push(DrawCommand::Polyline {
                points: trail,
                color: BOMB_TRAIL_COLOR,
                line_width: 1.0,
            });
        }
        frame.push(DrawCommand::FillCircle {
            center: bomb.position,
            radius: BOMB_RADIUS * scale,
            color: BOMB_COLOR,
        });
    }

    for (line, text) in legend(run).into_iter().enumerate() {
        frame.push(DrawCommand::Text {
            text,
            x: LEGEND_X,
            y: LEGEND_FIRST_LINE_Y + LEGEND_LINE_SPACING * line as f64,
            font_size: LEGEND_FONT_SIZE,
            color: TEXT_COLOR,
        });
    }

    frame
}

/// A trail needs at least one segment to be visible.
fn trail(path: &[Vector2D]) -> Option<Vec<Vector2D>> {
    if path.len() < 2 {
        None
    } else {
        Some(path.to_vec())
    }
}

/// Triangle with its nose along `heading` as seen on a y-down canvas.
pub fn plane_glyph(position: Vector2D, heading: f64, scale: f64) -> Vec<Vector2D> {
    [
        Vector2D::new(PLANE_NOSE_LENGTH, 0.0),
        Vector2D::new(-PLANE_TAIL_LENGTH, -PLANE_HALF_SPAN),
        Vector2D::new(-PLANE_TAIL_LENGTH, PLANE_HALF_SPAN),
    ]
    .iter()
    .map(|vertex| position + (*vertex * scale).rotate(-heading))
    .collect()
}

pub fn legend(run: &SimulationRun) -> Vec<String> {
    let (plane_x, plane_y) = run.physical_position(run.plane.position);
    let mut lines = vec![
        format!("Scale: 1m ≈ {:.2}px", run.scale()),
        format!("Time: {:.2}s", run.clock),
        format!("Plane: ({:.1}m, {:.1}m)", plane_x, plane_y),
    ];

    if let Some(bomb) = run.last_bomb().filter(|bomb| !bomb.landed) {
        let (bomb_x, bomb_y) = run.physical_position(bomb.position);
        lines.push(format!("Last Bomb: ({:.1}m, {:.1}m)", bomb_x, bomb_y));
    }

    lines
}
