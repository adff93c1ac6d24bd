// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²

// Simulation Parameters
pub const TIME_STEP: f64 = 0.05; // s

// Layout Estimation
pub const ASSUMED_MAX_SPEED: f64 = 500.0; // m/s, bounding box only
pub const TRAJECTORY_SAFETY_BUFFER: f64 = 1.2;
pub const CANVAS_WIDTH_BUFFER: f64 = 1.1;
pub const MAX_SCALE: f64 = 0.5; // px per m
pub const FALLBACK_SCALE: f64 = 0.1; // px per m
pub const HORIZONTAL_MARGIN: f64 = 40.0; // px
pub const VERTICAL_MARGIN: f64 = 50.0; // px, margins and title
pub const GROUND_BAND_HEIGHT: f64 = 30.0; // px

// Termination
pub const OUT_OF_BOUNDS_MARGIN: f64 = 100.0; // m, multiplied by scale

// Glyphs (m, multiplied by scale)
pub const PLANE_NOSE_LENGTH: f64 = 15.0;
pub const PLANE_TAIL_LENGTH: f64 = 10.0;
pub const PLANE_HALF_SPAN: f64 = 5.0;
pub const BOMB_RADIUS: f64 = 3.0;

// Legend
pub const LEGEND_X: f64 = 10.0; // px
pub const LEGEND_FIRST_LINE_Y: f64 = 20.0; // px
pub const LEGEND_LINE_SPACING: f64 = 20.0; // px
pub const LEGEND_FONT_SIZE: f64 = 12.0; // px
