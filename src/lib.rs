pub mod constants;
pub mod control;
pub mod errors;
pub mod render_system;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::config::{
    AccelerationMode, AirResistance, ConfigForm, DropTrigger, SimulationConfig,
};
pub use control::drop_scheduler::DropScheduler;
pub use control::layout::{Layout, Viewport};
pub use control::loop_driver::{
    FrameRecorder, FrameRequest, FrameScheduler, LoopDriver, LoopState, ManualScheduler,
    RenderSink,
};
pub use control::simulation::{SimulationRun, StopReason, TickReport};
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::kinematics::PlaneState;
pub use trajectory_system::projectile::BombState;

// Re-export commonly used items from render_system
pub use render_system::draw::{Color, DrawCommand, Frame};
pub use render_system::renderer::render;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{Telemetry, TelemetryEvent};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
