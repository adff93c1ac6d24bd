pub mod draw;
pub mod renderer;
