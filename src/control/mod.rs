pub mod config;
pub mod drop_scheduler;
pub mod layout;
pub mod loop_driver;
pub mod simulation;
