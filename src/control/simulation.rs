use log::debug;

use crate::{
    constants::{OUT_OF_BOUNDS_MARGIN, TIME_STEP},
    control::{
        config::SimulationConfig,
        drop_scheduler::DropScheduler,
        layout::{Layout, Viewport},
    },
    trajectory_system::{
        aerodynamics::Aerodynamics, kinematics::PlaneState, projectile::BombState,
    },
    utils::vector2d::Vector2D,
};

/// Why a run stopped ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    AllBombsLanded,
    PlaneOutOfBounds,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Clock value the tick was computed at (before advancing).
    pub time: f64,
    pub released: Option<usize>,
    pub landed: Vec<usize>,
}

/// All mutable state of one run, from `start`/`reset` until the next one.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub config: SimulationConfig,
    pub layout: Layout,
    pub time_step: f64,
    /// Elapsed simulation time (s).
    pub clock: f64,
    pub bombs_released: u32,
    pub plane: PlaneState,
    /// Release order.
    pub bombs: Vec<BombState>,
    scheduler: DropScheduler,
    aerodynamics: Aerodynamics,
}

impl SimulationRun {
    /// Builds a fresh run. The config must already be validated.
    pub fn new(config: &SimulationConfig, viewport: &Viewport) -> Self {
        Self::with_time_step(config, viewport, TIME_STEP)
    }

    pub fn with_time_step(config: &SimulationConfig, viewport: &Viewport, time_step: f64) -> Self {
        let layout = Layout::resolve(viewport, config.altitude);
        let start = Vector2D::new(0.0, layout.ground_level - config.altitude * layout.scale);

        SimulationRun {
            config: config.clone(),
            layout,
            time_step,
            clock: 0.0,
            bombs_released: 0,
            plane: PlaneState::new(
                start,
                config.initial_speed,
                config.launch_angle_rad(),
                config.acceleration_mode,
                config.acceleration,
            ),
            bombs: Vec::new(),
            scheduler: DropScheduler::from_config(config),
            aerodynamics: Aerodynamics::new(config.air_resistance, config.resistance_coefficient),
        }
    }

    pub fn scale(&self) -> f64 {
        self.layout.scale
    }

    pub fn ground_level(&self) -> f64 {
        self.layout.ground_level
    }

    /// Full tick without rendering: integrate, then advance the clock.
    pub fn step(&mut self) -> TickReport {
        let report = self.integrate();
        self.advance_clock();
        report
    }

    /// Plane update, drop check, then bomb updates. The clock is left for
    /// `advance_clock` so a frame rendered in between shows this tick's time.
    pub fn integrate(&mut self) -> TickReport {
        let scale = self.layout.scale;
        let mut report = TickReport {
            time: self.clock,
            ..TickReport::default()
        };

        self.plane.update(self.time_step, scale);

        report.released = self.scheduler.check(
            &self.plane,
            &mut self.bombs,
            &mut self.bombs_released,
            self.clock,
            scale,
        );
        if let Some(index) = report.released {
            let (x, y) = self.physical_position(self.bombs[index].position);
            debug!(
                "Bomb {} released at t={:.2}s, ({:.1} m, {:.1} m)",
                index + 1,
                self.clock,
                x,
                y
            );
        }

        for (index, bomb) in self.bombs.iter_mut().enumerate() {
            if bomb.update(self.time_step, scale, &self.aerodynamics, self.layout.ground_level) {
                report.landed.push(index);
            }
        }
        for &index in &report.landed {
            let (x, _) = self.physical_position(self.bombs[index].position);
            debug!(
                "Bomb {} landed at t={:.2}s, x={:.1} m",
                index + 1,
                self.clock,
                x
            );
        }

        report
    }

    pub fn advance_clock(&mut self) {
        self.clock += self.time_step;
    }

    pub fn all_bombs_landed(&self) -> bool {
        !self.bombs.is_empty()
            && self.bombs_released >= self.config.bomb_count
            && self.bombs.iter().all(|bomb| bomb.landed)
    }

    pub fn plane_out_of_bounds(&self) -> bool {
        let margin = OUT_OF_BOUNDS_MARGIN * self.layout.scale;
        let position = self.plane.position;
        position.x > self.layout.canvas_width + margin
            || position.x < -margin
            || position.y < -margin
            || position.y > self.layout.canvas_height + margin
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.all_bombs_landed() {
            Some(StopReason::AllBombsLanded)
        } else if self.plane_out_of_bounds() {
            Some(StopReason::PlaneOutOfBounds)
        } else {
            None
        }
    }

    /// Canvas position to (meters downrange, meters above ground).
    pub fn physical_position(&self, position: Vector2D) -> (f64, f64) {
        self.layout.to_physical(position.x, position.y)
    }

    pub fn last_bomb(&self) -> Option<&BombState> {
        self.bombs.last()
    }
}
