use std::fmt::Write;

use crate::control::simulation::{SimulationRun, StopReason, TickReport};

#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    BombReleased {
        index: usize,
        time: f64,
        x: f64,
        altitude: f64,
    },
    BombLanded {
        index: usize,
        time: f64,
        x: f64,
    },
    Stopped {
        reason: StopReason,
        time: f64,
    },
}

/// Event log and running maxima for one run.
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    pub events: Vec<TelemetryEvent>,
    max_plane_speed: f64,
    max_plane_altitude: f64,
    ticks: usize,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry::default()
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_distance(meters: f64) -> String {
        if meters.abs() >= 1000.0 {
            format!("{:.2} km", meters / 1000.0)
        } else {
            format!("{:.1} m", meters)
        }
    }

    pub fn collect_data(&mut self, run: &SimulationRun, report: &TickReport) {
        self.ticks += 1;

        let speed = run.plane.get_speed();
        let (_, altitude) = run.physical_position(run.plane.position);
        if speed > self.max_plane_speed {
            self.max_plane_speed = speed;
        }
        if altitude > self.max_plane_altitude {
            self.max_plane_altitude = altitude;
        }

        if let Some(index) = report.released {
            let bomb = &run.bombs[index];
            let (x, altitude) = run.physical_position(bomb.release_position);
            self.events.push(TelemetryEvent::BombReleased {
                index,
                time: bomb.release_time,
                x,
                altitude,
            });
        }
        for &index in &report.landed {
            let (x, _) = run.physical_position(run.bombs[index].position);
            self.events.push(TelemetryEvent::BombLanded {
                index,
                time: report.time,
                x,
            });
        }
    }

    pub fn record_stop(&mut self, reason: StopReason, time: f64) {
        self.events.push(TelemetryEvent::Stopped { reason, time });
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn max_plane_speed(&self) -> f64 {
        self.max_plane_speed
    }

    pub fn max_plane_altitude(&self) -> f64 {
        self.max_plane_altitude
    }

    pub fn releases(&self) -> impl Iterator<Item = &TelemetryEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, TelemetryEvent::BombReleased { .. }))
    }

    pub fn landings(&self) -> impl Iterator<Item = &TelemetryEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, TelemetryEvent::BombLanded { .. }))
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "--- Simulation Summary ---");
        let _ = writeln!(out, "Ticks: {}", self.ticks);
        let _ = writeln!(out, "Max Plane Speed: {:.2} m/s", self.max_plane_speed);
        let _ = writeln!(
            out,
            "Max Plane Altitude: {}",
            Self::format_distance(self.max_plane_altitude)
        );

        let _ = writeln!(out, "\n--- Events ---");
        for event in &self.events {
            let line = match event {
                TelemetryEvent::BombReleased {
                    index,
                    time,
                    x,
                    altitude,
                } => format!(
                    "Bomb {} released at {} ({} downrange, {} up)",
                    index + 1,
                    Self::format_time(*time),
                    Self::format_distance(*x),
                    Self::format_distance(*altitude)
                ),
                TelemetryEvent::BombLanded { index, time, x } => format!(
                    "Bomb {} landed at {} ({} downrange)",
                    index + 1,
                    Self::format_time(*time),
                    Self::format_distance(*x)
                ),
                TelemetryEvent::Stopped { reason, time } => format!(
                    "Simulation stopped at {}: {:?}",
                    Self::format_time(*time),
                    reason
                ),
            };
            let _ = writeln!(out, "{}", line);
        }
        out
    }

    pub fn display_data(&self) {
        print!("{}", self.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{config::SimulationConfig, layout::Viewport};

    #[test]
    fn test_format_helpers() {
        assert_eq!(Telemetry::format_time(14.284), "14.28s");
        assert_eq!(Telemetry::format_time(75.5), "1m 15.50s");
        assert_eq!(Telemetry::format_distance(1428.0), "1.43 km");
        assert_eq!(Telemetry::format_distance(42.26), "42.3 m");
    }

    #[test]
    fn test_collects_release_event() {
        let mut run =
            SimulationRun::new(&SimulationConfig::default(), &Viewport::new(1280.0, 800.0));
        let mut telemetry = Telemetry::new();

        let report = run.step();
        telemetry.collect_data(&run, &report);

        assert_eq!(telemetry.ticks(), 1);
        assert_eq!(telemetry.releases().count(), 1);
        assert_eq!(telemetry.landings().count(), 0);
        assert!(telemetry.max_plane_speed() > 99.0);

        telemetry.record_stop(StopReason::AllBombsLanded, run.clock);
        let summary = telemetry.summary();
        assert!(summary.contains("Bomb 1 released at 0.00s"));
        assert!(summary.contains("AllBombsLanded"));
    }
}
