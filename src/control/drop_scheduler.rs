use crate::{
    control::config::{DropTrigger, SimulationConfig},
    trajectory_system::{kinematics::PlaneState, projectile::BombState},
};

/// Decides once per tick whether the plane lets go of another bomb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropScheduler {
    pub trigger: DropTrigger,
    pub interval: f64,
    pub bomb_count: u32,
}

impl DropScheduler {
    pub fn new(trigger: DropTrigger, interval: f64, bomb_count: u32) -> Self {
        DropScheduler {
            trigger,
            interval,
            bomb_count,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        DropScheduler::new(config.drop_trigger, config.drop_interval, config.bomb_count)
    }

    pub fn should_release(
        &self,
        plane: &PlaneState,
        bombs: &[BombState],
        released: u32,
        clock: f64,
        scale: f64,
    ) -> bool {
        if released >= self.bomb_count {
            return false;
        }

        let Some(last) = bombs.last() else {
            return true;
        };

        match self.trigger {
            DropTrigger::Time => clock - last.release_time >= self.interval,
            // Measured against where the last bomb is now, not where it was
            // released; the reference keeps falling after the drop.
            DropTrigger::Distance => {
                plane.position.distance_to(&last.position) / scale >= self.interval
            }
        }
    }

    /// Releases a bomb at the plane if due. Returns the new bomb's index.
    pub fn check(
        &self,
        plane: &PlaneState,
        bombs: &mut Vec<BombState>,
        released: &mut u32,
        clock: f64,
        scale: f64,
    ) -> Option<usize> {
        if !self.should_release(plane, bombs, *released, clock, scale) {
            return None;
        }

        bombs.push(BombState::new(plane.position, plane.velocity, clock));
        *released += 1;
        Some(bombs.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::config::AccelerationMode;
    use crate::utils::vector2d::Vector2D;

    fn plane_at(x: f64, y: f64) -> PlaneState {
        let mut plane = PlaneState::new(
            Vector2D::new(0.0, 0.0),
            100.0,
            0.0,
            AccelerationMode::ConstantVelocity,
            0.0,
        );
        plane.position = Vector2D::new(x, y);
        plane
    }

    #[test]
    fn test_first_release_is_immediate() {
        for trigger in [DropTrigger::Time, DropTrigger::Distance] {
            let scheduler = DropScheduler::new(trigger, 1_000.0, 3);
            let mut bombs = Vec::new();
            let mut released = 0;

            let index = scheduler.check(&plane_at(5.0, 7.0), &mut bombs, &mut released, 0.0, 0.5);

            assert_eq!(index, Some(0));
            assert_eq!(released, 1);
            assert_eq!(bombs[0].position, Vector2D::new(5.0, 7.0));
            assert_eq!(bombs[0].velocity, Vector2D::new(100.0, -0.0));
            assert_eq!(bombs[0].release_time, 0.0);
        }
    }

    #[test]
    fn test_time_trigger_waits_for_interval() {
        let scheduler = DropScheduler::new(DropTrigger::Time, 2.0, 5);
        let mut bombs = Vec::new();
        let mut released = 0;
        let plane = plane_at(0.0, 0.0);

        scheduler.check(&plane, &mut bombs, &mut released, 1.0, 1.0);
        assert_eq!(scheduler.check(&plane, &mut bombs, &mut released, 2.5, 1.0), None);
        assert_eq!(scheduler.check(&plane, &mut bombs, &mut released, 3.0, 1.0), Some(1));
        assert_eq!(bombs[1].release_time, 3.0);
        assert_eq!(released, 2);
    }

    #[test]
    fn test_distance_trigger_uses_physical_units() {
        let scheduler = DropScheduler::new(DropTrigger::Distance, 50.0, 5);
        let mut bombs = vec![BombState::new(Vector2D::new(0.0, 0.0), Vector2D::ZERO, 0.0)];
        let mut released = 1;

        // 20 px at 0.5 px/m is 40 m
        assert_eq!(
            scheduler.check(&plane_at(20.0, 0.0), &mut bombs, &mut released, 1.0, 0.5),
            None
        );
        // 25 px at 0.5 px/m is 50 m
        assert_eq!(
            scheduler.check(&plane_at(25.0, 0.0), &mut bombs, &mut released, 1.0, 0.5),
            Some(1)
        );
    }

    #[test]
    fn test_distance_trigger_measures_against_current_bomb_position() {
        let scheduler = DropScheduler::new(DropTrigger::Distance, 50.0, 5);
        let mut bomb = BombState::new(Vector2D::new(0.0, 0.0), Vector2D::ZERO, 0.0);
        // The bomb has since fallen 30 px straight down.
        bomb.position = Vector2D::new(0.0, 30.0);
        let bombs = vec![bomb];

        // Plane is 40 px from the release point but 50 px from the bomb.
        let plane = plane_at(40.0, 0.0);
        assert!(scheduler.should_release(&plane, &bombs, 1, 1.0, 1.0));
    }

    #[test]
    fn test_never_exceeds_bomb_count() {
        let scheduler = DropScheduler::new(DropTrigger::Time, 0.05, 2);
        let mut bombs = Vec::new();
        let mut released = 0;
        let plane = plane_at(0.0, 0.0);

        for tick in 0..100 {
            scheduler.check(&plane, &mut bombs, &mut released, tick as f64 * 0.05, 1.0);
        }

        assert_eq!(released, 2);
        assert_eq!(bombs.len(), 2);
    }
}
