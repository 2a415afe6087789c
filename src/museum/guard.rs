//! Guard AI: ping-pong waypoint patrol and radius detection with cooldown.
//!
//! Movement (`update`) and detection (`detect_player`) are separate calls so
//! the orchestrator decides when detection runs relative to everything else
//! in the tick.

use glam::Vec2;

use super::geometry::Bounds;

/// Distance at which a guard counts as having reached its waypoint.
pub const ARRIVAL_THRESHOLD: f32 = 5.0;
pub const DEFAULT_SPEED: f32 = 80.0;
pub const DEFAULT_COOLDOWN: f32 = 2.0;
pub const GUARD_SIZE: f32 = 32.0;

#[derive(Clone, Debug)]
pub struct Guard {
    pub position: Vec2,
    pub speed: f32,
    patrol_points: Vec<Vec2>,
    current_patrol_index: usize,
    moving_forward: bool,
    pub detection_radius: f32,
    detection_cooldown: f32,
    pub cooldown_time: f32,
}

impl Guard {
    pub fn new(position: Vec2, detection_radius: f32) -> Self {
        Self {
            position,
            speed: DEFAULT_SPEED,
            patrol_points: Vec::new(),
            current_patrol_index: 0,
            moving_forward: true,
            detection_radius,
            detection_cooldown: 0.0,
            cooldown_time: DEFAULT_COOLDOWN,
        }
    }

    pub fn with_patrol(mut self, points: Vec<Vec2>) -> Self {
        self.set_patrol_points(points);
        self
    }

    /// Replace the route and restart it from the first waypoint.
    pub fn set_patrol_points(&mut self, points: Vec<Vec2>) {
        self.patrol_points = points;
        self.current_patrol_index = 0;
        self.moving_forward = true;
    }

    pub fn patrol_points(&self) -> &[Vec2] {
        &self.patrol_points
    }

    pub fn current_patrol_index(&self) -> usize {
        self.current_patrol_index
    }

    pub fn is_moving_forward(&self) -> bool {
        self.moving_forward
    }

    pub fn detection_cooldown(&self) -> f32 {
        self.detection_cooldown
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::at(self.position, Vec2::splat(GUARD_SIZE))
    }

    /// Tick the detection cooldown down, then walk the patrol.
    pub fn update(&mut self, dt: f32) {
        if self.detection_cooldown > 0.0 {
            self.detection_cooldown = (self.detection_cooldown - dt).max(0.0);
        }
        self.patrol(dt);
    }

    fn patrol(&mut self, dt: f32) {
        match self.patrol_points.len() {
            0 => {}
            1 => self.position = self.patrol_points[0],
            n => {
                let to_target = self.patrol_points[self.current_patrol_index] - self.position;
                let distance = to_target.length();
                if distance < ARRIVAL_THRESHOLD {
                    self.advance_waypoint(n);
                } else {
                    self.position += to_target / distance * self.speed * dt;
                }
            }
        }
    }

    /// Step the index in the current direction; at either end turn around and
    /// step back one so the endpoint is not targeted twice in a row.
    fn advance_waypoint(&mut self, n: usize) {
        if self.moving_forward {
            if self.current_patrol_index + 1 >= n {
                self.current_patrol_index = n - 2;
                self.moving_forward = false;
            } else {
                self.current_patrol_index += 1;
            }
        } else if self.current_patrol_index == 0 {
            self.current_patrol_index = 1;
            self.moving_forward = true;
        } else {
            self.current_patrol_index -= 1;
        }
    }

    /// Pure radius check, debounced: a hit re-arms the cooldown, during which
    /// every call returns `false`.
    pub fn detect_player(&mut self, player: Vec2) -> bool {
        if self.detection_cooldown > 0.0 {
            return false;
        }
        if self.position.distance(player) < self.detection_radius {
            self.detection_cooldown = self.cooldown_time;
            return true;
        }
        false
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Drive a guard until it has arrived `visits` times and record every
    /// index it targeted.
    fn visited_indices(n: usize, visits: usize) -> Vec<usize> {
        let points: Vec<Vec2> = (0..n).map(|i| Vec2::new(i as f32 * 100.0, 0.0)).collect();
        let mut g = Guard::new(points[0], 10.0).with_patrol(points);
        let mut seq = vec![g.current_patrol_index()];
        let mut steps = 0;
        while seq.len() < visits && steps < 100_000 {
            let before = g.current_patrol_index();
            g.update(0.05);
            if g.current_patrol_index() != before {
                seq.push(g.current_patrol_index());
            }
            steps += 1;
        }
        seq
    }

    fn expected_ping_pong(n: usize, len: usize) -> Vec<usize> {
        let mut cycle: Vec<usize> = (0..n).collect();
        cycle.extend((1..n - 1).rev());
        cycle.iter().copied().cycle().take(len).collect()
    }

    proptest! {
        #[test]
        fn prop_patrol_ping_pongs_within_bounds(n in 2usize..7) {
            let visits = 4 * n;
            let seq = visited_indices(n, visits);
            prop_assert_eq!(seq.len(), visits);
            prop_assert!(seq.iter().all(|&i| i < n));
            prop_assert_eq!(seq, expected_ping_pong(n, visits));
        }

        #[test]
        fn prop_cooldown_suppresses_detection(
            cooldown in 0.01f32..10.0,
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
        ) {
            let mut g = Guard::new(Vec2::ZERO, 1000.0);
            g.cooldown_time = cooldown;
            prop_assert!(g.detect_player(Vec2::new(x, y)));
            prop_assert!(g.detection_cooldown() > 0.0);
            prop_assert!(!g.detect_player(Vec2::new(x, y)));
            prop_assert!(!g.detect_player(Vec2::ZERO));
        }
    }
}
